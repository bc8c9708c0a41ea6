//! Page-aligned slot arenas.
//!
//! The measurement pipeline walks chains embedded in a large, page-aligned
//! block of `u64` slots. Page alignment keeps the mapping from slot index to
//! cache set identical across runs, so latency differences reflect the access
//! pattern rather than allocator placement.

use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

/// Alignment and size granularity for arena allocations, in bytes.
pub const PAGE_SIZE: usize = 16384;

/// A contiguous, page-aligned block of `u64` slots.
///
/// Used both for the test region that chains are built in and for the
/// clutter block that gets read and mutated between timed walks. Slots are
/// zero-initialized on allocation and the block is freed on drop.
///
/// Allocation failure is fatal: there is no smaller footprint worth testing,
/// so the process terminates via [`handle_alloc_error`].
pub struct Arena {
    ptr: NonNull<u64>,
    slots: usize,
    layout: Layout,
}

impl Arena {
    /// Allocate a zeroed arena of `slots` slots, rounded up to whole pages.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero or the byte size overflows; aborts the
    /// process if the allocation itself fails.
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "arena must hold at least one slot");
        let bytes = slots
            .checked_mul(std::mem::size_of::<u64>())
            .and_then(|b| b.checked_next_multiple_of(PAGE_SIZE))
            .unwrap_or_else(|| panic!("arena of {slots} slots overflows the address space"));
        let layout = Layout::from_size_align(bytes, PAGE_SIZE)
            .unwrap_or_else(|_| panic!("invalid arena layout for {bytes} bytes"));

        // SAFETY: layout has non-zero size (slots > 0 rounds up to >= one page).
        let raw = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<u64>()) else {
            handle_alloc_error(layout);
        };

        Self { ptr, slots, layout }
    }

    /// Number of addressable slots.
    pub fn len(&self) -> usize {
        self.slots
    }

    /// Whether the arena holds no slots (never true for a constructed arena).
    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }
}

impl Deref for Arena {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        // SAFETY: ptr is valid for `slots` u64s for the lifetime of self.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.slots) }
    }
}

impl DerefMut for Arena {
    fn deref_mut(&mut self) -> &mut [u64] {
        // SAFETY: ptr is valid and exclusively owned; &mut self guarantees
        // no aliasing slice exists.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.slots) }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated with exactly this layout.
        unsafe { dealloc(self.ptr.as_ptr().cast(), self.layout) }
    }
}

// The arena is a plain owned buffer; nothing in it is tied to a thread.
unsafe impl Send for Arena {}
