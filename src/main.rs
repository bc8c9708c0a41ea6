//! Command-line entry point: run the full pipeline and print one summary
//! line to stdout.

use log::{info, LevelFilter};

use cacheprobe::{
    find_cache_line_size, find_jump, find_rest_spots, Config, Summary, TrialContext,
};

fn main() {
    let verbose = std::env::args().nth(1).is_some_and(|arg| arg == "--verbose");
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let cfg = Config::default();
    let mut ctx = TrialContext::new(&cfg);

    info!("measuring cache associativity and size");
    let rest_spots = find_rest_spots(&mut ctx, &cfg);
    let jump = find_jump(&mut ctx, &cfg, &rest_spots);

    info!("measuring cache line size");
    let line_stride = find_cache_line_size(&mut ctx, &cfg);

    println!(
        "{}",
        Summary::from_parts(&cfg, &rest_spots, jump, line_stride)
    );
}
