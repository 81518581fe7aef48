//! solar-fleet entry point: CLI wiring, snapshot loading, and report output.

use std::process;

use clap::Parser;

use solar_fleet::cli::Args;
use solar_fleet::engine::FleetReport;
use solar_fleet::io::load_snapshot;
use solar_fleet::logging::init_logging;

fn main() {
    let args = Args::parse();

    // Load config: --config takes priority, then --preset, then the demo preset
    let config = match args.resolve_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    init_logging(&config.logging.level, args.verbose);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let snapshot = match load_snapshot(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    for issue in snapshot.validate() {
        tracing::warn!(%issue, "snapshot issue");
    }

    let viewer = match config.viewer(&snapshot.sites) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Start API server if requested
    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_fleet::api::AppState::new(snapshot, viewer));
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(solar_fleet::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
        return;
    }

    let report = FleetReport::build(&snapshot, &viewer);
    print!("{report}");
}
