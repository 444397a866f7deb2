//! Config handling

use tracing::log::LevelFilter;

/// Module levels applied outside debug mode.
const QUIET_MODULES: [(&str, LevelFilter); 7] = [
    ("tracing", LevelFilter::Warn),
    ("rustls", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("h2", LevelFilter::Info),
    ("reqwest", LevelFilter::Info),
    ("sqlx", LevelFilter::Warn),
    ("sea_orm", LevelFilter::Warn),
];

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new()
        .with_level(level)
        .with_module_level("dailyart", level);
    if !debug {
        for (module, module_level) in QUIET_MODULES {
            logger = logger.with_module_level(module, module_level);
        }
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}
