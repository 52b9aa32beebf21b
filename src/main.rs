use clap::Parser;
use tizo_kiosk::{
    arguments::Arguments,
    config,
    logger::{self, LogTag},
    paths, run,
};

/// Main entry point for the TIZO kiosk service
///
/// - `--quote <amount>`: print one custom quote and exit
/// - default: serve the kiosk API until Ctrl-C
#[tokio::main]
async fn main() {
    let args = Arguments::parse();

    if let Some(data_dir) = args.data_dir.clone() {
        if let Err(e) = paths::set_base_directory(data_dir) {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    // Logger needs the logs directory to create its file
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();
    logger::info(LogTag::System, "🚀 TIZO kiosk service starting up...");
    let debug_tags = args.debug_tags();
    if !debug_tags.is_empty() {
        logger::info(
            LogTag::System,
            &format!("Debug logging enabled for: {}", debug_tags.join(", ")),
        );
    }

    let config_path = args.config_path();
    if let Err(e) = config::load_config_from_path(&config_path) {
        logger::error(LogTag::Config, &format!("❌ {}", e));
        std::process::exit(1);
    }
    logger::debug(
        LogTag::Config,
        &format!("Loaded configuration from {}", config_path.display()),
    );

    let mut config = config::get_config_clone();
    args.apply_overrides(&mut config);

    let result = match args.quote.as_deref() {
        Some(raw_amount) => run::run_quote(config, raw_amount).await,
        None => run::run_service(config).await,
    };

    if let Err(e) = result {
        logger::error(LogTag::System, &format!("❌ {:#}", e));
        logger::flush();
        std::process::exit(1);
    }
}
