use clap::Parser;
use verse_scan::utils::error::{ErrorSeverity, ScanError};
use verse_scan::utils::{logger, validation::Validate};
use verse_scan::{CliConfig, InputSource, ScanEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let log_format = if cli.log_json {
        logger::LogFormat::Json
    } else {
        logger::LogFormat::Compact
    };
    logger::init_logger(log_format, cli.verbose);

    tracing::info!("Starting verse-scan");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Scan failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), ScanError> {
    let settings = cli.load_settings()?;
    settings.validate()?;
    tracing::debug!("Effective settings: {:?}", settings);

    let engine = ScanEngine::new(settings)?;

    if cli.list_meters {
        for meter in engine.catalog().iter() {
            println!("{}\t{}", meter.pattern, meter.name);
        }
        return Ok(());
    }

    let request = InputSource::from_args(&cli.lines, cli.input.as_deref()).read_request()?;
    let output = engine.run_and_render(&request).await?;
    println!("{}", output.trim_end());

    Ok(())
}
