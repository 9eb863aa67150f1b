use clap::Parser;
use geochron::adapters::selector::{IndexSelector, StdinSelector};
use geochron::core::ConfigProvider;
use geochron::domain::ports::AreaSelector;
use geochron::utils::error::ErrorSeverity;
use geochron::utils::{logger, validation::Validate};
use geochron::{
    CliConfig, GeoChronEngine, GeoChronError, GeoChronReport, HttpPipeline, LookupRequest,
    TomlConfig, ViewState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting geochron");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let outcome = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut config) => {
                    config.apply_overrides(args.geocoder, args.throttle_ms);
                    run(&config, &args).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&args, &args).await,
    };

    match outcome {
        Ok((report, precision)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, precision);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ GeoChron lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            if let GeoChronError::LocationNotFound { attempts, .. } = &e {
                for attempt in attempts {
                    if let Err(failure) = &attempt.outcome {
                        tracing::error!("   tier {} '{}': {}", attempt.tier, attempt.query, failure);
                    }
                }
            }
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
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    args: &CliConfig,
) -> geochron::Result<(GeoChronReport, usize)> {
    config.validate()?;

    let request = LookupRequest::new(&args.date, &args.time, args.target()?)?;
    let pipeline = HttpPipeline::from_config(config)?;
    let mut engine = GeoChronEngine::new(pipeline, ViewState::new()).with_zoom(config.zoom());

    let selector: Box<dyn AreaSelector> = match args.area {
        Some(position) => Box::new(IndexSelector::new(position)),
        None => Box::new(StdinSelector::stdin()),
    };

    let report = engine.run(&request, &*selector).await?;
    Ok((report, config.coordinate_precision()))
}

fn print_report(report: &GeoChronReport, precision: usize) {
    println!("📍 Location : {}", report.label);
    if let Some(area) = &report.area {
        println!(
            "   Area     : {}, {}, {} ({})",
            area.office_name, area.district, area.state, area.pincode
        );
    }
    println!(
        "🌐 Latitude : {:.prec$}",
        report.coordinate.latitude(),
        prec = precision
    );
    println!(
        "🌐 Longitude: {:.prec$}",
        report.coordinate.longitude(),
        prec = precision
    );
    println!("🕒 UTC      : {}", report.utc.format("%Y-%m-%d %H:%M:%S"));
    println!("☀️  Solar time: {}", report.solar_time);
}
