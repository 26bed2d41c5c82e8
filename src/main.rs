use clap::Parser;
use roster_etl::utils::error::ErrorSeverity;
use roster_etl::utils::{logger, validation::Validate};
use roster_etl::{CliConfig, EtlEngine, EtlError, LocalStorage, RosterPipeline, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting roster-etl CLI");

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        match TomlConfig::from_file(&path) {
            Ok(file) => config = config.with_file_config(file),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let print_band = config.print_band;
    let storage = LocalStorage::new(".".to_string());

    let pipeline = match RosterPipeline::open(storage, config).await {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };

    let mut engine = EtlEngine::new(pipeline);
    match engine.run().await {
        Ok(report) => {
            if print_band {
                for musician in &report.roster {
                    println!("{}", musician);
                }
            }
            println!("{}", report.summary);
            if let Some(path) = report.export_path {
                println!("📁 Roster exported to: {}", path);
            }
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: EtlError) -> ! {
    tracing::error!(
        "❌ Roster ETL failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
