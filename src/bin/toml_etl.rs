use clap::Parser;
use tabular_etl::utils::{logger, validation::Validate};
use tabular_etl::{AnalysisPipeline, EtlEngine, ExtractPipeline, JobConfig, LocalStorage, RunOutcome};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Run extraction and analysis jobs described in a TOML file")]
struct Args {
    /// Path to TOML job file
    #[arg(short, long, default_value = "etl-job.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based ETL tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match JobConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.severity().exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        println!("✅ Dry run complete. Nothing was read or written.");
        return;
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::default();
    let mut exit_code = 0;

    if let Some(extract) = config.extract.clone() {
        let engine = EtlEngine::new_with_monitoring(
            ExtractPipeline::new(storage.clone(), extract),
            monitor_enabled,
        );
        if let RunOutcome::Failed { error, .. } = engine.run_reported() {
            exit_code = exit_code.max(error.severity().exit_code());
        }
    }

    if let Some(analyze) = config.analyze.clone() {
        let engine = EtlEngine::new_with_monitoring(
            AnalysisPipeline::new(storage.clone(), analyze),
            monitor_enabled,
        );
        if let RunOutcome::Failed { error, .. } = engine.run_reported() {
            exit_code = exit_code.max(error.severity().exit_code());
        }
    }

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

fn display_config_summary(config: &JobConfig) {
    println!("📋 Job Summary:");
    println!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }

    if let Some(extract) = &config.extract {
        println!(
            "  Extract: {} (template {}) -> {}",
            extract.source, extract.template, extract.output
        );
    }

    if let Some(analyze) = &config.analyze {
        println!("  Analyze: {} -> {}", analyze.input, analyze.output);
        if let Some(summary) = &analyze.summary {
            println!("  Summary: {}", summary);
        }
    }

    println!();
}
