use clap::Parser;
use tabular_etl::config::Command;
use tabular_etl::utils::{logger, validation::Validate};
use tabular_etl::{AnalysisPipeline, CliConfig, EtlEngine, ExtractPipeline, LocalStorage, RunOutcome};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting tabular-etl CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.severity().exit_code());
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::default();
    let outcome = match config.command {
        Command::Extract(args) => {
            EtlEngine::new_with_monitoring(ExtractPipeline::new(storage, args), config.monitor)
                .run_reported()
        }
        Command::Analyze(args) => {
            EtlEngine::new_with_monitoring(AnalysisPipeline::new(storage, args), config.monitor)
                .run_reported()
        }
    };

    // 根據錯誤嚴重程度決定退出碼
    if let RunOutcome::Failed { error, .. } = outcome {
        std::process::exit(error.severity().exit_code());
    }
}
