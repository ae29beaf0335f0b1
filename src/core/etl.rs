use crate::domain::model::RunReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::{ErrorKind, EtlError, Result};
use crate::utils::monitor::SystemMonitor;

/// Result of a reported run. Failures are values, never panics.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunReport),
    Failed {
        kind: ErrorKind,
        message: String,
        error: EtlError,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            RunOutcome::Completed(_) => None,
            RunOutcome::Failed { kind, .. } => Some(*kind),
        }
    }

    /// The console lines on success, or the single failure message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RunOutcome::Completed(report) => report.lines(),
            RunOutcome::Failed { message, .. } => vec![message.clone()],
        }
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting ETL process...");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract()?;
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data)?;
        tracing::info!(
            "Transformed {} rows x {} columns",
            transformed.table.row_count(),
            transformed.table.column_count()
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Loading data...");
        let report = self.pipeline.load(transformed)?;
        tracing::info!("Output saved to: {}", report.output_path);

        self.monitor.log_final_stats();
        Ok(report)
    }

    /// 執行並將結果輸出到 console；錯誤轉為訊息，不會中止呼叫端
    pub fn run_reported(&self) -> RunOutcome {
        match self.run() {
            Ok(report) => {
                for line in report.lines() {
                    println!("{}", line);
                }
                RunOutcome::Completed(report)
            }
            Err(error) => {
                tracing::error!(
                    "❌ ETL process failed: {} (Kind: {:?}, Severity: {:?})",
                    error,
                    error.kind(),
                    error.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());

                let message = error.user_friendly_message();
                println!("{}", message);
                RunOutcome::Failed {
                    kind: error.kind(),
                    message,
                    error,
                }
            }
        }
    }
}
