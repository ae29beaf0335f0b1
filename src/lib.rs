pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::{AnalysisPipeline, ExtractPipeline};
pub use config::cli::LocalStorage;
pub use config::toml_config::{AnalyzeJobConfig, ExtractJobConfig, JobConfig};
pub use crate::core::analyzer::{analyze_sales, SalesAnalyzer};
pub use crate::core::etl::{EtlEngine, RunOutcome};
pub use crate::core::extractor::ColumnExtractor;
pub use crate::core::sanitizer::clean;
pub use domain::model::{Column, RunReport, SalesSummary, Table, Value};
pub use utils::error::{ErrorKind, EtlError, Result};

/// Extracts the template's columns from `source_file` into `output_file`.
///
/// Never fails: success and failure are both reported on the console and
/// returned as a [`RunOutcome`].
pub fn extract_matching_columns(
    source_file: &str,
    target_template_file: &str,
    output_file: &str,
) -> RunOutcome {
    let config = ExtractJobConfig {
        source: source_file.to_string(),
        template: target_template_file.to_string(),
        output: output_file.to_string(),
    };
    EtlEngine::new(ExtractPipeline::new(LocalStorage::default(), config)).run_reported()
}
