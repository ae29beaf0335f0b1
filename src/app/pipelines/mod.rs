pub mod analysis_pipeline;
pub mod extract_pipeline;

pub use analysis_pipeline::AnalysisPipeline;
pub use extract_pipeline::{ExtractPipeline, ExtractionInput};
