pub mod analyzer;
pub mod etl;
pub mod extractor;
pub mod sanitizer;

pub use crate::domain::model::{RunReport, Table, TransformResult};
pub use crate::domain::ports::{AnalyzeConfigProvider, ExtractConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
