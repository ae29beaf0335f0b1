use crate::domain::model::{RunReport, TransformResult};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Removes a previously written file. A missing file is not an error.
    fn remove_file(&self, path: &str) -> Result<()>;
}

pub trait ExtractConfigProvider: Send + Sync {
    fn source_path(&self) -> &str;
    fn template_path(&self) -> &str;
    fn output_path(&self) -> &str;
}

pub trait AnalyzeConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn summary_path(&self) -> Option<&str>;
}

pub trait Pipeline {
    type Extracted;

    fn extract(&self) -> Result<Self::Extracted>;
    fn transform(&self, data: Self::Extracted) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<RunReport>;
}
