use crate::core::{AnalyzeConfigProvider, ExtractConfigProvider};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_distinct_output, validate_file_extensions, validate_non_empty_string, validate_path,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub job: JobInfo,
    pub extract: Option<ExtractJobConfig>,
    pub analyze: Option<AnalyzeJobConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractJobConfig {
    pub source: String,
    pub template: String,
    #[serde(default = "default_extract_output")]
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeJobConfig {
    pub input: String,
    #[serde(default = "default_analyze_output")]
    pub output: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_extract_output() -> String {
    "extracted_data.csv".to_string()
}

fn default_analyze_output() -> String {
    "sales_analysis.csv".to_string()
}

impl JobConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ExtractConfigProvider for ExtractJobConfig {
    fn source_path(&self) -> &str {
        &self.source
    }

    fn template_path(&self) -> &str {
        &self.template
    }

    fn output_path(&self) -> &str {
        &self.output
    }
}

impl AnalyzeConfigProvider for AnalyzeJobConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn summary_path(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

impl Validate for JobConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("job.name", &self.job.name)?;

        if self.extract.is_none() && self.analyze.is_none() {
            return Err(EtlError::ConfigError {
                message: "Job must define an [extract] or [analyze] section".to_string(),
            });
        }

        // 驗證抽取路徑
        if let Some(extract) = &self.extract {
            validate_path("extract.source", &extract.source)?;
            validate_path("extract.template", &extract.template)?;
            validate_path("extract.output", &extract.output)?;
            validate_distinct_output(
                "extract.output",
                &extract.output,
                &[extract.source.as_str(), extract.template.as_str()],
            )?;
        }

        // 驗證分析路徑
        if let Some(analyze) = &self.analyze {
            validate_path("analyze.input", &analyze.input)?;
            validate_path("analyze.output", &analyze.output)?;
            validate_distinct_output("analyze.output", &analyze.output, &[analyze.input.as_str()])?;
            if let Some(summary) = &analyze.summary {
                validate_file_extensions("analyze.summary", &[summary.as_str()], &["json"])?;
            }
        }

        Ok(())
    }
}
