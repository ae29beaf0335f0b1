pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod args {
    use crate::core::{AnalyzeConfigProvider, ExtractConfigProvider};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_distinct_output, validate_file_extensions, validate_path, Validate};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "tabular-etl")]
    #[command(about = "Sales metrics and template-driven column extraction for CSV files")]
    pub struct CliConfig {
        #[command(subcommand)]
        pub command: Command,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Copy the template's columns out of the source file, cleaning every cell
        Extract(ExtractArgs),
        /// Add margin, growth and cost-ratio columns to monthly sales data
        Analyze(AnalyzeArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct ExtractArgs {
        /// Wide source CSV
        #[arg(long, default_value = "source.csv")]
        pub source: String,

        /// CSV whose header defines the output columns
        #[arg(long, default_value = "template.csv")]
        pub template: String,

        #[arg(long, default_value = "extracted_data.csv")]
        pub output: String,
    }

    #[derive(Debug, Clone, Args)]
    pub struct AnalyzeArgs {
        /// CSV with month, revenue and cost columns
        #[arg(long)]
        pub input: String,

        #[arg(long, default_value = "sales_analysis.csv")]
        pub output: String,

        /// Write the summary as JSON here instead of stdout
        #[arg(long)]
        pub summary: Option<String>,
    }

    impl ExtractConfigProvider for ExtractArgs {
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

    impl AnalyzeConfigProvider for AnalyzeArgs {
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

    impl Validate for ExtractArgs {
        fn validate(&self) -> Result<()> {
            validate_path("source", &self.source)?;
            validate_path("template", &self.template)?;
            validate_path("output", &self.output)?;
            validate_distinct_output("output", &self.output, &[self.source.as_str(), self.template.as_str()])
        }
    }

    impl Validate for AnalyzeArgs {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_path("output", &self.output)?;
            validate_distinct_output("output", &self.output, &[self.input.as_str()])?;
            if let Some(summary) = &self.summary {
                validate_path("summary", summary)?;
                validate_file_extensions("summary", &[summary.as_str()], &["json"])?;
                validate_distinct_output("summary", summary, &[self.input.as_str(), self.output.as_str()])?;
            }
            Ok(())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            match &self.command {
                Command::Extract(args) => args.validate(),
                Command::Analyze(args) => args.validate(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_extract_defaults() {
            let config = CliConfig::try_parse_from(["tabular-etl", "extract"]).unwrap();
            match config.command {
                Command::Extract(args) => {
                    assert_eq!(args.source_path(), "source.csv");
                    assert_eq!(args.template_path(), "template.csv");
                    assert_eq!(args.output_path(), "extracted_data.csv");
                }
                other => panic!("unexpected command {:?}", other),
            }
        }

        #[test]
        fn test_analyze_requires_input() {
            assert!(CliConfig::try_parse_from(["tabular-etl", "analyze"]).is_err());

            let config = CliConfig::try_parse_from([
                "tabular-etl",
                "--verbose",
                "analyze",
                "--input",
                "sales.csv",
                "--summary",
                "summary.json",
            ])
            .unwrap();
            assert!(config.verbose);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_output_cannot_overwrite_source() {
            let config = CliConfig::try_parse_from([
                "tabular-etl",
                "extract",
                "--source",
                "data.csv",
                "--output",
                "data.csv",
            ])
            .unwrap();
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(feature = "cli")]
pub use args::{AnalyzeArgs, CliConfig, Command, ExtractArgs};
