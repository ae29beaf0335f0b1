use crate::adapters::csv_table;
use crate::core::extractor::ColumnExtractor;
use crate::core::{ExtractConfigProvider, Pipeline, Result, RunReport, Storage, Table, TransformResult};
use crate::domain::model::JobKind;

pub struct ExtractionInput {
    pub source: Table,
    pub template: Table,
}

/// Reads source and template CSVs, projects and cleans, writes one CSV.
pub struct ExtractPipeline<S: Storage, C: ExtractConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    extractor: ColumnExtractor,
}

impl<S: Storage, C: ExtractConfigProvider> ExtractPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            extractor: ColumnExtractor::new(),
        }
    }

    fn read_csv(&self, path: &str) -> Result<Table> {
        let data = self.storage.read_file(path)?;
        csv_table::read_table(path, &data)
    }
}

impl<S: Storage, C: ExtractConfigProvider> Pipeline for ExtractPipeline<S, C> {
    type Extracted = ExtractionInput;

    fn extract(&self) -> Result<ExtractionInput> {
        // 兩個輸入檔都讀完才開始轉換
        let source = self.read_csv(self.config.source_path())?;
        let template = self.read_csv(self.config.template_path())?;

        tracing::debug!(
            "Source has {} columns, template has {}",
            source.column_count(),
            template.column_count()
        );

        Ok(ExtractionInput { source, template })
    }

    fn transform(&self, data: ExtractionInput) -> Result<TransformResult> {
        let table = self.extractor.extract(&data.source, &data.template)?;
        Ok(TransformResult {
            table,
            summary: None,
        })
    }

    fn load(&self, result: TransformResult) -> Result<RunReport> {
        let output_path = self.config.output_path();
        let bytes = csv_table::write_table(&result.table)?;

        tracing::debug!("Writing {} bytes to {}", bytes.len(), output_path);
        self.storage.write_file(output_path, &bytes)?;

        Ok(RunReport {
            kind: JobKind::Extract,
            output_path: output_path.to_string(),
            columns: result.table.column_count(),
            rows: result.table.row_count(),
            summary: None,
            summary_path: None,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub(crate) struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        failing_write: Option<String>,
    }

    impl MockStorage {
        pub(crate) fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), content.as_bytes().to_vec());
            self
        }

        /// Writes to `path` fail with an I/O error.
        pub(crate) fn failing_write_to(mut self, path: &str) -> Self {
            self.failing_write = Some(path.to_string());
            self
        }

        pub(crate) fn exists(&self, path: &str) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        pub(crate) fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().unwrap();
            files.get(path).cloned().ok_or_else(|| EtlError::FileNotFound {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.failing_write.as_deref() == Some(path) {
                return Err(EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn remove_file(&self, path: &str) -> Result<()> {
            self.files.lock().unwrap().remove(path);
            Ok(())
        }
    }

    struct MockConfig;

    impl ExtractConfigProvider for MockConfig {
        fn source_path(&self) -> &str {
            "source.csv"
        }

        fn template_path(&self) -> &str {
            "template.csv"
        }

        fn output_path(&self) -> &str {
            "out.csv"
        }
    }

    #[test]
    fn test_extract_transform_load() {
        let storage = MockStorage::default()
            .with_file("source.csv", "A,B,C,D\n$1,b1,(c1),d1\n2,b2,c 2,d2\n3,b3,c3,d3\n")
            .with_file("template.csv", "C,A\nx,y\n");
        let pipeline = ExtractPipeline::new(storage.clone(), MockConfig);

        let input = pipeline.extract().unwrap();
        let result = pipeline.transform(input).unwrap();
        let report = pipeline.load(result).unwrap();

        assert_eq!(report.columns, 2);
        assert_eq!(report.rows, 3);
        assert_eq!(
            storage.get_file("out.csv").unwrap(),
            "C,A\nc1,1\nc 2,2\nc3,3\n"
        );
    }

    #[test]
    fn test_missing_template_file() {
        let storage = MockStorage::default().with_file("source.csv", "A\n1\n");
        let pipeline = ExtractPipeline::new(storage, MockConfig);

        assert!(matches!(
            pipeline.extract(),
            Err(EtlError::FileNotFound { path, .. }) if path == "template.csv"
        ));
    }

    #[test]
    fn test_schema_mismatch_writes_nothing() {
        let storage = MockStorage::default()
            .with_file("source.csv", "A,B\n1,2\n")
            .with_file("template.csv", "A,X,Y\n");
        let pipeline = ExtractPipeline::new(storage.clone(), MockConfig);

        let input = pipeline.extract().unwrap();
        assert!(matches!(
            pipeline.transform(input),
            Err(EtlError::SchemaMismatch { missing }) if missing == vec!["X", "Y"]
        ));
        assert!(!storage.exists("out.csv"));
    }
}
