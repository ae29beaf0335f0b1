use crate::adapters::csv_table;
use crate::core::analyzer::SalesAnalyzer;
use crate::core::{AnalyzeConfigProvider, Pipeline, Result, RunReport, Storage, Table, TransformResult};
use crate::domain::model::JobKind;

pub struct AnalysisPipeline<S: Storage, C: AnalyzeConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    analyzer: SalesAnalyzer,
}

impl<S: Storage, C: AnalyzeConfigProvider> AnalysisPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            analyzer: SalesAnalyzer::new(),
        }
    }
}

impl<S: Storage, C: AnalyzeConfigProvider> Pipeline for AnalysisPipeline<S, C> {
    type Extracted = Table;

    fn extract(&self) -> Result<Table> {
        let path = self.config.input_path();
        let data = self.storage.read_file(path)?;
        csv_table::read_table(path, &data)
    }

    fn transform(&self, data: Table) -> Result<TransformResult> {
        let (table, summary) = self.analyzer.analyze(&data)?;
        tracing::debug!(
            "Total revenue {}, total cost {}, total margin {}",
            summary.total_revenue,
            summary.total_cost,
            summary.total_margin
        );
        Ok(TransformResult {
            table,
            summary: Some(summary),
        })
    }

    fn load(&self, result: TransformResult) -> Result<RunReport> {
        let output_path = self.config.output_path();
        let bytes = csv_table::write_table(&result.table)?;

        // 先把摘要序列化，失敗時不留下任何輸出
        let summary_json = result
            .summary
            .as_ref()
            .map(serde_json::to_string_pretty)
            .transpose()?;

        self.storage.write_file(output_path, &bytes)?;

        let summary_path = self.config.summary_path();
        match (summary_path, &summary_json) {
            (Some(path), Some(json)) => {
                if let Err(e) = self.storage.write_file(path, json.as_bytes()) {
                    // 摘要寫入失敗時撤回已寫出的分析結果
                    if let Err(cleanup) = self.storage.remove_file(output_path) {
                        tracing::warn!("Could not remove {}: {}", output_path, cleanup);
                    }
                    return Err(e);
                }
                tracing::debug!("Summary written to {}", path);
            }
            (None, Some(json)) => println!("{}", json),
            _ => {}
        }

        Ok(RunReport {
            kind: JobKind::Analyze,
            output_path: output_path.to_string(),
            columns: result.table.column_count(),
            rows: result.table.row_count(),
            summary: result.summary,
            summary_path: summary_path.map(str::to_string),
        })
    }
}
