use crate::core::sanitizer;
use crate::domain::model::{Table, Value};
use crate::utils::error::{EtlError, Result};

/// Projects a wide source table onto the column list of a template table.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnExtractor;

impl ColumnExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 只參考 template 的欄位名稱，資料列內容不使用
    pub fn extract(&self, source: &Table, template: &Table) -> Result<Table> {
        let target_columns = template.column_names();

        let missing: Vec<String> = target_columns
            .iter()
            .filter(|name| !source.has_column(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            tracing::debug!("Template columns absent from source: {:?}", missing);
            return Err(EtlError::SchemaMismatch { missing });
        }

        let projected = source.select(&target_columns)?;
        tracing::debug!(
            "Projected {} of {} source columns",
            projected.column_count(),
            source.column_count()
        );

        Ok(projected.map_values(|v| Value::Text(sanitizer::clean(v))))
    }
}
