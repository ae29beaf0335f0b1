use crate::domain::model::{Column, Table, Value};
use crate::utils::error::{EtlError, Result};

/// 解析 CSV (首列為標題)；`origin` 只用於錯誤訊息
pub fn read_table(origin: &str, data: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(EtlError::EmptyInput {
            path: origin.to_string(),
        });
    }

    let mut values: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, field) in values.iter_mut().zip(record.iter()) {
            column.push(Value::parse(field));
        }
    }

    tracing::debug!(
        "Parsed {} with {} columns and {} rows",
        origin,
        headers.len(),
        values.first().map_or(0, Vec::len)
    );

    Table::new(
        headers
            .into_iter()
            .zip(values)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )
}

/// Serializes header plus rows. No index column is written.
pub fn write_table(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
