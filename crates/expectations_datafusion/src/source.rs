//! The DataFusion-backed [`DataSource`] implementation.

use crate::{SourceConfig, TableFormat};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::prelude::{CsvReadOptions, ParquetReadOptions, SessionContext};
use datafusion::scalar::ScalarValue;
use expectations_core::{Column, DataSource, Row, SourceError, SourceResult, Value};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// A [`DataSource`] over an embedded DataFusion session.
///
/// Owns a current-thread tokio runtime and blocks on every query, so it must
/// be used from synchronous code only.
pub struct DataFusionSource {
    ctx: SessionContext,
    runtime: Runtime,
}

impl DataFusionSource {
    /// Builds a session and registers every table in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Connection`] when the runtime cannot be built
    /// or a file cannot be registered.
    pub fn connect(config: &SourceConfig) -> SourceResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SourceError::Connection(e.to_string()))?;
        let ctx = SessionContext::new();

        for table in config.tables() {
            let path = table.path.to_string_lossy().to_string();
            info!(table = table.name.as_str(), path = path.as_str(), "Registering table");
            let registration = match table.format {
                TableFormat::Csv => runtime.block_on(ctx.register_csv(
                    &table.name,
                    &path,
                    CsvReadOptions::new(),
                )),
                TableFormat::Parquet => runtime.block_on(ctx.register_parquet(
                    &table.name,
                    &path,
                    ParquetReadOptions::default(),
                )),
            };
            registration.map_err(|e| SourceError::Connection(e.to_string()))?;
        }

        Ok(Self { ctx, runtime })
    }
}

impl DataSource for DataFusionSource {
    fn describe(&self, table: &str) -> SourceResult<Vec<Column>> {
        let query = format!("SELECT * FROM {table} LIMIT 0");
        let df = self
            .runtime
            .block_on(self.ctx.sql(&query))
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("not found") {
                    SourceError::TableNotFound(table.to_string())
                } else {
                    SourceError::query(message)
                }
            })?;

        Ok(df
            .schema()
            .fields()
            .iter()
            .map(|field| Column::new(field.name(), field.data_type().to_string()))
            .collect())
    }

    fn execute(&self, query: &str) -> SourceResult<Vec<Row>> {
        debug!(query, "Executing query");
        let batches: Vec<RecordBatch> = self
            .runtime
            .block_on(async { self.ctx.sql(query).await?.collect().await })
            .map_err(|e| SourceError::query(e.to_string()))?;

        let mut rows = Vec::new();
        for batch in &batches {
            for row_idx in 0..batch.num_rows() {
                let mut row = Row::with_capacity(batch.num_columns());
                for col_idx in 0..batch.num_columns() {
                    let scalar = ScalarValue::try_from_array(batch.column(col_idx), row_idx)
                        .map_err(|e| SourceError::UnexpectedShape(e.to_string()))?;
                    row.push(to_value(scalar));
                }
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

fn to_value(scalar: ScalarValue) -> Value {
    if scalar.is_null() {
        return Value::Null;
    }
    match scalar {
        ScalarValue::Boolean(Some(v)) => Value::Bool(v),
        ScalarValue::Int8(Some(v)) => Value::Int(v.into()),
        ScalarValue::Int16(Some(v)) => Value::Int(v.into()),
        ScalarValue::Int32(Some(v)) => Value::Int(v.into()),
        ScalarValue::Int64(Some(v)) => Value::Int(v),
        ScalarValue::UInt8(Some(v)) => Value::Int(v.into()),
        ScalarValue::UInt16(Some(v)) => Value::Int(v.into()),
        ScalarValue::UInt32(Some(v)) => Value::Int(v.into()),
        ScalarValue::UInt64(Some(v)) => match i64::try_from(v) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Text(v.to_string()),
        },
        ScalarValue::Float32(Some(v)) => Value::Float(v.into()),
        ScalarValue::Float64(Some(v)) => Value::Float(v),
        ScalarValue::Utf8(Some(v))
        | ScalarValue::LargeUtf8(Some(v))
        | ScalarValue::Utf8View(Some(v)) => Value::Text(v),
        other => Value::Text(other.to_string()),
    }
}
