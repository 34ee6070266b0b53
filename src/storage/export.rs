use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, Int64Array, StringArray, TimestampNanosecondArray};
use arrow::compute::take;
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use arrow_ord::sort::sort_to_indices;

use super::{DATETIME_LABEL, Dataset, Error};

/// Values that can be laid out as an Arrow column
pub trait ColumnValue {
    fn data_type() -> DataType;
    fn to_array(values: Vec<&Self>) -> ArrayRef;
}

impl ColumnValue for f64 {
    fn data_type() -> DataType {
        DataType::Float64
    }

    fn to_array(values: Vec<&Self>) -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(values.into_iter().copied()))
    }
}

impl ColumnValue for i64 {
    fn data_type() -> DataType {
        DataType::Int64
    }

    fn to_array(values: Vec<&Self>) -> ArrayRef {
        Arc::new(Int64Array::from_iter_values(values.into_iter().copied()))
    }
}

impl ColumnValue for String {
    fn data_type() -> DataType {
        DataType::Utf8
    }

    fn to_array(values: Vec<&Self>) -> ArrayRef {
        Arc::new(StringArray::from_iter_values(values.into_iter().map(String::as_str)))
    }
}

impl<V: ColumnValue> Dataset<V> {
    pub fn schema(&self) -> Arc<Schema> {
        let mut fields = vec![Field::new(
            DATETIME_LABEL,
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            false,
        )];
        fields.extend(self.names().into_iter().map(|name| Field::new(name, V::data_type(), false)));
        Arc::new(Schema::new(fields))
    }

    /// Columnar snapshot of the dataset in arrival order
    pub fn to_record_batch(&self) -> Result<RecordBatch, Error> {
        let reference = &self.series()[0];
        let nanos = reference
            .points()
            .iter()
            .map(|p| {
                p.timestamp
                    .and_utc()
                    .timestamp_nanos_opt()
                    .ok_or_else(|| Error::InvalidTimestamp(format!("{} is outside the nanosecond range", p.timestamp)))
            })
            .collect::<Result<Vec<i64>, Error>>()?;

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.series().len() + 1);
        columns.push(Arc::new(TimestampNanosecondArray::from(nanos)));
        for s in self.series() {
            columns.push(V::to_array(s.points().iter().map(|p| &p.value).collect()));
        }

        Ok(RecordBatch::try_new(self.schema(), columns)?)
    }

    /// Columnar snapshot with rows reordered by ascending timestamp
    pub fn to_sorted_record_batch(&self) -> Result<RecordBatch, Error> {
        let batch = self.to_record_batch()?;
        let indices = sort_to_indices(batch.column(0).as_ref(), None, None)?;

        let columns: Vec<_> = batch
            .columns()
            .iter()
            .map(|col| take(col.as_ref(), &indices, None))
            .collect::<Result<_, _>>()?;

        Ok(RecordBatch::try_new(batch.schema(), columns)?)
    }
}
