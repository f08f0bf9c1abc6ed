use polars::prelude::*;

/// True for the integer and floating point dtypes a mean can be taken over.
pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Reads a numeric column as `f64`, treating `NaN` the same as a missing value.
pub(crate) fn float_values(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let as_float = column.cast(&DataType::Float64)?;
    Ok(as_float
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}
