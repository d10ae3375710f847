//! Conversion from `polars` frames into [`Dataset`].
use polars::prelude::*;

use std::path::Path;

use crate::error::{Result, TreeError};
use super::dataset::Dataset;
use super::value::Value;


impl Dataset {
    /// Convert a `polars::DataFrame` into a [`Dataset`].
    ///
    /// String and boolean columns become `Value::Text`,
    /// integer columns become `Value::Integer`,
    /// float columns become `Value::Real` and
    /// date columns become `Value::Integer` day numbers.
    /// Nulls are rejected since no value is imputed.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let columns = data.get_columns()
            .iter()
            .map(column_values)
            .collect::<Result<Vec<_>>>()?;

        let names = data.get_columns()
            .iter()
            .map(|series| series.name().to_string());

        let n_sample = data.height();
        let mut dataset = Dataset::new(names)?;
        for row in 0..n_sample {
            let values = columns.iter()
                .map(|col| col[row].clone())
                .collect::<Vec<_>>();
            dataset.push(values)?;
        }

        Ok(dataset)
    }


    /// Read a CSV file with a header row into a [`Dataset`].
    pub fn from_csv<P>(file: P) -> Result<Self>
        where P: AsRef<Path>
    {
        let data = CsvReader::from_path(file.as_ref())?
            .has_header(true)
            .finish()?;

        Self::from_dataframe(&data)
    }
}


fn column_values(series: &Series) -> Result<Vec<Value>> {
    let name = series.name();
    let dtype = series.dtype();

    if dtype.is_integer() {
        let series = series.cast(&DataType::Int64)?;
        return collect(name, series.i64()?.into_iter(), Value::Integer);
    }

    if dtype.is_float() {
        let series = series.cast(&DataType::Float64)?;
        return collect(name, series.f64()?.into_iter(), Value::Real);
    }

    match dtype {
        DataType::Utf8 => {
            collect(name, series.utf8()?.into_iter(), Value::from)
        },
        DataType::Boolean => {
            collect(name, series.bool()?.into_iter(), |b| Value::Text(b.to_string()))
        },
        DataType::Date => {
            let series = series.to_physical_repr()
                .cast(&DataType::Int64)?;
            collect(name, series.i64()?.into_iter(), Value::Integer)
        },
        _ => Err(TreeError::UnsupportedDtype {
            column: name.to_string(),
            dtype: dtype.to_string(),
        }),
    }
}


fn collect<T, I, F>(name: &str, values: I, convert: F) -> Result<Vec<Value>>
    where I: Iterator<Item = Option<T>>,
          F: Fn(T) -> Value,
{
    values.enumerate()
        .map(|(row, value)| {
            value.map(&convert)
                .ok_or_else(|| TreeError::MissingValue {
                    row,
                    column: name.to_string(),
                })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_dtype() {
        let s1 = Series::new("color", &["red", "blue"]);
        let s2 = Series::new("count", &[3_i32, 4]);
        let s3 = Series::new("length", &[1.5_f64, 2.5]);
        let s4 = Series::new("flag", &[true, false]);
        let df = DataFrame::new(vec![s1, s2, s3, s4]).unwrap();

        let data = Dataset::from_dataframe(&df).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.schema().names(), &["color", "count", "length", "flag"]);
        assert_eq!(data[0][0], Value::from("red"));
        assert_eq!(data[1][1], Value::Integer(4));
        assert_eq!(data[0][2], Value::Real(1.5));
        assert_eq!(data[1][3], Value::from("false"));
    }

    #[test]
    fn rejects_nulls() {
        let s1 = Series::new("x", &[Some(1.0_f64), None]);
        let df = DataFrame::new(vec![s1]).unwrap();

        let err = Dataset::from_dataframe(&df).unwrap_err();
        assert!(matches!(err, TreeError::MissingValue { row: 1, .. }));
    }
}
