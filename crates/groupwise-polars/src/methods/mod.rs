//! Column access shared by the frame operations

pub(crate) mod boxcox;
pub(crate) mod grouping;
pub(crate) mod outliers;

use crate::{Error, Result};
use groupwise_core::DataError;
use polars::prelude::*;

/// Look up a configured column, naming its role when it is missing
pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str, role: &'static str) -> Result<&'a Column> {
    df.column(name).map_err(|_| {
        Error::Data(DataError::MissingColumn {
            column: name.to_string(),
            role,
        })
    })
}

/// Numeric column as nullable `f64`s
pub(crate) fn float_values(df: &DataFrame, name: &str, role: &'static str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name, role)?;
    let column = match column.dtype() {
        DataType::Float64 => column.clone(),
        dt if dt.is_primitive_numeric() => column.cast(&DataType::Float64)?,
        DataType::Null => column.cast(&DataType::Float64)?,
        dt => {
            return Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: "numeric".to_string(),
                got: format!("{dt:?}"),
            });
        }
    };
    Ok(column.f64()?.into_iter().collect())
}

/// Group column rendered as text, one key per row
///
/// Integral numbers print without a fractional part so that a `Lot` column of
/// `1, 2, 3` keys groups as `"1"`, `"2"`, `"3"`.
pub(crate) fn group_keys(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = require_column(df, name, "group_col")?;
    let keys: Vec<Option<String>> = match column.dtype() {
        DataType::String => column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|k| k.map(str::to_string))
            .collect(),
        dt if dt.is_primitive_numeric() => float_values(df, name, "group_col")?
            .into_iter()
            .map(|v| v.map(format_numeric_key))
            .collect(),
        _ => column
            .cast(&DataType::String)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|k| k.map(str::to_string))
            .collect(),
    };

    keys.into_iter()
        .enumerate()
        .map(|(row, key)| {
            key.ok_or_else(|| {
                Error::Data(DataError::NullValue {
                    column: name.to_string(),
                    row,
                })
            })
        })
        .collect()
}

fn format_numeric_key(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Row indices per group key, in first-appearance order
pub(crate) fn rows_by_group(keys: &[String]) -> Vec<(String, Vec<usize>)> {
    let mut order: Vec<(String, Vec<usize>)> = Vec::new();
    let mut index = std::collections::HashMap::new();
    for (row, key) in keys.iter().enumerate() {
        let slot = *index.entry(key.as_str()).or_insert_with(|| {
            order.push((key.clone(), Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(row);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keys_drop_trailing_zero() {
        assert_eq!(format_numeric_key(3.0), "3");
        assert_eq!(format_numeric_key(-2.0), "-2");
        assert_eq!(format_numeric_key(2.5), "2.5");
    }

    #[test]
    fn test_rows_by_group_first_appearance() {
        let keys: Vec<String> = ["B", "A", "B", "C", "A"].iter().map(|s| s.to_string()).collect();
        let groups = rows_by_group(&keys);
        assert_eq!(
            groups,
            vec![
                ("B".to_string(), vec![0, 2]),
                ("A".to_string(), vec![1, 4]),
                ("C".to_string(), vec![3]),
            ]
        );
    }

    #[test]
    fn test_string_value_column_is_type_mismatch() {
        let df = df!["Value" => ["a", "b"]].unwrap();
        assert!(matches!(
            float_values(&df, "Value", "value_col"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_integer_column_is_cast() {
        let df = df!["Value" => [1i64, 2, 3]].unwrap();
        assert_eq!(
            float_values(&df, "Value", "value_col").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }
}
