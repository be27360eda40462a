//! CSV loading into a polars `DataFrame`
//!
//! Lines starting with `#` are comments and every field is trimmed. A column
//! whose non-empty fields all parse as `f64` becomes `Float64`; any other
//! column stays `String`. Empty fields and non-finite numbers (`NaN`, `inf`)
//! are nulls.

use crate::Result;
use polars::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a CSV file with a header row
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let df = read_csv_from_reader(file)?;
    tracing::debug!(path = %path.display(), rows = df.height(), columns = df.width(), "table loaded");
    Ok(df)
}

/// Read CSV text from any reader
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<DataFrame> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for record in rdr.records() {
        let record = record?;
        for (idx, column) in cells.iter_mut().enumerate() {
            let field = record.get(idx).unwrap_or("");
            column.push((!field.is_empty()).then(|| field.to_string()));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, fields)| typed_series(name, fields).into())
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn typed_series(name: &str, fields: Vec<Option<String>>) -> Series {
    let parsed: Option<Vec<Option<f64>>> = fields
        .iter()
        .map(|field| match field {
            Some(text) => text
                .parse::<f64>()
                .ok()
                .map(|v| v.is_finite().then_some(v)),
            None => Some(None),
        })
        .collect();

    match parsed {
        Some(values) => Series::new(PlSmallStr::from(name), values),
        None => Series::new(PlSmallStr::from(name), fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_types_and_nulls() {
        let text = "# measurement export\nGroup,Value,Note\nA, 1.5 ,ok\nB,2,\n# trailing comment\nA,,late\n";
        let df = read_csv_from_reader(text.as_bytes()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.column("Group").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Value").unwrap().dtype(), &DataType::Float64);

        let values: Vec<Option<f64>> = df.column("Value").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1.5), Some(2.0), None]);
        assert_eq!(df.column("Note").unwrap().null_count(), 1);
    }

    #[test]
    fn test_non_finite_numbers_are_nulls() {
        let text = "Group,Value\nA,1\nA,NaN\nB,inf\nB,-Infinity\nB,4\n";
        let df = read_csv_from_reader(text.as_bytes()).unwrap();

        assert_eq!(df.column("Value").unwrap().dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = df.column("Value").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1.0), None, None, None, Some(4.0)]);
    }

    #[test]
    fn test_numeric_group_column_stays_numeric() {
        let df = read_csv_from_reader("Lot,Value\n1,3.0\n2,4.0\n".as_bytes()).unwrap();
        assert_eq!(df.column("Lot").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        assert!(read_csv_from_reader("A,B\n1,2,3\n".as_bytes()).is_err());
    }
}
