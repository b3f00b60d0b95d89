use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::{Error, ErrorKind, Result};

/// Tabular input that may carry a `colors` and/or a `values` column.
pub trait Table {
    fn colors(&self) -> Option<Vec<Color>>;
    fn values(&self) -> Option<Vec<Option<f64>>>;
}

#[derive(Debug, Default, Deserialize)]
struct TableFile {
    colors: Option<Vec<Color>>,
    values: Option<Vec<toml::Value>>,
}

/// A table read from a TOML document with top level `colors` and `values`
/// arrays.
///
/// ```toml
/// colors = ["red", "#00ff00"]
/// values = [1, 2.5, nan, "NA"]
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TomlTable {
    colors: Option<Vec<Color>>,
    values: Option<Vec<Option<f64>>>,
}

impl TomlTable {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|err| {
            let msg = format!("{} ({})", err.message.as_deref().unwrap_or(""), path.display());
            err.with_msg(&msg)
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(content).map_err(|err| {
            Error::new(ErrorKind::InvalidTable, &format!("could not read table: {}", err))
        })?;

        let values = file
            .values
            .map(|column| column.iter().map(cell_value).collect::<Result<Vec<_>>>())
            .transpose()?;

        log::debug!(
            "table has {} colors and {} values",
            file.colors.as_ref().map_or(0, Vec::len),
            values.as_ref().map_or(0, Vec::len)
        );

        Ok(TomlTable {
            colors: file.colors,
            values,
        })
    }
}

impl Table for TomlTable {
    fn colors(&self) -> Option<Vec<Color>> {
        self.colors.clone()
    }

    fn values(&self) -> Option<Vec<Option<f64>>> {
        self.values.clone()
    }
}

fn is_missing_marker(s: &str) -> bool {
    matches!(s.trim(), "" | "NA" | "nan" | "NaN")
}

fn cell_value(cell: &toml::Value) -> Result<Option<f64>> {
    match cell {
        toml::Value::Integer(num) => Ok(Some(*num as f64)),
        toml::Value::Float(num) if num.is_nan() => Ok(None),
        toml::Value::Float(num) => Ok(Some(*num)),
        toml::Value::String(s) if is_missing_marker(s) => Ok(None),
        other => Err(Error::new(
            ErrorKind::InvalidTable,
            &format!("values have to be numbers or \"NA\", not {}", other),
        )),
    }
}

/// Parses a comma separated list of values. Empty entries, `NA` and `nan`
/// are missing values.
pub fn parse_value_list(list: &str) -> Result<Vec<Option<f64>>> {
    list.split(',')
        .map(|entry| {
            if is_missing_marker(entry) {
                return Ok(None);
            }
            entry.trim().parse::<f64>().map(Some).map_err(|_| {
                Error::new(
                    ErrorKind::InvalidTable,
                    &format!("'{}' is not a number", entry.trim()),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn both_columns() {
        let table = TomlTable::parse(
            r##"
            colors = ["red", "#00ff00"]
            values = [1, 2.5, nan, "NA", ""]
            "##,
        )
        .unwrap();

        assert_eq!(
            table.colors(),
            Some(vec![
                Color::Named("red".to_owned()),
                Color::Hex("#00ff00".to_owned())
            ])
        );
        assert_eq!(
            table.values(),
            Some(vec![Some(1.0), Some(2.5), None, None, None])
        );
    }

    #[test]
    fn missing_columns() {
        let table = TomlTable::parse("").unwrap();
        assert_eq!(table.colors(), None);
        assert_eq!(table.values(), None);
    }

    #[test]
    fn bad_cells() {
        let err = TomlTable::parse("values = [1, true]").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidTable));

        let err = TomlTable::parse("colors = [\"nocolor\"]").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidTable));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "values = [3, 4]").unwrap();

        let table = TomlTable::load(file.path()).unwrap();
        assert_eq!(table.values(), Some(vec![Some(3.0), Some(4.0)]));
    }

    #[test]
    fn value_list() {
        assert_eq!(
            parse_value_list("1, 2.5,,NA,-3").unwrap(),
            vec![Some(1.0), Some(2.5), None, None, Some(-3.0)]
        );
        let err = parse_value_list("1,two").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidTable));
    }
}
