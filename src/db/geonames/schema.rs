use csv::StringRecord;
use duckdb::types::Value;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::utils::lib_duckdb::quote_identifier;

/// The only column stored as a number, everything else is text.
pub const POPULATION_COLUMN: &str = "population";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    /// Type of a column given its name in the header.  Case sensitive.
    pub fn for_column(name: &str) -> ColumnType {
        if name == POPULATION_COLUMN {
            ColumnType::Integer
        } else {
            ColumnType::Text
        }
    }

    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "BIGINT",
            ColumnType::Text => "VARCHAR",
        }
    }
}

/// Table layout derived from the header of the csv file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<(String, ColumnType)>,
}

impl TableSchema {
    pub fn from_header<I, S>(header: I) -> Result<TableSchema>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<(String, ColumnType)> = header
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                (name.to_string(), ColumnType::for_column(name))
            })
            .collect();
        if columns.is_empty() {
            return Err(Error::Schema("no columns in header".to_string()));
        }
        Ok(TableSchema { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn create_table_sql(&self, table_name: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            quote_identifier(table_name),
            self.columns
                .iter()
                .map(|(name, typ)| format!("{} {}", quote_identifier(name), typ.sql_type()))
                .join(", ")
        )
    }

    pub fn insert_sql(&self, table_name: &str) -> String {
        format!(
            "INSERT INTO {} VALUES ({});",
            quote_identifier(table_name),
            std::iter::repeat("?").take(self.len()).join(", ")
        )
    }

    /// Convert a csv record into the values to bind, one per column.
    /// `line` is only used for error reporting.
    pub fn to_values(&self, record: &StringRecord, line: u64) -> Result<Vec<Value>> {
        if record.len() != self.len() {
            return Err(Error::Insertion {
                line,
                reason: format!("expected {} fields, found {}", self.len(), record.len()),
            });
        }
        self.columns
            .iter()
            .zip(record.iter())
            .map(|((name, typ), field)| match typ {
                ColumnType::Text => Ok(Value::Text(field.to_string())),
                ColumnType::Integer if field.trim().is_empty() => Ok(Value::Null),
                ColumnType::Integer => {
                    field
                        .trim()
                        .parse::<i64>()
                        .map(Value::BigInt)
                        .map_err(|_| Error::Insertion {
                            line,
                            reason: format!("invalid {} value '{}'", name, field),
                        })
                }
            })
            .collect()
    }
}
