use duckdb::{AccessMode, Config, Connection};

/// Open a DuckDB database file, creating it if needed when the access mode
/// allows writes.
pub fn open(duckdb_path: &str, access_mode: AccessMode) -> Result<Connection, duckdb::Error> {
    let config = Config::default().access_mode(access_mode)?;
    Connection::open_with_flags(duckdb_path, config)
}

/// Double-quote an identifier so that column names coming from a file header
/// can be used as is.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Number of rows currently in a table.
pub fn count_rows(conn: &Connection, table_name: &str) -> Result<i64, duckdb::Error> {
    let sql = format!("SELECT COUNT(*) FROM {};", quote_identifier(table_name));
    conn.query_row(&sql, [], |row| row.get::<usize, i64>(0))
}
