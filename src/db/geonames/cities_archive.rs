use std::path::Path;
use std::time::Duration;

use csv::StringRecord;
use duckdb::{params, params_from_iter, AccessMode, Connection};
use log::info;

use crate::db::geonames::report::{write_tsv, CountryReportRow};
use crate::db::geonames::schema::TableSchema;
use crate::error::{Error, Result};
use crate::utils::lib_duckdb::{open, quote_identifier};
use crate::utils::lib_http::{download_text, request_headers};

/// A country with a city at least this big doesn't make it in the report.
pub const MEGACITY_THRESHOLD: i64 = 10_000_000;

/// Everything the weekly job needs to know: where the data comes from, where
/// it is kept and where the report goes.
#[derive(Debug, Clone)]
pub struct GeonamesCitiesArchive {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
    pub duckdb_path: String,
    pub table_name: String,
    pub output_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_inserted: usize,
    pub countries_without_megacity: usize,
}

impl GeonamesCitiesArchive {
    /// Get the csv export of the cities dataset.
    pub fn download_csv(&self) -> Result<String> {
        let headers = request_headers(self.api_key.as_deref())?;
        download_text(&self.url, headers, self.timeout)
    }

    /// Create the cities table if it's not there already.  An existing table
    /// is left alone, even if its columns don't match `schema`.
    pub fn create_table(&self, conn: &Connection, schema: &TableSchema) -> Result<()> {
        conn.execute_batch(&schema.create_table_sql(&self.table_name))?;
        info!("Table created successfully.");
        Ok(())
    }

    /// Append the records to the table, no deduplication.  Stops at the first
    /// record that doesn't fit the schema.  Returns the number of rows inserted.
    pub fn insert_rows<I>(
        &self,
        conn: &Connection,
        schema: &TableSchema,
        records: I,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = csv::Result<StringRecord>>,
    {
        let mut stmt = conn.prepare(&schema.insert_sql(&self.table_name))?;
        let mut n = 0;
        for record in records {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let values = schema.to_values(&record, line)?;
            stmt.execute(params_from_iter(values))?;
            n += 1;
        }
        Ok(n)
    }

    /// Load the semicolon separated `csv_data` into DuckDB.  The table
    /// creation and all the inserts are committed together, or not at all.
    pub fn update_duckdb(&self, conn: &mut Connection, csv_data: &str) -> Result<usize> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .has_headers(true)
            .from_reader(csv_data.as_bytes());
        let schema = TableSchema::from_header(rdr.headers()?)?;

        let tx = conn.transaction()?;
        self.create_table(&tx, &schema)?;
        let n = self.insert_rows(&tx, &schema, rdr.records())?;
        tx.commit()?;
        Ok(n)
    }

    /// Countries in the table without a single city with a population of
    /// [`MEGACITY_THRESHOLD`] or more, sorted by country name.
    pub fn countries_without_megacity(&self, conn: &Connection) -> Result<Vec<CountryReportRow>> {
        let query = format!(
            r#"
SELECT
    country_code,
    MIN(cou_name_en) AS country_name
FROM {table}
WHERE country_code NOT IN (
    SELECT country_code
    FROM {table}
    WHERE population >= ?
    GROUP BY country_code
)
GROUP BY country_code
ORDER BY country_name, country_code;
    "#,
            table = quote_identifier(&self.table_name)
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![MEGACITY_THRESHOLD], |row| {
            Ok(CountryReportRow {
                country_code: row.get::<usize, String>(0)?,
                country_name: row.get::<usize, String>(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Error::from)
    }

    /// Run the whole job: download, load, query and write the report.
    /// Nothing is touched on disk if the download fails.
    pub fn run(&self) -> Result<RunSummary> {
        let csv_data = self.download_csv()?;
        info!("Downloaded {} bytes from {}", csv_data.len(), self.url);

        let mut conn = open(&self.duckdb_path, AccessMode::ReadWrite)?;
        let rows_inserted = self.update_duckdb(&mut conn, &csv_data)?;
        info!(
            "Database created and populated successfully, {} rows inserted.",
            rows_inserted
        );

        let countries = self.countries_without_megacity(&conn)?;
        write_tsv(&countries, Path::new(&self.output_path))?;
        info!(
            "Results saved to the output file successfully, {} countries without a megacity.",
            countries.len()
        );

        Ok(RunSummary {
            rows_inserted,
            countries_without_megacity: countries.len(),
        })
    }
}
