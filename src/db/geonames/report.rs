use std::path::Path;

use csv::{Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReportRow {
    pub country_code: String,
    pub country_name: String,
}

#[cfg(windows)]
const LINE_TERMINATOR: Terminator = Terminator::CRLF;
#[cfg(not(windows))]
const LINE_TERMINATOR: Terminator = Terminator::Any(b'\n');

/// Write the rows as a tab separated file with a `country_code`,
/// `country_name` header.  An existing file is overwritten.
pub fn write_tsv(rows: &[CountryReportRow], path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(LINE_TERMINATOR)
        .has_headers(false)
        .from_path(path)?;
    // header goes in by hand so it is there even with no rows
    wtr.write_record(["country_code", "country_name"])?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::fs;

    use super::*;

    fn row(code: &str, name: &str) -> CountryReportRow {
        CountryReportRow {
            country_code: code.to_string(),
            country_name: name.to_string(),
        }
    }

    #[test]
    fn write_rows() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.tsv");
        write_tsv(&[row("AD", "Andorra"), row("DE", "Germany")], &path)?;
        let content = fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec!["country_code\tcountry_name", "AD\tAndorra", "DE\tGermany"]
        );
        Ok(())
    }

    #[test]
    fn write_no_rows() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.tsv");
        write_tsv(&[], &path)?;
        let content = fs::read_to_string(&path)?;
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["country_code\tcountry_name"]);
        Ok(())
    }

    #[test]
    fn overwrite_previous_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.tsv");
        write_tsv(
            &[row("AD", "Andorra"), row("BE", "Belgium"), row("CH", "Switzerland")],
            &path,
        )?;
        write_tsv(&[row("DE", "Germany")], &path)?;
        let content = fs::read_to_string(&path)?;
        assert_eq!(
            content.lines().collect::<Vec<_>>(),
            vec!["country_code\tcountry_name", "DE\tGermany"]
        );
        Ok(())
    }

    #[test]
    fn tabs_in_names_are_quoted() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.tsv");
        let rows = vec![row("XX", "Some\tLand")];
        write_tsv(&rows, &path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(&path)?;
        let back: Vec<CountryReportRow> = rdr.deserialize().collect::<Result<_, _>>()?;
        assert_eq!(back, rows);
        Ok(())
    }
}
