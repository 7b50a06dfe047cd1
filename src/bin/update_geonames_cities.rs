use std::error::Error;

use log::{error, info};
use megacity::db::prod_db::ProdDb;

/// Run this job every week
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    let archive = ProdDb::geonames_cities();
    match archive.run() {
        Ok(summary) => {
            info!(
                "Done, {} rows loaded, {} countries without a megacity",
                summary.rows_inserted, summary.countries_without_megacity
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
