use crate::db::geonames::cities_archive::GeonamesCitiesArchive;

pub struct ProdDb {}

impl ProdDb {
    /// Weekly job finding the countries without a megacity.
    pub fn geonames_cities() -> GeonamesCitiesArchive {
        GeonamesCitiesArchive {
            url: "https://public.opendatasoft.com/api/explore/v2.0/catalog/datasets/geonames-all-cities-with-a-population-1000/exports/csv".to_string(),
            api_key: None,
            timeout: None,
            duckdb_path: "./database.duckdb".to_string(),
            table_name: "Geonames".to_string(),
            output_path: "./results.tsv".to_string(),
        }
    }
}
