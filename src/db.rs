pub mod geonames;
pub mod prod_db;
