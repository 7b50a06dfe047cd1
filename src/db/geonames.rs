pub mod cities_archive;
pub mod report;
pub mod schema;
