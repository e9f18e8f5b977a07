// Service exports
pub mod loader;
pub mod postgres;

pub use loader::{load_catalog, parse_catalog, LoadReport, LoaderError, ParsedCatalog};
pub use postgres::{PostgresClient, PostgresError};
