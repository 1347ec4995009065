//! Portfolio catalog for the studio site: project records, validation,
//! filter/sort/paginate queries, pluggable stores and contact intake.

pub mod catalog;
pub mod contact;
pub mod error;
pub mod factory;
pub mod query;
pub mod seed;
pub mod store;
pub mod types;
pub mod validate;

pub use catalog::ProjectCatalog;
pub use catalog::ProjectStats;
pub use error::CatalogError;
