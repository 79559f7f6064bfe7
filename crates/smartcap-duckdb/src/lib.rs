pub mod backend;
pub mod leads;
pub mod page_views;
pub mod schema;
pub mod store_impl;

pub use backend::DuckDbBackend;

/// Re-exported for raw statements against [`DuckDbBackend::conn_for_test`].
pub use duckdb;
