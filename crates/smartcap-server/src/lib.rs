pub mod app;
pub mod error;
pub mod extract;
pub mod notify;
pub mod routes;
pub mod state;
