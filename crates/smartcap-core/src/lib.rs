//! Domain types and seams for the SmartCap landing page backend.

pub mod config;
pub mod error;
pub mod lead;
pub mod notify;
pub mod page_view;
pub mod stats;
pub mod store;
