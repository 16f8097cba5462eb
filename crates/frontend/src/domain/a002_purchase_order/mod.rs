pub mod api;
pub mod delete;
pub mod filter;
pub mod query;
pub mod ui;
