pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_window;
pub mod deferred;
pub mod error;
pub mod number_format;
pub mod pagination;
