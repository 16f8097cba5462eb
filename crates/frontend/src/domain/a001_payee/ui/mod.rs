pub mod create;
pub mod picker;
