pub mod a001_payee;
pub mod a002_purchase_order;
pub mod common;
