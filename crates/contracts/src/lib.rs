//! Wire types shared between the back-office frontend and the POS service.

pub mod domain;
pub mod shared;
