//! Common types shared by all remote entities

pub mod remote_id;

// Re-exports
pub use remote_id::RemoteId;
