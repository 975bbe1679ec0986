//! Infrastructure layer - Storage and hashing implementations

pub mod logging;
pub mod user;
