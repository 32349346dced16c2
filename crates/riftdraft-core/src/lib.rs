// Library root: re-exports all modules so integration tests and the app
// binary can access the crate's public API.

pub mod champion;
pub mod config;
pub mod draft;
pub mod insight;
pub mod tables;
