// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod filter;
pub mod model;
pub mod sort;
pub mod store;
