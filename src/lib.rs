pub mod api;
pub mod books;
pub mod cli;
pub mod config;
pub mod db;
pub mod extract;
pub mod logging;
pub mod mcp;
pub mod serde_utils;
pub mod validation;
