//! Model Context Protocol (MCP) server.
//!
//! Exposes notes, action items, the extraction engine and Open Library
//! lookups as MCP tools, over Streamable HTTP (nested into the API router at
//! `/mcp`) or over stdio (`jot mcp`).
//!
//! - **server**: [`McpServer`], generic over `D: Database`
//! - **service**: transport setup
//! - **tools**: one module per tool group, each with its own router

pub mod server;
mod service;
pub mod tools;


pub use server::McpServer;
pub use service::{create_mcp_service, serve_stdio};
