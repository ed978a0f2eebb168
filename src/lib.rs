//! raindrop-mcp: Raindrop.io bookmark operations exposed as MCP tools.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
