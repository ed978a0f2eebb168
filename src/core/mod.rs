//! Core types & traits: domain-agnostic contracts for tools and their failures.

pub mod error;
pub mod tool;
