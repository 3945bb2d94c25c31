//! Cooperative branch performance ranking.
//!
//! This crate ranks cooperative branches with TOPSIS multi-criteria analysis
//! and derives rule-based (optionally LLM-enhanced) recommendations from the
//! ranking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
