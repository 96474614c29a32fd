//! Foundation types for homegrid.
//!
//! This crate holds the platform-agnostic types shared by the launcher
//! crates: app entries and categories, drag input events, configuration,
//! and error types.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
