//! homegrid placement and reordering engine.
//!
//! Holds the three app collections of a home-screen launcher (catalog, dock,
//! paged home grid), the index-based move algorithm driven by drag gestures,
//! the library search/filter projection, and layout persistence. This crate
//! has zero platform dependencies; the OS package catalog and durable storage
//! are injected through the [`catalog::AppCatalog`] and
//! [`persistence::LayoutPersistence`] traits.

// Re-exports from homegrid-types (foundation types).
pub use homegrid_types::app;
pub use homegrid_types::config;
pub use homegrid_types::error;
pub use homegrid_types::input;

pub mod catalog;
pub mod drag;
pub mod filter;
pub mod launcher;
pub mod library;
pub mod persistence;
pub mod placement;
pub mod refresh;
