//! # Teto Traits
//!
//! Trait definitions for the collaborators the extraction pipeline depends on.
//!
//! This crate contains ONLY trait definitions and their data types.
//! Implementations live in extension crates:
//!
//! - `teto-ext-chrome`: headless Chromium renderer for the live source
//! - `teto-ext-file`: saved pages on disk, for offline runs and tests
//!
//! ## Module Structure
//!
//! - [`render`]: the page-rendering collaborator ([`PageRenderer`])
//! - [`error`]: failures a renderer reports ([`RenderError`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod render;

// Re-export commonly used types
pub use error::RenderError;
pub use render::{PageRenderer, RenderedFragment};
