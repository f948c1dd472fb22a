//! Catalogs of avatar traits.
//!
//! This module provides:
//! - A shared `Catalog` trait for ordered, immutable descriptor lists
//! - `LayerCatalog` for the stacking order of layers
//! - `PatternCatalog` for the pattern variants of each layer
//! - `PalettePatternCatalog` for the palettes of each pattern, also indexed
//!   by palette code
//!
//! Catalogs validate their input on construction and never expose a
//! partially built state.

mod error;
mod layer;
mod palette;
mod pattern;
mod traits;

// Re-export all public items from submodules
pub use error::{CatalogError, LookupError};
pub use layer::LayerCatalog;
pub use palette::PalettePatternCatalog;
pub use pattern::PatternCatalog;
pub use traits::Catalog;
