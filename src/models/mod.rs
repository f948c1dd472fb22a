//! Data models for avatar traits (layers, patterns, palettes, poses)

mod layer;
mod palette;
mod pattern;
mod pose;

// Re-export all public types
pub use layer::{LayerDescriptor, LayerRef};
pub use palette::{PaletteDescriptor, PaletteRef, PatternPaletteDescriptor, TraitNames};
pub use pattern::{PatternDescriptor, PatternRef};
pub use pose::{AvatarPose, PoseError};
