//! Sprite poses an avatar can be drawn in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when looking up a pose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoseError {
    #[error("Unknown pose '{0}'")]
    UnknownName(String),
    #[error("Invalid canvas id {0} (expected 0..={max})", max = AvatarPose::MAX_CANVAS_ID)]
    UnknownCanvasId(u8),
}

/// One of the twelve frames of the avatar sprite sheet.
///
/// The canvas id is the frame's position in the sheet: three frames per
/// facing direction, in the order down, left, right, up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvatarPose {
    IdleDown0,
    WalkDown0,
    WalkDown1,
    IdleLeft0,
    WalkLeft0,
    WalkLeft1,
    IdleRight0,
    WalkRight0,
    WalkRight1,
    IdleUp0,
    WalkUp0,
    WalkUp1,
}

impl AvatarPose {
    pub const MAX_CANVAS_ID: u8 = 11;

    /// All poses in canvas order.
    pub const ALL: [AvatarPose; 12] = [
        AvatarPose::IdleDown0,
        AvatarPose::WalkDown0,
        AvatarPose::WalkDown1,
        AvatarPose::IdleLeft0,
        AvatarPose::WalkLeft0,
        AvatarPose::WalkLeft1,
        AvatarPose::IdleRight0,
        AvatarPose::WalkRight0,
        AvatarPose::WalkRight1,
        AvatarPose::IdleUp0,
        AvatarPose::WalkUp0,
        AvatarPose::WalkUp1,
    ];

    pub fn canvas_id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            AvatarPose::IdleDown0 => "IdleDown0",
            AvatarPose::WalkDown0 => "WalkDown0",
            AvatarPose::WalkDown1 => "WalkDown1",
            AvatarPose::IdleLeft0 => "IdleLeft0",
            AvatarPose::WalkLeft0 => "WalkLeft0",
            AvatarPose::WalkLeft1 => "WalkLeft1",
            AvatarPose::IdleRight0 => "IdleRight0",
            AvatarPose::WalkRight0 => "WalkRight0",
            AvatarPose::WalkRight1 => "WalkRight1",
            AvatarPose::IdleUp0 => "IdleUp0",
            AvatarPose::WalkUp0 => "WalkUp0",
            AvatarPose::WalkUp1 => "WalkUp1",
        }
    }

    pub fn from_canvas_id(canvas_id: u8) -> Result<Self, PoseError> {
        Self::ALL.get(canvas_id as usize).copied().ok_or(PoseError::UnknownCanvasId(canvas_id))
    }

    pub fn iter() -> impl Iterator<Item = AvatarPose> {
        Self::ALL.into_iter()
    }
}

impl FromStr for AvatarPose {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter().find(|pose| pose.name() == s).ok_or_else(|| PoseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for AvatarPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
