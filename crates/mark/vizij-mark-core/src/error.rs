//! Errors produced while resolving or applying mark channels.

use thiserror::Error;

use crate::channel::Axis;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkError {
    /// `x2`/`y2`/`z2`: ranges are expressed as a position plus an extent.
    #[error("{channel} is not a valid channel - use {replacement} instead.")]
    InvalidChannel {
        channel: String,
        replacement: &'static str,
    },
    #[error("Cannot find channel: {0}")]
    UnknownChannel(String),
    #[error("channel '{channel}': '{value}' is not a number")]
    InvalidNumber { channel: String, value: String },
    #[error("'{0}' is not a valid HTML color")]
    InvalidColor(String),
    #[error("channel '{channel}' needs mesh bounds but the target has no mesh")]
    MissingMesh { channel: String },
    #[error("channel '{channel}' needs a material but the target has none")]
    MissingMaterial { channel: String },
    #[error("channel '{channel}': mesh has zero extent on the {axis} axis")]
    DegenerateBounds { channel: String, axis: Axis },
    #[error("encoding: {0}")]
    Encoding(String),
}
