//! Channel names and their resolution into a fixed set of effects.
//!
//! Names are resolved once, when an encoding is parsed. After that the mark
//! dispatches on [`Channel`] instead of re-matching strings.
//!
//!   "x" | "y" | "z"                      -> Position(axis)
//!   "width" | "height" | "depth"         -> Extent(axis)
//!   "xoffset" | "yoffset" | "zoffset"    -> Offset(axis)
//!   "xoffsetpct" | ...                   -> OffsetPct(axis)
//!   "xrotation" | ...                    -> Rotation(axis)
//!   "color" | "opacity" | "size"
//!
//! `x2`, `y2` and `z2` are reserved and always rejected.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::MarkError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into `[x, y, z]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Absolute local position along the axis, reached by translating.
    Position(Axis),
    /// Rendered size along the axis (`width`, `height`, `depth`).
    Extent(Axis),
    /// Local position along the axis, in chart units.
    Offset(Axis),
    /// Local position along the axis, as a multiple of the scaled mesh size.
    OffsetPct(Axis),
    Color,
    Opacity,
    /// Uniform scale fitting the largest rendered dimension.
    Size,
    /// Local Euler angle in degrees.
    Rotation(Axis),
}

impl Channel {
    /// Every accepted channel, in canonical order.
    pub const ALL: [Channel; 18] = [
        Channel::Position(Axis::X),
        Channel::Position(Axis::Y),
        Channel::Position(Axis::Z),
        Channel::Extent(Axis::X),
        Channel::Extent(Axis::Y),
        Channel::Extent(Axis::Z),
        Channel::Offset(Axis::X),
        Channel::Offset(Axis::Y),
        Channel::Offset(Axis::Z),
        Channel::OffsetPct(Axis::X),
        Channel::OffsetPct(Axis::Y),
        Channel::OffsetPct(Axis::Z),
        Channel::Color,
        Channel::Opacity,
        Channel::Size,
        Channel::Rotation(Axis::X),
        Channel::Rotation(Axis::Y),
        Channel::Rotation(Axis::Z),
    ];

    /// Resolve a channel name.
    pub fn parse(name: &str) -> Result<Self, MarkError> {
        let channel = match name {
            "x" => Channel::Position(Axis::X),
            "y" => Channel::Position(Axis::Y),
            "z" => Channel::Position(Axis::Z),
            "width" => Channel::Extent(Axis::X),
            "height" => Channel::Extent(Axis::Y),
            "depth" => Channel::Extent(Axis::Z),
            "xoffset" => Channel::Offset(Axis::X),
            "yoffset" => Channel::Offset(Axis::Y),
            "zoffset" => Channel::Offset(Axis::Z),
            "xoffsetpct" => Channel::OffsetPct(Axis::X),
            "yoffsetpct" => Channel::OffsetPct(Axis::Y),
            "zoffsetpct" => Channel::OffsetPct(Axis::Z),
            "color" => Channel::Color,
            "opacity" => Channel::Opacity,
            "size" => Channel::Size,
            "xrotation" => Channel::Rotation(Axis::X),
            "yrotation" => Channel::Rotation(Axis::Y),
            "zrotation" => Channel::Rotation(Axis::Z),
            "x2" | "y2" | "z2" => {
                return Err(MarkError::InvalidChannel {
                    channel: name.to_string(),
                    replacement: reserved_replacement(name),
                })
            }
            other => return Err(MarkError::UnknownChannel(other.to_string())),
        };
        Ok(channel)
    }

    /// Canonical channel name.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Position(Axis::X) => "x",
            Channel::Position(Axis::Y) => "y",
            Channel::Position(Axis::Z) => "z",
            Channel::Extent(Axis::X) => "width",
            Channel::Extent(Axis::Y) => "height",
            Channel::Extent(Axis::Z) => "depth",
            Channel::Offset(Axis::X) => "xoffset",
            Channel::Offset(Axis::Y) => "yoffset",
            Channel::Offset(Axis::Z) => "zoffset",
            Channel::OffsetPct(Axis::X) => "xoffsetpct",
            Channel::OffsetPct(Axis::Y) => "yoffsetpct",
            Channel::OffsetPct(Axis::Z) => "zoffsetpct",
            Channel::Color => "color",
            Channel::Opacity => "opacity",
            Channel::Size => "size",
            Channel::Rotation(Axis::X) => "xrotation",
            Channel::Rotation(Axis::Y) => "yrotation",
            Channel::Rotation(Axis::Z) => "zrotation",
        }
    }

    /// Whether the channel's value is a color literal rather than a number.
    #[inline]
    pub fn takes_color(self) -> bool {
        matches!(self, Channel::Color)
    }

    /// Channels that derive scale or offset from the target's mesh bounds.
    #[inline]
    pub fn needs_mesh_bounds(self) -> bool {
        matches!(
            self,
            Channel::Extent(_) | Channel::OffsetPct(_) | Channel::Size
        )
    }

    /// Channels that read or write the material color.
    #[inline]
    pub fn writes_material(self) -> bool {
        matches!(self, Channel::Color | Channel::Opacity)
    }
}

fn reserved_replacement(name: &str) -> &'static str {
    match name {
        "x2" => "x, and width",
        "y2" => "y, and height",
        _ => "z, and depth",
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = MarkError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::parse(s)
    }
}

// Serde support: serialize as the channel name
impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D>(deserializer: D) -> Result<Channel, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Channel::parse(&s).map_err(de::Error::custom)
    }
}
