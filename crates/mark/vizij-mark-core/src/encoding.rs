//! Parsed channel assignments.
//!
//! An encoding is written as a JSON object mapping channel names to values:
//!   { "x": "120", "width": 40, "color": "#ff8800", "opacity": "0.5" }
//! Values may be strings or numbers. Key order is kept and is the order in
//! which channels are applied.

use serde::ser::SerializeMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::channel::Channel;
use crate::color::{parse_html_color, ParsedColor};
use crate::error::MarkError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChannelValue {
    Number(f32),
    Color(ParsedColor),
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::Number(n) => write!(f, "{n}"),
            ChannelValue::Color(c) => {
                let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                write!(
                    f,
                    "#{:02X}{:02X}{:02X}",
                    byte(c.rgb[0]),
                    byte(c.rgb[1]),
                    byte(c.rgb[2])
                )?;
                if let Some(a) = c.alpha {
                    write!(f, "{:02X}", byte(a))?;
                }
                Ok(())
            }
        }
    }
}

/// A channel resolved together with its typed value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelAssignment {
    pub channel: Channel,
    pub value: ChannelValue,
}

impl ChannelAssignment {
    pub fn new(channel: Channel, value: ChannelValue) -> Self {
        Self { channel, value }
    }

    /// Resolve a channel name and parse its textual value.
    pub fn parse(channel: &str, value: &str) -> Result<Self, MarkError> {
        let channel = Channel::parse(channel)?;
        let value = if channel.takes_color() {
            ChannelValue::Color(parse_html_color(value)?)
        } else {
            ChannelValue::Number(parse_number(channel, value)?)
        };
        Ok(Self { channel, value })
    }

    /// Numeric payload, if any.
    pub fn number(&self) -> Option<f32> {
        match self.value {
            ChannelValue::Number(n) => Some(n),
            ChannelValue::Color(_) => None,
        }
    }
}

fn parse_number(channel: Channel, value: &str) -> Result<f32, MarkError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| MarkError::InvalidNumber {
            channel: channel.name().to_string(),
            value: value.to_string(),
        })
}

/// Ordered channel assignments for one mark.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Encoding {
    assignments: Vec<ChannelAssignment>,
}

impl Encoding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `(channel, value)` string pairs; fails on the first bad pair.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, MarkError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let assignments = pairs
            .into_iter()
            .map(|(c, v)| ChannelAssignment::parse(c, v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { assignments })
    }

    pub fn from_json_str(json: &str) -> Result<Self, MarkError> {
        let value: JsonValue =
            serde_json::from_str(json).map_err(|e| MarkError::Encoding(e.to_string()))?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &JsonValue) -> Result<Self, MarkError> {
        let obj = value
            .as_object()
            .ok_or_else(|| MarkError::Encoding("expected an object of channels".into()))?;
        let mut out = Encoding::new();
        for (channel, raw) in obj {
            let text = match raw {
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                other => {
                    return Err(MarkError::Encoding(format!(
                        "channel '{channel}': expected string or number, got {other}"
                    )))
                }
            };
            out.push(ChannelAssignment::parse(channel, &text)?);
        }
        Ok(out)
    }

    pub fn push(&mut self, assignment: ChannelAssignment) {
        self.assignments.push(assignment);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelAssignment> {
        self.assignments.iter()
    }

    /// Whether any assignment needs the target's mesh bounds.
    pub fn needs_mesh_bounds(&self) -> bool {
        self.iter().any(|a| a.channel.needs_mesh_bounds())
    }

    /// Whether any assignment touches the target's material.
    pub fn writes_material(&self) -> bool {
        self.iter().any(|a| a.channel.writes_material())
    }
}

impl<'a> IntoIterator for &'a Encoding {
    type Item = &'a ChannelAssignment;
    type IntoIter = std::slice::Iter<'a, ChannelAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

// Serialize as { "<channel>": "<value>", ... }
impl Serialize for Encoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.assignments.len()))?;
        for a in &self.assignments {
            map.serialize_entry(a.channel.name(), &a.value.to_string())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D>(deserializer: D) -> Result<Encoding, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = JsonValue::deserialize(deserializer)?;
        Encoding::from_json_value(&v).map_err(de::Error::custom)
    }
}
