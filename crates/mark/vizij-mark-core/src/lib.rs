//! Vizij Mark Core (engine-agnostic)
//!
//! A mark is the visual primitive bound to one scene object. Encoding passes hand
//! it `(channel, value)` pairs such as `("x", "120")` or `("color", "#ff0000")`,
//! and the mark turns each pair into a mutation of the object's local transform
//! or material color.
//!
//! The crate never touches a concrete engine. Hosts implement [`MarkTarget`]
//! (see `bevy_vizij_mark` for Bevy) or use the in-memory [`SceneObjectState`].

pub mod channel;
pub mod color;
pub mod config;
pub mod encoding;
pub mod error;
pub mod mark;
pub mod scene_object;
pub mod target;

// Re-exports for consumers (adapters)
pub use channel::{Axis, Channel};
pub use color::{parse_html_color, ParsedColor, Rgba};
pub use config::{MarkConfig, DEFAULT_UNIT_SCALE};
pub use encoding::{ChannelAssignment, ChannelValue, Encoding};
pub use error::MarkError;
pub use mark::{ApplyReport, Mark};
pub use scene_object::SceneObjectState;
pub use target::MarkTarget;
