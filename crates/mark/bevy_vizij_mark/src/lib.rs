//! Bevy adapter for `vizij-mark-core`.
//!
//! Entities carrying [`VizijMark`] receive channel writes in two ways:
//!  - a [`MarkEncoding`] component, applied whenever it is added or changed
//!  - [`SetChannelValue`] events, applied in the frame after they are sent
//!
//! Writes land on the entity's `Transform` and, for `color`/`opacity`, on the
//! `StandardMaterial` behind its material handle. The first color write gives
//! the entity its own copy of the material, so marks spawned with a shared
//! handle are colored independently. Failures are logged and re-emitted as
//! [`MarkChannelError`] events.
//!
//! The plugin attaches a [`MarkState`] to each mark; it holds the authored
//! Euler angles and material bookkeeping.

use bevy::prelude::*;
use vizij_mark_core::{MarkConfig, MarkError};

pub mod components;
pub mod resources;
pub mod systems;
pub mod target;

pub use components::{MarkEncoding, MarkEncodingPending, MarkState, VizijMark};
pub use resources::MarkSettings;
pub use target::BevyMarkTarget;

/// Request to apply one `(channel, value)` pair to a mark entity.
#[derive(Event, Debug, Clone)]
pub struct SetChannelValue {
    pub entity: Entity,
    pub channel: String,
    pub value: String,
}

impl SetChannelValue {
    pub fn new(entity: Entity, channel: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity,
            channel: channel.into(),
            value: value.into(),
        }
    }
}

/// A channel write that failed.
#[derive(Event, Debug, Clone)]
pub struct MarkChannelError {
    pub entity: Entity,
    pub channel: String,
    pub error: MarkError,
}

#[derive(Default)]
pub struct VizijMarkPlugin {
    /// Used for marks that carry no config of their own.
    pub config: MarkConfig,
}

impl Plugin for VizijMarkPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(MarkSettings(self.config))
            .add_event::<SetChannelValue>()
            .add_event::<MarkChannelError>()
            .add_systems(
                Update,
                (
                    systems::attach_mark_state_system,
                    systems::apply_mark_encodings_system,
                    systems::apply_channel_writes_system,
                )
                    .chain(),
            );
    }
}
