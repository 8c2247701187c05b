use bevy::prelude::*;
use vizij_mark_core::MarkConfig;

/// Plugin-wide mark configuration.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MarkSettings(pub MarkConfig);
