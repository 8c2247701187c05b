use bevy::prelude::*;
use vizij_mark_core::{Encoding, Mark, MarkConfig, MarkError};

/// Marks an entity as a visual mark. Without a config of its own the mark
/// uses the plugin-wide [`MarkSettings`](crate::MarkSettings).
#[derive(Component, Debug, Clone)]
pub struct VizijMark {
    pub name: String,
    pub config: Option<MarkConfig>,
}

impl VizijMark {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: MarkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Core mark for this entity, falling back to `defaults` for the config.
    pub fn resolve(&self, defaults: MarkConfig) -> Mark {
        Mark::new(self.name.clone()).with_config(self.config.unwrap_or(defaults))
    }
}

impl Default for VizijMark {
    fn default() -> Self {
        Self::new("base")
    }
}

/// Channel assignments to apply to the mark on this entity. Re-applied every
/// time the component changes.
#[derive(Component, Debug, Clone, Default)]
pub struct MarkEncoding(pub Encoding);

impl MarkEncoding {
    pub fn from_json_str(json: &str) -> Result<Self, MarkError> {
        Encoding::from_json_str(json).map(Self)
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, MarkError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Encoding::from_pairs(pairs).map(Self)
    }
}

/// Per-entity state the adapter keeps next to the `Transform`. Attached to
/// every [`VizijMark`] entity by the plugin.
///
/// `euler` holds the authored Y-X-Z angles in degrees; rotation channels read
/// and write it and rebuild the quaternion from it, since a quaternion does not
/// round-trip Euler angles past +/-90 degrees on X.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkState {
    pub euler: [f32; 3],
    /// The material handle was replaced by a copy this entity owns.
    pub owns_material: bool,
    /// The adapter switched the material from opaque to blended.
    pub blended: bool,
}

impl MarkState {
    /// Seed the Euler angles from an existing rotation.
    pub fn from_transform(transform: &Transform) -> Self {
        let (y, x, z) = transform.rotation.to_euler(EulerRot::YXZ);
        Self {
            euler: [x.to_degrees(), y.to_degrees(), z.to_degrees()],
            ..Self::default()
        }
    }
}

/// The mark's [`MarkEncoding`] is waiting on a mesh or material that has not
/// finished loading.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MarkEncodingPending;
