//! In-memory scene object for hosts without a scene graph (tests, wasm).

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::target::MarkTarget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObjectState {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    /// Euler angles in degrees.
    pub euler: [f32; 3],
    pub color: Option<Rgba>,
    /// Untransformed mesh bounds; `None` for objects without geometry.
    pub mesh_size: Option<[f32; 3]>,
}

impl Default for SceneObjectState {
    /// A white unit cube at the origin.
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: [1.0; 3],
            euler: [0.0; 3],
            color: Some(Rgba::WHITE),
            mesh_size: Some([1.0; 3]),
        }
    }
}

impl SceneObjectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh_size(mut self, size: [f32; 3]) -> Self {
        self.mesh_size = Some(size);
        self
    }

    pub fn without_mesh(mut self) -> Self {
        self.mesh_size = None;
        self
    }

    pub fn without_material(mut self) -> Self {
        self.color = None;
        self
    }
}

impl MarkTarget for SceneObjectState {
    fn local_position(&self) -> [f32; 3] {
        self.position
    }

    fn set_local_position(&mut self, position: [f32; 3]) {
        self.position = position;
    }

    fn local_scale(&self) -> [f32; 3] {
        self.scale
    }

    fn set_local_scale(&mut self, scale: [f32; 3]) {
        self.scale = scale;
    }

    fn local_euler_degrees(&self) -> [f32; 3] {
        self.euler
    }

    fn set_local_euler_degrees(&mut self, euler: [f32; 3]) {
        self.euler = euler;
    }

    fn color(&self) -> Option<Rgba> {
        self.color
    }

    fn set_color(&mut self, color: Rgba) -> bool {
        match self.color.as_mut() {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    fn mesh_bounds_size(&mut self) -> Option<[f32; 3]> {
        self.mesh_size
    }
}
