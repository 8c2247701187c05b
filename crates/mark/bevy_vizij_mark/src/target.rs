use bevy::prelude::*;
use vizij_mark_core::{MarkTarget, Rgba};

use crate::components::MarkState;

/// [`MarkTarget`] over one entity's transform, mesh and material.
///
/// Euler angles use the Y-X-Z convention (roll about Z applied first, then
/// pitch about X, then yaw about Y), in degrees. They are read from
/// [`MarkState`] rather than decomposed from the quaternion.
pub struct BevyMarkTarget<'a> {
    transform: &'a mut Transform,
    state: &'a mut MarkState,
    mesh: Option<&'a Mesh>,
    material: Option<&'a mut StandardMaterial>,
}

impl<'a> BevyMarkTarget<'a> {
    pub fn new(
        transform: &'a mut Transform,
        state: &'a mut MarkState,
        mesh: Option<&'a Mesh>,
        material: Option<&'a mut StandardMaterial>,
    ) -> Self {
        Self {
            transform,
            state,
            mesh,
            material,
        }
    }
}

impl MarkTarget for BevyMarkTarget<'_> {
    fn local_position(&self) -> [f32; 3] {
        self.transform.translation.to_array()
    }

    fn set_local_position(&mut self, position: [f32; 3]) {
        self.transform.translation = Vec3::from_array(position);
    }

    fn local_scale(&self) -> [f32; 3] {
        self.transform.scale.to_array()
    }

    fn set_local_scale(&mut self, scale: [f32; 3]) {
        self.transform.scale = Vec3::from_array(scale);
    }

    fn local_euler_degrees(&self) -> [f32; 3] {
        self.state.euler
    }

    fn set_local_euler_degrees(&mut self, euler: [f32; 3]) {
        self.state.euler = euler;
        self.transform.rotation = Quat::from_euler(
            EulerRot::YXZ,
            euler[1].to_radians(),
            euler[0].to_radians(),
            euler[2].to_radians(),
        );
    }

    fn color(&self) -> Option<Rgba> {
        let c = self.material.as_ref()?.base_color.to_srgba();
        Some(Rgba::new(c.red, c.green, c.blue, c.alpha))
    }

    fn set_color(&mut self, color: Rgba) -> bool {
        let Some(material) = self.material.as_deref_mut() else {
            return false;
        };
        material.base_color = Color::srgba(color.r, color.g, color.b, color.a);
        // Translucent colors need blending to show. Only undo a switch we made.
        if color.a < 1.0 {
            if material.alpha_mode == AlphaMode::Opaque {
                material.alpha_mode = AlphaMode::Blend;
                self.state.blended = true;
            }
        } else if self.state.blended {
            if material.alpha_mode == AlphaMode::Blend {
                material.alpha_mode = AlphaMode::Opaque;
            }
            self.state.blended = false;
        }
        true
    }

    fn mesh_bounds_size(&mut self) -> Option<[f32; 3]> {
        let aabb = self.mesh?.compute_aabb()?;
        Some((aabb.half_extents * 2.0).to_array())
    }
}
