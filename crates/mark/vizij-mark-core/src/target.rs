//! Capability interface a host scene object exposes to a mark.
//!
//! Adapters implement this over their own transform/material storage; the
//! mark only ever reads and writes through these methods.

use crate::color::Rgba;

pub trait MarkTarget {
    fn local_position(&self) -> [f32; 3];
    fn set_local_position(&mut self, position: [f32; 3]);

    fn local_scale(&self) -> [f32; 3];
    fn set_local_scale(&mut self, scale: [f32; 3]);

    /// Local Euler angles in degrees, `[x, y, z]`.
    fn local_euler_degrees(&self) -> [f32; 3];
    fn set_local_euler_degrees(&mut self, euler: [f32; 3]);

    /// Material color, or `None` when the object has no material.
    fn color(&self) -> Option<Rgba>;
    /// Returns `false` when the object has no material to write to.
    fn set_color(&mut self, color: Rgba) -> bool;

    /// Size of the untransformed mesh bounds. Implementations recompute the
    /// bounds on every call; `None` when the object has no mesh.
    fn mesh_bounds_size(&mut self) -> Option<[f32; 3]>;

    /// Move by `delta` in local space.
    fn translate_local(&mut self, delta: [f32; 3]) {
        let p = self.local_position();
        self.set_local_position([p[0] + delta[0], p[1] + delta[1], p[2] + delta[2]]);
    }

    /// Rendered size: mesh bounds scaled by the current local scale.
    fn render_bounds_size(&mut self) -> Option<[f32; 3]> {
        let mesh = self.mesh_bounds_size()?;
        let scale = self.local_scale();
        Some([
            mesh[0] * scale[0].abs(),
            mesh[1] * scale[1].abs(),
            mesh[2] * scale[2].abs(),
        ])
    }
}
