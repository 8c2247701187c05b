//! The mark: applies channel assignments to a [`MarkTarget`].

use serde::{Deserialize, Serialize};

use crate::channel::{Axis, Channel};
use crate::color::Rgba;
use crate::config::MarkConfig;
use crate::encoding::{ChannelAssignment, ChannelValue, Encoding};
use crate::error::MarkError;
use crate::target::MarkTarget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    #[serde(default)]
    pub config: MarkConfig,
}

impl Default for Mark {
    fn default() -> Self {
        Self::new("base")
    }
}

/// Outcome of [`Mark::apply_all_lenient`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplyReport {
    pub applied: usize,
    pub failures: Vec<(Channel, MarkError)>,
}

impl ApplyReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Mark {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: MarkConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MarkConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn unit_scale(&self) -> f32 {
        self.config.unit_scale
    }

    /// Parse `(channel, value)` and apply it. Errors leave the target untouched.
    pub fn set_channel_value<T: MarkTarget + ?Sized>(
        &self,
        target: &mut T,
        channel: &str,
        value: &str,
    ) -> Result<(), MarkError> {
        let assignment = ChannelAssignment::parse(channel, value)?;
        self.apply(target, &assignment)
    }

    /// Apply every assignment in order, stopping at the first failure.
    /// Assignments applied before the failure are kept.
    pub fn apply_all<T: MarkTarget + ?Sized>(
        &self,
        target: &mut T,
        encoding: &Encoding,
    ) -> Result<(), MarkError> {
        for assignment in encoding {
            self.apply(target, assignment)?;
        }
        Ok(())
    }

    /// Apply every assignment, recording failures instead of stopping.
    pub fn apply_all_lenient<T: MarkTarget + ?Sized>(
        &self,
        target: &mut T,
        encoding: &Encoding,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();
        for assignment in encoding {
            match self.apply(target, assignment) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    log::warn!(
                        "mark '{}': skipping channel '{}': {err}",
                        self.name,
                        assignment.channel
                    );
                    report.failures.push((assignment.channel, err));
                }
            }
        }
        report
    }

    pub fn apply<T: MarkTarget + ?Sized>(
        &self,
        target: &mut T,
        assignment: &ChannelAssignment,
    ) -> Result<(), MarkError> {
        let channel = assignment.channel;
        log::debug!("mark '{}': {} = {}", self.name, channel, assignment.value);
        match (channel, assignment.value) {
            (Channel::Color, ChannelValue::Color(parsed)) => {
                let current = current_color(target, channel)?;
                write_color(target, channel, parsed.over(current))
            }
            (Channel::Color, other) => Err(MarkError::InvalidColor(other.to_string())),
            (_, ChannelValue::Color(parsed)) => Err(MarkError::InvalidNumber {
                channel: channel.name().to_string(),
                value: ChannelValue::Color(parsed).to_string(),
            }),
            (Channel::Position(axis), ChannelValue::Number(n)) => {
                self.translate_to(target, axis, n);
                Ok(())
            }
            (Channel::Extent(axis), ChannelValue::Number(n)) => {
                self.set_extent(target, channel, axis, n)
            }
            (Channel::Offset(axis), ChannelValue::Number(n)) => {
                set_position_axis(target, axis, n * self.unit_scale());
                Ok(())
            }
            (Channel::OffsetPct(axis), ChannelValue::Number(n)) => {
                let mesh = mesh_size(target, channel)?;
                let i = axis.index();
                let offset = n * mesh[i] * target.local_scale()[i];
                set_position_axis(target, axis, offset);
                Ok(())
            }
            (Channel::Opacity, ChannelValue::Number(n)) => {
                let current = current_color(target, channel)?;
                write_color(target, channel, current.with_alpha(n))
            }
            (Channel::Size, ChannelValue::Number(n)) => self.set_max_size(target, channel, n),
            (Channel::Rotation(axis), ChannelValue::Number(n)) => {
                let mut euler = target.local_euler_degrees();
                euler[axis.index()] = n;
                target.set_local_euler_degrees(euler);
                Ok(())
            }
        }
    }

    fn translate_to<T: MarkTarget + ?Sized>(&self, target: &mut T, axis: Axis, n: f32) {
        let pos = n * self.unit_scale();
        let i = axis.index();
        let mut delta = [0.0; 3];
        delta[i] = pos - target.local_position()[i];
        target.translate_local(delta);
    }

    fn set_extent<T: MarkTarget + ?Sized>(
        &self,
        target: &mut T,
        channel: Channel,
        axis: Axis,
        n: f32,
    ) -> Result<(), MarkError> {
        let size = n * self.unit_scale();
        let init_pos = target.local_position();
        let mesh = mesh_size(target, channel)?;
        let i = axis.index();
        if mesh[i] == 0.0 {
            return Err(degenerate(channel, axis));
        }
        let mut scale = target.local_scale();
        scale[i] = size / mesh[i];
        target.set_local_scale(scale);
        // Some hosts move pivots when rescaling.
        target.set_local_position(init_pos);
        Ok(())
    }

    fn set_max_size<T: MarkTarget + ?Sized>(
        &self,
        target: &mut T,
        channel: Channel,
        n: f32,
    ) -> Result<(), MarkError> {
        let size = n * self.unit_scale();
        let mesh = mesh_size(target, channel)?;
        let mut axis = Axis::X;
        for candidate in [Axis::Y, Axis::Z] {
            if mesh[candidate.index()] > mesh[axis.index()] {
                axis = candidate;
            }
        }
        let largest = mesh[axis.index()];
        if largest == 0.0 {
            return Err(degenerate(channel, axis));
        }
        let s = size / largest;
        target.set_local_scale([s, s, s]);
        Ok(())
    }
}

fn set_position_axis<T: MarkTarget + ?Sized>(target: &mut T, axis: Axis, value: f32) {
    let mut pos = target.local_position();
    pos[axis.index()] = value;
    target.set_local_position(pos);
}

fn mesh_size<T: MarkTarget + ?Sized>(
    target: &mut T,
    channel: Channel,
) -> Result<[f32; 3], MarkError> {
    target.mesh_bounds_size().ok_or_else(|| MarkError::MissingMesh {
        channel: channel.name().to_string(),
    })
}

fn current_color<T: MarkTarget + ?Sized>(
    target: &T,
    channel: Channel,
) -> Result<Rgba, MarkError> {
    target.color().ok_or_else(|| missing_material(channel))
}

fn write_color<T: MarkTarget + ?Sized>(
    target: &mut T,
    channel: Channel,
    color: Rgba,
) -> Result<(), MarkError> {
    if target.set_color(color) {
        Ok(())
    } else {
        Err(missing_material(channel))
    }
}

fn missing_material(channel: Channel) -> MarkError {
    MarkError::MissingMaterial {
        channel: channel.name().to_string(),
    }
}

fn degenerate(channel: Channel, axis: Axis) -> MarkError {
    MarkError::DegenerateBounds {
        channel: channel.name().to_string(),
        axis,
    }
}
