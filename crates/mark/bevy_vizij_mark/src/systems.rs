use bevy::prelude::*;
use vizij_mark_core::Channel;

use crate::components::{MarkEncoding, MarkEncodingPending, MarkState, VizijMark};
use crate::resources::MarkSettings;
use crate::target::BevyMarkTarget;
use crate::{MarkChannelError, SetChannelValue};

type MarkParts<'a> = (
    &'a VizijMark,
    &'a mut Transform,
    &'a mut MarkState,
    Option<&'a Handle<Mesh>>,
    Option<&'a mut Handle<StandardMaterial>>,
);

/// Attaches [`MarkState`] to new marks, seeded from their current rotation.
pub fn attach_mark_state_system(
    mut commands: Commands,
    marks: Query<(Entity, &Transform), (With<VizijMark>, Without<MarkState>)>,
) {
    for (entity, transform) in &marks {
        commands
            .entity(entity)
            .insert(MarkState::from_transform(transform));
    }
}

/// Applies [`MarkEncoding`] components that were added or changed this frame.
/// Every channel is attempted; failures are reported individually.
///
/// An encoding whose mesh or material handle has not loaded yet is held back
/// with [`MarkEncodingPending`] and retried on later frames.
pub fn apply_mark_encodings_system(
    mut commands: Commands,
    settings: Res<MarkSettings>,
    mut marks: Query<
        (Entity, &MarkEncoding, Has<MarkEncodingPending>, MarkParts),
        Or<(Changed<MarkEncoding>, With<MarkEncodingPending>)>,
    >,
    meshes: Option<Res<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut errors: EventWriter<MarkChannelError>,
) {
    for (entity, encoding, pending, (mark, mut transform, mut state, mesh, material)) in
        marks.iter_mut()
    {
        let waiting = (encoding.0.needs_mesh_bounds() && still_loading(mesh, meshes.as_deref()))
            || (encoding.0.writes_material()
                && still_loading(material.as_deref(), materials.as_deref()));
        if waiting {
            if !pending {
                debug!("mark '{}' ({entity:?}): waiting on assets", mark.name);
                commands.entity(entity).insert(MarkEncodingPending);
            }
            continue;
        }
        if pending {
            commands.entity(entity).remove::<MarkEncodingPending>();
        }

        let mark = mark.resolve(settings.0);
        let mesh = match (mesh, meshes.as_deref()) {
            (Some(handle), Some(assets)) => assets.get(handle),
            _ => None,
        };
        let material = own_material(
            material,
            materials.as_deref_mut(),
            &mut state,
            encoding.0.writes_material(),
        );
        let mut target = BevyMarkTarget::new(&mut transform, &mut state, mesh, material);

        let report = mark.apply_all_lenient(&mut target, &encoding.0);
        debug!(
            "mark '{}' ({entity:?}): applied {} channel(s)",
            mark.name, report.applied
        );
        for (channel, error) in report.failures {
            errors.send(MarkChannelError {
                entity,
                channel: channel.name().to_string(),
                error,
            });
        }
    }
}

/// Applies pending [`SetChannelValue`] events in the order they were sent.
pub fn apply_channel_writes_system(
    settings: Res<MarkSettings>,
    mut writes: EventReader<SetChannelValue>,
    mut marks: Query<MarkParts>,
    meshes: Option<Res<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut errors: EventWriter<MarkChannelError>,
) {
    for write in writes.read() {
        let Ok((mark, mut transform, mut state, mesh, material)) = marks.get_mut(write.entity)
        else {
            warn!(
                "channel write '{}' targets {:?}, which is not a mark",
                write.channel, write.entity
            );
            continue;
        };
        let mark = mark.resolve(settings.0);
        let mesh = match (mesh, meshes.as_deref()) {
            (Some(handle), Some(assets)) => assets.get(handle),
            _ => None,
        };
        let writes_material = Channel::parse(&write.channel).is_ok_and(Channel::writes_material);
        let material = own_material(
            material,
            materials.as_deref_mut(),
            &mut state,
            writes_material,
        );
        let mut target = BevyMarkTarget::new(&mut transform, &mut state, mesh, material);

        if let Err(error) = mark.set_channel_value(&mut target, &write.channel, &write.value) {
            warn!(
                "mark '{}' ({:?}): {}={}: {error}",
                mark.name, write.entity, write.channel, write.value
            );
            errors.send(MarkChannelError {
                entity: write.entity,
                channel: write.channel.clone(),
                error,
            });
        }
    }
}

fn still_loading<A: Asset>(handle: Option<&Handle<A>>, assets: Option<&Assets<A>>) -> bool {
    match (handle, assets) {
        (Some(handle), Some(assets)) => assets.get(handle).is_none(),
        _ => false,
    }
}

/// Resolves the entity's material. Before the first write the shared asset is
/// copied and the entity's handle swapped to the copy, so marks spawned with a
/// common material are colored independently.
fn own_material<'m>(
    handle: Option<Mut<'_, Handle<StandardMaterial>>>,
    assets: Option<&'m mut Assets<StandardMaterial>>,
    state: &mut MarkState,
    writes: bool,
) -> Option<&'m mut StandardMaterial> {
    let (mut handle, assets) = (handle?, assets?);
    if writes && !state.owns_material {
        if let Some(copy) = assets.get(&*handle).cloned() {
            *handle = assets.add(copy);
            state.owns_material = true;
        }
    }
    assets.get_mut(&*handle)
}
