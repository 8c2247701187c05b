use bevy::ecs::event::Events;
use bevy::prelude::*;
use bevy_vizij_mark::{
    MarkChannelError, MarkEncoding, MarkEncodingPending, MarkSettings, MarkState,
    SetChannelValue, VizijMark, VizijMarkPlugin,
};
use vizij_mark_core::{MarkConfig, MarkError};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijMarkPlugin {
            config: MarkConfig { unit_scale: 0.01 },
        })
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>();
    app
}

fn spawn_bar(app: &mut App, encoding: MarkEncoding) -> (Entity, Handle<StandardMaterial>) {
    let mesh = app
        .world_mut()
        .resource_mut::<Assets<Mesh>>()
        .add(Cuboid::new(1.0, 2.0, 1.0));
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    let entity = app
        .world_mut()
        .spawn((
            VizijMark::new("bar"),
            encoding,
            Transform::default(),
            mesh,
            material.clone(),
        ))
        .id();
    (entity, material)
}

/// The material currently behind the entity's handle.
fn material_of(app: &App, entity: Entity) -> StandardMaterial {
    let handle = app
        .world()
        .get::<Handle<StandardMaterial>>(entity)
        .unwrap();
    app.world()
        .resource::<Assets<StandardMaterial>>()
        .get(handle)
        .unwrap()
        .clone()
}

fn drain_errors(app: &mut App) -> Vec<MarkChannelError> {
    let events = app.world().resource::<Events<MarkChannelError>>();
    let mut reader = events.get_reader();
    reader.read(events).cloned().collect()
}

#[test]
fn plugin_inserts_settings() {
    let app = app();
    let settings = app.world().get_resource::<MarkSettings>().unwrap();
    assert_eq!(settings.0.unit_scale, 0.01);
}

#[test]
fn encoding_component_is_applied_on_spawn() {
    let mut app = app();
    let encoding = MarkEncoding::from_json_str(
        r##"{"x": 100, "height": "50", "color": "#00FF00", "opacity": "0.25"}"##,
    )
    .unwrap();
    let (entity, _) = spawn_bar(&mut app, encoding);

    app.update();

    let tf = app.world().get::<Transform>(entity).unwrap();
    assert!((tf.translation.x - 1.0).abs() < 1e-5);
    // 50 * 0.01 over a mesh height of 2
    assert!((tf.scale.y - 0.25).abs() < 1e-6);

    let c = material_of(&app, entity).base_color.to_srgba();
    assert_eq!((c.red, c.green, c.blue), (0.0, 1.0, 0.0));
    assert!((c.alpha - 0.25).abs() < 1e-6);
    assert!(drain_errors(&mut app).is_empty());
}

#[test]
fn channel_write_events_are_applied() {
    let mut app = app();
    let (entity, _) = spawn_bar(&mut app, MarkEncoding::default());

    app.world_mut()
        .send_event(SetChannelValue::new(entity, "size", "300"));
    app.world_mut()
        .send_event(SetChannelValue::new(entity, "xrotation", "20"));
    app.update();

    let tf = *app.world().get::<Transform>(entity).unwrap();
    // Largest mesh dimension is 2; 300 * 0.01 / 2
    assert!((tf.scale - Vec3::splat(1.5)).length() < 1e-5);
    let (_, x, _) = tf.rotation.to_euler(EulerRot::YXZ);
    assert!((x.to_degrees() - 20.0).abs() < 1e-3);
}

#[test]
fn mark_config_overrides_settings() {
    let mut app = app();
    let entity = app
        .world_mut()
        .spawn((
            VizijMark::new("raw").with_config(MarkConfig { unit_scale: 1.0 }),
            Transform::default(),
        ))
        .id();
    app.world_mut()
        .send_event(SetChannelValue::new(entity, "yoffset", "3"));
    app.update();
    let tf = app.world().get::<Transform>(entity).unwrap();
    assert_eq!(tf.translation.y, 3.0);
}

#[test]
fn failures_become_error_events() {
    let mut app = app();
    let encoding = MarkEncoding::from_pairs([("y", "10"), ("x2", "4")]);
    // x2 never parses into an encoding
    assert!(matches!(encoding, Err(MarkError::InvalidChannel { .. })));

    let (entity, _) = spawn_bar(&mut app, MarkEncoding::default());
    app.world_mut()
        .send_event(SetChannelValue::new(entity, "z2", "1"));
    app.world_mut()
        .send_event(SetChannelValue::new(entity, "brightness", "1"));
    app.world_mut()
        .send_event(SetChannelValue::new(entity, "z", "oops"));
    app.update();

    let errors = drain_errors(&mut app);
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|e| e.entity == entity));
    assert!(matches!(errors[0].error, MarkError::InvalidChannel { .. }));
    assert_eq!(
        errors[1].error,
        MarkError::UnknownChannel("brightness".into())
    );
    assert!(matches!(errors[2].error, MarkError::InvalidNumber { .. }));
    assert_eq!(
        app.world().get::<Transform>(entity).unwrap().translation,
        Vec3::ZERO
    );
}

#[test]
fn encoding_without_material_reports_per_channel() {
    let mut app = app();
    let entity = app
        .world_mut()
        .spawn((
            VizijMark::default(),
            MarkEncoding::from_pairs([("color", "red"), ("x", "100")]).unwrap(),
            Transform::default(),
        ))
        .id();
    app.update();

    let errors = drain_errors(&mut app);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].channel, "color");
    let tf = app.world().get::<Transform>(entity).unwrap();
    assert!((tf.translation.x - 1.0).abs() < 1e-5);
}

#[test]
fn repeated_steep_rotation_is_idempotent() {
    let mut app = app();
    let (entity, _) = spawn_bar(&mut app, MarkEncoding::default());

    app.world_mut()
        .send_event(SetChannelValue::new(entity, "xrotation", "120"));
    app.update();
    let first = app.world().get::<Transform>(entity).unwrap().rotation;

    app.world_mut()
        .send_event(SetChannelValue::new(entity, "xrotation", "120"));
    app.update();
    let second = app.world().get::<Transform>(entity).unwrap().rotation;

    let expected = Quat::from_rotation_x(120f32.to_radians());
    assert!(first.angle_between(expected) < 1e-4);
    assert!(second.angle_between(first) < 1e-4);
    assert_eq!(
        app.world().get::<MarkState>(entity).unwrap().euler,
        [120.0, 0.0, 0.0]
    );
}

#[test]
fn shared_material_is_copied_on_first_color_write() {
    let mut app = app();
    let (a, shared) = spawn_bar(&mut app, MarkEncoding::default());
    let mesh = app.world().get::<Handle<Mesh>>(a).unwrap().clone();
    let b = app
        .world_mut()
        .spawn((
            VizijMark::new("bar"),
            Transform::default(),
            mesh,
            shared.clone(),
        ))
        .id();

    app.world_mut()
        .send_event(SetChannelValue::new(a, "color", "red"));
    app.update();

    let a_handle = app.world().get::<Handle<StandardMaterial>>(a).unwrap().clone();
    assert_ne!(a_handle, shared);
    assert_eq!(app.world().get::<Handle<StandardMaterial>>(b), Some(&shared));

    let a_color = material_of(&app, a).base_color.to_srgba();
    assert_eq!((a_color.red, a_color.green, a_color.blue), (1.0, 0.0, 0.0));
    let b_color = material_of(&app, b).base_color.to_srgba();
    assert_eq!((b_color.red, b_color.green, b_color.blue), (1.0, 1.0, 1.0));

    // Further writes reuse the entity's copy.
    app.world_mut()
        .send_event(SetChannelValue::new(a, "opacity", "0.5"));
    app.update();
    assert_eq!(
        app.world().get::<Handle<StandardMaterial>>(a),
        Some(&a_handle)
    );
    assert!((material_of(&app, a).base_color.to_srgba().alpha - 0.5).abs() < 1e-6);
    assert_eq!(material_of(&app, b).base_color.to_srgba().alpha, 1.0);
}

#[test]
fn encoding_waits_for_mesh_to_load() {
    let mut app = app();
    let mesh = app
        .world()
        .resource::<Assets<Mesh>>()
        .reserve_handle();
    let material = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(StandardMaterial::default());
    let entity = app
        .world_mut()
        .spawn((
            VizijMark::new("bar"),
            MarkEncoding::from_pairs([("height", "50"), ("x", "100")]).unwrap(),
            Transform::default(),
            mesh.clone(),
            material,
        ))
        .id();

    app.update();
    assert!(drain_errors(&mut app).is_empty());
    assert!(app.world().get::<MarkEncodingPending>(entity).is_some());
    assert_eq!(
        *app.world().get::<Transform>(entity).unwrap(),
        Transform::default()
    );

    app.world_mut()
        .resource_mut::<Assets<Mesh>>()
        .insert(mesh.id(), Mesh::from(Cuboid::new(1.0, 2.0, 1.0)));
    app.update();

    assert!(drain_errors(&mut app).is_empty());
    assert!(app.world().get::<MarkEncodingPending>(entity).is_none());
    let tf = app.world().get::<Transform>(entity).unwrap();
    // 50 * 0.01 over a mesh height of 2
    assert!((tf.scale.y - 0.25).abs() < 1e-6);
    assert!((tf.translation.x - 1.0).abs() < 1e-5);
}
