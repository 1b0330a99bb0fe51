use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::scene::{
    AMBIENT_BRIGHTNESS, BACK_LIGHT_ILLUMINANCE, BACK_LIGHT_POSITION, BACKGROUND_COLOUR,
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, FOG_FAR, FOG_NEAR, KEY_LIGHT_ILLUMINANCE,
    KEY_LIGHT_POSITION,
};

use super::color::color_or_fallback;
use crate::engine::camera::viewport_camera::ViewportCamera;

pub fn background_color() -> Color {
    color_or_fallback(BACKGROUND_COLOUR).into()
}

/// Ambient, key and back lights. The key light casts shadows.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        Name::new("key_light"),
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(KEY_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("back_light"),
        DirectionalLight {
            illuminance: BACK_LIGHT_ILLUMINANCE,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(BACK_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Perspective camera with linear distance fog matching the background.
pub fn spawn_viewer_camera(commands: &mut Commands, viewport_camera: &ViewportCamera) {
    commands.spawn((
        Name::new("viewer_camera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        viewport_camera.transform(),
        DistanceFog {
            color: background_color(),
            falloff: FogFalloff::Linear {
                start: FOG_NEAR,
                end: FOG_FAR,
            },
            ..default()
        },
    ));
}

pub fn setup_environment(mut commands: Commands, viewport_camera: Res<ViewportCamera>) {
    commands.insert_resource(ClearColor(background_color()));
    spawn_lighting(&mut commands);
    spawn_viewer_camera(&mut commands, &viewport_camera);
}
