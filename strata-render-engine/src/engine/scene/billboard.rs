use bevy::prelude::*;

/// Quad kept parallel to the camera's view plane.
#[derive(Component)]
pub struct Billboard;

/// Copy the camera orientation onto every billboard. Billboards are spawned
/// under unrotated groups, so the local rotation equals the world rotation.
pub fn face_camera(
    camera_query: Query<&GlobalTransform, With<Camera3d>>,
    mut billboards: Query<&mut Transform, (With<Billboard>, Without<Camera3d>)>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    let (_, rotation, _) = camera_transform.to_scale_rotation_translation();

    for mut transform in &mut billboards {
        if transform.rotation != rotation {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billboards_take_camera_rotation() {
        let mut app = App::new();
        app.add_systems(Update, face_camera);

        let camera_rotation = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.4);
        app.world_mut().spawn((
            Camera3d::default(),
            GlobalTransform::from(Transform::from_rotation(camera_rotation)),
        ));
        let label = app.world_mut().spawn((Transform::default(), Billboard)).id();
        let plain = app.world_mut().spawn(Transform::default()).id();

        app.update();

        let rotation = app.world().get::<Transform>(label).unwrap().rotation;
        assert!(rotation.angle_between(camera_rotation) < 1e-4);
        assert_eq!(app.world().get::<Transform>(plain).unwrap().rotation, Quat::IDENTITY);
    }
}
