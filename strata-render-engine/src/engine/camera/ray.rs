use bevy::prelude::*;
use constants::scene::PLANE_PARALLEL_EPSILON;

/// Convert a pointer position in window pixels to normalized device
/// coordinates relative to `viewport`. `y` points up in NDC.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Rect) -> Option<Vec2> {
    let size = viewport.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let local = pointer - viewport.min;
    Some(Vec2::new(
        local.x / size.x * 2.0 - 1.0,
        -(local.y / size.y) * 2.0 + 1.0,
    ))
}

/// World-space ray through `ndc`, starting on the near plane.
pub fn ray_from_ndc(
    ndc: Vec2,
    camera_transform: &GlobalTransform,
    clip_from_view: Mat4,
) -> Option<Ray3d> {
    let ndc_to_world = camera_transform.compute_matrix() * clip_from_view.inverse();
    // Reversed-z: the near plane is at depth 1.
    let near = ndc_to_world.project_point3(ndc.extend(1.0));
    let far = ndc_to_world.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Distance along `ray` to the horizontal plane at `plane_y`, if ahead of the origin.
pub fn ray_plane_hit_t(ray: Ray3d, plane_y: f32) -> Option<f32> {
    if ray.direction.y.abs() < PLANE_PARALLEL_EPSILON {
        return None;
    }
    let t = (plane_y - ray.origin.y) / ray.direction.y;
    (t >= 0.0).then_some(t)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        if ray_direction[axis] == 0.0 {
            // Parallel to this slab: miss unless the origin lies inside it.
            if ray_origin[axis] < min[axis] || ray_origin[axis] > max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (min[axis] - ray_origin[axis]) * inv[axis];
        let mut t1 = (max[axis] - ray_origin[axis]) * inv[axis];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::render::camera::CameraProjection;

    #[test]
    fn ndc_corners_and_centre() {
        let viewport = Rect::new(100.0, 50.0, 500.0, 350.0);
        assert_eq!(pointer_to_ndc(Vec2::new(100.0, 50.0), viewport), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(Vec2::new(500.0, 350.0), viewport), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(Vec2::new(300.0, 200.0), viewport), Some(Vec2::ZERO));
        assert!(pointer_to_ndc(Vec2::ZERO, Rect::new(0.0, 0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn centre_ray_of_downward_camera_hits_below() {
        let transform = GlobalTransform::from(
            Transform::from_xyz(3.0, 10.0, -2.0).looking_to(Vec3::NEG_Y, Vec3::NEG_Z),
        );
        let projection = PerspectiveProjection::default();
        let ray = ray_from_ndc(Vec2::ZERO, &transform, projection.get_clip_from_view()).unwrap();

        assert_relative_eq!(ray.direction.y, -1.0, epsilon = 1e-4);
        let t = ray_plane_hit_t(ray, 0.0).unwrap();
        let hit = ray.get_point(t);
        assert_relative_eq!(hit.x, 3.0, epsilon = 1e-3);
        assert_relative_eq!(hit.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hit.z, -2.0, epsilon = 1e-3);
    }

    #[test]
    fn plane_behind_or_parallel_misses() {
        let up = Ray3d::new(Vec3::new(0.0, 5.0, 0.0), Dir3::Y);
        assert!(ray_plane_hit_t(up, 0.0).is_none());
        let flat = Ray3d::new(Vec3::new(0.0, 5.0, 0.0), Dir3::X);
        assert!(ray_plane_hit_t(flat, 0.0).is_none());
    }

    #[test]
    fn slab_hit_distances() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(ray_aabb_hit_t(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, min, max), Some(4.0));
        // Origin inside the box reports the exit distance.
        assert_eq!(ray_aabb_hit_t(Vec3::ZERO, Vec3::X, min, max), Some(1.0));
        assert_eq!(ray_aabb_hit_t(Vec3::new(-5.0, 3.0, 0.0), Vec3::X, min, max), None);
        assert_eq!(ray_aabb_hit_t(Vec3::new(5.0, 0.0, 0.0), Vec3::X, min, max), None);
    }
}
