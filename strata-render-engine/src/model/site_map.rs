use bevy::prelude::*;

/// User-adjustable placement of the loaded site map.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SiteMapTransform {
    pub position: Vec3,
    pub scale: f32,
    pub visible: bool,
    opacity: f32,
}

impl Default for SiteMapTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            visible: true,
            opacity: 1.0,
        }
    }
}

impl SiteMapTransform {
    pub fn new(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale,
            ..default()
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Opacity is clamped into `[0, 1]`; NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f32) {
        if opacity.is_nan() {
            return;
        }
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_position(&mut self, position: Vec3) -> bool {
        if !position.is_finite() {
            return false;
        }
        self.position = position;
        true
    }

    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        self.scale = scale;
        true
    }

    /// True when the map renders with partial transparency.
    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.position).with_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_is_clamped() {
        let mut map = SiteMapTransform::default();
        map.set_opacity(1.7);
        assert_eq!(map.opacity(), 1.0);
        map.set_opacity(-0.2);
        assert_eq!(map.opacity(), 0.0);
        map.set_opacity(f32::NAN);
        assert_eq!(map.opacity(), 0.0);
        assert!(map.is_translucent());
    }

    #[test]
    fn non_finite_edits_are_ignored() {
        let mut map = SiteMapTransform::new(Vec3::new(1.0, 0.0, 2.0), 0.5);
        assert!(!map.set_position(Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!map.set_scale(f32::INFINITY));
        assert!(!map.set_scale(0.0));
        assert_eq!(map.position, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(map.scale, 0.5);
        assert_eq!(map.to_transform().scale, Vec3::splat(0.5));
    }
}
