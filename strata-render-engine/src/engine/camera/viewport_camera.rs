use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::scene::{
    CAMERA_DAMPING_FACTOR, CAMERA_FOV_DEGREES, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE,
    CAMERA_PAN_SPEED, CAMERA_START_POSITION,
};

/// Keeps the camera just short of the poles so the up vector stays defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const ZOOM_STEP: f32 = 0.95;
const PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Pointer input gathered for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    /// Drag delta in pixels while orbiting.
    pub orbit: Vec2,
    /// Drag delta in pixels while panning.
    pub pan: Vec2,
    /// Wheel steps, positive zooms in.
    pub scroll: f32,
    pub viewport_height: f32,
}

/// Orbit controller around a focus point with damped motion.
///
/// Input moves the target pose; the camera eases towards it every frame.
/// While `enabled` is false input is ignored but easing still settles.
#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub enabled: bool,
    pub focus_point: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    target_focus: Vec3,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    pub damping: f32,
    pub pan_speed: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::from_array(CAMERA_START_POSITION), Vec3::ZERO)
    }
}

impl ViewportCamera {
    pub fn looking_from(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let pitch = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let yaw = offset.x.atan2(offset.z);

        Self {
            enabled: true,
            focus_point: focus,
            yaw,
            pitch,
            distance,
            target_focus: focus,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
            damping: CAMERA_DAMPING_FACTOR,
            pan_speed: CAMERA_PAN_SPEED,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        let position = self.focus_point + self.rotation() * Vec3::new(0.0, 0.0, self.distance);
        Transform::from_translation(position).with_rotation(self.rotation())
    }

    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Apply one frame of pointer input to the target pose.
    pub fn handle_input(&mut self, input: CameraInput) {
        if !self.enabled || input.viewport_height <= 0.0 {
            return;
        }

        let turn = std::f32::consts::TAU / input.viewport_height;
        if input.orbit != Vec2::ZERO {
            self.target_yaw -= input.orbit.x * turn;
            self.target_pitch =
                (self.target_pitch + input.orbit.y * turn).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        if input.pan != Vec2::ZERO {
            let half_fov = (CAMERA_FOV_DEGREES.to_radians() * 0.5).tan();
            let world_per_pixel = 2.0 * self.distance * half_fov / input.viewport_height;
            let rotation = self.rotation();
            let right = rotation * Vec3::X;
            let up = rotation * Vec3::Y;
            self.target_focus += (-right * input.pan.x + up * input.pan.y)
                * world_per_pixel
                * self.pan_speed;
        }

        if input.scroll != 0.0 {
            self.target_distance = (self.target_distance * ZOOM_STEP.powf(input.scroll))
                .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        }
    }

    /// Ease the pose towards the target. `frames` is elapsed time in 60 Hz frames.
    pub fn step(&mut self, frames: f32) {
        let t = 1.0 - (1.0 - self.damping).powf(frames.max(0.0));
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.distance += (self.target_distance - self.distance) * t;
        self.focus_point = self.focus_point.lerp(self.target_focus, t);
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport_camera: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    // Drain events every frame so a disabled controller does not replay them later.
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        })
        .sum();

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let viewport_height = windows.single().map(|w| w.height()).unwrap_or(0.0);

    let input = CameraInput {
        orbit: if mouse_button.pressed(MouseButton::Left) {
            mouse_delta
        } else {
            Vec2::ZERO
        },
        pan: if mouse_button.pressed(MouseButton::Right) {
            mouse_delta
        } else {
            Vec2::ZERO
        },
        scroll,
        viewport_height,
    };
    viewport_camera.handle_input(input);
    viewport_camera.step(time.delta_secs() * 60.0);

    let target = viewport_camera.transform();
    if *camera_transform != target {
        *camera_transform = target;
    }
}
