use glam::{Mat3, Mat4, Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::camera::{Camera, CameraMovement, OVERHEAD_EYE, PERSPECTIVE_EYE};
use crate::input::InputState;

/// Initial light position; the orbit rotates whatever the current position
/// is, so this is only ever read at startup.
pub const LIGHT_POSITION: Vec3 = Vec3::new(1.5, 0.5, 3.0);
pub const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 1.0, 1.0);
pub const OBJECT_COLOR: Vec3 = Vec3::new(1.0, 0.2, 0.0);

const ORBIT_DEG_PER_SEC: f32 = 45.0;
const LAMP_SCALE: f32 = 0.3;
const SPEED_STEP: f32 = 0.01;
const UV_STEP: f32 = 0.1;

/// Texture addressing policy for UVs outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    /// Clamp with a magenta border outside [0, 1]²; the border substitution
    /// happens in the fragment shader since WebGPU samplers cannot carry
    /// custom border colors.
    ClampToBorder,
}

impl WrapMode {
    /// Stable index into per-mode GPU resources (samplers, bind groups).
    pub fn index(self) -> usize {
        match self {
            WrapMode::Repeat => 0,
            WrapMode::MirroredRepeat => 1,
            WrapMode::ClampToEdge => 2,
            WrapMode::ClampToBorder => 3,
        }
    }
}

/// Which pipeline an object is submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// Phong-lit, textured; consumes the frame, texture, and object groups.
    LitTextured,
    /// Unlit solid white; consumes a single model-view-projection uniform.
    FlatColor,
}

/// The orbiting point light.
#[derive(Debug, Clone)]
pub struct LightState {
    pub position: Vec3,
    pub color: Vec3,
    pub orbiting: bool,
}

impl LightState {
    /// Advances the orbit by one frame. Rotation applies to the current
    /// position, so pausing and resuming continues from wherever the light
    /// was; disabled orbits leave the position untouched.
    pub fn advance(&mut self, dt: f32) {
        if self.orbiting {
            let angle = ORBIT_DEG_PER_SEC.to_radians() * dt;
            self.position = Mat3::from_rotation_y(angle) * self.position;
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            position: LIGHT_POSITION,
            color: LIGHT_COLOR,
            orbiting: true,
        }
    }
}

/// Texture-sampling settings plus the (fixed) object base color.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Multiplies UVs before sampling. Stepped in 0.1 increments, unbounded
    /// in both directions.
    pub uv_scale: Vec2,
    pub wrap_mode: WrapMode,
    pub object_color: Vec3,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            uv_scale: Vec2::ONE,
            wrap_mode: WrapMode::Repeat,
            object_color: OBJECT_COLOR,
        }
    }
}

/// A fixed object placement; the model matrix applies scale, then rotation,
/// then translation.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_axis: Vec3,
    pub rotation_rad: f32,
    pub scale: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_axis_angle(self.rotation_axis.normalize(), self.rotation_rad)
            * Mat4::from_scale(self.scale)
    }
}

pub const CARTON_TRANSFORM: Transform = Transform {
    translation: Vec3::new(0.5, 3.0, -4.0),
    rotation_axis: Vec3::Y,
    rotation_rad: 15.2,
    scale: Vec3::new(0.7, 0.7, 0.7),
};

pub const CARTON_CAP_TRANSFORM: Transform = Transform {
    translation: Vec3::new(0.21, 2.75, -3.5),
    rotation_axis: Vec3::new(0.1, 1.0, -0.6),
    rotation_rad: 15.26,
    scale: Vec3::new(0.4, 0.4, 0.4),
};

pub const TABLE_PANE_TRANSFORM: Transform = Transform {
    translation: Vec3::new(-2.7, -0.77, -0.75),
    rotation_axis: Vec3::X,
    rotation_rad: 1.57,
    scale: Vec3::new(575.5, 35.4, 20.2),
};

pub const TABLE_PANE_2_TRANSFORM: Transform = Transform {
    translation: Vec3::new(-2.7, 3.25, -7.9),
    rotation_axis: Vec3::X,
    rotation_rad: -1.57,
    scale: Vec3::new(575.5, 35.4, 20.2),
};

/// Model matrix of the light-marker cube, tracking the light each frame.
pub fn lamp_model(light_position: Vec3) -> Mat4 {
    Mat4::from_translation(light_position) * Mat4::from_scale(Vec3::splat(LAMP_SCALE))
}

/// All mutable per-frame scene state. Owned by the app and passed by
/// reference into input handling and rendering, so none of it is global and
/// all of it is testable without a window.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub light: LightState,
    pub settings: RenderSettings,
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            light: LightState::default(),
            settings: RenderSettings::default(),
        }
    }

    /// Translates the frame's input into camera commands and settings
    /// mutations, consuming the accumulated cursor/scroll deltas.
    pub fn apply_input(&mut self, input: &mut InputState, dt: f32) {
        const MOVEMENT_KEYS: [(KeyCode, CameraMovement); 6] = [
            (KeyCode::KeyW, CameraMovement::Forward),
            (KeyCode::KeyS, CameraMovement::Backward),
            (KeyCode::KeyA, CameraMovement::Left),
            (KeyCode::KeyD, CameraMovement::Right),
            (KeyCode::KeyQ, CameraMovement::Up),
            (KeyCode::KeyE, CameraMovement::Down),
        ];

        for (key, movement) in MOVEMENT_KEYS {
            if input.key_down(key) {
                self.camera.process_movement(movement, dt);
            }
        }

        if input.key_down(KeyCode::KeyZ) {
            self.camera.adjust_speed(-SPEED_STEP);
            log::debug!("camera speed: {}", self.camera.speed);
        }
        if input.key_down(KeyCode::KeyC) {
            self.camera.adjust_speed(SPEED_STEP);
            log::debug!("camera speed: {}", self.camera.speed);
        }
        if input.just_pressed(KeyCode::KeyX) {
            self.camera.reset_speed();
            log::debug!("camera speed reset: {}", self.camera.speed);
        }

        if input.just_pressed(KeyCode::KeyP) {
            self.camera = Camera::at(PERSPECTIVE_EYE);
        }
        if input.just_pressed(KeyCode::KeyO) {
            self.camera = Camera::at(OVERHEAD_EYE);
        }

        const WRAP_KEYS: [(KeyCode, WrapMode); 4] = [
            (KeyCode::Digit1, WrapMode::Repeat),
            (KeyCode::Digit2, WrapMode::MirroredRepeat),
            (KeyCode::Digit3, WrapMode::ClampToEdge),
            (KeyCode::Digit4, WrapMode::ClampToBorder),
        ];

        for (key, mode) in WRAP_KEYS {
            if input.just_pressed(key) && self.settings.wrap_mode != mode {
                self.settings.wrap_mode = mode;
                log::debug!("texture wrap mode: {mode:?}");
            }
        }

        if input.key_down(KeyCode::BracketRight) {
            self.settings.uv_scale += Vec2::splat(UV_STEP);
            log::debug!("uv scale: {}", self.settings.uv_scale);
        }
        if input.key_down(KeyCode::BracketLeft) {
            self.settings.uv_scale -= Vec2::splat(UV_STEP);
            log::debug!("uv scale: {}", self.settings.uv_scale);
        }

        if input.just_pressed(KeyCode::KeyL) {
            self.light.orbiting = true;
        }
        if input.just_pressed(KeyCode::KeyK) {
            self.light.orbiting = false;
        }

        let (dx, dy) = input.take_cursor_delta();
        if dx != 0.0 || dy != 0.0 {
            self.camera.process_mouse(dx, dy);
        }

        let scroll = input.take_scroll_delta();
        if scroll != 0.0 {
            self.camera.process_scroll(scroll);
        }

        input.end_frame();
    }

    /// Per-frame simulation step; currently just the light orbit.
    pub fn update(&mut self, dt: f32) {
        self.light.advance(dt);
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn orbit_rotates_45_degrees_per_second() {
        let mut light = LightState::default();
        light.advance(1.0);

        let expected = Mat3::from_rotation_y(45f32.to_radians()) * LIGHT_POSITION;
        assert!((light.position - expected).length() < EPS);
    }

    #[test]
    fn orbit_closes_after_a_full_revolution() {
        let mut light = LightState::default();
        for _ in 0..8 {
            light.advance(1.0);
        }
        assert!((light.position - LIGHT_POSITION).length() < EPS);
    }

    #[test]
    fn orbit_continues_from_the_previous_position() {
        // Two half-steps must land where one full step does.
        let mut halves = LightState::default();
        halves.advance(0.5);
        halves.advance(0.5);

        let mut whole = LightState::default();
        whole.advance(1.0);

        assert!((halves.position - whole.position).length() < EPS);
    }

    #[test]
    fn disabled_orbit_holds_the_position_exactly() {
        let mut scene = SceneState::new();
        scene.light.orbiting = false;
        scene.update(1.0);
        scene.update(0.016);

        assert_eq!(scene.light.position, LIGHT_POSITION);
    }

    #[test]
    fn uv_scale_is_unbounded_in_both_directions() {
        let mut scene = SceneState::new();
        let mut input = InputState::new();

        input.press(KeyCode::BracketRight);
        for _ in 0..30 {
            scene.apply_input(&mut input, 0.016);
        }
        assert!((scene.settings.uv_scale - Vec2::splat(4.0)).length() < EPS);

        input.release(KeyCode::BracketRight);
        input.press(KeyCode::BracketLeft);
        for _ in 0..60 {
            scene.apply_input(&mut input, 0.016);
        }
        assert!((scene.settings.uv_scale - Vec2::splat(-2.0)).length() < EPS);
    }

    #[test]
    fn movement_keys_drive_the_camera() {
        let mut scene = SceneState::new();
        let mut input = InputState::new();
        let start = scene.camera.position;
        let front = scene.camera.front();
        let speed = scene.camera.speed;

        input.press(KeyCode::KeyW);
        scene.apply_input(&mut input, 1.0);

        let expected = start + front * speed;
        assert!((scene.camera.position - expected).length() < EPS);
    }

    #[test]
    fn speed_keys_saturate_through_the_mapping() {
        let mut scene = SceneState::new();
        let mut input = InputState::new();

        input.press(KeyCode::KeyC);
        for _ in 0..2000 {
            scene.apply_input(&mut input, 0.016);
        }
        assert_eq!(scene.camera.speed, crate::camera::MAX_SPEED);

        input.release(KeyCode::KeyC);
        input.press(KeyCode::KeyX);
        scene.apply_input(&mut input, 0.016);
        assert_eq!(scene.camera.speed, crate::camera::DEFAULT_SPEED);
    }

    #[test]
    fn wrap_mode_keys_select_modes() {
        let mut scene = SceneState::new();
        let mut input = InputState::new();

        input.press(KeyCode::Digit3);
        scene.apply_input(&mut input, 0.016);
        assert_eq!(scene.settings.wrap_mode, WrapMode::ClampToEdge);

        input.release(KeyCode::Digit3);
        input.press(KeyCode::Digit4);
        scene.apply_input(&mut input, 0.016);
        assert_eq!(scene.settings.wrap_mode, WrapMode::ClampToBorder);
    }

    #[test]
    fn orbit_toggle_keys() {
        let mut scene = SceneState::new();
        let mut input = InputState::new();
        assert!(scene.light.orbiting);

        input.press(KeyCode::KeyK);
        scene.apply_input(&mut input, 0.016);
        assert!(!scene.light.orbiting);

        input.release(KeyCode::KeyK);
        input.press(KeyCode::KeyL);
        scene.apply_input(&mut input, 0.016);
        assert!(scene.light.orbiting);
    }

    #[test]
    fn presets_swap_the_camera_pose() {
        let mut scene = SceneState::new();
        let mut input = InputState::new();

        input.press(KeyCode::KeyO);
        scene.apply_input(&mut input, 0.016);
        assert_eq!(scene.camera.position, OVERHEAD_EYE);

        input.release(KeyCode::KeyO);
        input.press(KeyCode::KeyP);
        scene.apply_input(&mut input, 0.016);
        assert_eq!(scene.camera.position, PERSPECTIVE_EYE);
    }

    #[test]
    fn transform_applies_scale_rotation_translation_in_order() {
        let transform = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation_axis: Vec3::Y,
            rotation_rad: std::f32::consts::FRAC_PI_2,
            scale: Vec3::new(2.0, 1.0, 1.0),
        };

        // Scale doubles x, the quarter-turn about Y sends +x to -z, then
        // the translation offsets the result.
        let mapped = transform.matrix().transform_point3(Vec3::X);
        assert!((mapped - Vec3::new(1.0, 2.0, 1.0)).length() < EPS);

        // The origin always lands on the translation.
        let origin = transform.matrix().transform_point3(Vec3::ZERO);
        assert!((origin - transform.translation).length() < EPS);
    }
}
