use glam::{Mat4, Vec3};

/// Default viewpoint, restored by the `P` key.
pub const PERSPECTIVE_EYE: Vec3 = Vec3::new(-1.0, 2.4, 3.0);
/// High viewpoint looking down the table, restored by the `O` key.
pub const OVERHEAD_EYE: Vec3 = Vec3::new(0.0, 10.4, 7.0);

pub const DEFAULT_SPEED: f32 = 2.5;
pub const MIN_SPEED: f32 = 0.01;
pub const MAX_SPEED: f32 = 10.0;

const DEFAULT_YAW_DEG: f32 = -90.0;
const DEFAULT_ZOOM_DEG: f32 = 45.0;
const PITCH_LIMIT_DEG: f32 = 89.0;
const MOUSE_SENSITIVITY: f32 = 0.1;

/// Direction of a one-frame movement command, in the camera's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-fly camera: eye position plus yaw/pitch orientation, with the
/// vertical field of view doubling as the scroll-wheel "zoom".
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    /// Vertical field of view in degrees; the projection consumes it.
    pub zoom_deg: f32,
    /// World units per second for movement commands.
    pub speed: f32,
}

impl Camera {
    /// Creates a camera at `eye` with default orientation, zoom, and speed.
    /// Preset loads replace the whole pose through this constructor.
    pub fn at(eye: Vec3) -> Self {
        Self {
            position: eye,
            yaw_deg: DEFAULT_YAW_DEG,
            pitch_deg: 0.0,
            zoom_deg: DEFAULT_ZOOM_DEG,
            speed: DEFAULT_SPEED,
        }
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw_deg.to_radians(), self.pitch_deg.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Perspective projection from the current zoom. glam's `perspective_rh`
    /// already produces depth in [0, 1] as wgpu expects.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom_deg.to_radians(), aspect, 0.1, 100.0)
    }

    /// Applies one movement command scaled by `speed * dt`.
    pub fn process_movement(&mut self, movement: CameraMovement, dt: f32) {
        let velocity = self.speed * dt;
        let step = match movement {
            CameraMovement::Forward => self.front(),
            CameraMovement::Backward => -self.front(),
            CameraMovement::Left => -self.right(),
            CameraMovement::Right => self.right(),
            CameraMovement::Up => self.up(),
            CameraMovement::Down => -self.up(),
        };
        self.position += step * velocity;
    }

    /// Applies a cursor delta (`dy` positive when the cursor moves up).
    /// Pitch is clamped so the view cannot flip over the poles.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw_deg += dx * MOUSE_SENSITIVITY;
        self.pitch_deg =
            (self.pitch_deg + dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Scroll narrows or widens the field of view.
    pub fn process_scroll(&mut self, delta: f32) {
        self.zoom_deg = (self.zoom_deg - delta).clamp(1.0, 45.0);
    }

    /// Adjusts movement speed, saturating at the clamp bounds.
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn reset_speed(&mut self) {
        self.speed = DEFAULT_SPEED;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::at(PERSPECTIVE_EYE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn speed_saturates_at_both_bounds() {
        let mut camera = Camera::default();

        for _ in 0..2000 {
            camera.adjust_speed(0.01);
        }
        assert_eq!(camera.speed, MAX_SPEED);

        for _ in 0..2000 {
            camera.adjust_speed(-0.01);
        }
        assert_eq!(camera.speed, MIN_SPEED);
    }

    #[test]
    fn speed_reset_from_any_state() {
        let mut camera = Camera::default();
        camera.adjust_speed(4.0);
        camera.reset_speed();
        assert_eq!(camera.speed, DEFAULT_SPEED);

        camera.adjust_speed(-100.0);
        camera.reset_speed();
        assert_eq!(camera.speed, DEFAULT_SPEED);
    }

    #[test]
    fn presets_replace_the_pose_wholesale() {
        let mut camera = Camera::at(OVERHEAD_EYE);
        camera.process_mouse(300.0, -120.0);
        camera.process_scroll(20.0);
        camera.adjust_speed(5.0);
        camera.process_movement(CameraMovement::Forward, 1.0);

        camera = Camera::at(PERSPECTIVE_EYE);
        assert_eq!(camera.position, PERSPECTIVE_EYE);
        assert_eq!(camera.yaw_deg, DEFAULT_YAW_DEG);
        assert_eq!(camera.pitch_deg, 0.0);
        assert_eq!(camera.zoom_deg, DEFAULT_ZOOM_DEG);
        assert_eq!(camera.speed, DEFAULT_SPEED);
    }

    #[test]
    fn pitch_clamps_at_the_poles() {
        let mut camera = Camera::default();
        camera.process_mouse(0.0, 10_000.0);
        assert_eq!(camera.pitch_deg, PITCH_LIMIT_DEG);

        camera.process_mouse(0.0, -20_000.0);
        assert_eq!(camera.pitch_deg, -PITCH_LIMIT_DEG);
    }

    #[test]
    fn zoom_clamps_to_fov_range() {
        let mut camera = Camera::default();
        camera.process_scroll(100.0);
        assert_eq!(camera.zoom_deg, 1.0);
        camera.process_scroll(-100.0);
        assert_eq!(camera.zoom_deg, 45.0);
    }

    #[test]
    fn forward_moves_along_the_view_direction() {
        let mut camera = Camera::default();
        let start = camera.position;
        let front = camera.front();

        camera.process_movement(CameraMovement::Forward, 0.5);

        let expected = start + front * (DEFAULT_SPEED * 0.5);
        assert!((camera.position - expected).length() < EPS);
    }
}
