//! Free-flying first-person camera driven by key directions and cursor samples

use ridge_core::{CameraSettings, Direction, Mat4, Vec3, MAT4_IDENTITY};

/// Near clipping plane distance
pub const NEAR_PLANE: f32 = 0.1;
/// Far clipping plane distance
pub const FAR_PLANE: f32 = 100.0;
/// Pitch is kept inside ±this many degrees so the view never flips over the pole
pub const PITCH_LIMIT: f32 = 89.0;
/// Degrees of rotation per unit of cursor motion
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 90.0;

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 2.5);

/// A yaw/pitch camera.
///
/// `front` is always derived from `yaw` and `pitch`. The view and projection
/// matrices are recomputed from state by [`Camera::update`].
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    /// Horizontal angle in degrees, unbounded
    yaw: f32,
    /// Vertical angle in degrees, within ±`PITCH_LIMIT`
    pitch: f32,
    /// Vertical field of view in degrees
    fov: f32,
    sensitivity: f32,
    /// Numerator of the aspect ratio
    screen_height: u32,
    /// Denominator of the aspect ratio
    screen_width: u32,
    /// Previous cursor sample; `None` until the first sample after construction or a reset
    last_cursor: Option<(f64, f64)>,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Camera at the default position `(0, 0, 2.5)` looking down -Z
    pub fn with_screen(screen_height: u32, screen_width: u32) -> Self {
        Self::new(screen_height, screen_width, DEFAULT_POSITION)
    }

    /// Camera at `position` looking down -Z.
    ///
    /// The projection aspect ratio is `screen_height / screen_width`.
    pub fn new(screen_height: u32, screen_width: u32, position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: front_from_angles(DEFAULT_YAW, 0.0),
            up: Vec3::UP,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            fov: DEFAULT_FOV,
            sensitivity: DEFAULT_SENSITIVITY,
            screen_height: screen_height.max(1),
            screen_width: screen_width.max(1),
            last_cursor: None,
            view: MAT4_IDENTITY,
            projection: MAT4_IDENTITY,
        };
        camera.update();
        camera
    }

    /// Camera configured from the `[camera]` config section
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self::new(
            settings.screen_height,
            settings.screen_width,
            Vec3::from_array(settings.position),
        );
        camera.set_fov(settings.fov);
        camera.set_sensitivity(settings.sensitivity);
        camera.update();
        camera
    }

    /// Translate by `speed` world units along `direction`.
    ///
    /// `speed` is expected to already be scaled by the frame's delta time.
    pub fn move_camera(&mut self, speed: f32, direction: Direction) {
        if !speed.is_finite() {
            return;
        }
        self.position += direction.unit_vector(self.front, self.up) * speed;
    }

    /// Apply a raw cursor sample.
    ///
    /// The first sample after construction or [`Camera::reset_mouse`] only
    /// becomes the reference point. Later samples turn the camera by the
    /// offset from the previous one, with screen-space Y inverted.
    pub fn rotate(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        let (last_x, last_y) = self.last_cursor.unwrap_or((x, y));
        self.last_cursor = Some((x, y));

        let x_offset = (x - last_x) as f32 * self.sensitivity;
        let y_offset = (last_y - y) as f32 * self.sensitivity;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);
    }

    /// Forget the previous cursor sample, e.g. after the cursor was released and recaptured
    pub fn reset_mouse(&mut self) {
        self.last_cursor = None;
    }

    /// Recompute the view and projection matrices. Call once per frame after input.
    pub fn update(&mut self) {
        self.view = look_at(self.position, self.position + self.front, self.up);
        self.projection = perspective(self.fov.to_radians(), self.aspect(), NEAR_PLANE, FAR_PLANE);
    }

    /// Set the vertical field of view in degrees. Takes effect on the next `update`.
    pub fn set_fov(&mut self, fov: f32) {
        if fov.is_finite() && fov > 0.0 && fov < 180.0 {
            self.fov = fov;
        } else {
            log::warn!("Ignoring out-of-range field of view {}", fov);
        }
    }

    /// Change the dimensions the aspect ratio is derived from; zero values are ignored
    pub fn set_screen_dimensions(&mut self, screen_height: u32, screen_width: u32) {
        if screen_height == 0 || screen_width == 0 {
            return;
        }
        self.screen_height = screen_height;
        self.screen_width = screen_width;
        log::debug!(
            "Camera aspect set to {}/{} = {}",
            screen_height,
            screen_width,
            self.aspect()
        );
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() {
            self.sensitivity = sensitivity;
        }
    }

    /// Projection aspect ratio, `screen_height / screen_width`
    pub fn aspect(&self) -> f32 {
        self.screen_height as f32 / self.screen_width as f32
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// View matrix as of the last `update` (column-major)
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix as of the last `update` (column-major)
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

/// Spherical to Cartesian look direction, angles in degrees
fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalized()
}

/// Right-handed look-at view matrix (column-major)
fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(&up).normalized();
    let u = s.cross(&f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0],
    ]
}

/// Right-handed perspective projection mapping depth to [0, 1] (wgpu clip space)
fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = near - far;

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far / range, -1.0],
        [0.0, 0.0, near * far / range, 0.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    /// Multiply a column-major matrix by a point (w = 1)
    fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for row in 0..4 {
            out[row] = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
        }
        out
    }

    #[test]
    fn defaults() {
        let camera = Camera::with_screen(800, 600);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.fov(), 90.0);
        let front = camera.front();
        assert!(approx(front.x, 0.0) && approx(front.y, 0.0) && approx(front.z, -1.0));
    }

    #[test]
    fn first_rotate_is_reference_only() {
        let mut camera = Camera::with_screen(800, 600);
        let front = camera.front();
        camera.rotate(400.0, 300.0);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.front(), front);
    }

    #[test]
    fn second_rotate_applies_sensitivity() {
        let mut camera = Camera::with_screen(800, 600);
        camera.rotate(400.0, 300.0);
        camera.rotate(410.0, 300.0);
        assert_eq!(camera.yaw(), -89.0);
        assert_eq!(camera.pitch(), 0.0);

        // Screen Y grows downward, pitch grows upward
        camera.rotate(410.0, 280.0);
        assert!(approx(camera.pitch(), 2.0));
        assert!(camera.front().y > 0.0);
    }

    #[test]
    fn reset_mouse_rearms_reference_point() {
        let mut camera = Camera::with_screen(800, 600);
        camera.rotate(0.0, 0.0);
        camera.rotate(10.0, 0.0);
        let yaw = camera.yaw();

        camera.reset_mouse();
        camera.rotate(5000.0, -5000.0);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn pitch_is_always_clamped() {
        let mut camera = Camera::with_screen(800, 600);
        camera.rotate(0.0, 0.0);

        let mut y = 0.0;
        for step in [-1.0e6, 3.0e5, 17.0, -42.0, 9.9e9, -9.9e9, 12345.0] {
            y += step;
            camera.rotate(0.0, y);
            assert!(camera.pitch() >= -PITCH_LIMIT && camera.pitch() <= PITCH_LIMIT);
        }

        camera.rotate(0.0, y + 1.0e6);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        camera.rotate(0.0, y - 1.0e6);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn front_stays_unit_length() {
        let mut camera = Camera::with_screen(800, 600);
        camera.rotate(0.0, 0.0);
        for i in 1..50 {
            camera.rotate(i as f64 * 37.0, (i as f64 * 13.0).sin() * 900.0);
            assert!(approx(camera.front().length(), 1.0));
        }
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut camera = Camera::with_screen(800, 600);
        camera.rotate(0.0, 0.0);
        camera.rotate(f64::NAN, 10.0);
        camera.rotate(10.0, f64::INFINITY);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        camera.move_camera(f32::NAN, Direction::Forward);
        assert!(camera.position().is_finite());
    }

    #[test]
    fn move_up_only_changes_y() {
        let mut camera = Camera::new(800, 600, Vec3::new(1.0, 2.0, 3.0));
        camera.rotate(0.0, 0.0);
        camera.rotate(123.0, -456.0);

        camera.move_camera(0.75, Direction::Up);
        assert_eq!(camera.position(), Vec3::new(1.0, 2.75, 3.0));
        camera.move_camera(0.75, Direction::Down);
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn move_forward_and_sideways() {
        let mut camera = Camera::new(800, 600, Vec3::ZERO);
        camera.move_camera(2.0, Direction::Forward);
        let p = camera.position();
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, -2.0));

        camera.move_camera(2.0, Direction::Backward);
        camera.move_camera(1.0, Direction::Right);
        let p = camera.position();
        assert!(approx(p.x, 1.0) && approx(p.z, 0.0));

        camera.move_camera(3.0, Direction::Left);
        assert!(approx(camera.position().x, -2.0));
    }

    #[test]
    fn zero_speed_is_no_op() {
        let mut camera = Camera::new(800, 600, Vec3::new(4.0, 5.0, 6.0));
        for direction in Direction::ALL {
            camera.move_camera(0.0, direction);
        }
        assert_eq!(camera.position(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn projection_uses_height_over_width() {
        let mut camera = Camera::with_screen(800, 600);
        camera.set_fov(90.0);
        camera.update();

        assert!(approx(camera.aspect(), 800.0 / 600.0));
        let p = camera.projection();
        // tan(45°) = 1, so the X scale is 1 / aspect
        assert!(approx(p[0][0], 600.0 / 800.0));
        assert!(approx(p[1][1], 1.0));
        assert_eq!(p[2][3], -1.0);

        // Near plane maps to depth 0, far plane to depth 1
        let near = transform_point(&p, [0.0, 0.0, -NEAR_PLANE]);
        let far = transform_point(&p, [0.0, 0.0, -FAR_PLANE]);
        assert!(approx(near[2] / near[3], 0.0));
        assert!(approx(far[2] / far[3], 1.0));
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let mut camera = Camera::new(800, 600, Vec3::new(2.5, 30.0, 2.5));
        camera.rotate(0.0, 0.0);
        camera.rotate(250.0, 120.0);
        camera.update();

        let close = |a: f32, b: f32| (a - b).abs() < 1e-4;
        let view = camera.view();
        let eye = transform_point(&view, camera.position().to_array());
        assert!(close(eye[0], 0.0) && close(eye[1], 0.0) && close(eye[2], 0.0));

        // A point straight ahead lands on the -Z axis in eye space
        let ahead = camera.position() + camera.front() * 5.0;
        let eye_ahead = transform_point(&view, ahead.to_array());
        assert!(close(eye_ahead[0], 0.0));
        assert!(close(eye_ahead[1], 0.0));
        assert!(close(eye_ahead[2], -5.0));
    }

    #[test]
    fn matrices_are_derived_on_update() {
        let mut camera = Camera::with_screen(800, 600);
        let before = camera.view();
        camera.move_camera(1.0, Direction::Up);
        assert_eq!(camera.view(), before);
        camera.update();
        assert_ne!(camera.view(), before);
    }

    #[test]
    fn screen_and_fov_setters_guard_input() {
        let mut camera = Camera::with_screen(800, 600);
        camera.set_screen_dimensions(0, 600);
        assert!(approx(camera.aspect(), 800.0 / 600.0));
        camera.set_screen_dimensions(1920, 1080);
        assert!(approx(camera.aspect(), 1920.0 / 1080.0));

        camera.set_fov(0.0);
        camera.set_fov(f32::NAN);
        assert_eq!(camera.fov(), 90.0);
        camera.set_fov(60.0);
        assert_eq!(camera.fov(), 60.0);
    }

    #[test]
    fn from_settings() {
        let settings = CameraSettings {
            fov: 70.0,
            sensitivity: 0.5,
            ..CameraSettings::default()
        };
        let camera = Camera::from_settings(&settings);
        assert_eq!(camera.position(), Vec3::new(2.5, 30.0, 2.5));
        assert_eq!(camera.fov(), 70.0);
        assert_eq!(camera.sensitivity(), 0.5);
        assert!(approx(camera.aspect(), 800.0 / 600.0));
    }

    #[test]
    fn from_settings_ignores_out_of_range_values() {
        let settings = CameraSettings {
            fov: 180.0,
            sensitivity: f32::NAN,
            ..CameraSettings::default()
        };
        let camera = Camera::from_settings(&settings);
        assert_eq!(camera.fov(), DEFAULT_FOV);
        assert_eq!(camera.sensitivity(), DEFAULT_SENSITIVITY);
    }
}
