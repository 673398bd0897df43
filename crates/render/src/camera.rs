use glam::{Mat4, Vec2, Vec3};

/// Reference frame rate the impulse and damping constants are tuned for.
const REFERENCE_FPS: f32 = 60.0;
/// Degrees of rotation per pixel of mouse travel at sensitivity 1.
const DEGREES_PER_PIXEL: f32 = 0.05;
const PITCH_LIMIT: f32 = 89.0;

/// Free-flying perspective camera driven by movement impulses.
///
/// Impulses queued with [`Camera::impulse`] are folded into the velocity on
/// the next [`Camera::update`], expressed in the camera basis at that moment.
/// The velocity then decays by `damping` per reference frame, so a released
/// key lets the camera glide to a stop.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    /// Yaw in degrees, zero looks down +X.
    yaw: f32,
    /// Pitch in degrees, clamped to `±89`.
    pitch: f32,
    fov: f32,
    sensitivity: Vec2,
    aspect: f32,
    near: f32,
    far: f32,
    damping: f32,
    pending: Vec3,
    velocity: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0,
            pitch: 0.0,
            fov: 60.0,
            sensitivity: Vec2::ONE,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 50_000.0,
            damping: 0.85,
            pending: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees.clamp(1.0, 179.0);
    }

    pub fn sensitivity(&self) -> Vec2 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: Vec2) {
        self.sensitivity = sensitivity;
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn set_clip(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// (yaw, pitch) in degrees.
    pub fn angles(&self) -> Vec2 {
        Vec2::new(self.yaw, self.pitch)
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Queue a movement impulse along (right, up, forward).
    pub fn impulse(&mut self, impulse: Vec3) {
        self.pending += impulse;
    }

    pub fn add_impulse_right(&mut self, amount: f32) {
        self.pending.x += amount;
    }

    pub fn add_impulse_up(&mut self, amount: f32) {
        self.pending.y += amount;
    }

    pub fn add_impulse_forward(&mut self, amount: f32) {
        self.pending.z += amount;
    }

    /// Turn by a mouse delta in pixels. Positive y looks down.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.sensitivity.x * DEGREES_PER_PIXEL;
        self.pitch -= delta.y * self.sensitivity.y * DEGREES_PER_PIXEL;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let push = self.right() * self.pending.x + Vec3::Y * self.pending.y + self.forward_vector() * self.pending.z;
        self.pending = Vec3::ZERO;

        let frames = dt.max(0.0) * REFERENCE_FPS;
        self.velocity += push * frames;
        self.position += self.velocity * frames;
        self.velocity *= self.damping.powf(frames);
    }

    pub fn forward_vector(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward_vector().cross(Vec3::Y).normalize()
    }

    /// Segment from the camera position along the view direction.
    pub fn ray(&self, length: f32) -> (Vec3, Vec3) {
        (self.position, self.position + self.forward_vector() * length)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward_vector(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn default_camera_has_finite_matrices() {
        let cam = Camera::default();
        let vp = cam.view_projection();
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
        assert!((cam.forward_vector() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn forward_impulse_moves_along_view() {
        let mut cam = Camera::new();
        cam.impulse(Vec3::new(0.0, 0.0, 5.0));
        cam.update(FRAME);
        assert!(cam.position().z < 0.0);
        assert!(cam.position().x.abs() < 1e-4);
    }

    #[test]
    fn opposite_impulses_cancel() {
        let mut cam = Camera::new();
        cam.add_impulse_right(5.0);
        cam.add_impulse_right(-5.0);
        cam.update(FRAME);
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(cam.velocity(), Vec3::ZERO);
    }

    #[test]
    fn velocity_decays_after_release() {
        let mut cam = Camera::new();
        cam.impulse(Vec3::new(0.0, 5.0, 0.0));
        cam.update(FRAME);
        let first = cam.velocity().length();
        cam.update(FRAME);
        assert!(cam.velocity().length() < first);
        assert!(cam.position().y > 0.0);
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut cam = Camera::new();
        cam.impulse(Vec3::new(5.0, 0.0, 0.0));
        cam.update(0.0);
        assert_eq!(cam.position(), Vec3::ZERO);
    }

    fn hold_forward_for_one_second(fps: u32) -> f32 {
        let mut cam = Camera::new();
        let dt = 1.0 / fps as f32;
        for _ in 0..fps {
            cam.add_impulse_forward(5.0);
            cam.update(dt);
        }
        -cam.position().z
    }

    #[test]
    fn held_impulse_travels_the_same_at_any_frame_rate() {
        let at_60 = hold_forward_for_one_second(60);
        let at_240 = hold_forward_for_one_second(240);
        let at_30 = hold_forward_for_one_second(30);
        assert!(at_60 > 0.0);
        assert!((at_240 - at_60).abs() / at_60 < 0.1, "60fps={at_60} 240fps={at_240}");
        assert!((at_30 - at_60).abs() / at_60 < 0.1, "60fps={at_60} 30fps={at_30}");
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::new();
        cam.set_sensitivity(Vec2::splat(3.0));
        cam.rotate(Vec2::new(0.0, -100_000.0));
        assert_eq!(cam.angles().y, PITCH_LIMIT);
        cam.rotate(Vec2::new(0.0, 100_000.0));
        assert_eq!(cam.angles().y, -PITCH_LIMIT);
    }

    #[test]
    fn sensitivity_scales_rotation() {
        let mut slow = Camera::new();
        let mut fast = Camera::new();
        fast.set_sensitivity(Vec2::splat(3.0));
        slow.rotate(Vec2::new(10.0, 0.0));
        fast.rotate(Vec2::new(10.0, 0.0));
        let slow_turn = slow.angles().x + 90.0;
        let fast_turn = fast.angles().x + 90.0;
        assert!((fast_turn - 3.0 * slow_turn).abs() < 1e-4);
    }

    #[test]
    fn ray_runs_along_forward() {
        let mut cam = Camera::new();
        cam.set_position(Vec3::new(1.0, 2.0, 3.0));
        let (start, end) = cam.ray(10.0);
        assert_eq!(start, Vec3::new(1.0, 2.0, 3.0));
        assert!((end - Vec3::new(1.0, 2.0, -7.0)).length() < 1e-4);
    }
}
