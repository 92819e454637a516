use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Orbital,
    Free,
}

const HOME_EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const HOME_TARGET: Vec3 = Vec3::ZERO;

pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,

    pub target: Vec3,
    pub orbit_distance: f32,

    pub mode: CameraMode,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: HOME_EYE,
            yaw: 90.0_f32.to_radians(),
            pitch: 0.0,

            target: HOME_TARGET,
            orbit_distance: HOME_EYE.z,

            mode: CameraMode::Orbital,

            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,

            move_speed: 3.0,
            mouse_sensitivity: 0.003,
            zoom_speed: 0.4,
            pan_speed: 0.0015,
        }
    }
}

impl Camera {
    /// Puts the eye back at the demo's home position, keeping the current
    /// mode and projection settings.
    pub fn reset(&mut self) {
        let keep_mode = self.mode;
        let keep_aspect = self.aspect;
        *self = Self {
            mode: keep_mode,
            aspect: keep_aspect,
            ..Self::default()
        };
        if self.mode == CameraMode::Free {
            // Free mode stores the look direction, not the orbit direction.
            self.yaw = -90.0_f32.to_radians();
        }
    }

    pub fn front(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    fn view_direction(&self) -> Vec3 {
        match self.mode {
            CameraMode::Free => self.front(),
            CameraMode::Orbital => (self.target - self.position).normalize_or_zero(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        match self.mode {
            CameraMode::Free => {
                Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
            }
            CameraMode::Orbital => Mat4::look_at_rh(self.position, self.target, Vec3::Y),
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn process_keyboard(&mut self, forward: f32, right: f32, up: f32, dt: f32) {
        if self.mode != CameraMode::Free {
            return;
        }

        let speed = self.move_speed * dt;
        let front = self.front();
        let right_vec = front.cross(Vec3::Y).normalize();

        self.position += front * forward * speed;
        self.position += right_vec * right * speed;
        self.position.y += up * speed;
    }

    pub fn process_mouse_movement(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.mouse_sensitivity;
        self.pitch -= delta.y * self.mouse_sensitivity;

        let max_pitch = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        if self.mode == CameraMode::Orbital {
            self.update_orbit_position();
        }
    }

    /// Shifts the orbit target (or the eye, in free mode) in the view plane.
    pub fn process_pan(&mut self, delta: Vec2) {
        let view = self.view_direction();
        let right = view.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(view);
        let offset = (right * -delta.x + up * delta.y) * self.pan_speed * self.orbit_distance;

        match self.mode {
            CameraMode::Orbital => {
                self.target += offset;
                self.update_orbit_position();
            }
            CameraMode::Free => {
                self.position += offset;
            }
        }
    }

    pub fn process_scroll(&mut self, delta: f32) {
        match self.mode {
            CameraMode::Free => {
                self.move_speed = (self.move_speed + delta * self.zoom_speed).clamp(0.5, 50.0);
            }
            CameraMode::Orbital => {
                self.orbit_distance =
                    (self.orbit_distance - delta * self.zoom_speed).clamp(1.2, 50.0);
                self.update_orbit_position();
            }
        }
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode == mode {
            return;
        }

        match mode {
            CameraMode::Free => {
                let dir = (self.target - self.position).normalize_or_zero();
                self.yaw = dir.z.atan2(dir.x);
                self.pitch = dir.y.asin();
            }
            CameraMode::Orbital => {
                self.orbit_distance = self.position.distance(self.target).clamp(1.2, 50.0);

                let dir = (self.position - self.target).normalize_or_zero();
                self.yaw = dir.z.atan2(dir.x);
                self.pitch = dir.y.asin();
            }
        }
        self.mode = mode;

        if self.mode == CameraMode::Orbital {
            self.update_orbit_position();
        }
    }

    fn update_orbit_position(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.orbit_distance * self.yaw.cos() * self.pitch.cos(),
                self.orbit_distance * self.pitch.sin(),
                self.orbit_distance * self.yaw.sin() * self.pitch.cos(),
            );
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_looks_at_origin() {
        let cam = Camera::default();
        assert!((cam.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);

        let vp = cam.view_projection_matrix();
        assert!(!vp.col(0).x.is_nan());

        // The origin projects to the center of the screen.
        let clip = vp * Vec3::ZERO.extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn orbit_drag_keeps_distance() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(Vec2::new(250.0, -80.0));
        assert!((cam.position.distance(cam.target) - cam.orbit_distance).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.process_scroll(1000.0);
        assert!(cam.orbit_distance >= 1.2);
        cam.process_scroll(-10000.0);
        assert!(cam.orbit_distance <= 50.0);
    }

    #[test]
    fn pan_moves_the_target() {
        let mut cam = Camera::default();
        let start = cam.target;
        cam.process_pan(Vec2::new(120.0, 0.0));
        assert_ne!(cam.target, start);
        assert!((cam.position.distance(cam.target) - cam.orbit_distance).abs() < 1e-4);
    }

    #[test]
    fn reset_restores_home_eye() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(Vec2::new(300.0, 120.0));
        cam.process_scroll(-5.0);
        cam.process_pan(Vec2::new(50.0, 50.0));
        cam.set_aspect(1024.0, 768.0);

        cam.reset();
        assert!((cam.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert_eq!(cam.target, Vec3::ZERO);
        // Aspect tracks the window, not the scene.
        assert!((cam.aspect - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn mode_round_trip_preserves_framing() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(Vec2::new(200.0, 60.0));
        let before = cam.position;

        cam.set_mode(CameraMode::Free);
        cam.set_mode(CameraMode::Orbital);
        assert!((cam.position - before).length() < 1e-3);
    }
}
