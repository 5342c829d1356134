use super::math::{vec3, Vec3};

const PITCH_BOUNDS: (f32, f32) = (0.12, 1.35);
const DISTANCE_BOUNDS: (f32, f32) = (4.5, 22.0);
const ORBIT_SPEED: f32 = 0.008;
const ZOOM_SPEED: f32 = 0.0015;

/// Spherical orbit around a fixed target. Orbit and zoom only; panning is
/// deliberately not offered.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: vec3(0.0, 1.0, 0.0),
            yaw: 0.65,
            pitch: 0.5,
            distance: 9.5,
            fov_y: 0.9,
        }
    }
}

impl OrbitCamera {
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * ORBIT_SPEED;
        self.pitch = (self.pitch + delta_y * ORBIT_SPEED).clamp(PITCH_BOUNDS.0, PITCH_BOUNDS.1);
    }

    pub fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll * ZOOM_SPEED).exp();
        self.distance = (self.distance * factor).clamp(DISTANCE_BOUNDS.0, DISTANCE_BOUNDS.1);
    }

    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + vec3(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// View basis: right, up, forward (into the scene).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye()).normalized();
        let world_up = vec3(0.0, 1.0, 0.0);
        let right = forward.cross(world_up).normalized();
        let up = right.cross(forward);
        (right, up, forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 1e6);
        assert!((camera.pitch - PITCH_BOUNDS.1).abs() < 1e-6);
        camera.orbit(0.0, -1e6);
        assert!((camera.pitch - PITCH_BOUNDS.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped_both_ways() {
        let mut camera = OrbitCamera::default();
        camera.zoom(1e6);
        assert!((camera.distance - DISTANCE_BOUNDS.0).abs() < 1e-3);
        camera.zoom(-1e6);
        assert!((camera.distance - DISTANCE_BOUNDS.1).abs() < 1e-3);
    }

    #[test]
    fn eye_sits_at_orbit_distance() {
        let camera = OrbitCamera::default();
        let offset = camera.eye() - camera.target;
        assert!((offset.length() - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn basis_is_orthonormal() {
        let camera = OrbitCamera::default();
        let (right, up, forward) = camera.basis();
        assert!(right.dot(up).abs() < 1e-5);
        assert!(right.dot(forward).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
    }
}
