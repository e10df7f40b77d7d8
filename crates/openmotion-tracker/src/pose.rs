//! Pose tracker
//!
//! The tracker is either uncentered (no baseline) or centered. Only
//! [`PoseTracker::initialize`] returns it to uncentered;
//! [`PoseTracker::reset_view`] recaptures the baseline every time it is
//! called.

use crate::config::TrackerConfig;
use glam::{Mat3, Mat4, Quat, Vec3};
use openmotion_input::{Input, InputHandle, InputRegistry, SurfaceHandle};
use tracing::{debug, info};

/// Pose captured by [`PoseTracker::reset_view`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub position: Vec3,
    pub orientation: Quat,
}

pub struct PoseTracker<R: InputRegistry> {
    registry: R,
    config: TrackerConfig,
    position_inputs: [Option<InputHandle>; 3],
    orientation_inputs: [Option<InputHandle>; 4],
    baseline: Option<Baseline>,
    initialized: bool,
}

fn read(input: Option<&InputHandle>) -> f32 {
    input.map_or(0.0, |input| input.state() as f32)
}

impl<R: InputRegistry> PoseTracker<R> {
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, TrackerConfig::default())
    }

    pub fn with_config(registry: R, config: TrackerConfig) -> Self {
        Self {
            registry,
            config,
            position_inputs: Default::default(),
            orientation_inputs: Default::default(),
            baseline: None,
            initialized: false,
        }
    }

    /// Initialize the registry and resolve every configured control.
    ///
    /// Controls that cannot be found stay unresolved and read as zero.
    pub fn initialize(&mut self, surface: SurfaceHandle) {
        self.registry.initialize(surface);

        let filter = self.config.device.as_ref();
        let registry = &self.registry;
        let resolve = |name: &String| {
            let found = registry.find_input(name, filter);
            if found.is_none() {
                debug!("Tracker control '{}' not found", name);
            }
            found
        };

        self.position_inputs = self.config.position_inputs.each_ref().map(resolve);
        self.orientation_inputs = self.config.orientation_inputs.each_ref().map(resolve);
        self.baseline = None;
        self.initialized = true;

        let resolved = self
            .position_inputs
            .iter()
            .chain(&self.orientation_inputs)
            .filter(|input| input.is_some())
            .count();
        info!("Pose tracker initialized with {}/7 controls", resolved);
    }

    /// Release every control handle and shut the registry down.
    pub fn shutdown(&mut self) {
        self.position_inputs = Default::default();
        self.orientation_inputs = Default::default();
        self.registry.shutdown();
        self.initialized = false;
        info!("Pose tracker shut down");
    }

    /// Make the current pose the new origin.
    pub fn reset_view(&mut self) {
        let baseline = Baseline {
            position: self.current_position(),
            orientation: self.current_orientation(),
        };
        debug!("Re-centered view at {:?}", baseline);
        self.baseline = Some(baseline);
    }

    /// Position as currently reported by the controls.
    pub fn current_position(&self) -> Vec3 {
        let [x, y, z] = &self.position_inputs;
        Vec3::new(read(x.as_ref()), read(y.as_ref()), read(z.as_ref()))
    }

    /// Orientation as currently reported by the controls, not normalized.
    pub fn current_orientation(&self) -> Quat {
        let [w, x, y, z] = &self.orientation_inputs;
        Quat::from_xyzw(
            read(x.as_ref()),
            read(y.as_ref()),
            read(z.as_ref()),
            read(w.as_ref()),
        )
    }

    /// View transform for the current frame.
    ///
    /// Rotation is the inverse of the (re-based) orientation, followed by a
    /// translation by the negated (re-based) position. Once centered, only
    /// the baseline's heading is removed from the orientation.
    pub fn transform_matrix(&self) -> Mat4 {
        let current = self.current_position();
        let orientation = self.current_orientation();

        let (position, world) = match &self.baseline {
            Some(baseline) => {
                let inverse = baseline.orientation.conjugate();
                let heading = Quat::from_xyzw(0.0, inverse.y, 0.0, inverse.w);
                (-(current - baseline.position), heading * orientation)
            }
            None => (-current, orientation),
        };

        Mat4::from_mat3(Mat3::from_quat(world.conjugate())) * Mat4::from_translation(position)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_centered(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable access for polling the registry between frames.
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmotion_input::DeviceRegistry;
    use openmotion_input::mock::{MockDevice, MockInput};

    struct Rig {
        tracker: PoseTracker<DeviceRegistry>,
        pos: [MockInput; 3],
        quat: [MockInput; 4],
    }

    fn rig() -> Rig {
        let pos = ["Pos X", "Pos Y", "Pos Z"].map(MockInput::new);
        let quat = ["Quat W", "Quat X", "Quat Y", "Quat Z"].map(MockInput::new);

        let mut device = MockDevice::new("Mock", 0, "Head");
        for input in pos.iter().chain(&quat) {
            device = device.with_input(input.clone());
        }

        let mut registry = DeviceRegistry::new();
        registry.add_device(Box::new(device));

        let mut tracker = PoseTracker::new(registry);
        tracker.initialize(SurfaceHandle::NONE);
        Rig { tracker, pos, quat }
    }

    fn set_quat(rig: &Rig, q: Quat) {
        rig.quat[0].set(f64::from(q.w));
        rig.quat[1].set(f64::from(q.x));
        rig.quat[2].set(f64::from(q.y));
        rig.quat[3].set(f64::from(q.z));
    }

    fn set_pos(rig: &Rig, p: [f64; 3]) {
        for (input, value) in rig.pos.iter().zip(p) {
            input.set(value);
        }
    }

    #[test]
    fn test_all_controls_absent_is_identity() {
        let mut tracker = PoseTracker::new(DeviceRegistry::new());
        tracker.initialize(SurfaceHandle::NONE);
        assert!(tracker.is_initialized());
        assert_eq!(tracker.transform_matrix(), Mat4::IDENTITY);

        tracker.reset_view();
        assert!(tracker.is_centered());
        assert_eq!(tracker.transform_matrix(), Mat4::IDENTITY);

        tracker.shutdown();
        assert!(!tracker.is_initialized());
    }

    #[test]
    fn test_uncentered_translation_is_negated_position() {
        let rig = rig();
        set_quat(&rig, Quat::IDENTITY);
        set_pos(&rig, [1.0, 2.0, 3.0]);

        let m = rig.tracker.transform_matrix();
        assert!(m.w_axis.truncate().abs_diff_eq(Vec3::new(-1.0, -2.0, -3.0), 1e-6));
        assert!(Mat3::from_mat4(m).abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn test_reset_view_zeroes_translation() {
        let mut rig = rig();
        set_quat(&rig, Quat::from_rotation_y(0.4));
        set_pos(&rig, [0.25, -1.5, 7.0]);

        rig.tracker.reset_view();
        let m = rig.tracker.transform_matrix();
        assert!(m.w_axis.truncate().abs_diff_eq(Vec3::ZERO, 1e-6));

        set_pos(&rig, [1.25, -1.5, 7.0]);
        let m = rig.tracker.transform_matrix();
        let moved = Mat3::from_mat4(m).inverse() * m.w_axis.truncate();
        assert!(moved.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_yaw_baseline_recenters_heading() {
        let mut rig = rig();
        set_quat(&rig, Quat::from_rotation_y(1.2));
        rig.tracker.reset_view();

        let m = rig.tracker.transform_matrix();
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_pitch_survives_recenter() {
        let mut rig = rig();
        let yaw = Quat::from_rotation_y(0.9);
        set_quat(&rig, yaw);
        rig.tracker.reset_view();

        let pitch = Quat::from_rotation_x(0.3);
        set_quat(&rig, yaw * pitch);

        let m = rig.tracker.transform_matrix();
        let expected = Mat4::from_quat(pitch.conjugate());
        assert!(m.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_transform_is_repeatable() {
        let mut rig = rig();
        set_quat(&rig, Quat::from_euler(glam::EulerRot::YXZ, 0.3, -0.2, 0.1));
        set_pos(&rig, [0.1, 0.2, 0.3]);
        rig.tracker.reset_view();
        set_pos(&rig, [0.4, 0.5, 0.6]);

        let a = rig.tracker.transform_matrix().to_cols_array().map(f32::to_bits);
        let b = rig.tracker.transform_matrix().to_cols_array().map(f32::to_bits);
        assert_eq!(a, b);
    }

    #[test]
    fn test_initialize_clears_baseline() {
        let mut rig = rig();
        rig.tracker.reset_view();
        assert!(rig.tracker.baseline().is_some());

        rig.tracker.initialize(SurfaceHandle::NONE);
        assert!(!rig.tracker.is_centered());
    }

    #[test]
    fn test_shutdown_releases_controls() {
        let mut rig = rig();
        set_pos(&rig, [1.0, 1.0, 1.0]);
        rig.tracker.shutdown();

        assert_eq!(rig.tracker.current_position(), Vec3::ZERO);
        assert!(rig.tracker.registry().devices().is_empty());

        // A second shutdown with nothing resolved is harmless.
        rig.tracker.shutdown();
        rig.tracker.reset_view();
        assert_eq!(rig.tracker.transform_matrix(), Mat4::IDENTITY);
    }
}
