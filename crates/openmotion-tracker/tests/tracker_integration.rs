//! Tracker behavior against full registries.

use glam::{Mat3, Mat4, Quat, Vec3};
use hid_sixense_protocol::{HydraReport, RAZER_HYDRA_PID, SIXENSE_VENDOR_ID};
use insta::assert_snapshot;
use openmotion_hid_common::HidInterfaceInfo;
use openmotion_hid_common::hid_traits::mock::MockHidTransport;
use openmotion_input::mock::{MockDevice, MockInput};
use openmotion_input::{DeviceQualifier, DeviceRegistry, SixenseBackend, SurfaceHandle};
use openmotion_tracker::{PoseTracker, TrackerConfig, TrackerResult};
use proptest::prelude::*;

fn head(id: u32, pos: [f64; 3], quat: Quat) -> MockDevice {
    let values = [
        ("Pos X", pos[0]),
        ("Pos Y", pos[1]),
        ("Pos Z", pos[2]),
        ("Quat W", f64::from(quat.w)),
        ("Quat X", f64::from(quat.x)),
        ("Quat Y", f64::from(quat.y)),
        ("Quat Z", f64::from(quat.z)),
    ];

    values
        .into_iter()
        .fold(MockDevice::new("Mock", id, "Head"), |device, (name, value)| {
            let input = MockInput::new(name);
            input.set(value);
            device.with_input(input)
        })
}

#[test]
fn default_config_json() -> TrackerResult<()> {
    let json = TrackerConfig::default().to_json()?;
    assert_snapshot!(json, @r#"
    {
      "position_inputs": [
        "Pos X",
        "Pos Y",
        "Pos Z"
      ],
      "orientation_inputs": [
        "Quat W",
        "Quat X",
        "Quat Y",
        "Quat Z"
      ]
    }
    "#);
    Ok(())
}

#[test]
fn qualifier_selects_device() -> TrackerResult<()> {
    let mut registry = DeviceRegistry::new();
    registry.add_device(Box::new(head(0, [1.0, 0.0, 0.0], Quat::IDENTITY)));
    registry.add_device(Box::new(head(1, [0.0, 5.0, 0.0], Quat::IDENTITY)));

    let config = TrackerConfig::from_json(r#"{ "device": "Mock/1/Head" }"#)?;
    let mut tracker = PoseTracker::with_config(registry, config);
    tracker.initialize(SurfaceHandle::NONE);

    assert!(
        tracker
            .current_position()
            .abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-6)
    );
    Ok(())
}

#[test]
fn unmatched_qualifier_reads_zero() {
    let mut registry = DeviceRegistry::new();
    registry.add_device(Box::new(head(0, [1.0, 2.0, 3.0], Quat::IDENTITY)));

    let config =
        TrackerConfig::default().with_device(DeviceQualifier::new("Sixense", 0, "Razer Hydra"));
    let mut tracker = PoseTracker::with_config(registry, config);
    tracker.initialize(SurfaceHandle::NONE);

    assert_eq!(tracker.transform_matrix(), Mat4::IDENTITY);
}

#[test]
fn tracks_sixense_controls() {
    let mut transport = MockHidTransport::new();
    let feed = transport.add_interface(HidInterfaceInfo::new(
        SIXENSE_VENDOR_ID,
        RAZER_HYDRA_PID,
        0,
        "/dev/hidraw0",
    ));
    transport.add_interface(HidInterfaceInfo::new(
        SIXENSE_VENDOR_ID,
        RAZER_HYDRA_PID,
        1,
        "/dev/hidraw1",
    ));

    let registry = DeviceRegistry::new().with_backend(SixenseBackend::new(transport));
    let config = TrackerConfig {
        position_inputs: ["Left X+", "Left Y+", "Left Z+"].map(String::from),
        ..TrackerConfig::default()
    };
    let mut tracker = PoseTracker::with_config(registry, config);
    tracker.initialize(SurfaceHandle::NONE);

    let mut report = HydraReport::default();
    report.sensors[0].position = [50, 100, 200];
    feed.queue_read(report.to_bytes());
    assert_eq!(tracker.registry_mut().update_input(), 1);

    let m = tracker.transform_matrix();
    assert!(
        m.w_axis
            .truncate()
            .abs_diff_eq(Vec3::new(-0.5, -1.0, -2.0), 1e-6)
    );
}

proptest! {
    #[test]
    fn prop_reset_view_zeroes_translation(
        pos in prop::array::uniform3(-10.0f64..10.0),
        quat in prop::array::uniform4(-1.0f32..1.0),
    ) {
        let [x, y, z, w] = quat;
        let mut registry = DeviceRegistry::new();
        registry.add_device(Box::new(head(0, pos, Quat::from_xyzw(x, y, z, w))));

        let mut tracker = PoseTracker::new(registry);
        tracker.initialize(SurfaceHandle::NONE);
        tracker.reset_view();

        let m = tracker.transform_matrix();
        prop_assert!(m.w_axis.truncate().abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn prop_yaw_baseline_cancels_itself(angle in -3.0f32..3.0) {
        let mut registry = DeviceRegistry::new();
        registry.add_device(Box::new(head(0, [0.0; 3], Quat::from_rotation_y(angle))));

        let mut tracker = PoseTracker::new(registry);
        tracker.initialize(SurfaceHandle::NONE);
        tracker.reset_view();

        let rotation = Mat3::from_mat4(tracker.transform_matrix());
        prop_assert!(rotation.abs_diff_eq(Mat3::IDENTITY, 1e-5));
    }
}
