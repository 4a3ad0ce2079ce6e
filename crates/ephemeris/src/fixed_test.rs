use nalgebra::Vector3;

use crate::fixed::FixedOrbit;
use crate::orbit::{Orbit, OrbitExt};
use crate::sampling::AdaptiveSamplingParameters;

#[test]
fn test_fixed_orbit_never_moves() {
    let orbit = FixedOrbit::new(Vector3::new(3.0, 4.0, 0.0));

    assert_eq!(orbit.position_at_time(-1.0e6), Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(orbit.position_at_time(2_451_545.0), Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(orbit.velocity_at_time(0.0), Vector3::zeros());
}

#[test]
fn test_fixed_orbit_properties() {
    let orbit = FixedOrbit::new(Vector3::new(3.0, 4.0, 0.0));

    assert_eq!(orbit.period(), 0.0);
    assert!(!orbit.is_periodic());
    assert_eq!(orbit.bounding_radius(), 5.0);
}

#[test]
fn test_fixed_orbit_has_no_trajectory_samples() {
    let orbit = FixedOrbit::new(Vector3::new(1.0, 0.0, 0.0));

    assert_eq!(orbit.sample(0.0, 100.0).count(), 0);
}

#[test]
fn test_adaptive_sampling_of_fixed_orbit_takes_largest_steps() {
    let orbit = FixedOrbit::new(Vector3::new(1.0, 0.0, 0.0));
    let params = AdaptiveSamplingParameters {
        max_step: 10.0,
        ..Default::default()
    };

    let times: Vec<f64> = orbit
        .adaptive_sample(0.0, 30.0, &params)
        .map(|s| s.time)
        .collect();

    assert_eq!(times, vec![0.0, 10.0, 20.0, 30.0]);
}
