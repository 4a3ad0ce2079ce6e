mod tests {
    use std::f64::consts::{PI, TAU};

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Vector3;
    use units::{Angle, Length, Mass, Time};

    use crate::elliptical::{EllipticalOrbit, OrbitalElements};
    use crate::error::EphemerisError;
    use crate::orbit::Orbit;
    use crate::state_vector::state_vector_to_orbit;

    fn earth() -> Mass {
        Mass::from_earth_masses(1.0)
    }

    fn period_for(semi_major_axis: f64, mass: Mass) -> f64 {
        TAU * (semi_major_axis.powi(3) / mass.gravitational_parameter()).sqrt()
    }

    #[test]
    fn test_round_trip_recovers_elements() {
        let a = 12_000.0;
        let e = 0.3;
        let original = EllipticalOrbit::new(OrbitalElements {
            pericenter_distance: Length::from_km(a * (1.0 - e)),
            eccentricity: e,
            inclination: Angle::from_degrees(30.0),
            ascending_node: Angle::from_degrees(40.0),
            arg_of_periapsis: Angle::from_degrees(60.0),
            mean_anomaly: Angle::from_radians(1.0),
            period: Time::from_days(period_for(a, earth())),
            epoch: 0.0,
        })
        .unwrap();

        let epoch = 0.02;
        let fitted = state_vector_to_orbit(
            original.position_at_time(epoch),
            original.velocity_at_time(epoch),
            earth(),
            epoch,
        )
        .unwrap();

        assert_relative_eq!(fitted.eccentricity(), e, epsilon = 1e-8);
        assert_relative_eq!(fitted.semi_major_axis(), a, max_relative = 1e-8);
        assert_relative_eq!(fitted.inclination(), 30f64.to_radians(), epsilon = 1e-8);
        assert_relative_eq!(fitted.ascending_node(), 40f64.to_radians(), epsilon = 1e-8);
        assert_relative_eq!(fitted.arg_of_periapsis(), 60f64.to_radians(), epsilon = 1e-8);
        assert_relative_eq!(fitted.period(), original.period(), max_relative = 1e-8);

        for &t in &[epoch, epoch + 0.05, epoch + 0.3] {
            let drift = (fitted.position_at_time(t) - original.position_at_time(t)).norm();
            assert!(drift < 1e-3, "t = {t}, drift = {drift}");
        }
    }

    #[test]
    fn test_circular_equatorial_orbit() {
        let r = 42_164.0;
        let v = (earth().gravitational_parameter() / r).sqrt();
        let orbit = state_vector_to_orbit(
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(0.0, v, 0.0),
            earth(),
            0.0,
        )
        .unwrap();

        assert_abs_diff_eq!(orbit.eccentricity(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.inclination(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.position_at_time(0.0), Vector3::new(r, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(orbit.period(), 0.99727, epsilon = 1e-4);
    }

    #[test]
    fn test_retrograde_orbit_keeps_direction_of_motion() {
        let r = 10_000.0;
        let v = (earth().gravitational_parameter() / r).sqrt();
        let orbit = state_vector_to_orbit(
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(0.0, -v, 0.0),
            earth(),
            0.0,
        )
        .unwrap();

        assert_relative_eq!(orbit.inclination(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.position_at_time(0.0), Vector3::new(r, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(
            orbit.velocity_at_time(0.0),
            Vector3::new(0.0, -v, 0.0),
            epsilon = 1e-6 * v
        );
    }

    #[test]
    fn test_escape_velocity_is_unbound() {
        let r = 10_000.0;
        let escape = (2.0 * earth().gravitational_parameter() / r).sqrt();
        let result = state_vector_to_orbit(
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(0.0, 1.5 * escape, 0.0),
            earth(),
            0.0,
        );

        assert!(matches!(result, Err(EphemerisError::UnboundOrbit { .. })));
    }

    #[test]
    fn test_degenerate_state_vectors() {
        assert_eq!(
            state_vector_to_orbit(Vector3::zeros(), Vector3::new(0.0, 1.0, 0.0), earth(), 0.0),
            Err(EphemerisError::DegenerateStateVector)
        );
        // Purely radial motion has no orbit plane
        assert_eq!(
            state_vector_to_orbit(
                Vector3::new(7000.0, 0.0, 0.0),
                Vector3::new(100.0, 0.0, 0.0),
                earth(),
                0.0
            ),
            Err(EphemerisError::DegenerateStateVector)
        );
    }
}
