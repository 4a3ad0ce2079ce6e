//! Earth-Moon system with a departing spacecraft
//!
//! Builds a frame hierarchy, prints positions through the nested frames and
//! shows how culling bounds react to changes.
//!
//! Run with: RUST_LOG=frame_tree=debug cargo run --package frame-tree --example solar_system

use std::sync::Arc;

use ephemeris::{EllipticalOrbit, MixedOrbit, OrbitalElements};
use frame_tree::{
    Body, BodyClass, FrameTreeError, J2000EclipticFrame, J2000EquatorFrame, Selection,
    TimelinePhase, Universe,
};
use nalgebra::Vector3;
use tracing_subscriber::EnvFilter;
use units::{Angle, J2000, KM_PER_AU, Length, Mass, Time};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Frame tree demo: Sun, Earth, Moon and a probe\n");
    println!("{}", "=".repeat(60));

    let mut universe = Universe::default();
    let sun = universe.add_star("Sun", Vector3::zeros(), 695_700.0)?;
    let earth = universe.add_body(Body::new("Earth", 6_378.14).with_class(BodyClass::Planet))?;
    let moon = universe.add_body(Body::new("Moon", 1_737.4).with_class(BodyClass::Moon))?;

    let earth_orbit = Arc::new(EllipticalOrbit::new(OrbitalElements {
        pericenter_distance: Length::from_au(1.00000011 * (1.0 - 0.01671022)),
        eccentricity: 0.01671022,
        inclination: Angle::from_degrees(0.00005),
        ascending_node: Angle::zero(),
        arg_of_periapsis: Angle::from_degrees(102.94719),
        mean_anomaly: Angle::from_degrees(100.46435 - 102.94719),
        period: Time::from_years(1.0000174),
        epoch: J2000,
    })?);
    universe.append_phase(TimelinePhase::new(
        earth,
        J2000 - 36_525.0,
        J2000 + 36_525.0,
        earth_orbit.clone(),
        Arc::new(J2000EclipticFrame::new(sun)),
    )?)?;

    let moon_orbit = Arc::new(EllipticalOrbit::new(OrbitalElements {
        pericenter_distance: Length::from_km(384_400.0 * (1.0 - 0.0549)),
        eccentricity: 0.0549,
        inclination: Angle::from_degrees(5.145),
        ascending_node: Angle::from_degrees(125.08),
        arg_of_periapsis: Angle::from_degrees(318.15),
        mean_anomaly: Angle::from_degrees(135.27),
        period: Time::from_days(27.321661),
        epoch: J2000,
    })?);
    universe.append_phase(TimelinePhase::new(
        moon,
        J2000 - 36_525.0,
        J2000 + 36_525.0,
        moon_orbit,
        Arc::new(J2000EquatorFrame::new(earth)),
    )?)?;

    println!("\nPositions (AU from the Sun):");
    for day in [0.0, 91.3, 182.6, 273.9] {
        let t = J2000 + day;
        let earth_position = universe.position_at(Selection::Body(earth), t)?;
        let moon_position = universe.position_at(Selection::Body(moon), t)?;
        println!(
            "  day {:>6.1}: Earth {:>8.5} AU, Moon {:>9.0} km from Earth",
            day,
            earth_position.norm() / KM_PER_AU,
            (moon_position - earth_position).norm()
        );
    }

    universe.update_culling_bounds(Selection::Star(sun));
    print_bounds(&universe, sun)?;

    // The probe rides Earth's orbit for 30 days, Keplerian fits outside
    let probe = universe.add_body(
        Body::new("Probe", 0.005)
            .with_class(BodyClass::Spacecraft)
            .with_culling_radius(1.0),
    )?;
    let escort = Arc::new(MixedOrbit::new(
        earth_orbit,
        J2000,
        J2000 + 30.0,
        Mass::from_solar_masses(1.0),
    )?);
    universe.append_phase(TimelinePhase::new(
        probe,
        J2000 - 36_525.0,
        J2000 + 36_525.0,
        escort,
        Arc::new(J2000EclipticFrame::new(sun)),
    )?)?;

    let phase = universe.active_phase(probe, J2000)?;
    let samples = universe.trajectory(phase, J2000, J2000 + 60.0)?;
    println!("\nProbe trajectory: {} adaptive samples over 60 days", samples.len());

    let near = universe.bodies_within(
        sun,
        universe.position_at(Selection::Body(earth), J2000 + 15.0)?,
        50_000.0,
        J2000 + 15.0,
    )?;
    println!("Bodies within 50,000 km of Earth on day 15: {}", near.len());

    universe.set_secondary_illuminator(moon, true)?;
    universe.update_culling_bounds(Selection::Star(sun));
    print_bounds(&universe, sun)?;

    match universe.remove_body(earth) {
        Err(FrameTreeError::BodyHasChildren(_)) => {
            println!("\nEarth cannot be removed while the Moon orbits it")
        }
        other => println!("\nUnexpected result removing Earth: {other:?}"),
    }

    Ok(())
}

fn print_bounds(universe: &Universe, sun: frame_tree::StarId) -> Result<(), FrameTreeError> {
    let bounds = universe
        .culling_bounds(Selection::Star(sun))
        .ok_or(FrameTreeError::UnknownStar(sun))?;
    println!("\nCulling bounds of the Sun's frame tree:");
    println!(
        "  bounding sphere:        {:.4} AU",
        bounds.bounding_sphere_radius / KM_PER_AU
    );
    println!("  largest child radius:   {:.2} km", bounds.max_child_radius);
    println!(
        "  secondary illuminators: {}",
        bounds.contains_secondary_illuminators
    );
    println!("  class mask:             {:#07x}", bounds.child_class_mask);
    Ok(())
}
