//! Integration tests for a small solar system assembled from catalog data.
//!
//! Covers orbits built from properties, nested frames, culling bounds and a
//! spacecraft handed over from one frame tree to another.

use std::sync::Arc;

use ephemeris::{Orbit, PropertyMap, SampledTrajectory, orbit_from_properties};
use frame_tree::{
    Body, BodyClass, BodyId, J2000EclipticFrame, J2000EquatorFrame, ReferenceFrame, Selection,
    StarId, TimelinePhase, Universe,
};
use nalgebra::Vector3;
use proptest::prelude::*;
use serde::Deserialize;
use units::{J2000, KM_PER_AU};

/// Phases cover a century either side of J2000
const SPAN: f64 = 36_525.0;
const HANDOVER: f64 = J2000 + 10.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    name: String,
    radius: f64,
    class: BodyClass,
    parent: String,
    #[serde(default)]
    equatorial: bool,
    #[serde(default)]
    planet_units: bool,
    orbit: PropertyMap,
}

const CATALOG: &str = r#"[
    {
        "name": "Earth",
        "radius": 6378.14,
        "class": "Planet",
        "parent": "Sun",
        "planetUnits": true,
        "orbit": {
            "EllipticalOrbit": {
                "SemiMajorAxis": 1.00000011,
                "Eccentricity": 0.01671022,
                "Period": 1.0000174,
                "Inclination": 0.00005,
                "LongOfPericenter": 102.94719,
                "MeanLongitude": 100.46435
            }
        }
    },
    {
        "name": "Moon",
        "radius": 1737.4,
        "class": "Moon",
        "parent": "Earth",
        "equatorial": true,
        "orbit": {
            "EllipticalOrbit": {
                "SemiMajorAxis": 384400,
                "Eccentricity": 0.0549,
                "Period": 27.321661,
                "Inclination": 5.145,
                "AscendingNode": 125.08,
                "ArgOfPericenter": 318.15,
                "MeanAnomaly": 135.27
            }
        }
    }
]"#;

struct SolarSystem {
    universe: Universe,
    sun: StarId,
    earth: BodyId,
    moon: BodyId,
}

fn load_catalog() -> SolarSystem {
    let mut universe = Universe::default();
    let sun = universe
        .add_star("Sun", Vector3::zeros(), 695_700.0)
        .unwrap();

    let entries: Vec<CatalogEntry> = serde_json::from_str(CATALOG).unwrap();
    for entry in entries {
        let parent = universe.find(&entry.parent).unwrap();
        let body = universe
            .add_body(Body::new(entry.name, entry.radius).with_class(entry.class))
            .unwrap();
        let frame: Arc<dyn ReferenceFrame> = if entry.equatorial {
            Arc::new(J2000EquatorFrame::new(parent))
        } else {
            Arc::new(J2000EclipticFrame::new(parent))
        };
        let orbit = orbit_from_properties(&entry.orbit, entry.planet_units).unwrap();
        let phase = TimelinePhase::new(body, J2000 - SPAN, J2000 + SPAN, orbit, frame).unwrap();
        universe.append_phase(phase).unwrap();
    }

    let earth = universe.find("Earth").and_then(Selection::body).unwrap();
    let moon = universe.find("Moon").and_then(Selection::body).unwrap();
    SolarSystem {
        universe,
        sun,
        earth,
        moon,
    }
}

/// Parks a probe 7000 km from Earth, then sends it outward on a sampled
/// heliocentric track that starts exactly where the parking phase ends
fn launch_probe(system: &mut SolarSystem) -> BodyId {
    let universe = &mut system.universe;
    let probe = universe
        .add_body(Body::new("Probe", 0.005).with_class(BodyClass::Spacecraft))
        .unwrap();
    let offset = Vector3::new(7_000.0, 0.0, 0.0);

    let parked = TimelinePhase::new(
        probe,
        J2000 - SPAN,
        HANDOVER,
        Arc::new(ephemeris::FixedOrbit::new(offset)),
        Arc::new(J2000EclipticFrame::new(system.earth)),
    )
    .unwrap();
    universe.append_phase(parked).unwrap();

    let departure = universe
        .position_at(Selection::Body(system.earth), HANDOVER)
        .unwrap()
        + offset;
    let outward = departure.normalize() * 2.0e6;
    let track = SampledTrajectory::new(
        (0..=10)
            .map(|day| {
                let t = HANDOVER + f64::from(day) * 10.0;
                (t, departure + outward * f64::from(day))
            })
            .collect(),
    )
    .unwrap();
    let cruise = TimelinePhase::new(
        probe,
        HANDOVER,
        HANDOVER + 100.0,
        Arc::new(track.cached()),
        Arc::new(J2000EclipticFrame::new(system.sun)),
    )
    .unwrap();
    universe.append_phase(cruise).unwrap();

    probe
}

#[test]
fn catalog_orbits_stay_within_apsides() {
    let SolarSystem {
        universe,
        earth,
        moon,
        ..
    } = load_catalog();

    for day in (0..400).step_by(7) {
        let t = J2000 + f64::from(day);
        let earth_position = universe.position_at(Selection::Body(earth), t).unwrap();
        let moon_position = universe.position_at(Selection::Body(moon), t).unwrap();

        let sun_distance = earth_position.norm() / KM_PER_AU;
        assert!((0.98..=1.02).contains(&sun_distance), "t={t}: {sun_distance} AU");

        let moon_distance = (moon_position - earth_position).norm();
        assert!(
            (384_400.0 * 0.945..=384_400.0 * 1.055).contains(&moon_distance),
            "t={t}: {moon_distance} km"
        );
    }
}

#[test]
fn moon_tree_hangs_from_earth() {
    let SolarSystem {
        universe,
        sun,
        earth,
        moon,
    } = load_catalog();

    let sun_tree = universe.frame_tree(Selection::Star(sun)).unwrap();
    assert_eq!(sun_tree.child_count(), 1);

    let earth_tree = universe.frame_tree(Selection::Body(earth)).unwrap();
    let moon_phase = earth_tree.child(0).unwrap();
    assert_eq!(universe.phase(moon_phase).map(|phase| phase.body()), Some(moon));
    assert!(universe.frame_tree(Selection::Body(moon)).is_none());
}

#[test]
fn culling_bounds_cover_whole_system() {
    let SolarSystem {
        mut universe,
        sun,
        earth,
        ..
    } = load_catalog();

    universe.update_culling_bounds(Selection::Star(sun));

    let bounds = universe.culling_bounds(Selection::Star(sun)).unwrap();
    let earth_orbit = universe
        .phase(universe.active_phase(earth, J2000).unwrap())
        .unwrap()
        .orbit()
        .bounding_radius();
    let moon_reach = 384_400.0 * 1.0549 + 1737.4;
    assert!(bounds.bounding_sphere_radius >= earth_orbit + moon_reach);
    assert_eq!(
        bounds.child_class_mask,
        BodyClass::Planet.bit() | BodyClass::Moon.bit()
    );
    assert!((bounds.max_child_radius - 6378.14).abs() < 1e-9);

    // Every body lies inside the root sphere at any time
    for day in (0..800).step_by(13) {
        let t = J2000 + f64::from(day);
        for (id, _) in universe.bodies() {
            let distance = universe.position_at(Selection::Body(id), t).unwrap().norm();
            assert!(distance <= bounds.bounding_sphere_radius);
        }
    }
}

#[test]
fn probe_handover_is_continuous() {
    let mut system = load_catalog();
    let probe = launch_probe(&mut system);
    let universe = &system.universe;

    let before = universe
        .position_at(Selection::Body(probe), HANDOVER - 1.0e-6)
        .unwrap();
    let after = universe.position_at(Selection::Body(probe), HANDOVER).unwrap();

    // Earth moves about 2.6e6 km/day
    assert!((after - before).norm() < 10.0);
    assert_eq!(universe.body(probe).unwrap().timeline().phase_count(), 2);
}

#[test]
fn probe_leaves_earth_neighbourhood() {
    let mut system = load_catalog();
    let probe = launch_probe(&mut system);
    system
        .universe
        .update_culling_bounds(Selection::Star(system.sun));
    let universe = &system.universe;

    let near_earth = |t: f64| {
        let earth_position = universe.position_at(Selection::Body(system.earth), t).unwrap();
        universe
            .bodies_within(system.sun, earth_position, 10_000.0, t)
            .unwrap()
    };

    assert!(near_earth(HANDOVER - 1.0).contains(&probe));
    assert!(!near_earth(HANDOVER + 50.0).contains(&probe));
    assert!(near_earth(HANDOVER + 50.0).contains(&system.earth));
}

#[test]
fn removing_probe_frees_its_phases() {
    let mut system = load_catalog();
    let probe = launch_probe(&mut system);
    let phases_with_probe = system.universe.phases().len();

    system.universe.remove_body(probe).unwrap();

    assert_eq!(system.universe.phases().len(), phases_with_probe - 2);
    let earth_tree = system
        .universe
        .frame_tree(Selection::Body(system.earth))
        .unwrap();
    assert_eq!(earth_tree.child_count(), 1);
}

proptest! {
    #[test]
    fn active_phase_contains_query_time(
        lengths in prop::collection::vec(0.5f64..50.0, 1..8),
        fraction in 0.0f64..1.0,
    ) {
        let mut universe = Universe::default();
        let sun = universe.add_star("Sun", Vector3::zeros(), 1.0).unwrap();
        let body = universe.add_body(Body::new("Body", 1.0)).unwrap();

        let mut start = 0.0;
        for length in &lengths {
            let phase = TimelinePhase::new(
                body,
                start,
                start + length,
                Arc::new(ephemeris::FixedOrbit::new(Vector3::new(start, 0.0, 0.0))),
                Arc::new(J2000EclipticFrame::new(sun)),
            )
            .unwrap();
            universe.append_phase(phase).unwrap();
            start += length;
        }

        let t = start * fraction;
        let id = universe.active_phase(body, t).unwrap();
        let phase = universe.phase(id).unwrap();
        prop_assert!(phase.includes(t));
        prop_assert_eq!(
            universe.position_at(Selection::Body(body), t).unwrap().x,
            phase.start_time()
        );
    }
}
