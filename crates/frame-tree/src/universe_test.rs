use std::sync::Arc;

use ephemeris::FixedOrbit;
use nalgebra::Vector3;

use crate::body::Body;
use crate::config::UniverseConfig;
use crate::error::FrameTreeError;
use crate::frame::J2000EclipticFrame;
use crate::ids::{BodyId, StarId};
use crate::phase::TimelinePhase;
use crate::selection::Selection;
use crate::universe::Universe;

fn phase(body: BodyId, center: impl Into<Selection>, start: f64, end: f64) -> TimelinePhase {
    TimelinePhase::new(
        body,
        start,
        end,
        Arc::new(FixedOrbit::new(Vector3::new(1.0, 0.0, 0.0))),
        Arc::new(J2000EclipticFrame::new(center)),
    )
    .unwrap()
}

fn sun_and_earth() -> (Universe, StarId, BodyId) {
    let mut universe = Universe::new(UniverseConfig::default());
    let sun = universe.add_star("Sun", Vector3::zeros(), 695_700.0).unwrap();
    let earth = universe.add_body(Body::new("Earth", 6_378.0)).unwrap();
    universe.append_phase(phase(earth, sun, 0.0, 1_000.0)).unwrap();
    (universe, sun, earth)
}

#[test]
fn test_names_resolve_to_objects() {
    let (universe, sun, earth) = sun_and_earth();

    assert_eq!(universe.find("Sun"), Some(Selection::Star(sun)));
    assert_eq!(universe.find("Earth"), Some(Selection::Body(earth)));
    assert_eq!(universe.find("Vulcan"), None);
    assert_eq!(universe.star(sun).map(|star| star.name()), Some("Sun"));
    assert!(universe.contains(Selection::Body(earth)));
}

#[test]
fn test_duplicate_names_rejected() {
    let (mut universe, _, _) = sun_and_earth();

    assert_eq!(
        universe.add_body(Body::new("Sun", 1.0)).unwrap_err(),
        FrameTreeError::DuplicateName("Sun".to_string())
    );
    assert_eq!(
        universe.add_star("Earth", Vector3::zeros(), 1.0).unwrap_err(),
        FrameTreeError::DuplicateName("Earth".to_string())
    );
}

#[test]
fn test_appended_phase_held_by_timeline_and_tree() {
    let (universe, sun, earth) = sun_and_earth();
    let id = universe.body(earth).unwrap().timeline().phase(0).unwrap();

    assert_eq!(universe.phase_ref_count(id), Some(2));
    assert!(universe.frame_tree(Selection::Star(sun)).unwrap().contains_child(id));
    assert_eq!(universe.phase(id).map(TimelinePhase::parent), Some(Selection::Star(sun)));
}

#[test]
fn test_discontinuous_phase_leaves_universe_unchanged() {
    let (mut universe, sun, earth) = sun_and_earth();
    let phases_before = universe.phases().len();

    let result = universe.append_phase(phase(earth, sun, 1_001.0, 2_000.0));

    assert_eq!(
        result.unwrap_err(),
        FrameTreeError::PhaseDiscontinuity {
            expected: 1_000.0,
            found: 1_001.0
        }
    );
    assert_eq!(universe.phases().len(), phases_before);
    assert_eq!(universe.body(earth).unwrap().timeline().phase_count(), 1);
    assert_eq!(universe.frame_tree(Selection::Star(sun)).unwrap().child_count(), 1);
}

#[test]
fn test_unknown_parent_rejected() {
    let (mut universe, _, earth) = sun_and_earth();
    let comet = universe.add_body(Body::new("Comet", 5.0)).unwrap();
    universe.remove_body(comet).unwrap();

    let result = universe.append_phase(phase(earth, comet, 1_000.0, 2_000.0));

    assert_eq!(result.unwrap_err(), FrameTreeError::UnknownBody(comet));
}

#[test]
fn test_cyclic_frames_rejected() {
    let (mut universe, _, earth) = sun_and_earth();
    let moon = universe.add_body(Body::new("Moon", 1_737.0)).unwrap();
    universe.append_phase(phase(moon, earth, 0.0, 2_000.0)).unwrap();

    // Earth cannot later orbit something that orbits Earth
    let result = universe.append_phase(phase(earth, moon, 1_000.0, 2_000.0));

    assert_eq!(
        result.unwrap_err(),
        FrameTreeError::CyclicFrame {
            body: earth,
            parent: Selection::Body(moon)
        }
    );
    assert_eq!(universe.body(earth).unwrap().timeline().phase_count(), 1);
}

#[test]
fn test_reparented_body_sits_in_both_trees() {
    let (mut universe, sun, earth) = sun_and_earth();
    let probe = universe.add_body(Body::new("Probe", 0.01)).unwrap();
    let parked = universe.append_phase(phase(probe, earth, 0.0, 10.0)).unwrap();
    let cruise = universe.append_phase(phase(probe, sun, 10.0, 20.0)).unwrap();

    assert!(universe.frame_tree(Selection::Body(earth)).unwrap().contains_child(parked));
    assert!(universe.frame_tree(Selection::Star(sun)).unwrap().contains_child(cruise));
    assert_eq!(universe.phase_ref_count(parked), Some(2));
    assert_eq!(universe.phase_ref_count(cruise), Some(2));
}

#[test]
fn test_clear_timeline_frees_phases() {
    let (mut universe, sun, earth) = sun_and_earth();
    let probe = universe.add_body(Body::new("Probe", 0.01)).unwrap();
    let parked = universe.append_phase(phase(probe, earth, 0.0, 10.0)).unwrap();
    let cruise = universe.append_phase(phase(probe, sun, 10.0, 20.0)).unwrap();
    universe.update_culling_bounds(Selection::Star(sun));

    assert_eq!(universe.clear_timeline(probe), Ok(2));

    assert!(universe.phase(parked).is_none());
    assert!(universe.phase(cruise).is_none());
    assert_eq!(universe.frame_tree(Selection::Body(earth)).unwrap().child_count(), 0);
    assert!(!universe.frame_tree(Selection::Star(sun)).unwrap().contains_child(cruise));
    assert!(universe.frame_tree(Selection::Star(sun)).unwrap().is_changed());
    assert!(universe.body(probe).unwrap().timeline().is_empty());
}

#[test]
fn test_remove_child_drops_one_reference() {
    let (mut universe, sun, earth) = sun_and_earth();
    let id = universe.body(earth).unwrap().timeline().phase(0).unwrap();

    assert!(universe.remove_child(Selection::Star(sun), id));

    assert_eq!(universe.phase_ref_count(id), Some(1));
    assert_eq!(universe.frame_tree(Selection::Star(sun)).unwrap().child_count(), 0);
    assert_eq!(universe.body(earth).unwrap().timeline().phase(0), Some(id));
}

#[test]
fn test_remove_absent_child_is_noop() {
    let (mut universe, sun, earth) = sun_and_earth();
    let id = universe.body(earth).unwrap().timeline().phase(0).unwrap();
    universe.update_culling_bounds(Selection::Star(sun));

    assert!(!universe.remove_child(Selection::Body(earth), id));

    assert_eq!(universe.phase_ref_count(id), Some(2));
    assert!(!universe.frame_tree(Selection::Star(sun)).unwrap().is_changed());
}

#[test]
fn test_add_child_requires_matching_parent() {
    let (mut universe, sun, earth) = sun_and_earth();
    let id = universe.body(earth).unwrap().timeline().phase(0).unwrap();
    universe.remove_child(Selection::Star(sun), id);
    let mars = universe.add_body(Body::new("Mars", 3_390.0)).unwrap();

    assert_eq!(
        universe.add_child(Selection::Body(mars), id).unwrap_err(),
        FrameTreeError::ParentMismatch {
            expected: Selection::Star(sun),
            found: Selection::Body(mars)
        }
    );

    universe.add_child(Selection::Star(sun), id).unwrap();
    assert_eq!(universe.phase_ref_count(id), Some(2));
    assert!(universe.frame_tree(Selection::Star(sun)).unwrap().contains_child(id));
}

#[test]
fn test_remove_body_with_satellites_refused() {
    let (mut universe, _, earth) = sun_and_earth();
    let moon = universe.add_body(Body::new("Moon", 1_737.0)).unwrap();
    universe.append_phase(phase(moon, earth, 0.0, 1_000.0)).unwrap();

    assert_eq!(
        universe.remove_body(earth).unwrap_err(),
        FrameTreeError::BodyHasChildren(earth)
    );

    let removed = universe.remove_body(moon).unwrap();
    assert_eq!(removed.name(), "Moon");
    assert_eq!(universe.find("Moon"), None);
    assert!(universe.body(moon).is_none());

    universe.remove_body(earth).unwrap();
    assert!(universe.phases().is_empty());
}

#[test]
fn test_setters_reject_unknown_bodies() {
    let (mut universe, _, earth) = sun_and_earth();
    universe.remove_body(earth).unwrap();

    assert_eq!(
        universe.set_radius(earth, 1.0).unwrap_err(),
        FrameTreeError::UnknownBody(earth)
    );
    assert_eq!(
        universe.mark_timeline_changed(earth).unwrap_err(),
        FrameTreeError::UnknownBody(earth)
    );
}
