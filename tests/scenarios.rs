//=========================================================================
// End-to-end Scenarios
//=========================================================================
//
// Drives the scene controllers and the orchestrator through the headless
// backend, the way the runtime does, with an explicit clock.
//
//=========================================================================

use approx::assert_relative_eq;
use portal_world::config::{PortalConfig, WorldConfig};
use portal_world::core::collab::ScrollMetrics;
use portal_world::core::phase::{scroll_progress, Phase, PhaseOrchestrator};
use portal_world::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

//--- Portal Dive ---------------------------------------------------------

#[test]
fn portal_dive_reaches_final_pose_and_signals() {
    let mut targets = HeadlessTargets::new();
    let mut portal = PortalScene::new(
        &PortalConfig::default(),
        &mut targets,
        Viewport::new(1920, 1080, 1.0),
    )
    .unwrap();

    let mut signal = portal.transition_out(0.0).unwrap();
    portal.frame(0.0);
    portal.frame(0.35);
    assert_eq!(signal.poll(), ExitStatus::Pending);

    portal.frame(0.7);

    let camera = portal.camera();
    assert_eq!(camera.fov_degrees, 100.0);
    assert_relative_eq!(camera.position.z, -0.5, epsilon = 1e-5);
    assert_eq!(portal.transition_progress(), Some(1.0));
    assert_eq!(signal.poll(), ExitStatus::Complete);

    // Further frames hold the pose and never re-signal
    portal.frame(0.9);
    assert_eq!(portal.camera().fov_degrees, 100.0);
    assert_eq!(signal.poll(), ExitStatus::Complete);
}

//--- World Scroll --------------------------------------------------------

#[test]
fn world_camera_eases_toward_scroll_target() {
    let mut targets = HeadlessTargets::new();
    let mut world =
        WorldScene::new(&WorldConfig::default(), &mut targets, Viewport::new(1920, 1080, 1.0))
            .unwrap();

    world.set_scroll_progress(0.5);
    world.frame(0.0);

    // Target y = 2 - 3 * 0.5; one step of ease 0.05 from 2
    assert_relative_eq!(world.camera().position.y, 2.0 + (0.5 - 2.0) * 0.05, epsilon = 1e-6);

    for i in 1..600 {
        world.frame(i as f64 * FRAME);
    }
    assert_relative_eq!(world.camera().position.y, 0.5, epsilon = 1e-3);
    assert_relative_eq!(world.camera().position.z, 7.5, epsilon = 1e-3);
}

//--- Unscrollable Page ---------------------------------------------------

#[test]
fn unscrollable_page_reports_zero_progress() {
    let metrics = ScrollMetrics {
        scroll_top: 0.0,
        scroll_height: 1080.0,
        client_height: 1080.0,
    };
    assert_eq!(scroll_progress(metrics), 0.0);

    let targets = HeadlessTargets::new();
    let mut orchestrator = PhaseOrchestrator::new(
        ExperienceConfig::default(),
        Box::new(targets),
        Viewport::new(1920, 1080, 1.0),
    )
    .unwrap();
    orchestrator.scrolled(metrics);
    assert_eq!(orchestrator.scroll_progress(), 0.0);
}

//--- Repeated Enter ------------------------------------------------------

#[test]
fn double_enter_builds_one_world_and_destroys_portal_once() {
    let targets = HeadlessTargets::new();
    let ledger = targets.ledger();
    let mut orchestrator = PhaseOrchestrator::new(
        ExperienceConfig::default(),
        Box::new(targets),
        Viewport::new(1920, 1080, 1.0),
    )
    .unwrap();

    assert!(orchestrator.enter(0.0));
    assert!(!orchestrator.enter(0.0));

    let mut now = 0.0;
    while now < 2.0 {
        orchestrator.tick(now).unwrap();
        if now > 0.2 {
            orchestrator.enter(now);
        }
        now += FRAME;
    }

    assert_eq!(orchestrator.phase(), Phase::World);

    let stats = orchestrator.stats();
    assert_eq!(stats.transitions_started, 1);
    assert_eq!(stats.world_constructions, 1);
    assert_eq!(stats.portal_destroys, 1);

    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.targets_created, 2);
    assert_eq!(snapshot.double_releases, 0);
    assert_eq!(snapshot.rejected_draws, 0);
}

//--- Shutdown ------------------------------------------------------------

#[test]
fn shutdown_releases_every_resource() {
    let targets = HeadlessTargets::new();
    let ledger = targets.ledger();
    let mut orchestrator = PhaseOrchestrator::new(
        ExperienceConfig::default(),
        Box::new(targets),
        Viewport::default(),
    )
    .unwrap();

    orchestrator.enter(0.0);
    let mut now = 0.0;
    while now < 2.0 {
        orchestrator.tick(now).unwrap();
        now += FRAME;
    }

    orchestrator.shutdown();
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.live(), 0);
    assert_eq!(snapshot.double_releases, 0);
}
