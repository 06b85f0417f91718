//! Headless integration tests for Valentine Week.
//!
//! These tests drive the stage machine and the day scenes without a
//! window or GPU. They use Bevy's `MinimalPlugins` to tick the app,
//! register only the logic plugins (no rendering, audio or input
//! hardware), and poke the same events the UI would send.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use valentine_week::days::*;
use valentine_week::hub::{CheckpointClicked, HubPlugin, HubProgress};
use valentine_week::registry::{Ambiance, RegistryPlugin};
use valentine_week::shared::*;
use valentine_week::stage::{DoorAction, FlightClock, StagePlugin};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Every day that announced completion, in order.
#[derive(Resource, Default)]
struct CompletedDays(Vec<Day>);

fn record_completions(mut events: EventReader<DayCompletedEvent>, mut log: ResMut<CompletedDays>) {
    log.0.extend(events.read().map(|e| e.day));
}

/// Builds a minimal app with the stage machine, hub and every day scene,
/// but NO rendering, windowing or asset loading. Time advances a fixed
/// 250 ms per update.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));

    // ── Stage State (mirrors main.rs) ────────────────────────────────────
    app.init_state::<Stage>();
    app.enable_state_scoped_entities::<Stage>();

    // ── Shared Resources ─────────────────────────────────────────────────
    // Tuning goes in before the plugins; HugPlugin reads it while building.
    app.insert_resource(Tuning::default())
        .init_resource::<PlayerInput>()
        .init_resource::<CompletedDays>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<StageRequest>()
        .add_event::<DayCompletedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>();

    app.add_plugins((RegistryPlugin, StagePlugin, HubPlugin, DaysPlugin));
    app.add_systems(Last, record_completions);
    app
}

fn stage(app: &App) -> Stage {
    *app.world().resource::<State<Stage>>().get()
}

/// Sends a request and ticks twice: once to resolve it, once to apply
/// the queued transition.
fn request(app: &mut App, request: StageRequest) {
    app.world_mut().send_event(request);
    app.update();
    app.update();
}

fn enter(app: &mut App, target: Stage) {
    request(app, StageRequest::Enter(target));
    assert_eq!(stage(app), target, "Expected to enter {:?}", target);
}

fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
    app.update();
}

fn ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stage flow
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boot_starts_at_the_door() {
    let mut app = build_test_app();
    app.update();
    assert_eq!(stage(&app), Stage::Start);
    assert_eq!(app.world().resource::<Ambiance>().stage, Stage::Start);
}

#[test]
fn test_door_opens_into_flight_then_hub_after_two_seconds() {
    let mut app = build_test_app();
    app.update();

    send(&mut app, DoorAction::Toggle);
    app.update();
    assert_eq!(stage(&app), Stage::Flying);
    assert!(app.world().get_resource::<FlightClock>().is_some());

    // Requests are ignored while flying.
    request(&mut app, StageRequest::Enter(Stage::Rose));
    request(&mut app, StageRequest::Back);
    assert_eq!(stage(&app), Stage::Flying);

    assert!(app.world().resource::<FlightClock>().fraction() < 1.0);

    ticks(&mut app, 8);
    assert_eq!(stage(&app), Stage::Hub, "Flight should hand over to the hub");
    assert!(app.world().get_resource::<FlightClock>().is_none());
    assert!(app.world().get_resource::<HubProgress>().is_some());
}

#[test]
fn test_every_checkpoint_enters_its_day_and_back_returns_to_hub() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Hub);

    for day in Day::ALL {
        send(&mut app, CheckpointClicked { index: day.index() });
        ticks(&mut app, 2);
        assert_eq!(stage(&app), day.stage(), "Checkpoint {} went astray", day.index());

        send(&mut app, BackPressed);
        ticks(&mut app, 2);
        assert_eq!(stage(&app), Stage::Hub, "Back from {:?} should land on the hub", day);
    }
}

#[test]
fn test_unknown_checkpoint_is_ignored() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Hub);

    send(&mut app, CheckpointClicked { index: 8 });
    ticks(&mut app, 2);
    assert_eq!(stage(&app), Stage::Hub);
}

#[test]
fn test_escape_leaves_a_day() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Teddy);

    app.world_mut().resource_mut::<PlayerInput>().cancel = true;
    app.update();
    app.world_mut().resource_mut::<PlayerInput>().cancel = false;
    ticks(&mut app, 2);

    assert_eq!(stage(&app), Stage::Hub);
    assert!(app.world().get_resource::<TeddyHug>().is_none());
}

#[test]
fn test_back_is_ignored_outside_days() {
    let mut app = build_test_app();
    app.update();
    request(&mut app, StageRequest::Back);
    assert_eq!(stage(&app), Stage::Start);

    enter(&mut app, Stage::Hub);
    request(&mut app, StageRequest::Back);
    assert_eq!(stage(&app), Stage::Hub);
}

// ─────────────────────────────────────────────────────────────────────────────
// Chocolate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_chocolate_ten_hearts_win_and_eleventh_changes_nothing() {
    let mut app = build_test_app();
    // Frozen clock: nothing spawns or falls on its own.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.update();
    enter(&mut app, Stage::Chocolate);

    for _ in 0..10 {
        let id = app
            .world_mut()
            .resource_mut::<CatchGame>()
            .spawn(ItemKind::Heart);
        send(&mut app, ItemCaught { id });
    }
    app.update();
    {
        let game = app.world().resource::<CatchGame>();
        assert_eq!(game.score(), 10);
        assert_eq!(game.phase(), CatchPhase::Won);
        assert!(game.is_complete());
    }
    assert_eq!(app.world().resource::<CompletedDays>().0, vec![Day::Chocolate]);

    let id = app
        .world_mut()
        .resource_mut::<CatchGame>()
        .spawn(ItemKind::Heart);
    send(&mut app, ItemCaught { id });
    app.update();
    assert_eq!(app.world().resource::<CatchGame>().score(), 10);
    assert_eq!(
        app.world().resource::<CompletedDays>().0.len(),
        1,
        "Completion is announced once per visit"
    );
}

#[test]
fn test_chocolate_items_fall_and_vanish_on_exit() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Chocolate);

    ticks(&mut app, 8);
    let falling = app
        .world_mut()
        .query::<&FallingItem>()
        .iter(app.world())
        .count();
    assert!(falling > 0, "The spawner should have dropped something by now");

    request(&mut app, StageRequest::Back);
    assert_eq!(stage(&app), Stage::Hub);
    let left = app
        .world_mut()
        .query::<&FallingItem>()
        .iter(app.world())
        .count();
    assert_eq!(left, 0, "Falling items are scoped to the chocolate stage");
    let baskets = app.world_mut().query::<&Basket>().iter(app.world()).count();
    assert_eq!(baskets, 0);
    assert!(app.world().get_resource::<CatchGame>().is_none());
}

/// Item ids reported by the physics step, in order.
#[derive(Resource, Default)]
struct Contacts {
    caught: Vec<u64>,
    missed: Vec<u64>,
}

fn record_contacts(
    mut caught: EventReader<ItemCaught>,
    mut missed: EventReader<ItemMissed>,
    mut log: ResMut<Contacts>,
) {
    log.caught.extend(caught.read().map(|e| e.id));
    log.missed.extend(missed.read().map(|e| e.id));
}

#[test]
fn test_chocolate_heart_lands_in_still_basket_on_slow_frames() {
    // Every update is a 250 ms frame.
    let mut app = build_test_app();
    app.init_resource::<Contacts>()
        .add_systems(Last, record_contacts);
    app.update();
    enter(&mut app, Stage::Chocolate);

    let spawn_y = app.world().resource::<Tuning>().catch.spawn_y;
    let id = app
        .world_mut()
        .resource_mut::<CatchGame>()
        .spawn(ItemKind::Heart);
    app.world_mut().spawn((
        FallingItem {
            id,
            kind: ItemKind::Heart,
        },
        FallSpeed::default(),
        Transform::from_xyz(0.0, spawn_y, 1.0),
        StateScoped(Stage::Chocolate),
    ));

    // About 1.9 s to reach the basket; leave room to fall past it.
    ticks(&mut app, 14);
    let contacts = app.world().resource::<Contacts>();
    assert_eq!(contacts.caught.iter().filter(|&&c| c == id).count(), 1);
    assert!(!contacts.missed.contains(&id), "The heart fell through the basket");
}

// ─────────────────────────────────────────────────────────────────────────────
// The other days
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_promise_stars_connect_in_order_only() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Promise);

    // Out of order: ignored.
    send(&mut app, StarSelected { index: 3 });
    assert_eq!(app.world().resource::<Constellation>().connected(), 0);

    for index in 1..=6 {
        send(&mut app, StarSelected { index });
    }
    app.update();
    let sky = app.world().resource::<Constellation>();
    assert!(sky.is_complete());
    assert_eq!(sky.message(), PROMISE_FINISHED);
    assert_eq!(app.world().resource::<CompletedDays>().0, vec![Day::Promise]);
}

#[test]
fn test_hug_fills_while_held() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Hug);

    app.world_mut().resource_mut::<PlayerInput>().hold = true;
    ticks(&mut app, 4);
    let part = app.world().resource::<HugMeter>().energy();
    assert!(part > 0.0 && part < 100.0, "Meter should be mid-way, got {}", part);

    // 125 fixed ticks at 60 Hz is a little over two seconds.
    ticks(&mut app, 12);
    assert_eq!(app.world().resource::<HugMeter>().phase(), HugPhase::Finished);

    // Letting go after the hug does not undo it.
    app.world_mut().resource_mut::<PlayerInput>().hold = false;
    ticks(&mut app, 4);
    let meter = app.world().resource::<HugMeter>();
    assert!(meter.is_complete());
    assert_eq!(meter.energy(), 100.0);
}

#[test]
fn test_hug_drains_when_released_early() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Hug);

    app.world_mut().resource_mut::<PlayerInput>().hold = true;
    ticks(&mut app, 4);
    app.world_mut().resource_mut::<PlayerInput>().hold = false;
    ticks(&mut app, 4);
    assert_eq!(app.world().resource::<HugMeter>().energy(), 0.0);
}

#[test]
fn test_propose_cork_letter_and_yes() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Propose);

    // Not far enough: snaps back.
    send(&mut app, ProposeAction::PullCork(40.0));
    send(&mut app, ProposeAction::ReleaseCork);
    assert_eq!(app.world().resource::<ProposalBottle>().pull(), 0.0);

    send(&mut app, ProposeAction::PullCork(150.0));
    send(&mut app, ProposeAction::ReleaseCork);
    assert_eq!(
        app.world().resource::<ProposalBottle>().phase(),
        ProposePhase::Uncorked
    );

    ticks(&mut app, 8);
    assert_eq!(
        app.world().resource::<ProposalBottle>().phase(),
        ProposePhase::LetterShown
    );

    send(&mut app, ProposeAction::DodgeNo);
    assert!(!app.world().resource::<ProposalBottle>().is_complete());

    send(&mut app, ProposeAction::AcceptYes);
    app.update();
    assert!(app.world().resource::<ProposalBottle>().is_complete());
    assert_eq!(app.world().resource::<CompletedDays>().0, vec![Day::Propose]);
}

#[test]
fn test_teddy_hug_finishes_after_its_timer() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Teddy);

    send(&mut app, TeddyAction::PickColor(TeddyColor::Pink));
    send(&mut app, TeddyAction::Hug);
    assert_eq!(app.world().resource::<TeddyHug>().color, TeddyColor::Pink);
    assert_eq!(app.world().resource::<TeddyHug>().phase(), TeddyPhase::Hugging);

    ticks(&mut app, 14);
    assert_eq!(app.world().resource::<TeddyHug>().phase(), TeddyPhase::Finished);
}

#[test]
fn test_valentine_letter_and_yes() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Valentine);

    send(&mut app, ValentineAction::SayYes);
    assert_eq!(
        app.world().resource::<ValentineLetter>().phase(),
        ValentinePhase::Sealed,
        "YES lives inside the letter"
    );

    send(&mut app, ValentineAction::OpenLetter);
    send(&mut app, ValentineAction::SayYes);
    app.update();
    assert!(app.world().resource::<ValentineLetter>().is_complete());
    assert_eq!(app.world().resource::<CompletedDays>().0, vec![Day::Valentine]);
}

#[test]
fn test_kisses_land_but_never_complete() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Kiss);

    send(&mut app, KissLaunched { x_ratio: 0.5 });
    send(&mut app, KissLaunched { x_ratio: -0.5 });
    ticks(&mut app, 6);

    let volley = app.world().resource::<KissVolley>();
    assert_eq!(volley.hits(), 2);
    assert!(volley.live().is_empty());
    assert!(!volley.is_complete());
    assert!(app.world().resource::<CompletedDays>().0.is_empty());
}

#[test]
fn test_reentering_a_day_starts_fresh() {
    let mut app = build_test_app();
    app.update();
    enter(&mut app, Stage::Rose);

    for _ in 0..5 {
        send(&mut app, RoseAction::TapBud);
    }
    assert!(app.world().resource::<RoseBloom>().is_complete());

    enter(&mut app, Stage::Hub);
    assert!(app.world().get_resource::<RoseBloom>().is_none());

    enter(&mut app, Stage::Rose);
    let rose = app.world().resource::<RoseBloom>();
    assert_eq!(rose.bloom(), 0.0);
    assert!(!rose.is_complete());
}
