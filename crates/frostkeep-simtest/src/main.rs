//! Frostkeep Headless Simulation Harness
//!
//! Validates pure game logic and data without a window.
//! Runs entirely in-process — no rendering, no input devices.
//!
//! Usage:
//!   cargo run -p frostkeep-simtest
//!   cargo run -p frostkeep-simtest -- --verbose
//!   cargo run -p frostkeep-simtest -- --dump    (print final snapshot as JSON)

use frostkeep_logic::classes::{class_by_id, classes, ClassType};
use frostkeep_logic::config::{validate_config, GameConfig};
use frostkeep_logic::constants::{arena, gauges};
use frostkeep_logic::controller::GameController;
use frostkeep_logic::hud::{HudBridge, LatestView, MoraleBand, TemperatureBand};
use frostkeep_logic::input::KeyState;
use frostkeep_logic::movement::{ArenaBounds, Direction, MoveOutcome, Position};
use frostkeep_logic::resources::{ResourceKind, ResourceUpdate};
use frostkeep_logic::state::GameStateEvent;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

// ── Data files (same JSON a launcher would ship) ────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/game_config.json");
const WALK_SCRIPT_JSON: &str = include_str!("../../../data/walk_script.json");

#[derive(Debug, Deserialize)]
struct WalkStep {
    dx: i32,
    dy: i32,
    seconds: f32,
    expect_x: f32,
    expect_y: f32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let dump = std::env::args().any(|a| a == "--dump");
    println!("=== Frostkeep Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Config file validation
    results.extend(validate_config_file(verbose));

    // 2. Class table
    results.extend(validate_classes(verbose));

    // 3. Movement sweep
    results.extend(validate_movement(verbose));

    // 4. Scripted walk from data file
    results.extend(validate_walk_script(verbose));

    // 5. State updates & emission
    results.extend(validate_state_updates(verbose));

    // 6. HUD bridge
    results.extend(validate_hud_bridge(verbose));

    if dump {
        dump_session();
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

// ── 1. Config File ──────────────────────────────────────────────────────

fn validate_config_file(verbose: bool) -> Vec<TestResult> {
    println!("--- Config File ---");
    let mut results = Vec::new();

    let config: GameConfig = match serde_json::from_str(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    let errors = validate_config(&config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: format!("{} validation errors {:?}", errors.len(), errors),
    });

    results.push(TestResult {
        name: "config_matches_defaults".into(),
        passed: config == GameConfig::default(),
        detail: "shipped config equals compiled defaults".into(),
    });

    // Bounds derive from the tile map with a one-tile margin
    let derived = ArenaBounds::from_extent(
        arena::MAP_TILES_X as f32 * arena::TILE_SIZE,
        arena::MAP_TILES_Y as f32 * arena::TILE_SIZE,
        arena::TILE_SIZE,
    );
    results.push(TestResult {
        name: "config_bounds_from_tile_map".into(),
        passed: derived == config.bounds,
        detail: format!("{:?}", derived),
    });

    // The controller refuses configs that would break movement
    let broken = GameConfig {
        speed: f32::NAN,
        bounds: ArenaBounds {
            min_x: 500.0,
            max_x: 100.0,
            ..config.bounds
        },
        ..config.clone()
    };
    let accepted = GameController::with_config(config.clone()).is_ok();
    let rejected = GameController::with_config(broken).err().unwrap_or_default();
    results.push(TestResult {
        name: "config_controller_gate".into(),
        passed: accepted && rejected.len() == 2,
        detail: format!("shipped accepted={} broken rejected with {:?}", accepted, rejected),
    });

    if verbose {
        println!(
            "  speed={} bounds=[{},{}]x[{},{}] start=({},{})",
            config.speed,
            config.bounds.min_x,
            config.bounds.max_x,
            config.bounds.min_y,
            config.bounds.max_y,
            config.start.x,
            config.start.y
        );
    }

    results
}

// ── 2. Classes ──────────────────────────────────────────────────────────

fn validate_classes(verbose: bool) -> Vec<TestResult> {
    println!("--- Classes ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "classes_count".into(),
        passed: classes().len() == 4,
        detail: format!("{} classes", classes().len()),
    });

    let in_scale = classes().iter().all(|c| {
        c.attributes
            .labelled()
            .iter()
            .all(|(_, v)| *v <= gauges::ATTRIBUTE_MAX)
    });
    results.push(TestResult {
        name: "classes_attribute_scale".into(),
        passed: in_scale,
        detail: format!("all stats within 0..={}", gauges::ATTRIBUTE_MAX),
    });

    let ids_round_trip = ClassType::ALL
        .iter()
        .all(|c| class_by_id(c.id()).map(|d| d.id) == Some(*c));
    results.push(TestResult {
        name: "classes_lookup_by_id".into(),
        passed: ids_round_trip && class_by_id("pilot").is_none(),
        detail: "every id resolves, unknown id rejected".into(),
    });

    let totals: Vec<u32> = classes().iter().map(|c| c.attributes.total()).collect();
    results.push(TestResult {
        name: "classes_balanced".into(),
        passed: totals.windows(2).all(|w| w[0] == w[1]),
        detail: format!("attribute totals {:?}", totals),
    });

    if verbose {
        for c in classes() {
            let stats: Vec<String> = c
                .attributes
                .labelled()
                .iter()
                .map(|(label, v)| format!("{}={}", &label[..3], v))
                .collect();
            println!("  {:<9} {}", c.name, stats.join(" "));
        }
    }

    results
}

// ── 3. Movement ─────────────────────────────────────────────────────────

fn validate_movement(_verbose: bool) -> Vec<TestResult> {
    println!("--- Movement ---");
    let mut results = Vec::new();

    // Axial step
    let mut game = GameController::new();
    game.tick(Direction::new(1, 0), 1.0);
    let p = game.state().position;
    results.push(TestResult {
        name: "movement_axial_step".into(),
        passed: p == Position::new(520.0, 300.0),
        detail: format!("(400,300) → ({:.2},{:.2})", p.x, p.y),
    });

    // Diagonal into wall
    let mut config = GameConfig::default();
    config.start = Position::new(760.0, 300.0);
    match GameController::with_config(config) {
        Ok(mut game) => {
            let outcome = game.tick(Direction::new(1, 1), 1.0);
            let p = game.state().position;
            results.push(TestResult {
                name: "movement_diagonal_wall_slide".into(),
                passed: matches!(outcome, MoveOutcome::Clamped { .. })
                    && p.x == 768.0
                    && close(p.y, 384.85),
                detail: format!("(760,300) → ({:.2},{:.2})", p.x, p.y),
            });
        }
        Err(errors) => results.push(TestResult {
            name: "movement_diagonal_wall_slide".into(),
            passed: false,
            detail: format!("config rejected: {:?}", errors),
        }),
    }

    // Speed invariance across all eight directions
    let start = Position::new(400.0, 300.0);
    let mut worst: f32 = 0.0;
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let mut game = GameController::new();
            game.tick(Direction::new(dx, dy), 0.75);
            let moved = game.state().position.distance(&start);
            worst = worst.max((moved - 90.0).abs());
        }
    }
    results.push(TestResult {
        name: "movement_speed_invariant".into(),
        passed: worst < 0.01,
        detail: format!("max deviation from 90.0 units: {:.5}", worst),
    });

    // Containment over a long random-ish wander
    let bounds = ArenaBounds::default();
    let mut game = GameController::new();
    let mut escaped = 0;
    let mut seed: u32 = 0x1234_5678;
    for _ in 0..10_000 {
        // xorshift32
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let dir = Direction::new((seed % 3) as i32 - 1, ((seed / 3) % 3) as i32 - 1);
        let dt = ((seed >> 8) % 100) as f32 / 60.0;
        game.tick(dir, dt);
        if !bounds.contains(game.state().position) {
            escaped += 1;
        }
    }
    results.push(TestResult {
        name: "movement_contained".into(),
        passed: escaped == 0,
        detail: format!("{} escapes in 10000 ticks", escaped),
    });

    // Opposite keys cancel
    let keys = KeyState {
        left: true,
        right: true,
        up: true,
        down: false,
    };
    let dir = keys.direction();
    results.push(TestResult {
        name: "movement_opposite_keys_cancel".into(),
        passed: dir.dx() == 0 && dir.dy() == -1,
        detail: format!("left+right+up → ({},{})", dir.dx(), dir.dy()),
    });

    results
}

// ── 4. Walk Script ──────────────────────────────────────────────────────

fn validate_walk_script(verbose: bool) -> Vec<TestResult> {
    println!("--- Walk Script ---");
    let mut results = Vec::new();

    let steps: Vec<WalkStep> = match serde_json::from_str(WALK_SCRIPT_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "walk_script_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    let mut game = GameController::new();
    for (i, step) in steps.iter().enumerate() {
        game.tick(Direction::new(step.dx, step.dy), step.seconds);
        let p = game.state().position;
        let ok = close(p.x, step.expect_x) && close(p.y, step.expect_y);
        if verbose {
            println!(
                "  step {}: ({:+},{:+}) {:>5.2}s → ({:.2},{:.2})",
                i, step.dx, step.dy, step.seconds, p.x, p.y
            );
        }
        results.push(TestResult {
            name: format!("walk_step_{}", i),
            passed: ok,
            detail: format!(
                "got ({:.2},{:.2}), expected ({:.2},{:.2})",
                p.x, p.y, step.expect_x, step.expect_y
            ),
        });
    }

    results
}

// ── 5. State Updates ────────────────────────────────────────────────────

fn validate_state_updates(_verbose: bool) -> Vec<TestResult> {
    println!("--- State Updates ---");
    let mut results = Vec::new();

    let mut game = GameController::new();
    let emitted = Rc::new(RefCell::new(0u32));
    let counter = Rc::clone(&emitted);
    game.subscribe(move |_: &GameStateEvent| *counter.borrow_mut() += 1);

    game.update_resources(ResourceUpdate::default().food(10));
    let r = game.state().resources;
    results.push(TestResult {
        name: "state_partial_resource_merge".into(),
        passed: r.food == 10 && r.materials == 30 && r.fuel == 40 && r.water == 60,
        detail: format!("{:?}", r),
    });

    game.set_class(ClassType::Engineer.data());
    game.set_class(ClassType::Botanist.data());
    results.push(TestResult {
        name: "state_class_last_write_wins".into(),
        passed: game.state().class == Some(ClassType::Botanist)
            && game.state().attributes == ClassType::Botanist.data().attributes,
        detail: format!("{:?}", game.state().class),
    });

    game.update_temperature(20);
    game.set_morale(45);
    let before_day = *emitted.borrow();
    let went_back = game.set_day(0);
    results.push(TestResult {
        name: "state_day_monotonic".into(),
        passed: !went_back && game.state().day == 1 && *emitted.borrow() == before_day,
        detail: "set_day(0) ignored".into(),
    });

    // resources + 2 classes + temperature + morale
    results.push(TestResult {
        name: "state_emission_count".into(),
        passed: *emitted.borrow() == 5,
        detail: format!("{} emissions", emitted.borrow()),
    });

    game.tick(Direction::NONE, 1.0);
    results.push(TestResult {
        name: "state_idle_tick_silent".into(),
        passed: *emitted.borrow() == 5,
        detail: "no emission without movement".into(),
    });

    results
}

// ── 6. HUD Bridge ───────────────────────────────────────────────────────

fn validate_hud_bridge(verbose: bool) -> Vec<TestResult> {
    println!("--- HUD Bridge ---");
    let mut results = Vec::new();

    let mut game = GameController::new();
    let bridge = HudBridge::attach(&mut game, LatestView::default());
    game.emit();

    let initial = bridge.display().view;
    results.push(TestResult {
        name: "hud_initial_snapshot".into(),
        passed: initial.is_some_and(|v| v.day == 1 && v.temperature == 65 && v.morale == 70),
        detail: format!("{:?}", initial),
    });

    game.update_resources(ResourceUpdate::default().set(ResourceKind::Fuel, 130));
    game.update_temperature(55);
    game.set_morale(25);
    let view = bridge.display().view;
    let ok = view.is_some_and(|v| {
        v.resources.fuel == 130
            && v.resource_fill(ResourceKind::Fuel) == 1.0
            && v.temperature_band() == TemperatureBand::Cold
            && v.morale_band() == MoraleBand::Danger
    });
    results.push(TestResult {
        name: "hud_verbatim_relay".into(),
        passed: ok,
        detail: "fuel 130 relayed unclamped, bar full, Cold, Danger".into(),
    });

    if verbose {
        if let Some(v) = view {
            for (kind, value) in v.resources.iter() {
                println!(
                    "  {:<9} {:>4} [{:<10}]",
                    kind.label(),
                    value,
                    "#".repeat((v.resource_fill(kind) * 10.0).round() as usize)
                );
            }
            println!(
                "  Day {}  {}° {}  morale {}%",
                v.day,
                v.temperature,
                v.temperature_band().label(),
                v.morale
            );
        }
    }

    results
}

// ── Snapshot dump ───────────────────────────────────────────────────────

fn dump_session() {
    let mut game = GameController::new();
    let last = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&last);
    game.subscribe(move |e: &GameStateEvent| *sink.borrow_mut() = Some(e.clone()));

    game.set_class(ClassType::Sentinel.data());
    game.tick(Direction::new(1, -1), 1.5);

    match last.borrow().as_ref().map(serde_json::to_string_pretty) {
        Some(Ok(json)) => println!("\n{}", json),
        Some(Err(e)) => eprintln!("failed to serialize snapshot: {}", e),
        None => eprintln!("no snapshot emitted"),
    };
}
