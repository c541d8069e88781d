//! Rule-set behavior: what each variant changes about a run, plus loading
//! a variant and its overrides from a settings file.

use hopper::runner::{EngineConfig, GameEngine, GameStatus, InputFlags, Obstacle, Variant, FRAME_MS};
use hopper::settings::{load_settings, resolve, CliArgs};
use hopper::utils::ConfigError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const IDLE: InputFlags = InputFlags { jump_held: false };
const HELD: InputFlags = InputFlags { jump_held: true };

fn quiet(variant: Variant) -> GameEngine {
    GameEngine::new(EngineConfig {
        spawn_chance: 0.0,
        ..variant.config()
    })
}

fn obstacle_on_player(engine: &GameEngine) -> Obstacle {
    let config = engine.config();
    Obstacle {
        x: config.player_x,
        y: config.field_height,
        width: 40.0,
        height: 60.0,
        scored: false,
    }
}

/// Jump on frame 1, keep `input` for `frames` frames, return the lowest y
/// (highest point) and how many frames were spent at the ceiling.
fn jump_profile(engine: &mut GameEngine, input: InputFlags, frames: u64) -> (f64, u32) {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    assert!(engine.request_jump());
    if !input.jump_held {
        engine.release_jump();
    }
    let mut highest = f64::MAX;
    let mut at_ceiling = 0;
    for frame in 1..=frames {
        let snapshot = engine.tick(frame * FRAME_MS, input, &mut rng);
        highest = highest.min(snapshot.player.y);
        if snapshot.player.y <= 0.0 {
            at_ceiling += 1;
        }
    }
    (highest, at_ceiling)
}

#[test]
fn test_classic_ends_on_first_hit() {
    let mut engine = quiet(Variant::Classic);
    engine.place_obstacle(obstacle_on_player(&engine));
    let snapshot = engine.tick(FRAME_MS, IDLE, &mut ChaCha8Rng::seed_from_u64(1));
    assert_eq!(snapshot.status, GameStatus::Over);
    assert_eq!(snapshot.lives, 0);
}

#[test]
fn test_lives_variant_survives_two_hits() {
    let mut engine = quiet(Variant::Lives);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let grace = engine.config().invincibility_ms;

    let mut now = FRAME_MS;
    for expected in [2, 1, 0] {
        engine.place_obstacle(obstacle_on_player(&engine));
        let snapshot = engine.tick(now, IDLE, &mut rng);
        assert_eq!(snapshot.lives, expected);
        now += grace;
    }
    assert!(engine.is_over());
}

#[test]
fn test_classic_and_lives_have_fixed_jump_height() {
    for variant in [Variant::Classic, Variant::Lives] {
        let (held, _) = jump_profile(&mut quiet(variant), HELD, 60);
        let (tapped, _) = jump_profile(&mut quiet(variant), IDLE, 60);
        assert!((held - tapped).abs() < 1e-9, "{:?}", variant);
    }
}

#[test]
fn test_holding_jump_goes_higher() {
    for variant in [Variant::LongJump, Variant::TopHold] {
        let (held, _) = jump_profile(&mut quiet(variant), HELD, 60);
        let (tapped, _) = jump_profile(&mut quiet(variant), IDLE, 60);
        assert!(held < tapped, "{:?}: held {} vs tapped {}", variant, held, tapped);
        assert!(tapped > 0.0, "a tap stays below the ceiling");
        assert!(held <= 0.0, "a full hold reaches the ceiling");
    }
}

#[test]
fn test_only_top_hold_hovers() {
    let max_top_hold = Variant::TopHold.config().max_top_hold;

    let (_, top_hold_frames) = jump_profile(&mut quiet(Variant::TopHold), HELD, 400);
    assert!(top_hold_frames >= max_top_hold);

    let (_, long_jump_frames) = jump_profile(&mut quiet(Variant::LongJump), HELD, 400);
    assert!(long_jump_frames < 20);
}

#[test]
fn test_top_hold_lands_after_hover() {
    let mut engine = quiet(Variant::TopHold);
    jump_profile(&mut engine, HELD, 500);
    assert!(!engine.physics().jumping);
    assert!(engine.physics().is_on_ground(engine.config()));
}

#[test]
fn test_bonus_only_in_later_variants() {
    for variant in Variant::ALL {
        let mut engine = quiet(variant);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Floating obstacle the grounded player runs under
        engine.place_obstacle(Obstacle {
            x: 100.0,
            y: 100.0,
            width: 20.0,
            height: 20.0,
            scored: false,
        });
        for frame in 1..=30 {
            engine.tick(frame * FRAME_MS, IDLE, &mut rng);
        }

        assert_eq!(engine.cleared(), 1, "{:?}", variant);
        let expected_bonus = if engine.config().bonus_enabled { 1 } else { 0 };
        assert_eq!(engine.score().bonuses(), expected_bonus, "{:?}", variant);
        // 30 frames of survival, plus the bonus
        assert_eq!(
            engine.score().raw(),
            30 + u64::from(expected_bonus) * engine.config().bonus_points
        );
    }
}

#[test]
fn test_settings_file_selects_variant_and_overrides() {
    let path = std::env::temp_dir().join(format!("hopper_settings_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "variant": "classic", "overrides": { "initial_lives": 2, "scroll_speed": 8.0 } }"#,
    )
    .unwrap();

    let settings = load_settings(Some(path.as_path())).unwrap();
    let launch = resolve(&CliArgs::default(), settings).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(launch.variant, Variant::Classic);
    assert_eq!(launch.config.initial_lives, 2);
    assert_eq!(launch.config.scroll_speed, 8.0);
    assert_eq!(launch.config.max_jump_hold, 0);

    let engine = GameEngine::new(launch.config);
    assert_eq!(engine.lives(), 2);
}

#[test]
fn test_settings_file_with_unknown_field_is_rejected() {
    let path = std::env::temp_dir().join(format!("hopper_bad_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "varient": "classic" }"#).unwrap();

    let result = load_settings(Some(path.as_path()));
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
