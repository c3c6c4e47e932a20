//! Engine integration tests - the falling-block state machine end to end

use tui_blockfall::core::{
    get_shape, level_for_score, line_clear_points, tick_interval_ms, EngineConfig, EngineError,
    GameEngine, Grid, ScriptedSource,
};
use tui_blockfall::types::{Command, Phase, PieceKind, TickOutcome, FILLED, MIN_INTERVAL_MS};

fn scripted(kinds: &[PieceKind]) -> ScriptedSource {
    ScriptedSource::new(kinds.to_vec()).unwrap()
}

/// 10x20 grid with the listed rows filled except for `gap` columns.
fn grid_with_rows(rows: &[i32], gap: &[i32]) -> Grid {
    let mut grid = Grid::new(10, 20);
    for &row in rows {
        for col in 0..10 {
            if !gap.contains(&col) {
                grid.set(row, col, FILLED);
            }
        }
    }
    grid
}

#[test]
fn test_fresh_game_state() {
    let engine = GameEngine::new(EngineConfig::default(), 7).unwrap();

    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.tick_interval_ms(), 500);
    assert_eq!(engine.grid().filled_count(), 0);

    let active = engine.active().expect("a piece spawns immediately");
    assert_eq!(active.y, 0);
    assert!(!engine.collides(active));
}

#[test]
fn test_vertical_i_clears_two_rows() {
    let grid = grid_with_rows(&[18, 19], &[9]);
    let source = scripted(&[PieceKind::I, PieceKind::O]);
    let mut engine = GameEngine::with_grid(EngineConfig::default(), grid, source).unwrap();

    assert!(engine.rotate());
    for _ in 0..6 {
        assert!(engine.move_right());
    }
    assert_eq!(engine.active().unwrap().x, 9);
    assert!(!engine.move_right());

    for _ in 0..16 {
        assert_eq!(engine.tick(), TickOutcome::Moved);
    }
    assert_eq!(engine.tick(), TickOutcome::Locked { rows_cleared: 2 });

    assert_eq!(engine.score(), 20);
    assert_eq!(engine.lines(), 2);
    assert_eq!(engine.level(), 1);

    // The upper half of the bar drops into the cleared rows.
    assert_eq!(engine.grid().filled_count(), 2);
    assert_eq!(engine.grid().get(18, 9), FILLED);
    assert_eq!(engine.grid().get(19, 9), FILLED);
    assert_eq!(engine.active().unwrap().kind, PieceKind::O);
}

#[test]
fn test_moves_stop_at_walls() {
    let mut engine =
        GameEngine::with_source(EngineConfig::default(), ScriptedSource::repeat(PieceKind::O))
            .unwrap();
    assert_eq!(engine.active().unwrap().x, 4);

    for _ in 0..4 {
        assert!(engine.apply(Command::MoveLeft));
    }
    let before = engine.snapshot();
    assert!(!engine.apply(Command::MoveLeft));
    assert_eq!(engine.snapshot(), before);

    for _ in 0..8 {
        assert!(engine.move_right());
    }
    assert!(!engine.move_right());
    assert_eq!(engine.active().unwrap().x, 8);
}

#[test]
fn test_soft_drop_matches_tick() {
    let mut a = GameEngine::new(EngineConfig::default(), 99).unwrap();
    let mut b = GameEngine::new(EngineConfig::default(), 99).unwrap();

    for _ in 0..40 {
        assert!(a.apply(Command::SoftDrop));
        assert!(b.tick().changed());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_same_seed_same_game() {
    let commands = [
        Command::Rotate,
        Command::MoveLeft,
        Command::SoftDrop,
        Command::MoveRight,
        Command::MoveRight,
    ];
    let mut a = GameEngine::new(EngineConfig::default(), 2024).unwrap();
    let mut b = GameEngine::new(EngineConfig::default(), 2024).unwrap();

    for i in 0..500 {
        let cmd = commands[i % commands.len()];
        a.apply(cmd);
        b.apply(cmd);
        a.tick();
        b.tick();
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.pieces_spawned(), b.pieces_spawned());
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let grid = grid_with_rows(&[1], &[]);
    let mut engine =
        GameEngine::with_grid(EngineConfig::default(), grid, ScriptedSource::repeat(PieceKind::O))
            .unwrap();

    assert!(engine.is_game_over());
    assert!(engine.active().is_none());

    // Frozen: nothing moves, nothing scores.
    assert_eq!(engine.tick(), TickOutcome::Idle);
    for cmd in [Command::MoveLeft, Command::MoveRight, Command::Rotate, Command::SoftDrop] {
        assert!(!engine.apply(cmd));
    }
    let snap = engine.snapshot();
    assert!(snap.game_over());
    assert!(snap.active.is_none());
    assert_eq!(snap.score, 0);

    engine.restart();
    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.grid().filled_count(), 0);
    assert!(engine.active().is_some());
}

#[test]
fn test_game_reaches_game_over_when_stack_tops_out() {
    let mut engine =
        GameEngine::with_source(EngineConfig::default(), ScriptedSource::repeat(PieceKind::O))
            .unwrap();

    // Dropping O pieces in the same column fills it in ten pieces.
    let mut outcome = TickOutcome::Idle;
    for _ in 0..1_000 {
        outcome = engine.tick();
        if engine.is_game_over() {
            break;
        }
    }
    assert!(matches!(outcome, TickOutcome::GameOver { rows_cleared: 0 }));
    assert_eq!(engine.pieces_spawned(), 10);
    assert_eq!(engine.grid().filled_count(), 40);
}

#[test]
fn test_progression_rules() {
    assert_eq!(line_clear_points(1, 1, 10), 10);
    assert_eq!(line_clear_points(4, 3, 10), 120);
    assert_eq!(line_clear_points(0, 5, 10), 0);

    assert_eq!(level_for_score(0, 100), 1);
    assert_eq!(level_for_score(99, 100), 1);
    assert_eq!(level_for_score(100, 100), 2);
    assert_eq!(level_for_score(105, 100), 2);

    let mut prev = u32::MAX;
    for level in 1..=40 {
        let interval = tick_interval_ms(level, 500, 50, MIN_INTERVAL_MS);
        assert!(interval <= prev, "interval grew at level {}", level);
        assert!(interval >= MIN_INTERVAL_MS);
        prev = interval;
    }
    assert_eq!(tick_interval_ms(2, 500, 50, 100), 450);
    assert_eq!(tick_interval_ms(9, 500, 50, 100), 100);
    assert_eq!(tick_interval_ms(30, 500, 50, 100), 100);
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let turned = shape.rotated().rotated().rotated().rotated();
        assert_eq!(turned, shape, "{:?}", kind);
    }
}

#[test]
fn test_smallest_field_is_playable() {
    let mut engine = GameEngine::new(EngineConfig::with_cells(4, 2), 1).unwrap();
    assert_eq!(engine.grid().width(), 4);
    assert_eq!(engine.grid().height(), 2);

    for _ in 0..100 {
        engine.tick();
    }
    assert!(engine.is_game_over());
}

#[test]
fn test_invalid_configs_are_rejected() {
    let narrow = EngineConfig::with_cells(3, 20);
    assert_eq!(
        GameEngine::new(narrow, 1).unwrap_err(),
        EngineError::InvalidDimensions {
            width: 3,
            height: 20
        }
    );

    let zero_cell = EngineConfig {
        cell_size_px: 0,
        ..EngineConfig::default()
    };
    assert_eq!(
        GameEngine::new(zero_cell, 1).unwrap_err(),
        EngineError::ZeroCellSize
    );
}

#[test]
fn test_snapshot_serializes_to_json() {
    let engine =
        GameEngine::with_source(EngineConfig::default(), ScriptedSource::repeat(PieceKind::T))
            .unwrap();
    let json = serde_json::to_value(engine.snapshot()).unwrap();

    assert_eq!(json["width"], 10);
    assert_eq!(json["height"], 20);
    assert_eq!(json["phase"], "Running");
    assert_eq!(json["active"]["kind"], "T");
    assert_eq!(json["active"]["x"], 3);
    assert_eq!(json["grid"].as_array().unwrap().len(), 200);
}
