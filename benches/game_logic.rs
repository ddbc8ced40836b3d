use blockfall::core::{GameState, Grid, SequenceSelector};
use blockfall::term::{FrameBuffer, GameView, HudFlash, Viewport};
use blockfall::types::{EngineConfig, GameAction, PieceKind, GRID_WIDTH, TICK_MS};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::seeded(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.apply_action(GameAction::Restart);
            }
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter_batched(
            || {
                let mut grid = Grid::new();
                for y in 18..22 {
                    for x in 0..GRID_WIDTH as i8 {
                        grid.set(x, y, true);
                    }
                }
                grid
            },
            |mut grid| black_box(grid.clear_full_rows()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_free_fall_lock(c: &mut Criterion) {
    c.bench_function("free_fall_to_lock", |b| {
        b.iter_batched(
            || {
                let mut state = GameState::with_selector(
                    EngineConfig::default(),
                    SequenceSelector::repeat(PieceKind::T),
                );
                state.start();
                state
            },
            |mut state| {
                state.apply_action(GameAction::FreeFall);
                while state.take_last_event().is_none() {
                    state.tick(TICK_MS);
                }
                state
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::seeded(12345);
    state.start();
    let mut dx = 1;

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !state.try_move(dx) {
                dx = -dx;
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = GameState::seeded(12345);
    state.start();
    state.tick(300);
    state.tick(300);

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.try_rotate();
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::seeded(12345);
    state.start();
    let view = GameView::default();
    let viewport = Viewport::new(100, 30);
    let mut fb = FrameBuffer::new(100, 30);

    c.bench_function("render_game_view", |b| {
        b.iter(|| {
            view.render_into(&state.snapshot(), HudFlash::default(), viewport, &mut fb);
            black_box(&fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_free_fall_lock,
    bench_try_move,
    bench_try_rotate,
    bench_render
);
criterion_main!(benches);
