use criterion::{black_box, criterion_group, criterion_main, Criterion};
use text_tetris::core::{ActivePiece, Field, GameConfig, GameState, Screen};
use text_tetris::types::{FieldCell, InputEvent, PieceId};

fn bench_step(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default(), 12345);

    c.bench_function("step_no_input", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state = GameState::new(GameConfig::default(), 12345);
            }
            black_box(state.step(None));
        })
    });
}

fn bench_step_with_input(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default(), 12345);
    let inputs = [
        Some(InputEvent::MoveLeft),
        Some(InputEvent::Rotate),
        Some(InputEvent::MoveRight),
        None,
    ];
    let mut i = 0;

    c.bench_function("step_with_input", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state = GameState::new(GameConfig::default(), 12345);
            }
            i = (i + 1) % inputs.len();
            black_box(state.step(black_box(inputs[i])));
        })
    });
}

fn bench_fits(c: &mut Criterion) {
    let field = Field::new(12, 18);

    c.bench_function("fits", |b| {
        b.iter(|| {
            for r in 0..4 {
                black_box(field.fits(black_box(PieceId::new(3)), r, black_box(4), black_box(8)));
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut state = GameState::new(GameConfig::default(), 1);
            let field = state.field_mut();
            for y in 13..17 {
                for x in 1..11 {
                    if x != 5 {
                        field.set(x, y, FieldCell::Block);
                    }
                }
            }
            state.set_active(ActivePiece {
                id: PieceId::new(0),
                rotation: 0,
                x: 3,
                y: 13,
            });
            // Gravity on the 10th frame finds the floor and locks.
            let mut lock = None;
            while lock.is_none() {
                lock = state.step(None).lock;
            }
            black_box(lock);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(GameConfig::default(), 12345);
    let mut screen = Screen::new(12, 19);

    c.bench_function("render_into", |b| {
        b.iter(|| {
            state.render_into(&mut screen);
            black_box(&screen);
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_step_with_input,
    bench_fits,
    bench_line_clear,
    bench_render
);
criterion_main!(benches);
