use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_tetromino::core::{Field, GameSnapshot, Session};
use tui_tetromino::term::{FrameBuffer, GameView, Viewport};
use tui_tetromino::types::{PieceKind, SessionState};

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::with_seed(12345);
    session.start();

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            if session.state() != SessionState::Playing {
                session.restart();
            }
            black_box(session.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    field.set(x, y, PieceKind::I.cell_value());
                }
            }
            black_box(field.clear_lines());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = Session::with_seed(12345);
    session.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !session.hard_drop() {
                session.restart();
            }
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut session = Session::with_seed(12345);
    session.start();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            session.move_right();
            session.move_left();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = Session::with_seed(12345);
    session.start();

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            black_box(session.rotate_cw());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = Session::with_seed(12345);
    session.start();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            black_box(&fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
