//! Criterion benchmarks for the snake tick loop.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_arcade::{Direction, GameRng, Point, Snake, SnakeConfig, SnakeStatus};

/// Greedy bot: close the x gap, then the y gap, falling back to any
/// direction that does not hit a wall or the body.
fn steer(snake: &mut Snake) {
    let head = snake.state().segments[0];
    let food = snake.state().food;
    let current = snake.state().direction;
    let grid = snake.config().grid_size;

    let towards_x = if food.x > head.x {
        Direction::Right
    } else {
        Direction::Left
    };
    let towards_y = if food.y > head.y {
        Direction::Down
    } else {
        Direction::Up
    };

    let mut preference = vec![];
    if food.x != head.x {
        preference.push(towards_x);
    }
    if food.y != head.y {
        preference.push(towards_y);
    }
    preference.extend(Direction::ALL);

    let safe = |d: Direction| {
        let next = head.step(d);
        d != current.opposite()
            && next.in_bounds(grid)
            && !snake.state().segments.iter().any(|&s| s == next)
    };

    if let Some(&turn) = preference.iter().find(|&&d| safe(d)) {
        snake.set_direction(turn);
    }
}

/// Play one greedy game to completion (or the tick cap); returns the
/// number of ticks simulated.
fn run_game(grid: i32, seed: u64) -> u32 {
    let config = SnakeConfig {
        grid_size: grid,
        initial_head: Point::new(grid / 2, grid / 2),
        initial_food: Point::new(grid / 4, grid / 4),
        ..SnakeConfig::default()
    };

    let mut snake = Snake::with_config(config, GameRng::new(seed));
    snake.start();

    let mut ticks = 0;
    while snake.state().status == SnakeStatus::Running && ticks < 10_000 {
        steer(&mut snake);
        snake.tick();
        ticks += 1;
    }

    ticks
}

/// Benchmark whole greedy games at several board sizes.
fn bench_greedy_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake_game");

    for grid in [8i32, 20, 40] {
        group.bench_with_input(BenchmarkId::from_parameter(grid), &grid, |b, &grid| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(run_game(grid, seed))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_greedy_games);
criterion_main!(benches);
