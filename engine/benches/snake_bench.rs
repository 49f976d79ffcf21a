use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use engine::snake::Snake;
use engine::space::{Point, Vector};

fn grown_snake(length: usize) -> Snake {
    let mut snake = Snake::new(Point::new(0, 0), Vector::UP);
    for _ in 1..length {
        snake.grow();
    }
    snake
}

fn bench_contains_miss(c: &mut Criterion) {
    let snake = grown_snake(256);
    c.bench_function("contains_miss_256", |b| {
        b.iter(|| snake.contains(Point::new(1000, 1000)))
    });
}

fn bench_contains_tail_hit(c: &mut Criterion) {
    let snake = grown_snake(256);
    c.bench_function("contains_tail_256", |b| {
        b.iter(|| snake.contains(Point::new(0, 0)))
    });
}

fn bench_advance(c: &mut Criterion) {
    let snake = grown_snake(256);
    c.bench_function("advance_256", |b| {
        b.iter_batched(
            || snake.clone(),
            |mut snake| snake.advance(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_contains_miss,
    bench_contains_tail_hit,
    bench_advance
);
criterion_main!(benches);
