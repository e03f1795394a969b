use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifeboard::{Board, BoundedBoard, CellPos, SparseBoard};

fn make_alive(width: i64, height: i64, origin: CellPos) -> Vec<CellPos> {
    let mut alive = Vec::new();
    for row in 0..height {
        for col in 0..width {
            if (row + col) % 3 == 0 {
                alive.push(CellPos::new(origin.row + row, origin.col + col));
            }
        }
    }
    alive
}

fn bench_sparse_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_update");
    let origins = [
        ("origin", CellPos::zero()),
        ("far", CellPos::new(i64::MAX / 2, i64::MIN / 2)),
        ("edge", CellPos::new(i64::MAX - 256, i64::MIN)),
    ];
    for size in [64, 128, 256] {
        for (name, origin) in origins {
            let alive = make_alive(size, size, origin);

            group.bench_with_input(BenchmarkId::new(name, size), &alive, |b, alive| {
                b.iter_batched(
                    || alive.iter().copied().collect::<SparseBoard>(),
                    |mut board| board.update(),
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_bounded_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_update");
    for size in [64, 128, 256] {
        let alive = make_alive(size, size, CellPos::zero());

        group.bench_with_input(BenchmarkId::new("dense", size), &alive, |b, alive| {
            b.iter_batched(
                || {
                    let mut board = BoundedBoard::new(size as usize, size as usize);
                    board.initialize(alive.iter().copied());
                    board
                },
                |mut board| board.update(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sparse_update, bench_bounded_update);
criterion_main!(benches);
