use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowdrift::{ID_EPOCH, IdWorker, TimeSource};
use std::time::Instant;

struct FixedMockTime {
    millis: i64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration. One full sequence space,
// so a fixed clock never forces a spin.
const TOTAL_IDS: usize = 4096;

/// Benchmarks the hot path with a frozen clock: no syscalls, no spinning.
fn bench_fixed_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("id_worker/fixed_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let worker = IdWorker::with_time_source(
                    1,
                    1,
                    FixedMockTime {
                        millis: ID_EPOCH + 1,
                    },
                )
                .unwrap();
                for _ in 0..TOTAL_IDS {
                    black_box(worker.next_id().unwrap());
                }
            }

            start.elapsed()
        })
    });
    group.finish();
}

/// Benchmarks generation against the real system clock, including any
/// spin-waits on sequence exhaustion.
fn bench_system_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("id_worker/system_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let worker = IdWorker::new(1, 1).unwrap();
                for _ in 0..TOTAL_IDS {
                    black_box(worker.next_id().unwrap());
                }
            }

            start.elapsed()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_fixed_clock, bench_system_clock);
criterion_main!(benches);
