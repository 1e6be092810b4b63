use criterion::{BatchSize, BenchmarkId, Criterion};

use agentcore::push::PushManager;
use agentcore::{NodeId, ObjectId};

use crate::noop_send_fn;

fn start_pushes(pm: &mut PushManager, push_count: u64, num_chunks: u64) {
    for id in 0..push_count {
        let (dest, obj) = (NodeId::new(id), ObjectId::new(id));
        pm.start_push(dest, obj, num_chunks, noop_send_fn());
    }
}

fn bench_start_pushes(c: &mut Criterion) {
    for push_count in [10, 1_000, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("start pushes", push_count),
            &push_count,
            |b, &push_count| {
                b.iter_batched_ref(
                    || PushManager::new(32),
                    |pm| start_pushes(pm, push_count, 8),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_drain_pushes(c: &mut Criterion) {
    for push_count in [10, 100, 1_000] {
        c.bench_with_input(
            BenchmarkId::new("drain pushes", push_count),
            &push_count,
            |b, &push_count| {
                b.iter_batched_ref(
                    || {
                        let mut pm = PushManager::new(32);
                        start_pushes(&mut pm, push_count, 8);
                        pm
                    },
                    |pm| {
                        // Completions arrive round robin over all destinations
                        while pm.num_pushes_in_flight() > 0 {
                            for id in 0..push_count {
                                pm.on_chunk_complete(NodeId::new(id), ObjectId::new(id));
                            }
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_start_pushes(c);
    bench_drain_pushes(c);
}
