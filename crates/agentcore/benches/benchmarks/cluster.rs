use criterion::{BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::{Duration, Instant};

use agentcore::NodeId;
use agentcore::resources::{CPU_RESOURCE_ID, ResourceAmount, ResourceRequest, ResourceSet};

use crate::{create_cluster, sync_message};

fn cpu_request(units: i64) -> ResourceRequest {
    ResourceSet::new([(CPU_RESOURCE_ID, ResourceAmount::new_units(units))]).into()
}

fn bench_subtract_and_return(c: &mut Criterion) {
    for node_count in [10, 1_000, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("subtract and return resources", node_count),
            &node_count,
            |b, &node_count| {
                b.iter_batched_ref(
                    || (create_cluster(node_count), cpu_request(2)),
                    |(manager, request)| {
                        for id in 0..node_count {
                            let node_id = NodeId::new(id);
                            manager.subtract_node_available_resources(node_id, request);
                            manager.add_node_available_resources(node_id, request.resource_set());
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_find_available_node(c: &mut Criterion) {
    for node_count in [10, 1_000, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("find available node", node_count),
            &node_count,
            |b, &node_count| {
                let manager = create_cluster(node_count);
                let request = cpu_request(65);
                b.iter(|| {
                    (0..node_count)
                        .map(NodeId::new)
                        .find(|id| manager.has_available_resources(*id, &request, false))
                });
            },
        );
    }
}

fn bench_update_node(c: &mut Criterion) {
    for node_count in [10, 1_000, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("update node from sync message", node_count),
            &node_count,
            |b, &node_count| {
                b.iter_batched_ref(
                    || (create_cluster(node_count), sync_message(17.5)),
                    |(manager, message)| {
                        for id in 0..node_count {
                            black_box(manager.update_node(NodeId::new(id), message));
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_refresh_stale_views(c: &mut Criterion) {
    for node_count in [10, 1_000, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("refresh stale views", node_count),
            &node_count,
            |b, &node_count| {
                b.iter_batched_ref(
                    || {
                        let mut manager = create_cluster(node_count);
                        let message = sync_message(32.0);
                        for id in 0..node_count {
                            manager.update_node(NodeId::new(id), &message);
                        }
                        manager
                    },
                    |manager| {
                        black_box(
                            manager.refresh_stale_views(Instant::now() + Duration::from_secs(3)),
                        );
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_subtract_and_return(c);
    bench_find_available_node(c);
    bench_update_node(c);
    bench_refresh_stale_views(c);
}
