use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ugraph::{Graph, GraphConfig, PriorityStrategy};

// 链保证连通，再随机补边
fn random_graph(n: u32, extra_edges: u32, seed: u64) -> Graph<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::new();
    for i in 0..n {
        let _ = g.add(i);
    }
    for i in 1..n {
        let _ = g.connect_weighted(&(i - 1), &i, rng.gen_range(1.0..10.0));
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        let _ = g.connect_weighted(&a, &b, rng.gen_range(1.0..10.0));
    }
    g
}

fn bench_traversal(c: &mut Criterion) {
    let g = random_graph(500, 1500, 1);
    c.bench_function("bfs_500", |b| {
        b.iter(|| {
            let mut count = 0;
            g.bfs(black_box(&0), |_| count += 1).ok();
            count
        })
    });
    c.bench_function("dfs_500", |b| {
        b.iter(|| {
            let mut count = 0;
            g.dfs(black_box(&0), |_| count += 1).ok();
            count
        })
    });
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    for strategy in [PriorityStrategy::Heap, PriorityStrategy::Array] {
        let mut g = random_graph(300, 2000, 2);
        g.set_config(GraphConfig::new().with_priority(strategy));
        group.bench_with_input(BenchmarkId::from_parameter(strategy), &g, |b, g| {
            b.iter(|| g.dijkstra(black_box(&0), black_box(&299)).map(|p| p.total_weight))
        });
    }
    group.finish();
}

fn bench_prim(c: &mut Criterion) {
    let g = random_graph(300, 2000, 3);
    c.bench_function("prim_300", |b| {
        b.iter(|| g.minimum_spanning_tree().map(|t| t.edge_count()))
    });
}

criterion_group!(benches, bench_traversal, bench_dijkstra, bench_prim);
criterion_main!(benches);
