//! Criterion benchmarks for the core container operations
//!
//! Run with: cargo bench --bench container_ops
//!
//! Inputs are generated with a seeded PRNG so runs are reproducible.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cursor_collections::graph::{minimum_spanning_tree, shortest_paths, AdjacencyList};
use cursor_collections::huffman::HuffmanCoder;
use cursor_collections::kdtree::{KdTree, NdPoint};
use cursor_collections::{AvlTree, Container, Keyed, MaxHeap, PriorityQueue, TwoThreeTree};

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_range(&mut self, min: u32, max: u32) -> u32 {
        let range = (max - min) as u64;
        if range == 0 {
            return min;
        }
        min + (self.next() % range) as u32
    }
}

#[derive(Clone)]
struct Rec(u32);

impl Keyed for Rec {
    type Key = u32;
    fn key(&self) -> &u32 {
        &self.0
    }
}

fn random_values(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next_range(0, 1_000_000)).collect()
}

/// Ring plus random chords, everything reachable from vertex 1
fn ring_graph(n: usize, seed: u64) -> AdjacencyList<u32> {
    let mut rng = Lcg::new(seed);
    let mut graph = AdjacencyList::new(n);
    for u in 1..=n {
        graph
            .add_edge(u, u % n + 1, rng.next_range(1, 100))
            .unwrap();
    }
    use cursor_collections::graph::WeightedGraph;
    for _ in 0..n * 4 {
        let u = rng.next_range(1, n as u32 + 1) as usize;
        let v = rng.next_range(1, n as u32 + 1) as usize;
        if u != v && !graph.is_adjacent(u, v) {
            graph.add_edge(u, v, rng.next_range(1, 100)).unwrap();
        }
    }
    graph
}

fn heap_insert_drain(values: &[u32]) -> u64 {
    let mut heap = MaxHeap::with_capacity(values.len());
    for &v in values {
        heap.insert(v).unwrap();
    }
    let mut sum = 0u64;
    while !heap.is_empty() {
        sum += u64::from(heap.delete_at(1).unwrap());
    }
    sum
}

fn queue_mixed_ops(values: &[u32]) -> u64 {
    let mut queue = PriorityQueue::with_capacity(values.len());
    let mut sum = 0u64;
    for (i, &v) in values.iter().enumerate() {
        queue.insert(v).unwrap();
        if i % 3 == 2 {
            sum += u64::from(queue.delete_min().unwrap());
        }
    }
    while !queue.is_empty() {
        sum += u64::from(queue.delete_max().unwrap());
    }
    sum
}

fn avl_insert_search_delete(values: &[u32]) -> usize {
    let mut tree = AvlTree::new();
    for &v in values {
        tree.insert(v);
    }
    let mut found = 0;
    for &v in values {
        if tree.has(&v) {
            found += 1;
        }
    }
    for &v in values {
        let _ = tree.delete(&v);
    }
    found
}

fn two_three_insert_iterate_delete(values: &[u32]) -> u64 {
    let mut tree = TwoThreeTree::new();
    for &v in values {
        // Duplicate keys are rejected, which is fine for throughput
        let _ = tree.insert(Rec(v));
    }
    let sum: u64 = tree.iter().map(|r| u64::from(r.0)).sum();
    for &v in values {
        let _ = tree.delete(&v);
    }
    sum
}

fn benchmark_heaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("heaps");

    for n in [1_000usize, 10_000] {
        let values = random_values(n, 12345);
        group.bench_with_input(
            BenchmarkId::new("max_heap_insert_drain", n),
            &values,
            |b, vs| b.iter(|| black_box(heap_insert_drain(vs))),
        );
        group.bench_with_input(
            BenchmarkId::new("queue_mixed_ops", n),
            &values,
            |b, vs| b.iter(|| black_box(queue_mixed_ops(vs))),
        );
    }

    group.finish();
}

fn benchmark_ordered_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordered_trees");

    for n in [1_000usize, 10_000] {
        let values = random_values(n, 54321);
        group.bench_with_input(
            BenchmarkId::new("avl_insert_search_delete", n),
            &values,
            |b, vs| b.iter(|| black_box(avl_insert_search_delete(vs))),
        );
        group.bench_with_input(
            BenchmarkId::new("two_three_insert_iterate_delete", n),
            &values,
            |b, vs| b.iter(|| black_box(two_three_insert_iterate_delete(vs))),
        );
    }

    group.finish();
}

fn benchmark_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    group.sample_size(20);

    for n in [500usize, 2_000] {
        let graph = ring_graph(n, 12345);
        group.bench_with_input(
            BenchmarkId::new("shortest_paths", n),
            &graph,
            |b, g| b.iter(|| black_box(shortest_paths(g, 1).unwrap())),
        );
        group.bench_with_input(
            BenchmarkId::new("minimum_spanning_tree", n),
            &graph,
            |b, g| b.iter(|| black_box(minimum_spanning_tree(g).unwrap())),
        );
    }

    group.finish();
}

fn benchmark_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codecs");

    let mut rng = Lcg::new(99);
    let alphabet: Vec<char> = (' '..='~').collect();
    let message: String = (0..10_000)
        .map(|_| alphabet[rng.next() as usize % alphabet.len()])
        .collect();

    group.bench_function("huffman_fit_encode", |b| {
        b.iter(|| {
            let coder = HuffmanCoder::new(&message).unwrap();
            black_box(coder.encode())
        });
    });

    let coder = HuffmanCoder::new(&message).unwrap();
    let bits = coder.encode();
    group.bench_function("huffman_decode", |b| {
        b.iter(|| black_box(coder.decode(&bits).unwrap()));
    });

    group.finish();
}

fn benchmark_kd_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("kd_tree");

    let mut rng = Lcg::new(7);
    let points: Vec<NdPoint> = (0..10_000)
        .map(|_| {
            NdPoint::from([
                f64::from(rng.next_range(0, 1_000)),
                f64::from(rng.next_range(0, 1_000)),
            ])
        })
        .collect();

    group.bench_function("build_10k", |b| {
        b.iter(|| black_box(KdTree::build(2, points.clone()).unwrap()));
    });

    let tree = KdTree::build(2, points.clone()).unwrap();
    let lower = NdPoint::from([200.0, 200.0]);
    let upper = NdPoint::from([400.0, 400.0]);
    group.bench_function("range_search_10k", |b| {
        b.iter(|| black_box(tree.range_search(&lower, &upper).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_heaps,
    benchmark_ordered_trees,
    benchmark_graph,
    benchmark_codecs,
    benchmark_kd_tree,
);

criterion_main!(benches);
