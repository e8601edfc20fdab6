use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use poset_engine::order::closure::{extend_order, is_reachable, retract_order};
use poset_engine::order::element::ElementId;
use poset_engine::order::poset::Poset;
use poset_engine::order::relation::RelationStore;

fn eid(raw: u32) -> ElementId {
    ElementId::new(raw)
}

/// Closed chain 1 ≤ 2 ≤ ... ≤ n over a raw store.
fn build_chain(n: u32) -> RelationStore {
    let mut store = RelationStore::new();
    for raw in 1..=n {
        store.insert(eid(raw), eid(raw));
    }
    for raw in 1..n {
        extend_order(&mut store, eid(raw), eid(raw + 1)).expect("chain link");
    }
    store
}

/// Two closed chains of length `half` each, not yet joined.
fn build_split_chains(half: u32) -> RelationStore {
    let mut store = RelationStore::new();
    for raw in 1..=half * 2 {
        store.insert(eid(raw), eid(raw));
    }
    for raw in 1..half {
        extend_order(&mut store, eid(raw), eid(raw + 1)).expect("lower chain link");
        extend_order(&mut store, eid(half + raw), eid(half + raw + 1)).expect("upper chain link");
    }
    store
}

fn bench_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend_order");

    for &half in &[16u32, 64u32, 256u32] {
        // Joining the chain ends forces the full cross product of new pairs.
        group.bench_with_input(BenchmarkId::new("join_chains", half * 2), &half, |b, _| {
            let template = build_split_chains(half);
            b.iter_batched(
                || template.clone(),
                |mut store| {
                    extend_order(&mut store, black_box(eid(half)), black_box(eid(half + 1)))
                        .expect("join");
                    store
                },
                BatchSize::SmallInput,
            );
        });

        // Appending one element touches only the existing predecessors.
        group.bench_with_input(BenchmarkId::new("append_link", half * 2), &half, |b, _| {
            let template = {
                let mut store = build_chain(half * 2);
                store.insert(eid(half * 2 + 1), eid(half * 2 + 1));
                store
            };
            b.iter_batched(
                || template.clone(),
                |mut store| {
                    extend_order(
                        &mut store,
                        black_box(eid(half * 2)),
                        black_box(eid(half * 2 + 1)),
                    )
                    .expect("append");
                    store
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_retract_and_reach(c: &mut Criterion) {
    let mut group = c.benchmark_group("retract_order");

    for &n in &[32u32, 128u32, 512u32] {
        let chain = build_chain(n);

        // Covered pair: the guard walks the alternate path before refusing.
        group.bench_with_input(BenchmarkId::new("refuse_covered", n), &n, |b, _| {
            b.iter_batched(
                || chain.clone(),
                |mut store| {
                    let refused = retract_order(&mut store, eid(1), eid(n)).is_err();
                    black_box(refused);
                    store
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("reachability_hit", n), &n, |b, _| {
            b.iter(|| black_box(is_reachable(&chain, black_box(eid(1)), black_box(eid(n)))));
        });

        group.bench_with_input(BenchmarkId::new("reachability_miss", n), &n, |b, _| {
            b.iter(|| black_box(is_reachable(&chain, black_box(eid(n)), black_box(eid(1)))));
        });
    }

    group.finish();
}

fn bench_facade_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("poset_query");

    for &n in &[64usize, 512usize] {
        let mut poset = Poset::new();
        let names: Vec<String> = (0..n).map(|i| format!("e{i}")).collect();
        for name in &names {
            poset.insert_element(name).expect("insert");
        }
        for pair in names.windows(2) {
            poset.add_relation(&pair[0], &pair[1]).expect("link");
        }

        group.bench_with_input(BenchmarkId::new("holds_closed_pair", n), &n, |b, _| {
            b.iter(|| black_box(poset.holds(black_box(&names[0]), black_box(&names[n - 1]))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extend, bench_retract_and_reach, bench_facade_query);
criterion_main!(benches);
