//! Benchmarks for placement moves and library filtering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use homegrid_core::app::{AppEntry, Category};
use homegrid_core::filter;
use homegrid_core::placement::{PlacementStore, SequenceId};

fn catalog(n: usize) -> Vec<AppEntry> {
    (0..n)
        .map(|i| {
            AppEntry::new(format!("pkg.app{i:05}"), format!("App {i:05}"))
                .with_category(Category::ALL[i % Category::ALL.len()])
                .with_dock_default(i < 4)
        })
        .collect()
}

fn bench_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_move");

    for n in [20, 200, 2_000] {
        let mut store = PlacementStore::from_catalog(catalog(n + 4), 4, n);
        let label = format!("{n}");

        group.bench_function(BenchmarkId::new("first_to_last", &label), |b| {
            b.iter(|| store.move_entry(SequenceId::Home, 0, black_box(n - 1)));
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("library_filter");

    for n in [100, 1_000, 10_000] {
        let apps = catalog(n);
        let label = format!("{n}");

        group.bench_function(BenchmarkId::new("query", &label), |b| {
            b.iter(|| filter::filter(&apps, black_box("app 01")).len());
        });
        group.bench_function(BenchmarkId::new("categorized", &label), |b| {
            b.iter(|| filter::project(&apps, "", 8).app_count());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_move, bench_filter);
criterion_main!(benches);
