//! Benchmarks for the dashboard update path
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use salesboard::dashboard::{Dashboard, FilterSelection, UpdateInputs};
use salesboard::dataset::{parse_json_lines, SalesDataset, SalesRecord};
use salesboard::geo::BoundaryDocument;
use std::io::Cursor;

const STATES: [&str; 6] = ["Goa", "Kerala", "Punjab", "Assam", "Bihar", "Odisha"];
const SUB_CATEGORIES: [&str; 4] = ["Phones", "Chairs", "Binders", "Paper"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

fn create_test_records(count: usize) -> Vec<SalesRecord> {
    (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2016 + (i % 4) as i32, 1 + (i % 12) as u32, 1 + (i % 28) as u32)
                .unwrap();
            SalesRecord::new(date, (i % 500) as f64 + 10.0, (i % 97) as f64 - 30.0)
                .quantity((i % 7) as i64 + 1)
                .category(if i % 3 == 0 { "Technology" } else { "Furniture" })
                .sub_category(SUB_CATEGORIES[i % SUB_CATEGORIES.len()])
                .product(format!("Product {}", i % 200))
                .region(REGIONS[i % REGIONS.len()])
                .state(STATES[i % STATES.len()])
                .customer(format!("C{}", i % 800))
        })
        .collect()
}

fn create_dashboard(count: usize) -> Dashboard {
    let features: Vec<_> = STATES
        .iter()
        .map(|name| serde_json::json!({ "type": "Feature", "properties": { "NAME_1": name }, "geometry": null }))
        .collect();
    let boundaries = BoundaryDocument::from_value(
        serde_json::json!({ "type": "FeatureCollection", "features": features }),
        "properties.NAME_1",
    )
    .unwrap();

    Dashboard::new(SalesDataset::new(create_test_records(count)), boundaries)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for size in [1_000, 10_000, 50_000] {
        let dashboard = create_dashboard(size);
        group.throughput(Throughput::Elements(size as u64));

        let unfiltered = UpdateInputs::default();
        group.bench_function(format!("unfiltered_{}", size), |b| {
            b.iter(|| dashboard.update(black_box(&unfiltered)))
        });

        let filtered = UpdateInputs::new(FilterSelection::new().year(2018).state("Goa")).clicks(1, 0);
        group.bench_function(format!("year_and_state_{}", size), |b| {
            b.iter(|| dashboard.update(black_box(&filtered)))
        });
    }

    group.finish();
}

fn bench_figures(c: &mut Criterion) {
    let dashboard = create_dashboard(10_000);
    let outputs = dashboard.update(&UpdateInputs::default());

    c.bench_function("figures_10000", |b| {
        b.iter(|| {
            outputs
                .charts()
                .iter()
                .map(|chart| chart.figure())
                .collect::<Vec<_>>()
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let lines: String = (0..5_000)
        .map(|i| {
            format!(
                "{{\"Order Date\":\"2019-03-{:02}\",\"Sales\":{},\"Profit\":{},\"Quantity\":2,\"Category\":\"Technology\",\"Sub-Category\":\"Phones\",\"Product Name\":\"Product {}\",\"Region\":\"South\",\"State\":\"Goa\",\"Customer ID\":\"C{}\"}}\n",
                1 + i % 28,
                i,
                i % 50,
                i % 100,
                i % 300
            )
        })
        .collect();

    group.throughput(Throughput::Elements(5_000));
    group.bench_function("json_lines_5000", |b| {
        b.iter(|| parse_json_lines(Cursor::new(black_box(lines.as_bytes()))).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_update, bench_figures, bench_parse);
criterion_main!(benches);
