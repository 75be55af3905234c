//! Benchmarks for table mutation and lookup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridkit_core::{ColumnRegistry, ColumnSettings, ColumnType, Table, TableOptions};

fn filled(rows: usize) -> Table {
    let columns = ColumnRegistry::new(vec![
        ColumnSettings::typed(ColumnType::String),
        ColumnSettings::typed(ColumnType::Number),
    ]);
    let mut table = Table::new(TableOptions::default()).with_columns(columns);
    for i in 0..rows {
        table
            .add([format!("row-{i}"), i.to_string()])
            .expect("row width");
    }
    table
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("table_add_1000", |b| b.iter(|| filled(black_box(1000))));
}

fn bench_find_row_index(c: &mut Criterion) {
    let table = filled(1000);
    c.bench_function("table_find_row_index_last", |b| {
        b.iter(|| table.find_row_index(black_box(0), black_box("ROW-999")))
    });
}

fn bench_remove_half(c: &mut Criterion) {
    let table_rows: Vec<usize> = (0..1000).step_by(2).collect();
    c.bench_function("table_remove_half", |b| {
        b.iter_batched(
            || filled(1000),
            |mut table| table.remove(table_rows.clone()),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_add, bench_find_row_index, bench_remove_half);
criterion_main!(benches);
