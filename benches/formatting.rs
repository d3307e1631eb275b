use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridview::formatter::{DatetimeFormatter, NumberFormatter};
use gridview::{sort_rows, CellFormatter, MemoryModel, RawValue, RowComparator};

fn bench_number_formatter(c: &mut Criterion) {
    let formatter = NumberFormatter::default();
    let values: Vec<RawValue> = (0..1000)
        .map(|i| RawValue::Number(f64::from(i) * 1234.5678))
        .collect();

    c.bench_function("number_from_raw_1000", |b| {
        b.iter(|| {
            for value in &values {
                black_box(formatter.from_raw(black_box(value)));
            }
        });
    });

    c.bench_function("number_to_raw", |b| {
        b.iter(|| black_box(formatter.to_raw(black_box("1,234,567.89"))));
    });
}

fn bench_datetime_formatter(c: &mut Criterion) {
    let formatter = DatetimeFormatter::default();
    let raw = RawValue::Text("2015-07-04T10:30:45Z".to_string());

    c.bench_function("datetime_from_raw", |b| {
        b.iter(|| black_box(formatter.from_raw(black_box(&raw))));
    });

    c.bench_function("datetime_to_raw", |b| {
        b.iter(|| black_box(formatter.to_raw(black_box("2015-07-04T12:30:45+02:00"))));
    });
}

fn bench_sort(c: &mut Criterion) {
    let comparator = RowComparator::ByColumn {
        column: "n".to_string(),
        ascending: true,
    };

    c.bench_function("sort_1000_rows", |b| {
        b.iter_with_setup(
            || {
                (0..1000)
                    .map(|i| {
                        let value = f64::from((i * 7919) % 1000);
                        MemoryModel::from_pairs([("n", RawValue::Number(value))])
                    })
                    .collect::<Vec<_>>()
            },
            |rows| black_box(sort_rows(rows, &comparator)),
        );
    });
}

criterion_group!(
    benches,
    bench_number_formatter,
    bench_datetime_formatter,
    bench_sort
);
criterion_main!(benches);
