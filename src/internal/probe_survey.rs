//! Latency survey across the four collision-resolution disciplines.
//!
//! Fills each table variant to a range of load factors with random integer
//! keys, times bulk insert and lookup through the shared contract, prints the
//! per-step numbers and renders two line charts.

#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::unwrap_used)]

use std::time::Instant;

use log::{info, warn};
use plotters::prelude::*;
use probemap::{ChainedMap, DoubleHashProbeMap, HashTable, LinearProbeMap, QuadraticProbeMap};
use rand::Rng;

/// Prime table capacity, so the modulo hash spreads keys evenly.
const TABLE_CAPACITY: usize = 100_003;
/// Keys are drawn uniformly below this bound.
const KEY_LIMIT: i64 = 100_000;
/// Sequential keys probed during the lookup measurement.
const LOOKUP_AMOUNT: i64 = 100_000;
/// Load factors from 0.1 to 0.95 in this many steps.
const NUM_LOAD_FACTORS: usize = 10;

const METHODS: [&str; 4] = [
    "Separate chaining",
    "Linear probing",
    "Quadratic probing",
    "Double hashing",
];

fn hash_main(key: &i64) -> u64 {
    let capacity = i64::try_from(TABLE_CAPACITY).unwrap_or(i64::MAX);
    key.rem_euclid(capacity).unsigned_abs()
}

fn hash_pair(key: &i64) -> u64 {
    7 - key.rem_euclid(7).unsigned_abs()
}

/// Fresh instances of all four variants, in `METHODS` order.
fn build_tables() -> Vec<Box<dyn HashTable<i64, i64>>> {
    vec![
        Box::new(ChainedMap::new(TABLE_CAPACITY, hash_main)),
        Box::new(LinearProbeMap::new(TABLE_CAPACITY, hash_main)),
        Box::new(QuadraticProbeMap::new(TABLE_CAPACITY, hash_main)),
        Box::new(DoubleHashProbeMap::new(TABLE_CAPACITY, hash_main, hash_pair)),
    ]
}

/// Mean microseconds per bulk insert; failed inserts are counted, not fatal.
fn measure_insert(table: &mut dyn HashTable<i64, i64>, keys: &[i64]) -> (f64, usize) {
    let started = Instant::now();
    let mut failures = 0usize;

    for (position, key) in keys.iter().enumerate() {
        let value = i64::try_from(position).unwrap_or(i64::MAX);
        if table.insert(*key, value).is_err() {
            failures += 1;
        }
    }

    let mean = started.elapsed().as_secs_f64() * 1e6 / keys.len() as f64;
    (mean, failures)
}

/// Mean microseconds per lookup over sequential keys, hits and misses mixed.
fn measure_find(table: &dyn HashTable<i64, i64>) -> f64 {
    let started = Instant::now();

    for key in 0..LOOKUP_AMOUNT {
        let _ = table.find(&key);
    }

    started.elapsed().as_secs_f64() * 1e6 / LOOKUP_AMOUNT as f64
}

/// Draws one latency chart: a line with point markers per method.
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    key_counts: &[usize],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let colors = [
        RGBColor(220, 50, 50),
        RGBColor(50, 90, 220),
        RGBColor(50, 180, 50),
        RGBColor(180, 50, 180),
    ];
    let font_family = "sans-serif";
    let text_size = 16;

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_value = series
        .iter()
        .flat_map(|values| values.iter())
        .fold(0.0, |max, &value| if value > max { value } else { max })
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..key_counts.len().saturating_sub(1), 0.0..max_value)?;

    let x_labels: Vec<String> = key_counts.iter().map(|&count| count.to_string()).collect();

    chart
        .configure_mesh()
        .x_labels(key_counts.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                series[method_idx].iter().enumerate().map(|(i, &v)| (i, v)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            series[method_idx]
                .iter()
                .enumerate()
                .map(|(i, &v)| Circle::new((i, v), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();
    let key_counts: Vec<usize> = load_factors
        .iter()
        .map(|&load| (TABLE_CAPACITY as f64 * load) as usize)
        .collect();

    info!("load factors: {load_factors:?}");
    info!("key counts: {key_counts:?}");

    let mut rng = rand::rng();
    let max_keys = *key_counts.iter().max().unwrap_or(&0);
    let keys: Vec<i64> = (0..max_keys).map(|_| rng.random_range(1..KEY_LIMIT)).collect();

    let mut insert_latency: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut find_latency: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];

    for &n_keys in &key_counts {
        println!("Testing with {n_keys} keys");

        for (method_idx, table) in build_tables().iter_mut().enumerate() {
            let batch = keys.get(..n_keys).unwrap_or(&keys);

            let (insert_mean, failures) = measure_insert(table.as_mut(), batch);
            if failures > 0 {
                // Expected for quadratic probing near full: its offsets do
                // not reach every slot.
                warn!("{}: {failures} inserts exhausted their probe cycle", METHODS[method_idx]);
            }

            let find_mean = measure_find(table.as_ref());

            insert_latency[method_idx].push(insert_mean);
            find_latency[method_idx].push(find_mean);

            println!(
                "  {}: insert = {insert_mean:.3} us, find = {find_mean:.3} us",
                METHODS[method_idx]
            );
        }
    }

    draw_chart(
        "insert_latency.png",
        "Mean Insert Latency by Collision Resolution",
        "Mean Insert Latency (us)",
        &key_counts,
        &insert_latency,
    )?;
    draw_chart(
        "lookup_latency.png",
        "Mean Lookup Latency by Collision Resolution",
        "Mean Lookup Latency (us)",
        &key_counts,
        &find_latency,
    )?;

    println!("Generated plot images: insert_latency.png, lookup_latency.png");

    Ok(())
}
