// File: crates/bento-core/src/bin.rs
// Summary: Binning engine: partitions numeric samples into contiguous count buckets.

use crate::scale::ticks;

/// One histogram bucket covering `[x0, x1)`; the last bucket is `[x0, x1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

impl Bin {
    pub fn width(&self) -> f64 { self.x1 - self.x0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BinStrategy {
    /// Exactly `count` buckets of width `(max - min) / count`.
    #[default]
    EqualWidth,
    /// Thresholds on round tick values strictly inside `(min, max)`; the two
    /// edge buckets are clipped to the data extent.
    NiceThresholds,
}

/// Data extent ignoring non-finite samples.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Bucket `values` into about `count` bins spanning `[min, max]`.
///
/// Empty input gives no bins; identical values give one `[v, v]` bin holding
/// every sample. `count == 0` behaves like 1.
pub fn bin(values: &[f64], count: usize, strategy: BinStrategy) -> Vec<Bin> {
    let Some((min, max)) = extent(values) else { return Vec::new(); };
    let finite = values.iter().copied().filter(|v| v.is_finite());
    if min == max {
        return vec![Bin { x0: min, x1: max, count: finite.count() }];
    }
    let thresholds = match strategy {
        BinStrategy::EqualWidth => equal_thresholds(min, max, count.max(1)),
        BinStrategy::NiceThresholds => nice_thresholds(min, max, count.max(1)),
    };

    let mut bins: Vec<Bin> = Vec::with_capacity(thresholds.len() + 1);
    let mut lo = min;
    for &t in &thresholds {
        bins.push(Bin { x0: lo, x1: t, count: 0 });
        lo = t;
    }
    bins.push(Bin { x0: lo, x1: max, count: 0 });

    for v in finite {
        // first threshold strictly greater than v
        let i = thresholds.partition_point(|&t| t <= v);
        bins[i].count += 1;
    }
    bins
}

fn equal_thresholds(min: f64, max: f64, count: usize) -> Vec<f64> {
    let width = (max - min) / count as f64;
    (1..count).map(|i| min + width * i as f64).filter(|t| *t > min && *t < max).collect()
}

fn nice_thresholds(min: f64, max: f64, count: usize) -> Vec<f64> {
    let mut tz = ticks(min, max, count);
    // ticks at the extent edges would create empty zero-width edge bins
    tz.retain(|t| *t > min && *t < max);
    tz
}

/// Tallest bucket count (0 when there are none).
pub fn max_count(bins: &[Bin]) -> usize {
    bins.iter().map(|b| b.count).max().unwrap_or(0)
}
