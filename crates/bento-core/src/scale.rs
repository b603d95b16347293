// File: crates/bento-core/src/scale.rs
// Summary: Domain -> range scale builders (linear, band, ordinal color, continuous color)
// and "nice" tick generation.
//
// Scales are plain values: build one per redraw from the current props, never
// mutate one that is already in use.

use std::collections::HashMap;

use crate::color::{Color, ColorRamp};
use crate::format::format_fixed_grouped;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer tick bounds plus increment. A negative increment `-k` means a
/// step of `1/k`, which keeps fractional ticks exact (0.1 instead of 0.1000001).
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start { i1 += 1.0; }
        if i2 / k > stop { i2 -= 1.0; }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start { i1 += 1.0; }
        if i2 * k > stop { i2 -= 1.0; }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Upper bound on requested tick counts; larger requests are clamped.
pub const MAX_TICKS: usize = 1000;

/// Round tick values covering `[start, stop]`, roughly `count` of them.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let count = count.min(MAX_TICKS);
    if count == 0 || !start.is_finite() || !stop.is_finite() { return Vec::new(); }
    if start == stop { return vec![start]; }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) { return Vec::new(); }
    let n = ((i2 - i1 + 1.0) as usize).min(2 * MAX_TICKS + 1);
    let at = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    let mut out: Vec<f64> = (0..n).map(|i| at(i1 + i as f64)).collect();
    if reverse { out.reverse(); }
    out
}

/// Signed increment (see `tick_spec`) between ticks for `[start, stop]`.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count.min(MAX_TICKS) as f64).2
}

/// Positive distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let inc = tick_increment(lo, hi, count);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

/// Decimal places needed to print values that are multiples of `step`.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() { return 0; }
    (-step.log10().floor()).max(0.0) as usize
}

// ---- linear -----------------------------------------------------------------

/// Continuous, invertible linear mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range, clamp: false }
    }

    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn domain(&self) -> (f64, f64) { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    pub fn is_degenerate(&self) -> bool {
        let (d0, d1) = self.domain;
        !(d1 - d0).is_finite() || d1 == d0
    }

    /// Map a domain value to the range. A degenerate domain collapses to the
    /// range start instead of dividing by zero.
    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() { return r0; }
        let mut t = (v - d0) / (d1 - d0);
        if self.clamp { t = t.clamp(0.0, 1.0); }
        r0 + t * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 || !(r1 - r0).is_finite() { return d0; }
        let mut t = (px - r0) / (r1 - r0);
        if self.clamp { t = t.clamp(0.0, 1.0); }
        d0 + t * (d1 - d0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Extend the domain outward to round tick values.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reverse = stop < start;
        if reverse { std::mem::swap(&mut start, &mut stop); }
        if !(stop > start) || !start.is_finite() || !stop.is_finite() { return self; }
        let mut prestep = f64::NAN;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
        }
        self.domain = if reverse { (stop, start) } else { (start, stop) };
        self
    }

    /// Default tick label: fixed precision derived from the tick step,
    /// thousands grouped.
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String {
        let precision = if self.is_degenerate() {
            0
        } else {
            precision_fixed(tick_step(self.domain.0, self.domain.1, count))
        };
        move |v| format_fixed_grouped(v, precision)
    }
}

// ---- band -------------------------------------------------------------------

/// Discrete labels -> evenly spaced, padded bands.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Duplicate labels collapse onto their first occurrence.
    pub fn new<I, S>(labels: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domain = Vec::new();
        let mut index = HashMap::new();
        for l in labels {
            let l = l.as_ref();
            if !index.contains_key(l) {
                index.insert(l.to_string(), domain.len());
                domain.push(l.to_string());
            }
        }
        let mut s = Self {
            domain,
            index,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            start: range.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        s.rescale();
        s
    }

    /// Same padding between bands and at both ends.
    pub fn padding(mut self, p: f64) -> Self {
        self.padding_inner = p.clamp(0.0, 1.0);
        self.padding_outer = p.max(0.0);
        self.rescale();
        self
    }

    pub fn padding_inner(mut self, p: f64) -> Self {
        self.padding_inner = p.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    pub fn padding_outer(mut self, p: f64) -> Self {
        self.padding_outer = p.max(0.0);
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        self.step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = lo + (hi - lo - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    pub fn domain(&self) -> &[String] { &self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    pub fn step(&self) -> f64 { self.step }
    pub fn len(&self) -> usize { self.domain.len() }
    pub fn is_empty(&self) -> bool { self.domain.is_empty() }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Start of the band at domain index `i`.
    pub fn position_at(&self, i: usize) -> f64 {
        let reverse = self.range.1 < self.range.0;
        let k = if reverse { self.domain.len().saturating_sub(1 + i) } else { i };
        self.start + self.step * k as f64
    }

    /// Start of the band for `label`, `None` for labels outside the domain.
    pub fn position(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|i| self.position_at(i))
    }

    /// Domain index whose band (padding excluded) contains `px`.
    pub fn band_at(&self, px: f64) -> Option<usize> {
        (0..self.domain.len()).find(|&i| {
            let p = self.position_at(i);
            px >= p && px <= p + self.bandwidth
        })
    }
}

// ---- ordinal color ------------------------------------------------------------

/// Discrete domain -> palette cycle (index modulo palette length).
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    palette: Vec<Color>,
}

impl OrdinalScale {
    pub fn new<I, S>(domain: I, palette: Vec<Color>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut s = Self { domain: Vec::new(), index: HashMap::new(), palette };
        for d in domain { s.intern(d.as_ref()); }
        s
    }

    fn intern(&mut self, key: &str) -> usize {
        if let Some(&i) = self.index.get(key) { return i; }
        let i = self.domain.len();
        self.index.insert(key.to_string(), i);
        self.domain.push(key.to_string());
        i
    }

    fn at(&self, i: usize) -> Color {
        if self.palette.is_empty() { return Color::rgb(0x88, 0x88, 0x88); }
        self.palette[i % self.palette.len()]
    }

    /// Color for a known key.
    pub fn get(&self, key: &str) -> Option<Color> {
        self.index.get(key).map(|&i| self.at(i))
    }

    /// Color for any key; unknown keys join the domain on first use.
    pub fn color(&mut self, key: &str) -> Color {
        let i = self.intern(key);
        self.at(i)
    }

    pub fn domain(&self) -> &[String] { &self.domain }
}

// ---- continuous color -----------------------------------------------------------

/// Numeric domain -> color ramp, input clamped to the domain.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
    ramp: ColorRamp,
}

impl ColorScale {
    pub fn new(domain: (f64, f64), ramp: ColorRamp) -> Self {
        Self { domain, ramp }
    }

    pub fn domain(&self) -> (f64, f64) { self.domain }

    pub fn color(&self, v: f64) -> Color {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() { return self.ramp.at(0.0); }
        self.ramp.at((v - d0) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn nice_ticks_match_reference_values() {
        assert_eq!(ticks(0.0, 33.0, 5), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
        assert_eq!(ticks(0.0, 10.0, 10), (0..=10).map(|i| i as f64).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(1.0, 0.0, 5), vec![1.0, 0.8, 0.6, 0.4, 0.2, 0.0]);
        assert_eq!(ticks(5.0, 5.0, 10), vec![5.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn huge_tick_counts_are_clamped() {
        let t = ticks(0.0, 1.0, usize::MAX);
        assert!(!t.is_empty() && t.len() <= 2 * MAX_TICKS + 1);
        assert_eq!(t, ticks(0.0, 1.0, MAX_TICKS));
        assert!(tick_step(0.0, 1.0, usize::MAX) > 0.0);
    }

    #[test]
    fn linear_maps_and_inverts() {
        let s = LinearScale::new((0.0, 10.0), (250.0, 0.0));
        assert_eq!(s.scale(0.0), 250.0);
        assert_eq!(s.scale(10.0), 0.0);
        assert!(close(s.invert(125.0), 5.0));
        let c = LinearScale::new((0.0, 10.0), (0.0, 100.0)).clamped(true);
        assert_eq!(c.scale(20.0), 100.0);
    }

    #[test]
    fn degenerate_linear_domain_collapses_to_range_start() {
        let s = LinearScale::new((0.0, 0.0), (250.0, 0.0));
        assert_eq!(s.scale(0.0), 250.0);
        assert_eq!(s.scale(42.0), 250.0);
        assert_eq!(s.invert(10.0), 0.0);
        assert_eq!(s.ticks(5), vec![0.0]);
        assert_eq!((s.tick_format(5))(0.0), "0");
    }

    #[test]
    fn nice_extends_domain() {
        let s = LinearScale::new((0.3, 97.2), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 100.0));
        let f = LinearScale::new((0.0, 0.93), (0.0, 1.0)).nice(5);
        assert!(close(f.domain().1, 1.0));
    }

    #[test]
    fn tick_format_precision_follows_step() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let f = s.tick_format(5);
        assert_eq!(f(0.2), "0.2");
        let big = LinearScale::new((0.0, 5000.0), (0.0, 100.0));
        assert_eq!((big.tick_format(5))(2000.0), "2,000");
    }

    #[test]
    fn band_layout_with_padding() {
        let b = BandScale::new(["A", "B"], (0.0, 100.0)).padding(0.3);
        // step = 100 / (2 - 0.3 + 0.6)
        let step = 100.0 / 2.3;
        assert!(close(b.step(), step));
        assert!(close(b.bandwidth(), step * 0.7));
        assert!(close(b.position("A").unwrap(), step * 0.3));
        assert!(close(b.position("B").unwrap(), step * 1.3));
        assert_eq!(b.position("C"), None);
        assert_eq!(b.band_at(b.position("B").unwrap() + 1.0), Some(1));
        assert_eq!(b.band_at(0.5), None);
    }

    #[test]
    fn band_dedups_first_seen() {
        let b = BandScale::new(["x", "y", "x", "z"], (0.0, 30.0));
        assert_eq!(b.domain(), &["x".to_string(), "y".to_string(), "z".to_string()]);
        assert!(close(b.bandwidth(), 10.0));
        let empty = BandScale::new(Vec::<String>::new(), (0.0, 30.0));
        assert!(empty.is_empty());
        assert_eq!(empty.band_at(3.0), None);
    }

    #[test]
    fn ordinal_cycles_palette() {
        let pal = vec![Color::rgb(1, 0, 0), Color::rgb(0, 1, 0)];
        let mut o = OrdinalScale::new(["a", "b", "c"], pal.clone());
        assert_eq!(o.get("a"), Some(pal[0]));
        assert_eq!(o.get("c"), Some(pal[0]));
        assert_eq!(o.get("d"), None);
        assert_eq!(o.color("d"), pal[1]);
        assert_eq!(o.domain().len(), 4);
    }

    #[test]
    fn color_scale_zero_domain_is_min_color() {
        let ramp = ColorRamp::TwoStop(Color::rgb(0, 0, 0), Color::rgb(255, 255, 255));
        let s = ColorScale::new((0.0, 0.0), ramp.clone());
        assert_eq!(s.color(0.0), Color::rgb(0, 0, 0));
        let s = ColorScale::new((0.0, 10.0), ramp);
        assert_eq!(s.color(20.0), Color::rgb(255, 255, 255));
    }
}
