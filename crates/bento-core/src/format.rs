// File: crates/bento-core/src/format.rs
// Summary: Value -> label formatters (grouped numbers, SI compact, percent, bytes, dates).

use chrono::{NaiveDate, NaiveDateTime};

use crate::data::plain_number;

fn group_integer(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn with_grouping(body: &str, negative: bool) -> String {
    let (int_part, frac) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let mut s = String::new();
    if negative { s.push('-'); }
    s.push_str(&group_integer(int_part));
    if let Some(f) = frac {
        s.push('.');
        s.push_str(f);
    }
    s
}

/// Fixed decimals with thousands separators: `1234.5, 1` -> `1,234.5`.
pub fn format_fixed_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() { return "NaN".to_string(); }
    let body = format!("{:.*}", decimals, value.abs());
    let is_zero = body.chars().all(|c| c == '0' || c == '.');
    with_grouping(&body, value < 0.0 && !is_zero)
}

/// Grouped number with fixed decimals (`format_number(12543.0, 0)` -> `12,543`).
pub fn format_number(value: f64, decimals: usize) -> String {
    format_fixed_grouped(value, decimals)
}

/// Grouped number in its shortest form (`1234.5` -> `1,234.5`, `100` -> `100`).
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() { return "NaN".to_string(); }
    with_grouping(&plain_number(value.abs()), value < 0.0)
}

const SI_PREFIXES: [&str; 17] = ["y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y"];

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 { return 0.0; }
    let e = value.abs().log10().floor() as i32;
    let p = digits - 1 - e;
    // Divide by an exact power of ten for large values so 999 rounds to 1000, not 999.999...
    if p >= 0 {
        let f = 10f64.powi(p);
        (value * f).round() / f
    } else {
        let f = 10f64.powi(-p);
        (value / f).round() * f
    }
}

/// SI notation with two significant digits: `1500` -> `1.5k`, `2_400_000` -> `2.4M`.
pub fn format_compact(value: f64) -> String {
    const DIGITS: i32 = 2;
    if !value.is_finite() { return "NaN".to_string(); }
    if value == 0.0 { return "0.0".to_string(); }
    let rounded = round_significant(value, DIGITS);
    let e = rounded.abs().log10().floor() as i32;
    let k = (e.div_euclid(3)).clamp(-8, 8);
    let scaled = rounded / 10f64.powi(3 * k);
    let decimals = (DIGITS - 1 - (e - 3 * k)).max(0) as usize;
    format!("{:.*}{}", decimals, scaled, SI_PREFIXES[(k + 8) as usize])
}

/// Ratio as a percentage: `0.1234, 1` -> `12.3%`.
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

/// strftime-style date formatting (`%Y-%m-%d` by default in callers).
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Parse a `YYYY-MM-DD` fixture date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Human-readable byte size; trailing zeros are dropped (`1536` -> `1.5 KB`).
pub fn format_bytes(bytes: f64, decimals: i32) -> String {
    const SIZES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0.0 || !bytes.is_finite() { return "0 Bytes".to_string(); }
    let dm = decimals.max(0) as usize;
    let i = ((bytes.abs().ln() / 1024f64.ln()).floor() as i32).clamp(0, SIZES.len() as i32 - 1);
    let fixed = format!("{:.*}", dm, bytes / 1024f64.powi(i));
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    };
    format!("{} {}", trimmed, SIZES[i as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_numbers() {
        assert_eq!(format_number(12543.0, 0), "12,543");
        assert_eq!(format_number(-1234567.891, 2), "-1,234,567.89");
        assert_eq!(format_number(-0.0001, 2), "0.00");
        assert_eq!(format_grouped(100.0), "100");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(-1000.0), "-1,000");
    }

    #[test]
    fn compact_si() {
        assert_eq!(format_compact(1500.0), "1.5k");
        assert_eq!(format_compact(1000.0), "1.0k");
        assert_eq!(format_compact(2_400_000.0), "2.4M");
        assert_eq!(format_compact(123_456.0), "120k");
        assert_eq!(format_compact(42.0), "42");
        assert_eq!(format_compact(0.5), "500m");
        assert_eq!(format_compact(999.0), "1.0k");
        assert_eq!(format_compact(-1500.0), "-1.5k");
    }

    #[test]
    fn percent_and_bytes() {
        assert_eq!(format_percent(0.1234, 1), "12.3%");
        assert_eq!(format_bytes(0.0, 2), "0 Bytes");
        assert_eq!(format_bytes(1024.0, 2), "1 KB");
        assert_eq!(format_bytes(1536.0, 2), "1.5 KB");
        assert_eq!(format_bytes(500.0, 2), "500 Bytes");
        assert_eq!(format_bytes(5.0 * 1024f64.powi(5), 0), "5120 TB");
    }

    #[test]
    fn dates() {
        let d = parse_date("2025-01-31").unwrap();
        assert_eq!(format_date(d, "%b %d"), "Jan 31");
        let t = d.and_hms_opt(7, 5, 9).unwrap();
        assert_eq!(format_time(t), "07:05:09");
        assert!(parse_date("31/01/2025").is_none());
    }
}
