//! Formatting helpers for timing reports.

use std::time::Duration;

use crate::Real;

/// Format a real number with the given number of decimal places.
pub fn format_real(value: Real, decimals: usize) -> String {
    format!("{:.prec$}", value, prec = decimals)
}

/// Format a duration as seconds with microsecond resolution
/// (e.g. `1.5 ms` → `"0.001500s"`).
pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.6}s", elapsed.as_secs_f64())
}

/// Ratio of a reference duration over a measured one.
///
/// Returns `None` when the measured duration is zero.
pub fn speedup(reference: Duration, measured: Duration) -> Option<Real> {
    let m = measured.as_secs_f64();
    if m == 0.0 {
        None
    } else {
        Some(reference.as_secs_f64() / m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(3.14159265, 4), "3.1416");
        assert_eq!(format_real(-1.0, 2), "-1.00");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_micros(1500)), "0.001500s");
        assert_eq!(format_seconds(Duration::from_secs(2)), "2.000000s");
    }

    #[test]
    fn test_speedup() {
        let s = speedup(Duration::from_millis(300), Duration::from_millis(100)).unwrap();
        approx::assert_abs_diff_eq!(s, 3.0, epsilon = 1e-12);
        assert!(speedup(Duration::from_millis(1), Duration::ZERO).is_none());
    }
}
