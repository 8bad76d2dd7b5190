//! Impact score arithmetic. Each factor is kept separate so scores can be explained.

use serde::{Deserialize, Serialize};

use crate::domain::raw::RawPriceRange;

pub const BASE_SCORE: f64 = 50.0;

/// Individual contributions that add up to an impact score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub distance: f64,
    pub price: f64,
    pub capacity: f64,
    pub sale_status: f64,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> f64 {
        self.base + self.distance + self.price + self.capacity + self.sale_status
    }

    /// Rounded and clamped to `[0, 100]`.
    pub fn score(&self) -> u8 {
        clamp_score(self.raw_total())
    }
}

pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Closer events score higher; nothing beyond 5 units.
pub fn distance_bonus(distance: Option<f64>) -> f64 {
    match distance {
        Some(d) if d.is_finite() => ((5.0 - d) * 5.0).max(0.0),
        _ => 0.0,
    }
}

pub fn price_bonus(price_ranges: &[RawPriceRange]) -> f64 {
    if price_ranges.is_empty() {
        return 0.0;
    }
    let max_price = price_ranges
        .iter()
        .map(|p| p.max.unwrap_or(0.0))
        .fold(0.0_f64, f64::max);
    if max_price > 200.0 {
        20.0
    } else if max_price > 100.0 {
        10.0
    } else if max_price > 50.0 {
        5.0
    } else {
        0.0
    }
}

pub fn capacity_bonus(capacity: u32) -> f64 {
    match capacity {
        c if c > 10_000 => 25.0,
        c if c > 5_000 => 15.0,
        c if c > 1_000 => 10.0,
        _ => 0.0,
    }
}

/// A sold-out (`offsale`) event signals high demand.
pub fn sale_status_bonus(code: Option<&str>) -> f64 {
    match code {
        Some("onsale") => 5.0,
        Some("offsale") => 15.0,
        _ => 0.0,
    }
}

pub fn score_breakdown(
    distance: Option<f64>,
    price_ranges: &[RawPriceRange],
    capacity: u32,
    status_code: Option<&str>,
) -> ScoreBreakdown {
    ScoreBreakdown {
        base: BASE_SCORE,
        distance: distance_bonus(distance),
        price: price_bonus(price_ranges),
        capacity: capacity_bonus(capacity),
        sale_status: sale_status_bonus(status_code),
    }
}

/// `"$min - $max"` across all ranges when both are positive, otherwise `"Price TBA"`.
pub fn format_price_range(price_ranges: &[RawPriceRange]) -> String {
    if price_ranges.is_empty() {
        return PRICE_TBA.to_string();
    }
    let min = price_ranges
        .iter()
        .map(|p| p.min.unwrap_or(0.0))
        .fold(f64::INFINITY, f64::min);
    let max = price_ranges
        .iter()
        .map(|p| p.max.unwrap_or(0.0))
        .fold(0.0_f64, f64::max);
    if min > 0.0 && max > 0.0 {
        format!("${} - ${}", min, max)
    } else {
        PRICE_TBA.to_string()
    }
}

pub const PRICE_TBA: &str = "Price TBA";

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: Option<f64>, max: Option<f64>) -> RawPriceRange {
        RawPriceRange { kind: Some("standard".into()), currency: Some("USD".into()), min, max }
    }

    #[test]
    fn test_distance_bonus() {
        assert_eq!(distance_bonus(None), 0.0);
        assert_eq!(distance_bonus(Some(2.0)), 15.0);
        assert_eq!(distance_bonus(Some(0.0)), 25.0);
        assert_eq!(distance_bonus(Some(5.0)), 0.0);
        assert_eq!(distance_bonus(Some(12.0)), 0.0);
        assert_eq!(distance_bonus(Some(4.5)), 2.5);
    }

    #[test]
    fn test_price_bonus_uses_maximum_of_ranges() {
        assert_eq!(price_bonus(&[]), 0.0);
        assert_eq!(price_bonus(&[range(Some(20.0), Some(250.0))]), 20.0);
        assert_eq!(price_bonus(&[range(None, Some(40.0)), range(None, Some(150.0))]), 10.0);
        assert_eq!(price_bonus(&[range(None, Some(60.0))]), 5.0);
        assert_eq!(price_bonus(&[range(None, Some(50.0))]), 0.0);
        assert_eq!(price_bonus(&[range(Some(10.0), None)]), 0.0);
    }

    #[test]
    fn test_capacity_bonus_thresholds_are_strict() {
        assert_eq!(capacity_bonus(10_001), 25.0);
        assert_eq!(capacity_bonus(10_000), 15.0);
        assert_eq!(capacity_bonus(5_000), 10.0);
        assert_eq!(capacity_bonus(1_000), 0.0);
    }

    #[test]
    fn test_sale_status_bonus() {
        assert_eq!(sale_status_bonus(Some("onsale")), 5.0);
        assert_eq!(sale_status_bonus(Some("offsale")), 15.0);
        assert_eq!(sale_status_bonus(Some("rescheduled")), 0.0);
        assert_eq!(sale_status_bonus(None), 0.0);
    }

    #[test]
    fn test_breakdown_clamps_to_hundred() {
        let breakdown = score_breakdown(Some(2.0), &[range(None, Some(250.0))], 20_000, Some("offsale"));
        assert_eq!(breakdown.raw_total(), 125.0);
        assert_eq!(breakdown.score(), 100);
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-20.0), 0);
        assert_eq!(clamp_score(62.5), 63);
        assert_eq!(clamp_score(62.4), 62);
        assert_eq!(clamp_score(1000.0), 100);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_format_price_range() {
        assert_eq!(format_price_range(&[]), PRICE_TBA);
        assert_eq!(format_price_range(&[range(Some(25.0), Some(85.5))]), "$25 - $85.5");
        assert_eq!(
            format_price_range(&[range(Some(40.0), Some(90.0)), range(Some(15.0), Some(60.0))]),
            "$15 - $90"
        );
        assert_eq!(format_price_range(&[range(None, Some(90.0))]), PRICE_TBA);
    }
}
