use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ImageCandidate, InternalEvent};

/// Usable as an `<img src>`: remote http(s) or inline data.
pub fn is_valid_image_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http") || url.starts_with("data:")
}

/// Counts over a raw candidate list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CandidateStatistics {
    pub total: usize,
    pub valid: usize,
    pub by_ratio: BTreeMap<String, usize>,
    pub by_size: BTreeMap<String, usize>,
}

pub fn candidate_statistics(candidates: &[ImageCandidate]) -> CandidateStatistics {
    let mut stats = CandidateStatistics { total: candidates.len(), ..Default::default() };
    for candidate in candidates {
        if candidate.url.as_deref().map(is_valid_image_url).unwrap_or(false) {
            stats.valid += 1;
        }
        let ratio = candidate.ratio.clone().unwrap_or_else(|| "unknown".to_string());
        *stats.by_ratio.entry(ratio).or_default() += 1;
        let size = candidate.size.clone().unwrap_or_else(|| "unknown".to_string());
        *stats.by_size.entry(size).or_default() += 1;
    }
    stats
}

/// Image coverage across mapped events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageCoverage {
    pub total_events: usize,
    pub with_images: usize,
    pub with_placeholders: usize,
    pub coverage_percent: f64,
    pub quality_distribution: BTreeMap<String, usize>,
    pub ratio_distribution: BTreeMap<String, usize>,
}

pub fn image_coverage(events: &[InternalEvent]) -> ImageCoverage {
    let mut coverage = ImageCoverage { total_events: events.len(), ..Default::default() };
    for event in events {
        let meta = &event.image_metadata;
        if meta.is_placeholder() {
            coverage.with_placeholders += 1;
        } else {
            coverage.with_images += 1;
        }
        *coverage
            .quality_distribution
            .entry(meta.quality.as_str().to_string())
            .or_default() += 1;
        let ratio = meta.ratio.clone().unwrap_or_else(|| "unknown".to_string());
        *coverage.ratio_distribution.entry(ratio).or_default() += 1;
    }
    if coverage.total_events > 0 {
        let pct = coverage.with_images as f64 * 100.0 / coverage.total_events as f64;
        coverage.coverage_percent = (pct * 10.0).round() / 10.0;
    }
    coverage
}
