use serde::{Deserialize, Serialize};

use crate::domain::{ImageCandidate, ImageMetadata, ImageQuality, SelectedImage};

pub const RATIO_16_9: &str = "16_9";
const SIXTEEN_NINE: f64 = 16.0 / 9.0;
const RATIO_TOLERANCE: f64 = 0.1;
const LOWEST_PRIORITY: u32 = 10;

/// Named provider tiers, checked in order.
const NAMED_TIERS: &[(&str, u32)] = &[
    ("TABLET_LANDSCAPE_LARGE_16_9", 1),
    ("TABLET_LANDSCAPE_16_9", 2),
    ("TABLET_LANDSCAPE_SMALL_16_9", 3),
    ("TABLET_PORTRAIT_LARGE_16_9", 4),
    ("SOURCE", 5),
];

const fn area(w: u64, h: u64) -> u64 {
    w * h
}

const AREA_LARGE: u64 = area(2048, 1152);
const AREA_MEDIUM: u64 = area(1024, 576);
const AREA_SMALL: u64 = area(512, 288);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageConstraints {
    pub preferred_ratio: Option<String>,
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub allow_portrait: bool,
}

impl Default for ImageConstraints {
    fn default() -> Self {
        Self {
            preferred_ratio: Some(RATIO_16_9.to_string()),
            min_width: 512,
            min_height: 288,
            max_width: 2048,
            max_height: 1152,
            allow_portrait: false,
        }
    }
}

fn is_sixteen_nine(width: u32, height: u32) -> bool {
    (width as f64 / height as f64 - SIXTEEN_NINE).abs() < RATIO_TOLERANCE
}

/// Rank of a candidate, 1 being best.
pub fn image_priority(image: &ImageCandidate) -> u32 {
    let url = image.url.as_deref().unwrap_or_default();
    for (tier, priority) in NAMED_TIERS {
        // URL match is case-sensitive against the lowercase tag.
        let size_matches = image.size.as_deref() == Some(*tier);
        if size_matches || url.contains(&tier.to_lowercase()) {
            return *priority;
        }
    }

    let Some((width, height)) = image.dimensions() else {
        return LOWEST_PRIORITY;
    };
    let pixels = width as u64 * height as u64;
    let ratio = width as f64 / height as f64;

    if is_sixteen_nine(width, height) {
        if pixels >= AREA_LARGE {
            return 1;
        }
        if pixels >= AREA_MEDIUM {
            return 2;
        }
        if pixels >= AREA_SMALL {
            return 3;
        }
    }

    if ratio > 1.0 {
        if pixels >= AREA_MEDIUM {
            return 4;
        }
        if pixels >= AREA_SMALL {
            return 5;
        }
    } else {
        if pixels >= area(1152, 2048) {
            return 6;
        }
        if pixels >= area(576, 1024) {
            return 7;
        }
    }

    LOWEST_PRIORITY
}

/// Whether the candidate fits the constraints. Unknown dimensions always fit.
pub fn is_suitable(image: &ImageCandidate, constraints: &ImageConstraints) -> bool {
    let Some((width, height)) = image.dimensions() else {
        return true;
    };

    if constraints.preferred_ratio.as_deref() == Some(RATIO_16_9)
        && !is_sixteen_nine(width, height)
        && !constraints.allow_portrait
    {
        return false;
    }

    width >= constraints.min_width
        && height >= constraints.min_height
        && width <= constraints.max_width
        && height <= constraints.max_height
}

pub fn estimate_file_size(dimensions: Option<(u32, u32)>) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let Some((width, height)) = dimensions else {
        return "Unknown".to_string();
    };
    let bytes = width as f64 * height as f64 * 3.0;
    if bytes < MIB {
        format!("{}KB", (bytes / KIB).round())
    } else {
        format!("{}MB", (bytes / MIB).round())
    }
}

pub fn quality_for(dimensions: Option<(u32, u32)>) -> ImageQuality {
    let Some((width, height)) = dimensions else {
        return ImageQuality::Unknown;
    };
    match width as u64 * height as u64 {
        p if p >= AREA_LARGE => ImageQuality::High,
        p if p >= AREA_MEDIUM => ImageQuality::Medium,
        p if p >= AREA_SMALL => ImageQuality::Low,
        _ => ImageQuality::VeryLow,
    }
}

fn metadata_for(image: &ImageCandidate, priority: u32) -> ImageMetadata {
    let dimensions = image.dimensions();
    ImageMetadata {
        width: image.width,
        height: image.height,
        ratio: image.ratio.clone(),
        size: image.size.clone(),
        priority,
        aspect_ratio: dimensions.map(|(w, h)| w as f64 / h as f64),
        file_size: estimate_file_size(dimensions),
        quality: quality_for(dimensions),
    }
}

fn has_url(image: &ImageCandidate) -> bool {
    image.url.as_deref().map(|u| !u.trim().is_empty()).unwrap_or(false)
}

/// Candidates with a usable URL, best first. The sort is stable.
pub fn rank_images(candidates: &[ImageCandidate]) -> Vec<(u32, &ImageCandidate)> {
    let mut ranked: Vec<(u32, &ImageCandidate)> = candidates
        .iter()
        .filter(|c| has_url(c))
        .map(|c| (image_priority(c), c))
        .collect();
    ranked.sort_by_key(|(priority, _)| *priority);
    ranked
}

/// Picks the best image that satisfies `constraints`, else the best-ranked one.
///
/// Returns `None` only when no candidate has a usable URL.
pub fn select_image(candidates: &[ImageCandidate], constraints: &ImageConstraints) -> Option<SelectedImage> {
    let ranked = rank_images(candidates);
    let (priority, chosen) = ranked
        .iter()
        .find(|(_, c)| is_suitable(c, constraints))
        .or_else(|| ranked.first())?;

    Some(SelectedImage {
        url: chosen.url.clone().unwrap_or_default(),
        metadata: metadata_for(chosen, *priority),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, width: u32, height: u32) -> ImageCandidate {
        ImageCandidate::new(url, width, height)
    }

    #[test]
    fn test_named_tier_wins_over_dimensions() {
        let mut tagged = image("https://img/a.jpg", 100, 100);
        tagged.size = Some("TABLET_LANDSCAPE_16_9".into());
        assert_eq!(image_priority(&tagged), 2);

        let by_url = image("https://s1.cdn/dam/a/retina_tablet_landscape_large_16_9.jpg", 10, 10);
        assert_eq!(image_priority(&by_url), 1);

        let source = image("https://cdn/source/original.jpg", 10, 10);
        assert_eq!(image_priority(&source), 5);
    }

    #[test]
    fn test_uppercase_url_tag_falls_back_to_dimensions() {
        let upper = image("https://s1.ticketm.net/dam/a/123/abc_TABLET_LANDSCAPE_16_9.jpg", 305, 225);
        assert_eq!(image_priority(&upper), 10);

        let wide = image("https://s1.ticketm.net/dam/a/123/abc_TABLET_LANDSCAPE_16_9.jpg", 1024, 576);
        assert_eq!(image_priority(&wide), 2);
    }

    #[test]
    fn test_priority_from_dimensions() {
        assert_eq!(image_priority(&image("https://i/1", 2048, 1152)), 1);
        assert_eq!(image_priority(&image("https://i/2", 1024, 576)), 2);
        assert_eq!(image_priority(&image("https://i/3", 640, 360)), 3);
        assert_eq!(image_priority(&image("https://i/4", 1200, 900)), 4);
        assert_eq!(image_priority(&image("https://i/5", 700, 525)), 5);
        assert_eq!(image_priority(&image("https://i/6", 1152, 2048)), 6);
        assert_eq!(image_priority(&image("https://i/7", 576, 1024)), 7);
        assert_eq!(image_priority(&image("https://i/8", 100, 56)), 10);
        assert_eq!(image_priority(&ImageCandidate { url: Some("https://i/9".into()), ..Default::default() }), 10);
    }

    #[test]
    fn test_select_prefers_suitable_candidate() {
        let candidates = vec![
            image("https://i/huge", 4096, 2304),
            image("https://i/medium", 1024, 576),
            image("https://i/small", 640, 360),
        ];
        let chosen = select_image(&candidates, &ImageConstraints::default()).unwrap();
        // huge ranks first but exceeds the max dimensions
        assert_eq!(chosen.url, "https://i/medium");
        assert_eq!(chosen.metadata.priority, 2);
        assert_eq!(chosen.metadata.quality, ImageQuality::Medium);
        assert_eq!(chosen.metadata.file_size, "2MB");
    }

    #[test]
    fn test_select_falls_back_to_best_ranked() {
        let candidates = vec![image("https://i/portrait", 300, 600), image("https://i/square", 400, 400)];
        let chosen = select_image(&candidates, &ImageConstraints::default()).unwrap();
        assert_eq!(chosen.url, "https://i/portrait");
        assert_eq!(chosen.metadata.quality, ImageQuality::Low);
    }

    #[test]
    fn test_select_discards_blank_urls() {
        let candidates = vec![
            ImageCandidate { url: Some("   ".into()), width: Some(2048), height: Some(1152), ..Default::default() },
            ImageCandidate { url: None, width: Some(1024), height: Some(576), ..Default::default() },
        ];
        assert!(select_image(&candidates, &ImageConstraints::default()).is_none());
        assert!(select_image(&[], &ImageConstraints::default()).is_none());
    }

    #[test]
    fn test_candidates_without_dimensions_are_suitable() {
        let bare = ImageCandidate { url: Some("https://i/bare".into()), ..Default::default() };
        assert!(is_suitable(&bare, &ImageConstraints::default()));
        let chosen = select_image(&[bare], &ImageConstraints::default()).unwrap();
        assert_eq!(chosen.metadata.file_size, "Unknown");
        assert_eq!(chosen.metadata.quality, ImageQuality::Unknown);
        assert_eq!(chosen.metadata.aspect_ratio, None);
    }

    #[test]
    fn test_portrait_allowed_relaxes_ratio() {
        let portrait = image("https://i/p", 600, 900);
        let mut constraints = ImageConstraints { max_height: 2048, ..Default::default() };
        assert!(!is_suitable(&portrait, &constraints));
        constraints.allow_portrait = true;
        assert!(is_suitable(&portrait, &constraints));
    }

    #[test]
    fn test_stable_order_for_equal_priorities() {
        let candidates = vec![image("https://i/first", 1024, 576), image("https://i/second", 1280, 720)];
        let ranked = rank_images(&candidates);
        assert_eq!(ranked[0].1.url.as_deref(), Some("https://i/first"));
        assert_eq!(ranked[1].1.url.as_deref(), Some("https://i/second"));
    }

    #[test]
    fn test_file_size_units() {
        assert_eq!(estimate_file_size(Some((512, 288))), "432KB");
        assert_eq!(estimate_file_size(Some((2048, 1152))), "7MB");
        assert_eq!(estimate_file_size(None), "Unknown");
    }
}
