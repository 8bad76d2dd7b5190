use crate::domain::{ImageMetadata, ImageQuality, SelectedImage};

pub const PLACEHOLDER_WIDTH: u32 = 400;
pub const PLACEHOLDER_HEIGHT: u32 = 225;
pub const PLACEHOLDER_PRIORITY: u32 = 999;
const MAX_TITLE_CHARS: usize = 30;

/// Gradient stops (start, end) per category.
fn gradient_for(category: &str) -> (&'static str, &'static str) {
    match category {
        "Music" => ("#6366f1", "#9333ea"),
        "Sports" => ("#10b981", "#0d9488"),
        "Theater" => ("#f59e0b", "#ea580c"),
        _ => ("#64748b", "#4b5563"),
    }
}

fn truncate_title(name: &str) -> String {
    if name.chars().count() > MAX_TITLE_CHARS {
        let head: String = name.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

pub fn placeholder_svg(event_name: &str, category: &str) -> String {
    let (start, end) = gradient_for(category);
    let title = escape_xml(&truncate_title(event_name));
    let category = escape_xml(category);
    format!(
        concat!(
            r#"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<defs><linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">"#,
            r#"<stop offset="0%" style="stop-color:{start};stop-opacity:1" />"#,
            r#"<stop offset="100%" style="stop-color:{end};stop-opacity:1" />"#,
            r#"</linearGradient></defs>"#,
            r#"<rect width="100%" height="100%" fill="url(#grad)" />"#,
            r#"<text x="50%" y="45%" font-family="Arial, sans-serif" font-size="18" font-weight="bold" fill="white" text-anchor="middle" dominant-baseline="middle">{title}</text>"#,
            r#"<text x="50%" y="65%" font-family="Arial, sans-serif" font-size="14" fill="white" opacity="0.8" text-anchor="middle" dominant-baseline="middle">{category}</text>"#,
            r#"</svg>"#
        ),
        w = PLACEHOLDER_WIDTH,
        h = PLACEHOLDER_HEIGHT,
        start = start,
        end = end,
        title = title,
        category = category,
    )
}

/// Deterministic inline SVG used when an event has no usable image.
pub fn generate_placeholder(event_name: &str, category: &str) -> SelectedImage {
    let svg = placeholder_svg(event_name, category);
    SelectedImage {
        url: format!("data:image/svg+xml,{}", urlencoding::encode(&svg)),
        metadata: ImageMetadata {
            width: Some(PLACEHOLDER_WIDTH),
            height: Some(PLACEHOLDER_HEIGHT),
            ratio: Some(super::selector::RATIO_16_9.to_string()),
            size: Some("PLACEHOLDER".to_string()),
            priority: PLACEHOLDER_PRIORITY,
            aspect_ratio: Some(16.0 / 9.0),
            file_size: "1KB".to_string(),
            quality: ImageQuality::Placeholder,
        },
    }
}
