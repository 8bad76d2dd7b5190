//! Event image selection, placeholders and coverage statistics.

pub mod placeholder;
pub mod selector;
pub mod stats;

pub use placeholder::generate_placeholder;
pub use selector::{select_image, ImageConstraints};

use crate::domain::{ImageCandidate, SelectedImage};

/// Best image under the default constraints, or a generated placeholder.
pub fn image_or_placeholder(candidates: &[ImageCandidate], event_name: &str, category: &str) -> SelectedImage {
    match select_image(candidates, &ImageConstraints::default()) {
        Some(image) => image,
        None => {
            crate::observability::metrics::imaging::placeholder_generated();
            generate_placeholder(event_name, category)
        }
    }
}
