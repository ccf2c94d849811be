// File: src/color_utils.rs
use std::hash::{Hash, Hasher};

/// Stable pastel color for a category name, as 8-bit RGB.
///
/// The same name always maps to the same color within a build, so a
/// category keeps its tint across the sidebar and the cards.
pub fn category_rgb(name: &str) -> (u8, u8, u8) {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    name.to_lowercase().hash(&mut hasher);
    let hash = hasher.finish();

    let hue = (hash % 360) as f32;
    // Separate bit ranges so saturation and lightness do not track hue.
    let saturation = 0.45 + ((hash >> 16) % 40) as f32 / 100.0;
    let lightness = 0.68 + ((hash >> 32) % 20) as f32 / 100.0;

    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    (to_byte(r), to_byte(g), to_byte(b))
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}
