//! Colour tags as given by the simulation (`"r"`, `"blue"`, `"#ff8800"`)
//! resolved to display colours.

use egui::Color32;

/// Colour used when a tag cannot be resolved
pub const FALLBACK: Color32 = Color32::GRAY;

/// Resolve a colour tag. Accepts single-letter and named colours and `#rrggbb`.
pub fn resolve(tag: &str) -> Option<Color32> {
    let tag = tag.trim().to_ascii_lowercase();
    if let Some(hex) = tag.strip_prefix('#') {
        return parse_hex(hex);
    }
    let color = match tag.as_str() {
        "r" | "red" => Color32::from_rgb(255, 0, 0),
        "g" | "green" => Color32::from_rgb(0, 128, 0),
        "b" | "blue" => Color32::from_rgb(0, 0, 255),
        "c" | "cyan" => Color32::from_rgb(0, 191, 191),
        "m" | "magenta" => Color32::from_rgb(191, 0, 191),
        "y" | "yellow" => Color32::from_rgb(191, 191, 0),
        "k" | "black" => Color32::BLACK,
        "w" | "white" => Color32::WHITE,
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "brown" => Color32::from_rgb(165, 42, 42),
        "pink" => Color32::from_rgb(255, 192, 203),
        "gray" | "grey" => Color32::GRAY,
        _ => return None,
    };
    Some(color)
}

/// Resolve a colour tag, falling back to grey
pub fn resolve_or_fallback(tag: &str) -> Color32 {
    resolve(tag).unwrap_or(FALLBACK)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
