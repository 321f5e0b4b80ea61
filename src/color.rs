use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::summary::DeltaTone;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Room type → Color32
// ---------------------------------------------------------------------------

pub const PRIVATE_ROOM: Color32 = Color32::from_rgb(0x32, 0xa8, 0x52);
pub const ENTIRE_HOME: Color32 = Color32::from_rgb(0xa8, 0x32, 0x32);
pub const SHARED_ROOM: Color32 = Color32::from_rgb(0x32, 0x34, 0xa8);

fn fixed_color(room_type: &str) -> Option<Color32> {
    match room_type {
        "Private room" => Some(PRIVATE_ROOM),
        "Entire home/apt" => Some(ENTIRE_HOME),
        "Shared room" => Some(SHARED_ROOM),
        _ => None,
    }
}

/// Colours for map points and legend, keyed by room type.
///
/// The three NYC room types keep their fixed colours; any other type found in
/// the data gets a generated hue.
#[derive(Debug, Clone)]
pub struct RoomTypeColors {
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl RoomTypeColors {
    /// Build the map for the room types of a table, in table order.
    pub fn new(room_types: &[String]) -> Self {
        let unknown: Vec<&String> = room_types
            .iter()
            .filter(|r| fixed_color(r).is_none())
            .collect();
        let mut generated = generate_palette(unknown.len()).into_iter();

        let mapping = room_types
            .iter()
            .map(|r| {
                let color = fixed_color(r)
                    .or_else(|| generated.next())
                    .unwrap_or(Color32::GRAY);
                (r.clone(), color)
            })
            .collect();

        RoomTypeColors {
            order: room_types.to_vec(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, room_type: &str) -> Color32 {
        self.mapping
            .get(room_type)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (room type → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|r| (r.clone(), self.color_for(r)))
            .collect()
    }
}

/// Text colour for a metric delta.
pub fn tone_color(tone: DeltaTone) -> Color32 {
    match tone {
        DeltaTone::Favourable => Color32::from_rgb(0x09, 0xab, 0x3b),
        DeltaTone::Unfavourable => Color32::from_rgb(0xff, 0x2b, 0x2b),
        DeltaTone::Neutral => Color32::GRAY,
    }
}
