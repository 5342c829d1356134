use egui::Color32;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Parses `#RRGGBB` or `#RGB` (leading `#` optional). Anything else is None;
/// callers fall back to a neutral gray instead of failing the render.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    let expand = |h: u8| h << 4 | h;
    match hex.len() {
        3 => {
            let value = u16::from_str_radix(hex, 16).ok()?;
            Some(Color32::from_rgb(
                expand(((value >> 8) & 0xF) as u8),
                expand(((value >> 4) & 0xF) as u8),
                expand((value & 0xF) as u8),
            ))
        }
        6 => {
            let value = u32::from_str_radix(hex, 16).ok()?;
            Some(Color32::from_rgb(
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            ))
        }
        _ => None,
    }
}

pub fn hex_or_gray(hex: &str) -> Color32 {
    parse_hex(hex).unwrap_or(Color32::from_gray(128))
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomStyle {
    Luxury,
    Budget,
    Minimalist,
    Ar,
}

impl RoomStyle {
    pub fn title(self) -> &'static str {
        match self {
            RoomStyle::Luxury => "Luxury Suite",
            RoomStyle::Budget => "Budget Room",
            RoomStyle::Minimalist => "Minimalist Studio",
            RoomStyle::Ar => "AR Preview",
        }
    }

    pub fn supports_export(self) -> bool {
        !matches!(self, RoomStyle::Ar)
    }
}

/// Color slots shared by every room style. The engine supplies hex strings;
/// missing fields keep the style's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RoomColors {
    /// Wall paint, hex.
    pub walls: String,
    /// Floor finish, hex.
    pub floor: String,
    /// Upholstery and soft goods, hex.
    pub fabric: String,
    /// Wood furniture tone, hex.
    pub wood: String,
    /// Metal trim and lamp stems, hex.
    pub metal: String,
    /// Rug or accent surface, hex.
    pub accent: String,
}

impl Default for RoomColors {
    fn default() -> Self {
        Self {
            walls: "#E8E2D6".to_string(),
            floor: "#9C7B55".to_string(),
            fabric: "#4F6272".to_string(),
            wood: "#6F4E37".to_string(),
            metal: "#B8A16A".to_string(),
            accent: "#A8623E".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoomVisualizationProps {
    /// Short display name, e.g. "Master Bedroom".
    #[serde(default = "default_room_name")]
    pub room_name: String,
    #[serde(default)]
    pub colors: RoomColors,
    /// One-line design rationale shown under the canvas.
    #[serde(default)]
    pub caption: String,
}

fn default_room_name() -> String {
    "Room".to_string()
}

impl Default for RoomVisualizationProps {
    fn default() -> Self {
        Self {
            room_name: default_room_name(),
            colors: RoomColors::default(),
            caption: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetCategory {
    pub label: String,
    pub amount: f64,
    /// Chart wedge color, hex.
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetBreakdownProps {
    #[serde(default = "default_room_name")]
    pub room_name: String,
    /// e.g. "Modern", "Scandinavian"; part of the export filename.
    #[serde(default = "default_design_type")]
    pub design_type: String,
    pub total: f64,
    pub spent: f64,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
}

fn default_design_type() -> String {
    "Custom".to_string()
}

impl BudgetBreakdownProps {
    /// Rounded to the nearest whole percent: total=2000, spent=1450 -> 73.
    pub fn utilization_percent(&self) -> u32 {
        if self.total <= 0.0 {
            return 0;
        }
        ((self.spent / self.total) * 100.0).round().clamp(0.0, 999.0) as u32
    }

    pub fn remaining(&self) -> f64 {
        self.total - self.spent
    }

    pub fn category_total(&self) -> f64 {
        self.categories.iter().map(|c| c.amount).sum()
    }

    pub fn pdf_file_name(&self) -> String {
        format!("{}-{}-Budget-Breakdown.pdf", self.room_name, self.design_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaletteSwatch {
    pub name: String,
    /// Hex color.
    pub hex: String,
    /// Where to use it, e.g. "walls", "accent wall".
    #[serde(default)]
    pub usage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColorPaletteProps {
    #[serde(default = "default_palette_name")]
    pub name: String,
    pub swatches: Vec<PaletteSwatch>,
}

fn default_palette_name() -> String {
    "Palette".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FurnitureItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub vendor: String,
    /// Dominant finish color, hex.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FurnitureGridProps {
    #[serde(default = "default_grid_title")]
    pub title: String,
    pub items: Vec<FurnitureItem>,
}

fn default_grid_title() -> String {
    "Shopping List".to_string()
}

impl FurnitureGridProps {
    pub fn grand_total(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_long_and_short_forms() {
        assert_eq!(parse_hex("#8B4513"), Some(Color32::from_rgb(0x8B, 0x45, 0x13)));
        assert_eq!(parse_hex("8b4513"), Some(Color32::from_rgb(0x8B, 0x45, 0x13)));
        assert_eq!(parse_hex("#fff"), Some(Color32::from_rgb(255, 255, 255)));
        assert_eq!(parse_hex("#f0a"), Some(Color32::from_rgb(0xFF, 0x00, 0xAA)));
    }

    #[test]
    fn hex_parsing_rejects_junk() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("brown"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(hex_or_gray("nope"), Color32::from_gray(128));
    }

    #[test]
    fn utilization_rounds_to_whole_percent() {
        let props = BudgetBreakdownProps {
            room_name: "Living Room".into(),
            design_type: "Modern".into(),
            total: 2000.0,
            spent: 1450.0,
            categories: vec![],
        };
        assert_eq!(props.utilization_percent(), 73);
        assert_eq!(props.remaining(), 550.0);
    }

    #[test]
    fn utilization_survives_zero_total() {
        let props = BudgetBreakdownProps {
            room_name: "X".into(),
            design_type: "Y".into(),
            total: 0.0,
            spent: 100.0,
            categories: vec![],
        };
        assert_eq!(props.utilization_percent(), 0);
    }

    #[test]
    fn pdf_file_name_matches_template() {
        let props = BudgetBreakdownProps {
            room_name: "Living Room".into(),
            design_type: "Modern".into(),
            total: 2000.0,
            spent: 1450.0,
            categories: vec![],
        };
        assert_eq!(props.pdf_file_name(), "Living Room-Modern-Budget-Breakdown.pdf");
    }

    #[test]
    fn partial_engine_props_fall_back_to_defaults() {
        let props: RoomVisualizationProps =
            serde_json::from_str(r##"{"colors":{"walls":"#112233"}}"##).unwrap();
        assert_eq!(props.room_name, "Room");
        assert_eq!(props.colors.walls, "#112233");
        assert_eq!(props.colors.floor, RoomColors::default().floor);
    }
}
