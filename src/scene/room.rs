use std::collections::HashMap;

use egui::Color32;

use super::math::{vec3, Vec3};
use super::primitives::{cuboid, cylinder, TriMesh};
use crate::props::{hex_or_gray, RoomColors, RoomStyle};

/// Paintable color slots. Slot-bound pieces are the ones a color-prop change
/// may restyle in place; fixed pieces keep their tint for the scene's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Walls,
    Floor,
    Fabric,
    Wood,
    Metal,
    Accent,
}

impl ColorSlot {
    fn resolve(self, colors: &RoomColors) -> Color32 {
        match self {
            ColorSlot::Walls => hex_or_gray(&colors.walls),
            ColorSlot::Floor => hex_or_gray(&colors.floor),
            ColorSlot::Fabric => hex_or_gray(&colors.fabric),
            ColorSlot::Wood => hex_or_gray(&colors.wood),
            ColorSlot::Metal => hex_or_gray(&colors.metal),
            ColorSlot::Accent => hex_or_gray(&colors.accent),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Paint {
    Slot(ColorSlot),
    Fixed(&'static str),
}

use Paint::{Fixed, Slot};

enum Shape {
    Box { center: Vec3, half: Vec3 },
    Cylinder { center: Vec3, radius: f32, half_height: f32 },
}

struct PieceSpec {
    shape: Shape,
    paint: Paint,
}

struct PartSpec {
    name: &'static str,
    pieces: Vec<PieceSpec>,
}

/// Declarative room description; the four styles differ only in the data
/// they contribute here, not in how the scene gets built.
struct RoomTemplate {
    shell: Vec<PieceSpec>,
    parts: Vec<PartSpec>,
}

fn boxp(center: Vec3, half: Vec3, paint: Paint) -> PieceSpec {
    PieceSpec {
        shape: Shape::Box { center, half },
        paint,
    }
}

fn cylp(center: Vec3, radius: f32, half_height: f32, paint: Paint) -> PieceSpec {
    PieceSpec {
        shape: Shape::Cylinder {
            center,
            radius,
            half_height,
        },
        paint,
    }
}

const CYLINDER_SEGMENTS: u32 = 18;

fn walls_and_floor() -> Vec<PieceSpec> {
    vec![
        // Floor slab, then back and left wall; the two open sides face the
        // default camera.
        boxp(vec3(0.0, -0.05, 0.0), vec3(3.0, 0.05, 2.4), Slot(ColorSlot::Floor)),
        boxp(vec3(0.0, 1.4, -2.45), vec3(3.0, 1.4, 0.05), Slot(ColorSlot::Walls)),
        boxp(vec3(-3.05, 1.4, 0.0), vec3(0.05, 1.4, 2.4), Slot(ColorSlot::Walls)),
        // Window cut into the back wall: frame plus glazing.
        boxp(vec3(1.5, 1.6, -2.39), vec3(0.75, 0.65, 0.02), Slot(ColorSlot::Metal)),
        boxp(vec3(1.5, 1.6, -2.37), vec3(0.65, 0.55, 0.01), Fixed("#BFD8E8")),
    ]
}

/// AR shell: a detected-plane reticle instead of architecture.
fn ar_reticle() -> Vec<PieceSpec> {
    vec![
        cylp(vec3(0.0, 0.01, 0.0), 2.6, 0.01, Fixed("#3D4C5C")),
        cylp(vec3(0.0, 0.025, 0.0), 2.45, 0.005, Fixed("#58E0B0")),
        boxp(vec3(0.0, 0.03, 0.0), vec3(0.35, 0.005, 0.03), Fixed("#58E0B0")),
        boxp(vec3(0.0, 0.03, 0.0), vec3(0.03, 0.005, 0.35), Fixed("#58E0B0")),
    ]
}

fn bed(center_x: f32, scale: f32) -> Vec<PieceSpec> {
    let x = center_x;
    vec![
        // Headboard against the back wall, frame, mattress, duvet, pillows.
        boxp(vec3(x, 0.6 * scale, -2.3), vec3(0.95 * scale, 0.45 * scale, 0.06), Slot(ColorSlot::Wood)),
        boxp(vec3(x, 0.22, -1.4), vec3(0.9 * scale, 0.12, 0.95 * scale), Slot(ColorSlot::Wood)),
        boxp(vec3(x, 0.42, -1.4), vec3(0.85 * scale, 0.1, 0.9 * scale), Fixed("#F2EEE6")),
        boxp(vec3(x, 0.53, -1.15), vec3(0.85 * scale, 0.05, 0.62 * scale), Slot(ColorSlot::Fabric)),
        boxp(vec3(x - 0.4 * scale, 0.56, -1.95), vec3(0.3 * scale, 0.07, 0.18), Fixed("#F7F3EA")),
        boxp(vec3(x + 0.4 * scale, 0.56, -1.95), vec3(0.3 * scale, 0.07, 0.18), Fixed("#F7F3EA")),
    ]
}

fn floor_lamp(x: f32, z: f32) -> Vec<PieceSpec> {
    vec![
        cylp(vec3(x, 0.02, z), 0.16, 0.02, Slot(ColorSlot::Metal)),
        cylp(vec3(x, 0.75, z), 0.025, 0.73, Slot(ColorSlot::Metal)),
        cylp(vec3(x, 1.62, z), 0.19, 0.16, Slot(ColorSlot::Fabric)),
    ]
}

fn rug(half_x: f32, half_z: f32) -> Vec<PieceSpec> {
    vec![boxp(vec3(0.2, 0.012, 0.4), vec3(half_x, 0.012, half_z), Slot(ColorSlot::Accent))]
}

fn potted_plant(x: f32, z: f32) -> Vec<PieceSpec> {
    vec![
        cylp(vec3(x, 0.18, z), 0.16, 0.18, Fixed("#A8623E")),
        cylp(vec3(x, 0.55, z), 0.2, 0.22, Fixed("#4E7A43")),
        cylp(vec3(x, 0.85, z), 0.13, 0.14, Fixed("#5C8C4F")),
    ]
}

fn luxury_parts() -> Vec<PartSpec> {
    vec![
        PartSpec { name: "bed", pieces: bed(-0.9, 1.1) },
        PartSpec {
            name: "nightstands",
            pieces: vec![
                boxp(vec3(-2.45, 0.3, -1.9), vec3(0.28, 0.3, 0.28), Slot(ColorSlot::Wood)),
                cylp(vec3(-2.45, 0.64, -1.9), 0.05, 0.02, Slot(ColorSlot::Metal)),
                boxp(vec3(0.62, 0.3, -1.9), vec3(0.28, 0.3, 0.28), Slot(ColorSlot::Wood)),
                cylp(vec3(0.62, 0.64, -1.9), 0.05, 0.02, Slot(ColorSlot::Metal)),
            ],
        },
        PartSpec {
            name: "wardrobe",
            pieces: vec![
                boxp(vec3(2.3, 1.1, -1.9), vec3(0.6, 1.1, 0.4), Slot(ColorSlot::Wood)),
                boxp(vec3(2.05, 1.1, -1.48), vec3(0.02, 0.3, 0.02), Slot(ColorSlot::Metal)),
                boxp(vec3(2.55, 1.1, -1.48), vec3(0.02, 0.3, 0.02), Slot(ColorSlot::Metal)),
            ],
        },
        PartSpec { name: "floor_lamp", pieces: floor_lamp(-2.5, 1.2) },
        PartSpec { name: "rug", pieces: rug(1.7, 1.2) },
        PartSpec { name: "plant", pieces: potted_plant(2.4, 1.6) },
        PartSpec {
            name: "artwork",
            pieces: vec![
                boxp(vec3(-0.9, 1.85, -2.38), vec3(0.52, 0.38, 0.02), Slot(ColorSlot::Metal)),
                boxp(vec3(-0.9, 1.85, -2.36), vec3(0.46, 0.32, 0.01), Slot(ColorSlot::Accent)),
            ],
        },
        PartSpec {
            name: "chandelier",
            pieces: vec![
                cylp(vec3(0.0, 2.72, 0.0), 0.02, 0.08, Slot(ColorSlot::Metal)),
                cylp(vec3(0.0, 2.5, 0.0), 0.3, 0.12, Slot(ColorSlot::Metal)),
                cylp(vec3(0.0, 2.38, 0.0), 0.2, 0.04, Fixed("#F5E3B3")),
            ],
        },
    ]
}

fn budget_parts() -> Vec<PartSpec> {
    vec![
        PartSpec { name: "bed", pieces: bed(-1.3, 0.9) },
        PartSpec {
            name: "desk",
            pieces: vec![
                boxp(vec3(2.0, 0.72, -1.9), vec3(0.6, 0.03, 0.35), Slot(ColorSlot::Wood)),
                cylp(vec3(1.5, 0.36, -2.15), 0.03, 0.35, Slot(ColorSlot::Metal)),
                cylp(vec3(2.5, 0.36, -2.15), 0.03, 0.35, Slot(ColorSlot::Metal)),
                cylp(vec3(1.5, 0.36, -1.65), 0.03, 0.35, Slot(ColorSlot::Metal)),
                cylp(vec3(2.5, 0.36, -1.65), 0.03, 0.35, Slot(ColorSlot::Metal)),
            ],
        },
        PartSpec {
            name: "chair",
            pieces: vec![
                boxp(vec3(2.0, 0.45, -1.2), vec3(0.22, 0.03, 0.22), Slot(ColorSlot::Fabric)),
                boxp(vec3(2.0, 0.75, -0.99), vec3(0.22, 0.27, 0.03), Slot(ColorSlot::Fabric)),
                cylp(vec3(2.0, 0.21, -1.2), 0.04, 0.21, Slot(ColorSlot::Metal)),
            ],
        },
        PartSpec {
            name: "bookshelf",
            pieces: vec![
                boxp(vec3(-2.8, 0.9, 1.5), vec3(0.18, 0.9, 0.45), Slot(ColorSlot::Wood)),
                boxp(vec3(-2.78, 1.25, 1.5), vec3(0.15, 0.02, 0.4), Fixed("#D9CFC0")),
                boxp(vec3(-2.78, 0.75, 1.5), vec3(0.15, 0.02, 0.4), Fixed("#D9CFC0")),
            ],
        },
        PartSpec { name: "rug", pieces: rug(1.3, 0.9) },
        PartSpec { name: "lamp", pieces: floor_lamp(0.4, -1.9) },
    ]
}

fn minimalist_parts() -> Vec<PartSpec> {
    vec![
        PartSpec {
            name: "bed",
            pieces: vec![
                boxp(vec3(-0.8, 0.14, -1.4), vec3(1.0, 0.14, 1.05), Slot(ColorSlot::Wood)),
                boxp(vec3(-0.8, 0.34, -1.4), vec3(0.92, 0.06, 0.95), Slot(ColorSlot::Fabric)),
                boxp(vec3(-0.8, 0.44, -2.0), vec3(0.6, 0.05, 0.25), Fixed("#F4F1EA")),
            ],
        },
        PartSpec {
            name: "side_table",
            pieces: vec![cylp(vec3(0.8, 0.22, -1.6), 0.26, 0.22, Slot(ColorSlot::Wood))],
        },
        PartSpec {
            name: "lamp",
            pieces: vec![
                cylp(vec3(2.2, 0.5, -1.6), 0.02, 0.5, Slot(ColorSlot::Metal)),
                cylp(vec3(2.2, 1.25, -1.6), 0.24, 0.28, Fixed("#FAF7F0")),
            ],
        },
        PartSpec {
            name: "shelf",
            pieces: vec![boxp(vec3(-2.95, 1.3, 0.8), vec3(0.08, 0.02, 0.6), Slot(ColorSlot::Wood))],
        },
        PartSpec { name: "plant", pieces: potted_plant(2.5, 1.4) },
    ]
}

fn ar_parts() -> Vec<PartSpec> {
    vec![
        PartSpec {
            name: "sofa",
            pieces: vec![
                boxp(vec3(-0.6, 0.25, -0.8), vec3(1.0, 0.14, 0.45), Slot(ColorSlot::Fabric)),
                boxp(vec3(-0.6, 0.55, -1.18), vec3(1.0, 0.26, 0.08), Slot(ColorSlot::Fabric)),
                boxp(vec3(-1.52, 0.42, -0.8), vec3(0.08, 0.18, 0.45), Slot(ColorSlot::Fabric)),
                boxp(vec3(0.32, 0.42, -0.8), vec3(0.08, 0.18, 0.45), Slot(ColorSlot::Fabric)),
                boxp(vec3(-0.6, 0.07, -0.8), vec3(0.95, 0.04, 0.4), Slot(ColorSlot::Wood)),
            ],
        },
        PartSpec {
            name: "coffee_table",
            pieces: vec![
                boxp(vec3(-0.5, 0.4, 0.5), vec3(0.55, 0.025, 0.3), Slot(ColorSlot::Wood)),
                cylp(vec3(-0.95, 0.19, 0.3), 0.025, 0.19, Slot(ColorSlot::Metal)),
                cylp(vec3(-0.05, 0.19, 0.3), 0.025, 0.19, Slot(ColorSlot::Metal)),
                cylp(vec3(-0.95, 0.19, 0.7), 0.025, 0.19, Slot(ColorSlot::Metal)),
                cylp(vec3(-0.05, 0.19, 0.7), 0.025, 0.19, Slot(ColorSlot::Metal)),
            ],
        },
        PartSpec { name: "lamp", pieces: floor_lamp(1.3, -0.6) },
    ]
}

impl RoomTemplate {
    fn for_style(style: RoomStyle) -> Self {
        let (shell, parts) = match style {
            RoomStyle::Luxury => (walls_and_floor(), luxury_parts()),
            RoomStyle::Budget => (walls_and_floor(), budget_parts()),
            RoomStyle::Minimalist => (walls_and_floor(), minimalist_parts()),
            RoomStyle::Ar => (ar_reticle(), ar_parts()),
        };
        Self { shell, parts }
    }
}

/// A placed primitive with its resolved color. `slot` is Some for pieces a
/// palette change may repaint.
pub struct Piece {
    pub mesh: TriMesh,
    pub color: Color32,
    slot: Option<ColorSlot>,
}

impl Piece {
    fn from_spec(spec: &PieceSpec, colors: &RoomColors) -> Self {
        let mesh = match spec.shape {
            Shape::Box { center, half } => cuboid(center, half),
            Shape::Cylinder {
                center,
                radius,
                half_height,
            } => cylinder(center, radius, half_height, CYLINDER_SEGMENTS),
        };
        let (color, slot) = match spec.paint {
            Slot(slot) => (slot.resolve(colors), Some(slot)),
            Fixed(hex) => (hex_or_gray(hex), None),
        };
        Self { mesh, color, slot }
    }
}

pub struct ScenePart {
    pub name: String,
    pub visible: bool,
    pub pieces: Vec<Piece>,
}

/// Part-name lookup built once at construction; geometry is never searched
/// again after that.
#[derive(Default)]
pub struct SceneObjectRegistry {
    index: HashMap<String, usize>,
}

pub struct RoomScene {
    pub style: RoomStyle,
    shell: Vec<Piece>,
    parts: Vec<ScenePart>,
    registry: SceneObjectRegistry,
}

impl RoomScene {
    /// Builds the scene graph once; subsequent color or visibility changes
    /// mutate it in place.
    pub fn build(style: RoomStyle, colors: &RoomColors) -> Self {
        let template = RoomTemplate::for_style(style);
        let shell = template
            .shell
            .iter()
            .map(|spec| Piece::from_spec(spec, colors))
            .collect();

        let mut registry = SceneObjectRegistry::default();
        let parts = template
            .parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                registry.index.insert(part.name.to_string(), i);
                ScenePart {
                    name: part.name.to_string(),
                    visible: true,
                    pieces: part
                        .pieces
                        .iter()
                        .map(|spec| Piece::from_spec(spec, colors))
                        .collect(),
                }
            })
            .collect();

        Self {
            style,
            shell,
            parts,
            registry,
        }
    }

    pub fn parts(&self) -> &[ScenePart] {
        &self.parts
    }

    /// The furniture-visibility map in part declaration order.
    pub fn visibility_map(&self) -> Vec<(&str, bool)> {
        self.parts.iter().map(|p| (p.name.as_str(), p.visible)).collect()
    }

    pub fn is_visible(&self, name: &str) -> Option<bool> {
        self.registry.index.get(name).map(|&i| self.parts[i].visible)
    }

    /// Flips exactly one part; every other part and all materials stay put.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.registry.index.get(name) {
            Some(&i) => {
                self.parts[i].visible = !self.parts[i].visible;
                true
            }
            None => false,
        }
    }

    /// Repaints slot-bound materials in place. No geometry is rebuilt and no
    /// visibility flag moves.
    pub fn apply_colors(&mut self, colors: &RoomColors) {
        let repaint = |piece: &mut Piece| {
            if let Some(slot) = piece.slot {
                piece.color = slot.resolve(colors);
            }
        };
        self.shell.iter_mut().for_each(repaint);
        for part in &mut self.parts {
            part.pieces.iter_mut().for_each(repaint);
        }
    }

    /// Shell plus currently visible furniture, render order.
    pub fn visible_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.shell.iter().chain(
            self.parts
                .iter()
                .filter(|p| p.visible)
                .flat_map(|p| p.pieces.iter()),
        )
    }

    pub fn triangle_count(&self) -> usize {
        self.visible_pieces().map(|p| p.mesh.triangle_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> RoomColors {
        RoomColors::default()
    }

    #[test]
    fn toggle_inverts_exactly_one_part() {
        let mut scene = RoomScene::build(RoomStyle::Luxury, &colors());
        let before: Vec<bool> = scene.parts().iter().map(|p| p.visible).collect();

        assert!(scene.toggle("bed"));

        for (i, part) in scene.parts().iter().enumerate() {
            if part.name == "bed" {
                assert_eq!(part.visible, !before[i]);
            } else {
                assert_eq!(part.visible, before[i]);
            }
        }

        scene.toggle("bed");
        let after: Vec<bool> = scene.parts().iter().map(|p| p.visible).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn toggle_of_unknown_part_changes_nothing() {
        let mut scene = RoomScene::build(RoomStyle::Budget, &colors());
        assert!(!scene.toggle("jacuzzi"));
        assert!(scene.parts().iter().all(|p| p.visible));
    }

    #[test]
    fn apply_colors_repaints_slots_without_touching_geometry_or_toggles() {
        let mut scene = RoomScene::build(RoomStyle::Luxury, &colors());
        scene.toggle("rug");
        let triangles = RoomScene::build(RoomStyle::Luxury, &colors()).triangle_count();

        let mut repainted = colors();
        repainted.walls = "#112233".to_string();
        scene.apply_colors(&repainted);

        let wall = &scene.shell[1];
        assert_eq!(wall.color, Color32::from_rgb(0x11, 0x22, 0x33));
        assert_eq!(scene.is_visible("rug"), Some(false));

        scene.toggle("rug");
        assert_eq!(scene.triangle_count(), triangles);
    }

    #[test]
    fn hidden_parts_are_excluded_from_render_and_export_set() {
        let mut scene = RoomScene::build(RoomStyle::Minimalist, &colors());
        let all = scene.triangle_count();
        scene.toggle("plant");
        assert!(scene.triangle_count() < all);
    }

    #[test]
    fn every_style_names_its_own_part_set() {
        for style in [RoomStyle::Luxury, RoomStyle::Budget, RoomStyle::Minimalist, RoomStyle::Ar] {
            let scene = RoomScene::build(style, &colors());
            assert!(!scene.parts().is_empty());
        }
        let luxury = RoomScene::build(RoomStyle::Luxury, &colors());
        assert_eq!(luxury.is_visible("bed"), Some(true));
        let ar = RoomScene::build(RoomStyle::Ar, &colors());
        assert_eq!(ar.is_visible("sofa"), Some(true));
        assert_eq!(ar.is_visible("bed"), None);
    }
}
