use egui::{Color32, RichText, Sense, Ui};
use tracing::warn;

use crate::export::gltf;
use crate::props::{RoomStyle, RoomVisualizationProps};
use crate::scene::camera::OrbitCamera;
use crate::scene::paint::paint_scene;
use crate::scene::room::RoomScene;
use crate::toast::ToastQueue;
use crate::ui_kit;

pub struct RoomViewState {
    scene: RoomScene,
    camera: OrbitCamera,
    props: RoomVisualizationProps,
}

impl RoomViewState {
    pub fn new(style: RoomStyle, props: RoomVisualizationProps) -> Self {
        Self {
            scene: RoomScene::build(style, &props.colors),
            camera: OrbitCamera::default(),
            props,
        }
    }

    pub fn style(&self) -> RoomStyle {
        self.scene.style
    }

    /// A re-invocation with the same style restyles materials in place and
    /// keeps camera and toggles; a different style is a fresh mount.
    pub fn reconcile(&mut self, style: RoomStyle, props: RoomVisualizationProps) {
        if style == self.scene.style {
            if props.colors != self.props.colors {
                self.scene.apply_colors(&props.colors);
            }
            self.props = props;
        } else {
            *self = Self::new(style, props);
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, toasts: &mut ToastQueue) {
        let style = self.scene.style;
        ui_kit::section_heading(
            ui,
            &format!("{} · {}", self.props.room_name, style.title()),
            &self.props.caption,
        );

        // Furniture visibility chips; one click flips one part.
        let mut clicked: Option<String> = None;
        ui.horizontal_wrapped(|ui| {
            for (name, visible) in self.scene.visibility_map() {
                let label = display_name(name);
                if ui.selectable_label(visible, label).clicked() {
                    clicked = Some(name.to_string());
                }
            }
        });
        if let Some(name) = clicked {
            self.scene.toggle(&name);
        }
        ui.add_space(6.0);

        let canvas_height = (ui.available_height() - 48.0).clamp(220.0, 640.0);
        let size = egui::vec2(ui.available_width(), canvas_height);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(
            rect,
            egui::Rounding::same(8.0),
            Color32::from_rgba_unmultiplied(9, 12, 19, 255),
        );

        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.orbit(delta.x, delta.y);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        paint_scene(&painter, rect, &self.camera, &self.scene);

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("drag to orbit · scroll to zoom")
                    .size(11.0)
                    .color(Color32::from_gray(140)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if style.supports_export() && ui.button("⬇ Export GLB").clicked() {
                    self.export_glb(toasts);
                }
            });
        });
    }

    fn export_glb(&self, toasts: &mut ToastQueue) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(gltf::default_file_name(self.scene.style))
            .add_filter("Binary glTF", &["glb"])
            .save_file()
        else {
            return;
        };
        // Export failure never touches scene state.
        let outcome = gltf::export_glb(&self.scene).and_then(|bytes| {
            std::fs::write(&path, bytes).map_err(crate::error::ExportError::Io)
        });
        match outcome {
            Ok(()) => toasts.info(format!("Model saved to {}", path.display())),
            Err(err) => {
                warn!("glb export failed: {err}");
                toasts.error(format!("Export failed: {err}"));
            }
        }
    }
}

fn display_name(raw: &str) -> String {
    raw.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::RoomColors;

    #[test]
    fn reconcile_same_style_keeps_toggles() {
        let mut view = RoomViewState::new(RoomStyle::Luxury, RoomVisualizationProps::default());
        view.scene.toggle("rug");

        let mut props = RoomVisualizationProps::default();
        props.colors.walls = "#223344".to_string();
        view.reconcile(RoomStyle::Luxury, props);

        assert_eq!(view.scene.is_visible("rug"), Some(false));
    }

    #[test]
    fn reconcile_new_style_is_a_fresh_mount() {
        let mut view = RoomViewState::new(RoomStyle::Luxury, RoomVisualizationProps::default());
        view.scene.toggle("bed");
        view.reconcile(RoomStyle::Budget, RoomVisualizationProps::default());
        // Budget has its own part set, everything visible again.
        assert_eq!(view.scene.is_visible("bed"), Some(true));
        assert_eq!(view.style(), RoomStyle::Budget);
    }

    #[test]
    fn part_names_render_title_case() {
        assert_eq!(display_name("floor_lamp"), "Floor Lamp");
        assert_eq!(display_name("bed"), "Bed");
    }

    #[test]
    fn ar_preview_never_offers_export() {
        let view = RoomViewState::new(
            RoomStyle::Ar,
            RoomVisualizationProps {
                colors: RoomColors::default(),
                ..Default::default()
            },
        );
        assert!(!view.style().supports_export());
    }
}
