use egui::epaint::Shadow;
use egui::{Color32, Ui};

pub const ACCENT: Color32 = Color32::from_rgb(196, 160, 98);

pub fn surface_panel() -> egui::Frame {
    egui::Frame::default()
        .fill(Color32::from_rgba_unmultiplied(18, 23, 34, 236))
        .stroke(egui::Stroke::new(
            1.0,
            Color32::from_rgba_unmultiplied(255, 255, 255, 20),
        ))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(14.0))
        .outer_margin(egui::Margin::same(2.0))
        .shadow(Shadow {
            offset: egui::vec2(0.0, 6.0),
            blur: 24.0,
            spread: 0.0,
            color: Color32::from_rgba_unmultiplied(0, 0, 0, 130),
        })
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(Color32::from_rgba_unmultiplied(255, 255, 255, 7))
        .stroke(egui::Stroke::new(
            1.0,
            Color32::from_rgba_unmultiplied(255, 255, 255, 20),
        ))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(8.0))
}

pub fn section_heading(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.label(egui::RichText::new(title).strong().size(17.0));
    if !subtitle.is_empty() {
        ui.label(
            egui::RichText::new(subtitle)
                .size(12.5)
                .color(Color32::from_gray(175)),
        );
    }
    ui.add_space(8.0);
}

/// Small filled square used as a color chip in legends and grids.
pub fn color_chip(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, egui::Rounding::same(3.0), color);
    ui.painter().rect_stroke(
        rect,
        egui::Rounding::same(3.0),
        egui::Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 40)),
    );
}
