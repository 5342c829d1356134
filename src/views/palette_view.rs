use egui::{Color32, RichText, Sense, Ui};

use crate::props::{hex_or_gray, ColorPaletteProps};
use crate::ui_kit;

pub fn palette_view(ui: &mut Ui, props: &ColorPaletteProps) {
    ui_kit::section_heading(ui, &props.name, "Suggested palette");

    ui.horizontal_wrapped(|ui| {
        for swatch in &props.swatches {
            ui_kit::card_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.set_width(120.0);
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(120.0, 64.0), Sense::hover());
                    ui.painter().rect_filled(
                        rect,
                        egui::Rounding::same(6.0),
                        hex_or_gray(&swatch.hex),
                    );
                    ui.add_space(4.0);
                    ui.label(RichText::new(&swatch.name).strong().size(13.0));
                    ui.label(
                        RichText::new(swatch.hex.to_uppercase())
                            .size(11.0)
                            .color(Color32::from_gray(160)),
                    );
                    if !swatch.usage.is_empty() {
                        ui.label(
                            RichText::new(&swatch.usage)
                                .size(11.0)
                                .color(Color32::from_gray(140)),
                        );
                    }
                });
            });
        }
    });
}
