use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::props::{hex_or_gray, FurnitureGridProps};
use crate::ui_kit;

pub fn furniture_view(ui: &mut Ui, props: &FurnitureGridProps) {
    ui_kit::section_heading(
        ui,
        &props.title,
        &format!("{} items", props.items.len()),
    );

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(24.0))
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::exact(90.0))
        .header(22.0, |mut header| {
            header.col(|_| {});
            header.col(|ui| {
                ui.label(RichText::new("Item").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Vendor").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Stock").strong());
            });
            header.col(|ui| {
                ui.label(RichText::new("Price").strong());
            });
        })
        .body(|mut body| {
            for item in &props.items {
                body.row(24.0, |mut row| {
                    row.col(|ui| {
                        ui_kit::color_chip(ui, hex_or_gray(&item.color));
                    });
                    row.col(|ui| {
                        ui.label(&item.name);
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(&item.vendor).color(Color32::from_gray(170)),
                        );
                    });
                    row.col(|ui| {
                        if item.in_stock {
                            ui.label(RichText::new("In stock").color(Color32::from_rgb(130, 190, 140)));
                        } else {
                            ui.label(RichText::new("Backorder").color(Color32::from_gray(140)));
                        }
                    });
                    row.col(|ui| {
                        ui.label(format!("${:.2}", item.price));
                    });
                });
            }
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Total").strong());
        ui.label(
            RichText::new(format!("${:.2}", props.grand_total()))
                .strong()
                .color(ui_kit::ACCENT),
        );
    });
}
