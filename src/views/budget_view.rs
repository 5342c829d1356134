use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Color32, Pos2, RichText, Sense, Shape, Ui};
use itertools::Itertools;
use tracing::warn;

use crate::export::pdf;
use crate::props::{hex_or_gray, BudgetBreakdownProps};
use crate::toast::ToastQueue;
use crate::ui_kit;

const ARC_STEP: f32 = 0.05;

pub fn budget_view(ui: &mut Ui, props: &BudgetBreakdownProps, toasts: &mut ToastQueue) {
    ui_kit::section_heading(
        ui,
        "Budget Breakdown",
        &format!("{} · {} design", props.room_name, props.design_type),
    );

    ui.horizontal(|ui| {
        figure(ui, "Total", format!("${:.0}", props.total));
        figure(ui, "Spent", format!("${:.0}", props.spent));
        figure(ui, "Remaining", format!("${:.0}", props.remaining()));
        figure(ui, "Utilized", format!("{}%", props.utilization_percent()));
    });
    ui.add_space(10.0);

    ui.horizontal_top(|ui| {
        pie_chart(ui, props);
        ui.add_space(14.0);
        legend(ui, props);
    });

    ui.add_space(10.0);
    if ui.button("⬇ Export PDF report").clicked() {
        export_pdf(props, toasts);
    }
}

fn figure(ui: &mut Ui, label: &str, value: String) {
    ui_kit::card_frame().show(ui, |ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).size(11.0).color(Color32::from_gray(150)));
            ui.label(RichText::new(value).strong().size(18.0).color(ui_kit::ACCENT));
        });
    });
}

/// Triangle-fan wedges, one per category, proportional to its share.
fn pie_chart(ui: &mut Ui, props: &BudgetBreakdownProps) {
    let (response, painter) = ui.allocate_painter(egui::vec2(220.0, 220.0), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.46;

    let total = props.category_total();
    if total <= 0.0 {
        painter.circle_filled(center, radius, Color32::from_gray(50));
        return;
    }

    let mut mesh = Mesh::default();
    let mut angle = -std::f32::consts::FRAC_PI_2;
    for category in &props.categories {
        let sweep = (category.amount.max(0.0) / total) as f32 * std::f32::consts::TAU;
        if sweep <= 0.0 {
            continue;
        }
        let color = hex_or_gray(&category.color);
        let center_index = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex {
            pos: center,
            uv: WHITE_UV,
            color,
        });
        let steps = (sweep / ARC_STEP).ceil().max(1.0) as u32;
        for step in 0..=steps {
            let a = angle + sweep * (step as f32 / steps as f32);
            mesh.vertices.push(Vertex {
                pos: Pos2::new(center.x + a.cos() * radius, center.y + a.sin() * radius),
                uv: WHITE_UV,
                color,
            });
            if step > 0 {
                mesh.indices.extend_from_slice(&[
                    center_index,
                    center_index + step,
                    center_index + step + 1,
                ]);
            }
        }
        angle += sweep;
    }
    painter.add(Shape::mesh(mesh));
}

fn legend(ui: &mut Ui, props: &BudgetBreakdownProps) {
    let total = props.category_total();
    ui.vertical(|ui| {
        for category in props
            .categories
            .iter()
            .sorted_by(|a, b| b.amount.total_cmp(&a.amount))
        {
            let share = if total > 0.0 {
                (category.amount / total * 100.0).round() as i64
            } else {
                0
            };
            ui.horizontal(|ui| {
                ui_kit::color_chip(ui, hex_or_gray(&category.color));
                ui.label(&category.label);
                ui.label(
                    RichText::new(format!("${:.0} · {share}%", category.amount))
                        .color(Color32::from_gray(170)),
                );
            });
        }
        if (total - props.spent).abs() > 0.005 {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Categories sum to ${total:.2}"))
                    .size(11.0)
                    .color(Color32::from_gray(140)),
            );
        }
    });
}

fn export_pdf(props: &BudgetBreakdownProps, toasts: &mut ToastQueue) {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(props.pdf_file_name())
        .add_filter("PDF", &["pdf"])
        .save_file()
    else {
        return;
    };
    match pdf::write_budget_pdf(props, &path) {
        Ok(()) => toasts.info(format!("Report saved to {}", path.display())),
        Err(err) => {
            warn!("pdf export failed: {err}");
            toasts.error(format!("Export failed: {err}"));
        }
    }
}
