use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect, Rgb};
use tracing::debug;

use crate::error::ExportError;
use crate::props::{hex_or_gray, BudgetBreakdownProps};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

fn fill_hex(layer: &PdfLayerReference, hex: &str) {
    let color = hex_or_gray(hex);
    layer.set_fill_color(Color::Rgb(Rgb::new(
        f32::from(color.r()) / 255.0,
        f32::from(color.g()) / 255.0,
        f32::from(color.b()) / 255.0,
        None,
    )));
}

fn fill_gray(layer: &PdfLayerReference, level: f32) {
    layer.set_fill_color(Color::Rgb(Rgb::new(level, level, level, None)));
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Fixed-layout report: title block, headline figures, then one table row per
/// category with its chart color chip. Single page, A4.
pub fn write_budget_pdf(props: &BudgetBreakdownProps, path: &Path) -> Result<(), ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        "Budget Breakdown",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "report",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let bold: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let regular: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut y = PAGE_HEIGHT - 28.0;
    fill_gray(&layer, 0.1);
    layer.use_text("Budget Breakdown", 22.0, Mm(MARGIN), Mm(y), &bold);
    y -= 8.0;
    layer.use_text(
        format!("{} · {} design", props.room_name, props.design_type),
        12.0,
        Mm(MARGIN),
        Mm(y),
        &regular,
    );
    y -= 4.0;
    rule(&layer, y);

    y -= 12.0;
    layer.use_text(
        format!("Total budget: ${:.2}", props.total),
        12.0,
        Mm(MARGIN),
        Mm(y),
        &regular,
    );
    y -= 7.0;
    layer.use_text(
        format!("Spent: ${:.2}", props.spent),
        12.0,
        Mm(MARGIN),
        Mm(y),
        &regular,
    );
    y -= 7.0;
    layer.use_text(
        format!("Remaining: ${:.2}", props.remaining()),
        12.0,
        Mm(MARGIN),
        Mm(y),
        &regular,
    );
    y -= 7.0;
    layer.use_text(
        format!("Budget utilized: {}%", props.utilization_percent()),
        12.0,
        Mm(MARGIN),
        Mm(y),
        &bold,
    );

    y -= 6.0;
    rule(&layer, y);
    y -= 10.0;
    layer.use_text("Category", 11.0, Mm(MARGIN + 8.0), Mm(y), &bold);
    layer.use_text("Amount", 11.0, Mm(PAGE_WIDTH - MARGIN - 40.0), Mm(y), &bold);

    for category in &props.categories {
        y -= 8.0;
        if y < MARGIN {
            break; // fixed single-page template
        }
        fill_hex(&layer, &category.color);
        layer.add_rect(Rect::new(
            Mm(MARGIN),
            Mm(y - 0.5),
            Mm(MARGIN + 4.0),
            Mm(y + 3.5),
        ));
        fill_gray(&layer, 0.1);
        layer.use_text(category.label.as_str(), 11.0, Mm(MARGIN + 8.0), Mm(y), &regular);
        layer.use_text(
            format!("${:.2}", category.amount),
            11.0,
            Mm(PAGE_WIDTH - MARGIN - 40.0),
            Mm(y),
            &regular,
        );
    }

    y -= 10.0;
    rule(&layer, y);
    y -= 8.0;
    fill_gray(&layer, 0.35);
    layer.use_text(
        format!(
            "Generated by Atelier on {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M")
        ),
        9.0,
        Mm(MARGIN),
        Mm(y),
        &regular,
    );

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    debug!(path = %path.display(), "budget report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::BudgetCategory;

    #[test]
    fn writes_a_pdf_file() {
        let props = BudgetBreakdownProps {
            room_name: "Living Room".into(),
            design_type: "Modern".into(),
            total: 2000.0,
            spent: 1450.0,
            categories: vec![
                BudgetCategory {
                    label: "Furniture".into(),
                    amount: 900.0,
                    color: "#8B5E3C".into(),
                },
                BudgetCategory {
                    label: "Lighting".into(),
                    amount: 300.0,
                    color: "#C8A34B".into(),
                },
            ],
        };
        let path = std::env::temp_dir().join(props.pdf_file_name());
        write_budget_pdf(&props, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        std::fs::remove_file(&path).ok();
    }
}
