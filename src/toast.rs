use std::time::{Duration, Instant};

use egui::{Align2, Color32, RichText};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug)]
struct Toast {
    text: String,
    level: ToastLevel,
    created: Instant,
}

/// Transient corner notifications. Export success/failure lands here; the
/// scene and thread are never touched by a toast.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, ToastLevel::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, ToastLevel::Error);
    }

    fn push(&mut self, text: impl Into<String>, level: ToastLevel) {
        self.toasts.push(Toast {
            text: text.into(),
            level,
            created: Instant::now(),
        });
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.toasts.retain(|t| t.created.elapsed() < TOAST_LIFETIME);
        if self.toasts.is_empty() {
            return;
        }
        // Keep repainting so toasts fade out without user input.
        ctx.request_repaint_after(Duration::from_millis(250));

        egui::Area::new(egui::Id::new("toast_stack"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let (fill, icon) = match toast.level {
                        ToastLevel::Info => (Color32::from_rgba_unmultiplied(24, 46, 36, 240), "✔"),
                        ToastLevel::Error => (Color32::from_rgba_unmultiplied(54, 26, 26, 240), "⚠"),
                    };
                    egui::Frame::default()
                        .fill(fill)
                        .stroke(egui::Stroke::new(
                            1.0,
                            Color32::from_rgba_unmultiplied(255, 255, 255, 24),
                        ))
                        .rounding(egui::Rounding::same(6.0))
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.label(RichText::new(format!("{icon} {}", toast.text)).size(13.0));
                        });
                    ui.add_space(6.0);
                }
            });
    }
}
