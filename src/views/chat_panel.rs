use egui::{Color32, RichText, ScrollArea, Ui};

use crate::chat::{DesignThread, FlowStage, Role, QUICK_PROMPTS};
use crate::ui_kit;

/// Transcript, quick prompts, and the input row. Returns the text to submit
/// when the user sends this frame.
pub fn chat_panel(
    ui: &mut Ui,
    thread: &DesignThread,
    stage: FlowStage,
    input: &mut String,
) -> Option<String> {
    let mut submitted = None;

    ui.label(RichText::new("Design Chat").strong().size(16.0));
    ui.add_space(6.0);

    let input_height = 96.0;
    let transcript_height = (ui.available_height() - input_height).max(120.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .max_height(transcript_height)
        .show(ui, |ui| {
            if stage == FlowStage::Brief {
                brief_card(ui, &mut submitted);
            }
            for message in thread.messages() {
                message_bubble(ui, message.role, &message.text, message.component.as_ref());
            }
            if thread.is_in_flight() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Designing…").color(Color32::from_gray(170)));
                });
            }
        });

    ui.add_space(6.0);
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        for prompt in QUICK_PROMPTS {
            if ui.small_button(prompt.label).clicked() && !thread.is_in_flight() {
                // Submit the canned text verbatim.
                submitted = Some(prompt.text.to_string());
            }
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let editor = egui::TextEdit::singleline(input)
            .hint_text("Describe the room you want…")
            .desired_width(ui.available_width() - 64.0);
        let response = ui.add(editor);
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let send = ui
            .add_enabled(!thread.is_in_flight(), egui::Button::new("Send"))
            .clicked();
        if (enter || send) && !thread.is_in_flight() && !input.trim().is_empty() {
            submitted = Some(input.trim().to_string());
            input.clear();
        }
    });

    submitted
}

fn brief_card(ui: &mut Ui, submitted: &mut Option<String>) {
    ui_kit::card_frame().show(ui, |ui| {
        ui.label(RichText::new("Welcome to Atelier").strong().size(15.0));
        ui.label(
            RichText::new(
                "Describe a room and the design engine will answer with an interactive \
                 preview, a budget chart, a palette, or a shopping list.",
            )
            .size(12.5)
            .color(Color32::from_gray(185)),
        );
        ui.add_space(6.0);
        ui.label(RichText::new("Try one:").size(12.0).color(Color32::from_gray(150)));
        for prompt in QUICK_PROMPTS.iter().take(3) {
            if ui.link(prompt.text).clicked() {
                *submitted = Some(prompt.text.to_string());
            }
        }
    });
    ui.add_space(8.0);
}

fn message_bubble(
    ui: &mut Ui,
    role: Role,
    text: &str,
    component: Option<&crate::chat::ComponentInvocation>,
) {
    let (fill, heading) = match role {
        Role::User => (Color32::from_rgba_unmultiplied(40, 58, 82, 200), "You"),
        Role::Assistant => (Color32::from_rgba_unmultiplied(255, 255, 255, 10), "Atelier"),
    };
    egui::Frame::default()
        .fill(fill)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(heading).size(11.0).color(Color32::from_gray(150)));
            if !text.is_empty() {
                ui.label(text);
            }
            if let Some(invocation) = component {
                ui.label(
                    RichText::new(format!("◆ rendered {}", invocation.name))
                        .size(11.0)
                        .color(Color32::from_rgb(150, 190, 160)),
                );
            }
        });
    ui.add_space(6.0);
}
