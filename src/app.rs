use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};
use eframe::epaint::{Mesh, Vertex};
use eframe::{App, CreationContext, Frame};
use tracing::{error, info};

use crate::chat::{DesignThread, FlowStage, ThreadEvent};
use crate::config::StudioConfig;
use crate::provider::{spawn_round_trip, DesignEngineClient};
use crate::registry::{self, ComponentPayload};
use crate::toast::ToastQueue;
use crate::ui_kit;
use crate::views::budget_view::budget_view;
use crate::views::chat_panel::chat_panel;
use crate::views::furniture_view::furniture_view;
use crate::views::palette_view::palette_view;
use crate::views::room_view::RoomViewState;
use crate::props;

/// What the central canvas currently shows. Exactly one component at a time,
/// always the latest renderable assistant reply.
enum Canvas {
    Empty,
    DecodeError(String),
    Room(RoomViewState),
    Budget(props::BudgetBreakdownProps),
    Palette(props::ColorPaletteProps),
    Furniture(props::FurnitureGridProps),
}

pub struct AtelierApp {
    config: StudioConfig,
    client: Option<Arc<DesignEngineClient>>,
    client_error: Option<String>,
    thread: DesignThread,
    stage: FlowStage,
    input: String,
    tx: Sender<ThreadEvent>,
    rx: Receiver<ThreadEvent>,
    canvas: Canvas,
    toasts: ToastQueue,
    status: String,
}

impl AtelierApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let config = StudioConfig::load();
        let (client, client_error) = match DesignEngineClient::new(&config) {
            Ok(client) => (Some(Arc::new(client)), None),
            Err(err) => {
                error!("design engine client unavailable: {err}");
                (None, Some(err.to_string()))
            }
        };
        let (tx, rx) = channel();
        Self {
            config,
            client,
            client_error,
            thread: DesignThread::default(),
            stage: FlowStage::Brief,
            input: String::new(),
            tx,
            rx,
            canvas: Canvas::Empty,
            toasts: ToastQueue::default(),
            status: "Ready".to_string(),
        }
    }

    fn send(&mut self, ctx: &egui::Context, text: String) {
        let Some(client) = self.client.clone() else {
            let reason = self
                .client_error
                .clone()
                .unwrap_or_else(|| "engine unavailable".to_string());
            self.toasts.error(reason);
            return;
        };
        // First send flips the flow stage for good.
        self.stage = FlowStage::Viewing;
        self.thread.begin_send(text);
        self.status = "Waiting for the design engine…".to_string();
        spawn_round_trip(
            client,
            self.thread.messages().to_vec(),
            self.tx.clone(),
            ctx.clone(),
        );
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                ThreadEvent::Completed(message) => {
                    self.thread.complete(message);
                    self.status = "Ready".to_string();
                    self.refresh_canvas();
                }
                ThreadEvent::Failed(reason) => {
                    self.thread.fail();
                    self.status = "Last request failed".to_string();
                    self.toasts.error(reason);
                }
            }
        }
    }

    /// The canvas always shows the newest renderable assistant reply; a
    /// component-free reply leaves the previous one up.
    fn refresh_canvas(&mut self) {
        let Some(invocation) = self
            .thread
            .latest_component()
            .map(|(_, invocation)| invocation.clone())
        else {
            return;
        };
        match registry::decode(&invocation.name, &invocation.props) {
            Ok(ComponentPayload::Room(style, room_props)) => {
                info!(component = %invocation.name, "mounting room view");
                match &mut self.canvas {
                    Canvas::Room(view) => view.reconcile(style, room_props),
                    _ => self.canvas = Canvas::Room(RoomViewState::new(style, room_props)),
                }
            }
            Ok(ComponentPayload::Budget(budget)) => self.canvas = Canvas::Budget(budget),
            Ok(ComponentPayload::Palette(palette)) => self.canvas = Canvas::Palette(palette),
            Ok(ComponentPayload::Furniture(grid)) => self.canvas = Canvas::Furniture(grid),
            Err(err) => {
                error!("component decode failed: {err}");
                self.canvas = Canvas::DecodeError(err.to_string());
            }
        }
    }

    fn draw_background(&self, ctx: &egui::Context) {
        let rect = ctx.screen_rect();
        let top = Color32::from_rgba_unmultiplied(15, 20, 31, 255);
        let bottom = Color32::from_rgba_unmultiplied(10, 13, 21, 255);

        let mut mesh = Mesh::default();
        let i = mesh.vertices.len() as u32;
        for (pos, color) in [
            (rect.left_top(), top),
            (rect.right_top(), top),
            (rect.right_bottom(), bottom),
            (rect.left_bottom(), bottom),
        ] {
            mesh.vertices.push(Vertex {
                pos,
                uv: Default::default(),
                color,
            });
        }
        mesh.indices
            .extend_from_slice(&[i, i + 1, i + 2, i, i + 2, i + 3]);
        ctx.layer_painter(egui::LayerId::background())
            .add(egui::Shape::mesh(mesh));
    }

    fn header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Atelier")
                    .strong()
                    .size(18.0)
                    .color(ui_kit::ACCENT),
            );
            ui.label(
                RichText::new("AI interior design studio")
                    .size(12.0)
                    .color(Color32::from_gray(160)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(&self.config.model)
                        .size(11.0)
                        .color(Color32::from_gray(130)),
                );
                if self.client.is_none() {
                    ui.label(
                        RichText::new("⚠ no API key · set ATELIER_API_KEY")
                            .size(12.0)
                            .color(Color32::from_rgb(230, 170, 100)),
                    );
                }
            });
        });
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        match &mut self.canvas {
            Canvas::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Your design will appear here.\nStart by describing a room.")
                            .size(15.0)
                            .color(Color32::from_gray(120)),
                    );
                });
            }
            Canvas::DecodeError(reason) => {
                ui_kit::card_frame().show(ui, |ui| {
                    ui.label(
                        RichText::new("The engine sent a component this app could not render.")
                            .color(Color32::from_rgb(235, 150, 150)),
                    );
                    ui.label(RichText::new(reason.as_str()).size(11.5).color(Color32::from_gray(160)));
                });
            }
            Canvas::Room(view) => view.ui(ui, &mut self.toasts),
            Canvas::Budget(props) => budget_view(ui, props, &mut self.toasts),
            Canvas::Palette(props) => palette_view(ui, props),
            Canvas::Furniture(props) => furniture_view(ui, props),
        }
    }
}

impl App for AtelierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_events();
        self.draw_background(ctx);

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::default().inner_margin(egui::Margin::symmetric(12.0, 8.0)))
            .show(ctx, |ui| self.header(ui));

        egui::TopBottomPanel::bottom("status")
            .frame(egui::Frame::default().inner_margin(egui::Margin::symmetric(12.0, 4.0)))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(&self.status)
                        .size(11.5)
                        .color(Color32::from_gray(150)),
                );
            });

        let mut submitted = None;
        egui::SidePanel::left("chat")
            .resizable(true)
            .default_width(360.0)
            .min_width(280.0)
            .show(ctx, |ui| {
                ui_kit::surface_panel().show(ui, |ui| {
                    ui.set_height(ui.available_height());
                    submitted = chat_panel(ui, &self.thread, self.stage, &mut self.input);
                });
            });
        if let Some(text) = submitted {
            self.send(ctx, text);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::default().inner_margin(egui::Margin::same(10.0)))
            .show(ctx, |ui| {
                ui_kit::surface_panel().show(ui, |ui| {
                    ui.set_min_size(ui.available_size());
                    self.canvas_ui(ui);
                });
            });

        self.toasts.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatMessage, ComponentInvocation};
    use serde_json::json;

    fn bare_app() -> AtelierApp {
        let (tx, rx) = channel();
        AtelierApp {
            config: StudioConfig::default(),
            client: None,
            client_error: Some("no key".to_string()),
            thread: DesignThread::default(),
            stage: FlowStage::Brief,
            input: String::new(),
            tx,
            rx,
            canvas: Canvas::Empty,
            toasts: ToastQueue::default(),
            status: "Ready".to_string(),
        }
    }

    fn reply(text: &str, component: Option<ComponentInvocation>) -> ChatMessage {
        ChatMessage::assistant(text, component)
    }

    #[test]
    fn mounting_a_room_component_builds_the_view() {
        let mut app = bare_app();
        app.thread.begin_send("make it minimal");
        app.thread.complete(reply(
            "Here you go",
            Some(ComponentInvocation {
                name: "minimalist_room".to_string(),
                props: json!({"room_name": "Studio"}),
            }),
        ));
        app.refresh_canvas();
        assert!(matches!(app.canvas, Canvas::Room(_)));
    }

    #[test]
    fn malformed_props_become_an_error_card_not_a_crash() {
        let mut app = bare_app();
        app.thread.begin_send("how much");
        app.thread.complete(reply(
            "",
            Some(ComponentInvocation {
                name: "budget_breakdown".to_string(),
                props: json!({"total": "a fortune"}),
            }),
        ));
        app.refresh_canvas();
        assert!(matches!(app.canvas, Canvas::DecodeError(_)));
    }

    #[test]
    fn refused_send_keeps_the_brief_stage() {
        let mut app = bare_app();
        let ctx = egui::Context::default();
        app.send(&ctx, "hello".to_string());
        assert_eq!(app.stage, FlowStage::Brief);
        assert!(app.thread.messages().is_empty());
    }

    #[test]
    fn first_send_flips_the_stage_for_good() {
        let mut app = bare_app();
        let config = StudioConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        };
        app.client = Some(Arc::new(DesignEngineClient::new(&config).unwrap()));
        let ctx = egui::Context::default();
        app.send(&ctx, "design a den".to_string());
        assert_eq!(app.stage, FlowStage::Viewing);
        assert!(app.thread.is_in_flight());
    }

    #[test]
    fn plain_text_replies_leave_the_previous_component_up() {
        let mut app = bare_app();
        app.thread.begin_send("budget please");
        app.thread.complete(reply(
            "Here is the breakdown",
            Some(ComponentInvocation {
                name: "budget_breakdown".to_string(),
                props: json!({"total": 2000.0, "spent": 1450.0}),
            }),
        ));
        app.refresh_canvas();
        assert!(matches!(app.canvas, Canvas::Budget(_)));

        app.thread.begin_send("thanks");
        app.thread.complete(reply("you're welcome", None));
        app.refresh_canvas();
        // The reverse scan still lands on the breakdown.
        assert!(matches!(app.canvas, Canvas::Budget(_)));
    }
}
