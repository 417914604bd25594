//! Toast notifications stacked in the bottom-right corner.

use egui::{Align2, Color32, RichText};
use std::time::{Duration, Instant};

const TOAST_LIFETIME: Duration = Duration::from_secs(5);
const TOAST_WIDTH: f32 = 320.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
    created: Instant,
}

#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, title: &str, description: impl Into<String>) {
        self.push(title, description.into(), ToastKind::Info);
    }

    pub fn error(&mut self, title: &str, description: impl Into<String>) {
        self.push(title, description.into(), ToastKind::Destructive);
    }

    fn push(&mut self, title: &str, description: String, kind: ToastKind) {
        self.items.push(Toast {
            title: title.to_string(),
            description,
            kind,
            created: Instant::now(),
        });
    }

    #[cfg(test)]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    fn prune(&mut self, now: Instant) {
        self.items
            .retain(|toast| now.duration_since(toast.created) < TOAST_LIFETIME);
    }

    /// Draw live toasts; clicking one dismisses it.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.items.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (idx, toast) in self.items.iter().enumerate() {
                    let (fill, accent) = match toast.kind {
                        ToastKind::Info => (
                            ui.visuals().window_fill,
                            ui.visuals().strong_text_color(),
                        ),
                        ToastKind::Destructive => {
                            (Color32::from_rgb(127, 29, 29), Color32::WHITE)
                        }
                    };

                    let response = egui::Frame::popup(ui.style())
                        .fill(fill)
                        .show(ui, |ui| {
                            ui.set_width(TOAST_WIDTH);
                            ui.label(RichText::new(&toast.title).strong().color(accent));
                            if !toast.description.is_empty() {
                                ui.label(RichText::new(&toast.description).color(accent));
                            }
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(idx);
                    }
                    ui.add_space(6.0);
                }
            });

        if let Some(idx) = dismissed {
            self.items.remove(idx);
        }
        // Keep frames coming so expired toasts disappear on time.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
