use egui::{Align2, Color32, Context, Frame, RichText, Vec2};

/// How long a toast stays on screen, in seconds
pub const TOAST_DURATION: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    fn fill(self) -> Color32 {
        match self {
            Self::Success => Color32::from_rgb(0x10, 0xB9, 0x81),
            Self::Info => Color32::from_rgb(0x3B, 0x82, 0xF6),
            Self::Error => Color32::from_rgb(0xEF, 0x44, 0x44),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// `egui` input time at which the toast was raised
    pub created_at: f64,
}

/// Short-lived notifications stacked in the bottom right corner
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: f64) {
        let message = message.into();
        match kind {
            ToastKind::Error => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }
        self.items.push(Toast {
            kind,
            message,
            created_at: now,
        });
    }

    /// Drop toasts older than [`TOAST_DURATION`]
    pub fn expire(&mut self, now: f64) {
        self.items
            .retain(|toast| now - toast.created_at < TOAST_DURATION);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn show(&mut self, ctx: &Context) {
        let now = ctx.input(|i| i.time);
        self.expire(now);
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -16.0))
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.items {
                    Frame::none()
                        .fill(toast.kind.fill())
                        .rounding(6.0)
                        .inner_margin(Vec2::new(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.label(RichText::new(&toast.message).color(Color32::WHITE));
                        });
                    ui.add_space(6.0);
                }
            });

        // Keep repainting so toasts disappear on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
