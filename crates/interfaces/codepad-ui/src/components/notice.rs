use crate::theme::*;
use eframe::egui;
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use codepad_app_core::{Notification, NotificationLevel};

/// Banner for the current notification. Returns true when dismissed.
pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, notification: &Notification) -> bool {
    let color = match notification.level {
        NotificationLevel::Info => COL_INFO,
        NotificationLevel::Success => COL_SUCCESS,
        NotificationLevel::Error => COL_DANGER,
    };

    let mut dismissed = false;
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Center),
        padding: length(6.0),
        size: taffy::Size {
            width: percent(1.),
            height: auto(),
        },
        flex_shrink: 0.0,
        ..Default::default()
    })
    .add(|tui| {
        tui.colored_label(color, &notification.message);
        dismissed = tui.ui(|ui| ui.small_button("✕")).clicked();
    });
    dismissed
}
