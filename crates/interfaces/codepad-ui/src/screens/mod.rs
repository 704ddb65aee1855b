pub mod editor;
pub mod home;
pub mod login;
pub mod register;

use egui_taffy::taffy;
use egui_taffy::taffy::prelude::{auto, length, percent};

/// Centered, fixed-width column used by the guest screens.
pub(crate) fn card_style() -> taffy::Style {
    taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(12.0),
        padding: length(24.0),
        size: taffy::Size {
            width: length(360.0),
            height: auto(),
        },
        max_size: taffy::Size {
            width: percent(1.),
            height: auto(),
        },
        ..Default::default()
    }
}

pub(crate) fn centered() -> taffy::Style {
    taffy::Style {
        flex_grow: 1.0,
        justify_content: Some(taffy::JustifyContent::Center),
        align_items: Some(taffy::AlignItems::Center),
        size: percent(1.),
        ..Default::default()
    }
}
