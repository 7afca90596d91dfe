use eframe::egui::{Color32, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card_background: Color32,
    pub card_border: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::WHITE,
        subsection_heading: Color32::from_rgb(0x28, 0xba, 0x73),
        central_panel: Color32::from_rgb(30, 30, 30),
        side_panel: Color32::from_rgb(25, 25, 25),
        card_background: Color32::from_black_alpha(40),
        card_border: Color32::from_gray(60),
    },
    side_panel_width: 320.0,
};

impl UiConfig {
    /// Frame for the sidebar (Standard padding)
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(12),
            ..Default::default()
        }
    }

    /// Frame around a single metric card
    pub fn card_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card_background,
            stroke: Stroke::new(1.0, self.colors.card_border),
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }
}
