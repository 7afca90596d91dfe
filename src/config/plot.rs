//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// P(alive) curve
    pub alive_line_color: Color32,
    pub alive_line_width: f32,
    /// Vertical purchase markers on the alive chart
    pub purchase_marker_color: Color32,
    pub purchase_marker_width: f32,
    pub purchase_marker_dash: f32,

    /// Monthly purchase history
    pub amount_spent_color: Color32,
    pub quantity_color: Color32,
    pub history_line_width: f32,

    pub plot_background: Color32,
    pub alive_plot_height: f32,
    pub history_plot_height: f32,

    /// Reversed red-yellow-green, low churn probability first
    pub churn_gradient_colors: &'static [&'static str],

    pub color_above_mean: Color32,
    pub color_below_mean: Color32,
    pub color_text_neutral: Color32,
    pub color_text_subdued: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    alive_line_color: Color32::from_rgb(0x28, 0xba, 0x73),
    alive_line_width: 3.0,
    purchase_marker_color: Color32::from_rgb(0x6e, 0x6f, 0x73),
    purchase_marker_width: 1.0,
    purchase_marker_dash: 4.0,

    amount_spent_color: Color32::from_rgb(0x28, 0xba, 0x73),
    quantity_color: Color32::from_rgb(0xd4, 0xdf, 0x33),
    history_line_width: 2.0,

    plot_background: Color32::from_rgb(0xf2, 0xf2, 0xf2),
    alive_plot_height: 320.0,
    history_plot_height: 180.0,

    churn_gradient_colors: &[
        "#006837", "#1a9850", "#66bd63", "#a6d96a", "#d9ef8b", "#ffffbf", "#fee08b",
        "#fdae61", "#f46d43", "#d73027", "#a50026",
    ],

    color_above_mean: Color32::from_rgb(100, 255, 100),
    color_below_mean: Color32::from_rgb(255, 80, 80),
    color_text_neutral: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,
};
