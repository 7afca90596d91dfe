use {
    crate::{
        analysis::MetricCard,
        config::PLOT_CONFIG,
        ui::UI_CONFIG,
    },
    colorgrad::Gradient,
    eframe::egui::{Color32, RichText, Ui},
    std::sync::LazyLock,
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

static CHURN_GRADIENT: LazyLock<Option<colorgrad::LinearGradient>> = LazyLock::new(|| {
    colorgrad::GradientBuilder::new()
        .html_colors(PLOT_CONFIG.churn_gradient_colors)
        .build::<colorgrad::LinearGradient>()
        .map_err(|e| log::error!("Failed to build churn gradient: {}", e))
        .ok()
});

/// Background for a churn probability cell: green at 0, red at 1.
pub fn churn_color(probability: f64) -> Color32 {
    match CHURN_GRADIENT.as_ref() {
        Some(grad) => to_egui_color(grad.at(probability.clamp(0.0, 1.0) as f32)),
        None => PLOT_CONFIG.color_text_subdued,
    }
}

/// Dark or light text, whichever reads better on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

pub fn get_delta_color(delta: f64) -> Color32 {
    if delta > 0.0 {
        PLOT_CONFIG.color_above_mean
    } else if delta < 0.0 {
        PLOT_CONFIG.color_below_mean
    } else {
        PLOT_CONFIG.color_text_subdued
    }
}

fn to_egui_color(colorgrad_color: colorgrad::Color) -> Color32 {
    let rgba8 = colorgrad_color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba8[0], rgba8[1], rgba8[2], 255)
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn label_subheader(&mut self, text: impl Into<String>);
    /// Metric tile: small label, large value, coloured delta underneath.
    fn metric_card(&mut self, card: &MetricCard);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn metric_card(&mut self, card: &MetricCard) {
        UI_CONFIG.card_frame().show(self, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label_subdued(card.kind.to_string());
            ui.label(
                RichText::new(card.value_text())
                    .size(26.0)
                    .strong()
                    .color(PLOT_CONFIG.color_text_neutral),
            );
            let arrow = if card.is_above_mean() { "\u{2191}" } else { "\u{2193}" };
            ui.label(
                RichText::new(format!("{} {}", arrow, card.delta_text()))
                    .small()
                    .color(get_delta_color(card.delta)),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_gradient_runs_green_to_red() {
        let low = churn_color(0.0);
        let high = churn_color(1.0);
        assert!(low.g() > low.r());
        assert!(high.r() > high.g());
        // Clamped outside [0, 1]
        assert_eq!(churn_color(-3.0), low);
        assert_eq!(churn_color(7.0), high);
    }

    #[test]
    fn contrast_text_flips_on_bright_backgrounds() {
        assert_eq!(contrast_text(Color32::from_rgb(255, 255, 191)), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(0, 104, 55)), Color32::WHITE);
    }
}
