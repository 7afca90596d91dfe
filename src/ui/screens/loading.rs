use {
    crate::{
        config::PLOT_CONFIG,
        config::PERSISTENCE,
        ui::UI_TEXT,
    },
    eframe::egui::{CentralPanel, Context, RichText, Spinner},
    std::time::Duration,
};

pub(crate) fn render_loading(ctx: &Context, elapsed: Duration) {
    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(
                RichText::new(UI_TEXT.ls_title)
                    .size(24.0)
                    .strong()
                    .color(PLOT_CONFIG.alive_line_color),
            );
            ui.add_space(20.0);
            ui.add(Spinner::new().size(32.0));
            ui.add_space(10.0);
            ui.label(
                RichText::new(UI_TEXT.ls_loading)
                    .italics()
                    .color(PLOT_CONFIG.color_text_neutral),
            );
            ui.label(
                RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                    .small()
                    .color(PLOT_CONFIG.color_text_subdued),
            );
        });
    });
}

/// Error screen. Returns true when the user asked to retry.
pub(crate) fn render_failed(ctx: &Context, message: &str) -> bool {
    let mut retry = false;
    CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(
                RichText::new(UI_TEXT.ls_failed)
                    .size(24.0)
                    .strong()
                    .color(PLOT_CONFIG.color_below_mean),
            );
            ui.add_space(10.0);
            ui.label(RichText::new(message).monospace());
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!(
                    "Expected {} and {} in the data directory",
                    PERSISTENCE.data.orders_file, PERSISTENCE.data.customers_file
                ))
                .small()
                .color(PLOT_CONFIG.color_text_subdued),
            );
            ui.add_space(20.0);
            retry = ui.button(UI_TEXT.ls_retry).clicked();
        });
    });
    retry
}
