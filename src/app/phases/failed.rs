use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::FailedState};

impl PhaseView for FailedState {
    fn tick(self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_failed_state(ctx, self)
    }
}
