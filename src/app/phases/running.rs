use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::RunningState};

impl PhaseView for RunningState {
    fn tick(self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_running_state(ctx, self)
    }
}
