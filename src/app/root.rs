use {
    anyhow::{Context as _, anyhow},
    chrono::NaiveDate,
    eframe::{
        Frame, Storage,
        egui::{CentralPanel, Context, RichText, ScrollArea, SidePanel, Ui, Visuals},
    },
    poll_promise::Promise,
    serde::{Deserialize, Serialize},
    std::{
        mem,
        path::{Path, PathBuf},
        sync::{Arc, Mutex},
    },
};

use crate::{
    Cli,
    analysis::{
        cached_customer_alive_path, customer_metrics, monthly_purchase_history,
    },
    app::{
        AppState, CustomerView, FailedState, LoadOutcome, LoadedData, LoadingState, RunningState,
        phases::PhaseView,
    },
    config::{DASHBOARD, DF, MODEL, PERSISTENCE},
    data::{AlivePathCache, DataVersion, ModelCache, load_dataset},
    domain::BucketWidth,
    ui::{
        CustomerInfoPanel, Panel, SidebarEvent, SidebarPanel, UI_CONFIG, UI_TEXT,
        render_alive_plot, render_failed, render_history_plots, render_loading,
    },
    utils::AppInstant,
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub(crate) start_date: NaiveDate, // persists across sessions.
    pub(crate) selected_customer: Option<String>,
    #[serde(skip)]
    pub(crate) data_dir: PathBuf,
    #[serde(skip)]
    pub(crate) penalizer_coef: f64,
    #[serde(skip)]
    pub(crate) bucket_width: BucketWidth,
    #[serde(skip)]
    pub(crate) model_cache: Arc<Mutex<ModelCache>>,
    #[serde(skip)]
    pub(crate) alive_cache: AlivePathCache,
    #[serde(skip)]
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self {
            start_date: DASHBOARD.start_time.default,
            selected_customer: None,
            data_dir: PathBuf::from(PERSISTENCE.data.directory),
            penalizer_coef: MODEL.penalizer_coef,
            bucket_width: MODEL.time_unit,
            model_cache: Arc::new(Mutex::new(ModelCache::new())),
            alive_cache: AlivePathCache::new(),
            state: AppState::default(),
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        let bounds = &DASHBOARD.start_time;
        app.start_date = app.start_date.clamp(bounds.min, bounds.max);
        app.data_dir = args.data_dir;
        app.penalizer_coef = args.penalizer;
        app.state = AppState::Idle;
        app
    }

    fn start_loading(&self) -> AppState {
        let data_dir = self.data_dir.clone();
        let penalizer = self.penalizer_coef;
        let model_cache = Arc::clone(&self.model_cache);

        if DF.log_data_load {
            log::info!("Loading customer data from {}", data_dir.display());
        }
        let promise = Promise::spawn_thread("load_dataset", move || {
            load_and_fit(&data_dir, penalizer, &model_cache)
        });
        AppState::Loading(LoadingState {
            promise,
            started: AppInstant::now(),
        })
    }

    pub(crate) fn tick_loading_state(&mut self, ctx: &Context, state: LoadingState) -> AppState {
        let LoadingState { promise, started } = state;
        match promise.try_take() {
            Ok(Ok(data)) => {
                if DF.log_data_load {
                    log::info!(
                        "Dataset {} ready after {:.2?}",
                        data.dataset.version,
                        started.elapsed()
                    );
                }
                self.alive_cache.sync_version(data.dataset.version);
                ctx.request_repaint();
                AppState::Running(RunningState::new(data))
            }
            Ok(Err(err)) => {
                log::error!("Failed to load dashboard data: {:#}", err);
                AppState::Failed(FailedState {
                    message: format!("{:#}", err),
                })
            }
            Err(promise) => {
                render_loading(ctx, started.elapsed());
                ctx.request_repaint();
                AppState::Loading(LoadingState { promise, started })
            }
        }
    }

    pub(crate) fn tick_failed_state(&mut self, ctx: &Context, state: FailedState) -> AppState {
        if render_failed(ctx, &state.message) {
            AppState::Idle
        } else {
            AppState::Failed(state)
        }
    }

    pub(crate) fn tick_running_state(&mut self, ctx: &Context, mut state: RunningState) -> AppState {
        state.rerank(self.start_date);
        self.ensure_valid_selection(&state);
        self.refresh_customer_view(&mut state);

        let events = SidePanel::left("parameters")
            .frame(UI_CONFIG.side_panel_frame())
            .default_width(UI_CONFIG.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .show(ui, |ui| {
                        SidebarPanel::new(
                            &state.key_clients,
                            self.start_date,
                            self.selected_customer.as_deref(),
                        )
                        .render(ui)
                    })
                    .inner
            })
            .inner;

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    render_customer_view(ui, self.selected_customer.as_deref(), &state);
                });
            });

        for event in events {
            match event {
                SidebarEvent::StartDateChanged(date) => {
                    self.start_date = date;
                }
                SidebarEvent::CustomerSelected(id) => {
                    if DF.log_selection {
                        log::info!("Selected customer {}", id);
                    }
                    self.selected_customer = Some(id);
                }
                SidebarEvent::ReloadRequested => {
                    if self.data_changed(&state) {
                        return AppState::Idle;
                    }
                }
            }
        }
        AppState::Running(state)
    }

    /// Keep the selection inside the ranked table, falling back to the top row.
    fn ensure_valid_selection(&mut self, state: &RunningState) {
        let still_ranked = self
            .selected_customer
            .as_deref()
            .is_some_and(|id| state.is_ranked(id));
        if !still_ranked {
            self.selected_customer = state.key_clients.first().map(|c| c.customer_id.clone());
        }
    }

    fn refresh_customer_view(&mut self, state: &mut RunningState) {
        let Some(id) = self.selected_customer.as_deref() else {
            state.view = None;
            return;
        };
        if state.view_for(id).is_some() {
            return;
        }

        let dataset = &state.data.dataset;
        let alive = cached_customer_alive_path(
            &mut self.alive_cache,
            dataset,
            state.data.model.as_ref(),
            id,
            self.bucket_width,
        )
        .map_err(|e| {
            log::warn!("No alive path for customer {}: {}", id, e);
            e.to_string()
        });
        if DF.log_cache {
            log::info!("Alive path cache: {:?}", self.alive_cache.stats());
        }

        state.view = Some(CustomerView {
            customer_id: id.to_string(),
            cards: customer_metrics(dataset, id).unwrap_or_default(),
            alive,
            history: monthly_purchase_history(dataset.orders_of(id)),
        });
    }

    fn data_changed(&self, state: &RunningState) -> bool {
        match DataVersion::of_dir(&self.data_dir) {
            Ok(version) if version == state.data.dataset.version => {
                log::info!("Data unchanged ({}), keeping the fitted model", version);
                false
            }
            Ok(version) => {
                log::info!("Data changed to version {}, reloading", version);
                true
            }
            Err(err) => {
                log::warn!("Could not hash data files: {:#}", err);
                true
            }
        }
    }
}

fn render_customer_view(ui: &mut Ui, selected: Option<&str>, state: &RunningState) {
    ui.heading(RichText::new(UI_TEXT.cp_title).size(28.0).strong());
    ui.add_space(8.0);

    let Some(view) = selected.and_then(|id| state.view_for(id)) else {
        ui.label(UI_TEXT.cp_select_customer);
        return;
    };
    let id = view.customer_id.as_str();

    CustomerInfoPanel::new(id, &view.cards).render(ui);
    ui.add_space(16.0);

    ui.label(
        RichText::new(format!(
            "{} {} {}",
            UI_TEXT.cp_alive_prefix, id, UI_TEXT.cp_alive_suffix
        ))
        .size(18.0)
        .color(UI_CONFIG.colors.heading),
    );
    ui.label(RichText::new(UI_TEXT.plot_alive_title).strong());
    match &view.alive {
        Ok(series) => render_alive_plot(ui, id, series),
        Err(message) => {
            ui.colored_label(ui.visuals().warn_fg_color, message);
        }
    }
    ui.add_space(16.0);

    ui.label(
        RichText::new(format!("{} {}:", UI_TEXT.cp_history_prefix, id))
            .size(18.0)
            .color(UI_CONFIG.colors.heading),
    );
    if view.history.is_empty() {
        ui.label(UI_TEXT.cp_no_history);
    } else {
        render_history_plots(ui, id, &view.history);
    }
}

/// Read both CSV files and fit the model, reusing the cached fit when the data is unchanged.
fn load_and_fit(
    data_dir: &Path,
    penalizer_coef: f64,
    model_cache: &Mutex<ModelCache>,
) -> LoadOutcome {
    let dataset = load_dataset(data_dir)?;
    let model = {
        let mut cache = model_cache
            .lock()
            .map_err(|_| anyhow!("model cache lock poisoned"))?;
        cache
            .get_or_fit(&dataset, penalizer_coef)
            .with_context(|| format!("Failed to fit churn model on {}", data_dir.display()))?
    };
    Ok(LoadedData {
        dataset: Arc::new(dataset),
        model,
    })
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Idle => self.start_loading(),
            AppState::Loading(s) => s.tick(self, ctx),
            AppState::Running(s) => s.tick(self, ctx),
            AppState::Failed(s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        if DF.log_selection {
            log::info!(
                "SAVE [App]: start date {}, customer {:?}",
                self.start_date,
                self.selected_customer
            );
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
}
