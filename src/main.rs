#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // Windows release: hide console window
use {
    churn_radar::{Cli, PERSISTENCE, run_app},
    clap::Parser,
    eframe::NativeOptions,
    std::{panic, path::PathBuf},
};

fn main() -> eframe::Result {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("churn_radar"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(PERSISTENCE.app.state_path)),
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title("Churn Radar - Churn prediction"),
        ..Default::default()
    };

    eframe::run_native(
        "Churn Radar",
        options,
        Box::new(move |cc| Ok(Box::new(run_app(cc, args)))),
    )
}
