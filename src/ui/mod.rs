mod screens;
mod styles;
mod ui_config;
mod ui_panels;
mod ui_plot_view;
mod ui_text;

pub(crate) use screens::{render_failed, render_loading};

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_panels::{CustomerInfoPanel, Panel, SidebarEvent, SidebarPanel};
pub(crate) use ui_plot_view::{render_alive_plot, render_history_plots};
