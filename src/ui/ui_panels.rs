use {
    crate::{
        analysis::{KeyClient, MetricCard},
        config::{DASHBOARD, StartTimeSlider},
        ui::{
            UI_CONFIG, UI_TEXT,
            styles::{UiStyleExt, churn_color, colored_subsection_heading, contrast_text},
        },
        utils::{TimeUtils, format_thousands},
    },
    chrono::{Days, NaiveDate},
    eframe::egui::{Align, ComboBox, Layout, RichText, Slider, Ui},
    egui_extras::{Column, TableBuilder},
};

pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SidebarEvent {
    StartDateChanged(NaiveDate),
    CustomerSelected(String),
    ReloadRequested,
}

/// Filters, ranked key clients and the customer picker.
pub(crate) struct SidebarPanel<'a> {
    key_clients: &'a [KeyClient],
    start_date: NaiveDate,
    selected_customer: Option<&'a str>,
}

impl<'a> SidebarPanel<'a> {
    pub(crate) fn new(
        key_clients: &'a [KeyClient],
        start_date: NaiveDate,
        selected_customer: Option<&'a str>,
    ) -> Self {
        Self {
            key_clients,
            start_date,
            selected_customer,
        }
    }

    fn render_start_slider(&mut self, ui: &mut Ui, events: &mut Vec<SidebarEvent>) {
        let bounds = &DASHBOARD.start_time;
        let span = slider_span(bounds);
        let mut offset = slider_offset(bounds, self.start_date);

        ui.label(colored_subsection_heading(UI_TEXT.sb_start_time));
        let response = ui.add(
            Slider::new(&mut offset, 0..=span).custom_formatter(move |n, _| {
                slider_date(&DASHBOARD.start_time, n as u64)
                    .format(TimeUtils::STANDARD_DATE_FORMAT)
                    .to_string()
            }),
        );
        if response.changed() {
            let date = slider_date(bounds, offset);
            if date != self.start_date {
                self.start_date = date;
                events.push(SidebarEvent::StartDateChanged(date));
            }
        }
    }

    fn render_key_clients(&self, ui: &mut Ui, events: &mut Vec<SidebarEvent>) {
        ui.label_subheader(UI_TEXT.sb_key_clients);
        ui.collapsing(UI_TEXT.sb_explanation, |ui| {
            ui.label(UI_TEXT.sb_explanation_body);
        });

        if self.key_clients.is_empty() {
            ui.label_subdued(UI_TEXT.sb_no_clients);
            return;
        }

        let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 4.0;
        let max_height = row_height * DASHBOARD.key_clients_visible_rows as f32;

        TableBuilder::new(ui)
            .id_salt("key_clients")
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder())
            .max_scroll_height(max_height)
            .sense(eframe::egui::Sense::click())
            .header(row_height, |mut header| {
                header.col(|ui| {
                    ui.strong(UI_TEXT.sb_col_customer);
                });
                header.col(|ui| {
                    ui.strong(UI_TEXT.sb_col_monthly);
                });
                header.col(|ui| {
                    ui.strong(UI_TEXT.sb_col_churn);
                });
            })
            .body(|body| {
                body.rows(row_height, self.key_clients.len(), |mut row| {
                    let client = &self.key_clients[row.index()];
                    row.set_selected(self.selected_customer == Some(client.customer_id.as_str()));
                    row.col(|ui| {
                        ui.label(&client.customer_id);
                    });
                    row.col(|ui| {
                        ui.label(format_thousands(client.monthly_expenses));
                    });
                    row.col(|ui| {
                        let fill = churn_color(client.churn_probability);
                        ui.painter().rect_filled(ui.max_rect(), 0.0, fill);
                        ui.label(
                            RichText::new(format!("{:.6}", client.churn_probability))
                                .color(contrast_text(fill)),
                        );
                    });
                    if row.response().clicked() {
                        events.push(SidebarEvent::CustomerSelected(client.customer_id.clone()));
                    }
                });
            });
    }

    fn render_customer_picker(&self, ui: &mut Ui, events: &mut Vec<SidebarEvent>) {
        ui.add_space(8.0);
        ui.label(colored_subsection_heading(UI_TEXT.sb_select_customer));
        let current = self.selected_customer.unwrap_or_default().to_string();
        ComboBox::from_id_salt("select_customer")
            .selected_text(current.clone())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for client in self.key_clients {
                    let id = client.customer_id.as_str();
                    if ui.selectable_label(id == current, id).clicked() && id != current {
                        events.push(SidebarEvent::CustomerSelected(id.to_string()));
                    }
                }
            });
    }
}

impl Panel for SidebarPanel<'_> {
    type Event = SidebarEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.heading(UI_TEXT.sb_title);
        ui.add_space(6.0);

        self.render_start_slider(ui, &mut events);
        ui.separator();
        self.render_key_clients(ui, &mut events);
        self.render_customer_picker(ui, &mut events);

        ui.add_space(12.0);
        if ui.button(UI_TEXT.sb_reload).clicked() {
            events.push(SidebarEvent::ReloadRequested);
        }
        events
    }
}

/// Four headline cards in a row, with the footnote underneath.
pub(crate) struct CustomerInfoPanel<'a> {
    customer_id: &'a str,
    cards: &'a [MetricCard],
}

impl<'a> CustomerInfoPanel<'a> {
    pub(crate) fn new(customer_id: &'a str, cards: &'a [MetricCard]) -> Self {
        Self { customer_id, cards }
    }
}

impl Panel for CustomerInfoPanel<'_> {
    type Event = ();

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        ui.label(
            RichText::new(format!("Customer {} {}", self.customer_id, UI_TEXT.cp_customer_info))
                .size(18.0)
                .color(UI_CONFIG.colors.heading),
        );
        ui.columns(self.cards.len().max(1), |columns| {
            for (column, card) in columns.iter_mut().zip(self.cards) {
                column.metric_card(card);
            }
        });
        ui.label_subdued(UI_TEXT.cp_vs_average);
        Vec::new()
    }
}

fn slider_span(bounds: &StartTimeSlider) -> u64 {
    bounds
        .max
        .signed_duration_since(bounds.min)
        .num_days()
        .max(0) as u64
}

fn slider_offset(bounds: &StartTimeSlider, date: NaiveDate) -> u64 {
    let clamped = date.clamp(bounds.min, bounds.max);
    clamped.signed_duration_since(bounds.min).num_days().max(0) as u64
}

fn slider_date(bounds: &StartTimeSlider, offset: u64) -> NaiveDate {
    bounds
        .min
        .checked_add_days(Days::new(offset))
        .map_or(bounds.max, |d| d.min(bounds.max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_offsets_map_back_to_dates() {
        let bounds = &DASHBOARD.start_time;
        let span = slider_span(bounds);
        assert_eq!(span, 730);
        assert_eq!(slider_date(bounds, 0), bounds.min);
        assert_eq!(slider_date(bounds, span), bounds.max);
        let offset = slider_offset(bounds, bounds.default);
        assert_eq!(slider_date(bounds, offset), bounds.default);
    }

    #[test]
    fn slider_clamps_out_of_range_dates() {
        let bounds = &DASHBOARD.start_time;
        let early = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        assert_eq!(slider_offset(bounds, early), 0);
        assert_eq!(slider_date(bounds, 10_000), bounds.max);
    }
}
