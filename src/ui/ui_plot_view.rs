use {
    crate::{
        analysis::MonthlyPurchases,
        config::PLOT_CONFIG,
        models::CustomerLifetimeSeries,
        ui::UI_TEXT,
        utils::{TimeUtils, get_max},
    },
    chrono::{Datelike, NaiveDate},
    eframe::egui::{Frame, Id, Margin, Ui, Vec2b},
    egui_plot::{Axis, AxisHints, HLine, Legend, Line, LineStyle, Plot, PlotPoints, VLine},
};

/// P(alive) over the customer's lifetime, one dashed marker per purchase bucket.
pub(crate) fn render_alive_plot(ui: &mut Ui, customer_id: &str, series: &CustomerLifetimeSeries) {
    let purchase_x: Vec<f64> = series.purchase_buckets().map(|t| t as f64).collect();
    let points = series.points();
    let x_axis = bucket_axis(series);

    plot_frame().show(ui, |ui| {
        Plot::new(("alive_plot", customer_id))
            .height(PLOT_CONFIG.alive_plot_height)
            .custom_x_axes(vec![x_axis])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.plot_alive_y)
                    .formatter(|mark, _range| format!("{:.1}", mark.value)),
            ])
            .include_y(0.0)
            .include_y(1.0)
            .include_x(0.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_double_click_reset(true)
            .show(ui, |plot_ui| {
                for (i, x) in purchase_x.iter().enumerate() {
                    // Only the first marker gets a legend entry
                    let name = if i == 0 { UI_TEXT.plot_purchases_series } else { "" };
                    plot_ui.vline(
                        VLine::new(name, *x)
                            .color(PLOT_CONFIG.purchase_marker_color)
                            .width(PLOT_CONFIG.purchase_marker_width)
                            .style(LineStyle::Dashed {
                                length: PLOT_CONFIG.purchase_marker_dash,
                            }),
                    );
                }
                plot_ui.hline(
                    HLine::new("", 0.0)
                        .color(PLOT_CONFIG.purchase_marker_color)
                        .width(0.5),
                );
                plot_ui.line(
                    Line::new(UI_TEXT.plot_alive_series, PlotPoints::new(points))
                        .color(PLOT_CONFIG.alive_line_color)
                        .width(PLOT_CONFIG.alive_line_width),
                );
            });
    });
}

/// Monthly spend and quantity, stacked with a shared x axis.
pub(crate) fn render_history_plots(ui: &mut Ui, customer_id: &str, history: &[MonthlyPurchases]) {
    let link_group = Id::new(("purchase_history", customer_id));
    let amount: Vec<[f64; 2]> = history
        .iter()
        .map(|m| [month_index(m.month), m.total_revenue])
        .collect();
    let quantity: Vec<[f64; 2]> = history
        .iter()
        .map(|m| [month_index(m.month), m.quantity])
        .collect();

    for (title, points, color) in [
        (UI_TEXT.plot_amount_spent, amount, PLOT_CONFIG.amount_spent_color),
        (UI_TEXT.plot_quantity, quantity, PLOT_CONFIG.quantity_color),
    ] {
        let values: Vec<f64> = points.iter().map(|p| p[1]).collect();
        let y_top = get_max(&values).unwrap_or(1.0).max(1.0) * 1.1;

        plot_frame().show(ui, |ui| {
            Plot::new(("history_plot", title, customer_id))
                .height(PLOT_CONFIG.history_plot_height)
                .link_axis(link_group, Vec2b::new(true, false))
                .link_cursor(link_group, Vec2b::new(true, false))
                .custom_x_axes(vec![month_axis()])
                .custom_y_axes(vec![AxisHints::new_y().label(title)])
                .include_y(0.0)
                .include_y(y_top)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(title, PlotPoints::new(points))
                            .color(color)
                            .width(PLOT_CONFIG.history_line_width),
                    );
                });
        });
    }
}

fn plot_frame() -> Frame {
    Frame {
        fill: PLOT_CONFIG.plot_background,
        inner_margin: Margin::same(4),
        ..Default::default()
    }
}

// Bucket index on the x axis, labelled with the calendar date it starts on
fn bucket_axis(series: &CustomerLifetimeSeries) -> AxisHints<'static> {
    let origin = series.origin;
    let width = series.bucket_width;
    AxisHints::new(Axis::X)
        .label(width.unit_label())
        .formatter(move |mark, _range| {
            if mark.value < 0.0 || mark.value.fract() != 0.0 {
                return String::new();
            }
            width
                .bucket_start(origin, mark.value as usize)
                .map(|dt| TimeUtils::date_string(&dt))
                .unwrap_or_default()
        })
}

fn month_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_month)
        .formatter(|mark, _range| {
            if mark.value.fract() != 0.0 {
                return String::new();
            }
            month_from_index(mark.value as i64)
                .map(|d| d.format(TimeUtils::MONTH_FORMAT).to_string())
                .unwrap_or_default()
        })
}

fn month_index(month: NaiveDate) -> f64 {
    (month.year() as i64 * 12 + month.month0() as i64) as f64
}

fn month_from_index(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_index_is_contiguous_across_years() {
        let dec = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
        let jan = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(month_index(jan) - month_index(dec), 1.0);
        assert_eq!(month_from_index(month_index(jan) as i64), Some(jan));
        assert_eq!(month_from_index(month_index(dec) as i64), Some(dec));
    }
}
