use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::generate_palette;
use crate::data::chart::bar_series;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Bar chart of the first numeric columns
// ---------------------------------------------------------------------------

/// Render grouped bars keyed by row position.
pub fn bar_chart(ui: &mut Ui, id: &str, dataset: &Dataset) {
    let series = bar_series(dataset);
    if series.is_empty() {
        ui.label("No numeric columns to chart.");
        return;
    }

    let colors = generate_palette(series.len());
    let group_width = 0.8;
    let bar_width = group_width / series.len() as f64;

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Row")
        .height(280.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, (s, color)) in series.iter().zip(colors).enumerate() {
                // Centre each group of bars on its row position.
                let offset = -group_width / 2.0 + bar_width * (i as f64 + 0.5);
                let bars: Vec<Bar> = s
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(row, v)| {
                        v.map(|value| Bar::new(row as f64 + offset, value).width(bar_width))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&s.name).color(color));
            }
        });
}
