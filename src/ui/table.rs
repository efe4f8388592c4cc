use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Dataset;

const ROW_HEIGHT: f32 = 18.0;

/// Render a striped, scrollable preview of `dataset`.
pub fn preview(ui: &mut Ui, id: impl std::hash::Hash, dataset: &Dataset) {
    if dataset.width() == 0 {
        ui.weak("No columns selected.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(TableColumn::auto().at_least(60.0), dataset.width())
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    for column in dataset.columns() {
                        header.col(|ui: &mut Ui| {
                            ui.strong(&column.name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, dataset.row_count(), |mut row| {
                        let index = row.index();
                        for column in dataset.columns() {
                            row.col(|ui: &mut Ui| {
                                let value = &column.values[index];
                                if value.is_null() {
                                    ui.weak(value.to_string());
                                } else {
                                    ui.label(value.to_string());
                                }
                            });
                        }
                    });
                });
        });
    });
}
