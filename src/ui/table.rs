use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::preprocess::StudentDataset;

/// Table of the filtered rows: a row-number column, then every column of
/// the dataset.
pub fn data_table(ui: &mut Ui, dataset: &StudentDataset, rows: &[usize]) {
    ui.heading("Filtered Data Table");

    let columns = dataset.columns();

    ScrollArea::horizontal()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto())
                .columns(Column::auto().at_least(60.0).clip(true), columns.len())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let index = rows[row.index()];
                        let record = &dataset.records()[index];
                        row.col(|ui| {
                            ui.label(index.to_string());
                        });
                        for col in columns {
                            row.col(|ui| {
                                ui.label(record.get(col).to_string());
                            });
                        }
                    });
                });
        });
}
