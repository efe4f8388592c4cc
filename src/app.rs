use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, views, Pending};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DataSweeperApp {
    pub state: AppState,
}

impl eframe::App for DataSweeperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut pending = Pending::default();

        // ---- Top panel: menu bar and notices ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut pending);
        });

        // ---- Left side panel: navigation and feedback ----
        egui::SidePanel::left("navigation_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &mut pending);
            });

        // ---- Central panel: active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            views::central_panel(ui, &self.state, &mut pending);
        });

        // Widgets only record intents; state changes happen here, once per frame.
        for action in pending.actions {
            self.state.apply(action);
        }
        for notice in pending.notices {
            self.state.notify(notice);
        }
    }
}
