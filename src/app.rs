use eframe::egui;

use crate::dashboard::{Dashboard, OutputId};
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            state: AppState::new(dashboard),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: dropdown and sliders ----
        egui::SidePanel::left("input_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let height = ((ui.available_height() - 60.0) / 2.0).max(120.0);
            if let Some(fig) = self.state.figure(OutputId::SuccessPie) {
                plot::figure_plot(ui, "success-pie-chart", fig, height);
            }
            ui.separator();
            if let Some(fig) = self.state.figure(OutputId::PayloadScatter) {
                plot::figure_plot(ui, "success-payload-scatter-chart", fig, height);
            }
        });
    }
}

/// Open the native window and block until it closes.
pub fn run(dashboard: Dashboard) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("desktop view failed: {e}"))
}
