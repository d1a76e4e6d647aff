use eframe::egui::{self, Color32, RichText, Ui};

use crate::dashboard::OutputId;
use crate::data::filter::SiteSelector;
use crate::state::AppState;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    let current = state.inputs.site.clone();
    let selected_text = state
        .layout
        .site_options
        .iter()
        .find(|opt| SiteSelector::from(opt.value.as_str()) == current)
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| current.to_string());

    let mut picked: Option<SiteSelector> = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &state.layout.site_options {
                let value = SiteSelector::from(opt.value.as_str());
                if ui
                    .selectable_label(value == current, opt.label.as_str())
                    .clicked()
                {
                    picked = Some(value);
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }

    ui.add_space(12.0);
    ui.strong("Payload range (Kg)");

    let slider = state.layout.payload_slider.clone();
    let mut low = state.inputs.payload.low;
    let mut high = state.inputs.payload.high;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .text("max"),
        )
        .changed();
    if low_changed {
        state.set_payload_range(low, high.max(low));
    } else if high_changed {
        state.set_payload_range(low.min(high), high);
    }

    ui.separator();
    let shown = state
        .figure(OutputId::PayloadScatter)
        .map(|f| f.point_count())
        .unwrap_or(0);
    ui.label(format!(
        "{} launches loaded, {shown} in payload range",
        state.dashboard.dataset().len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the page title.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&state.layout.title)
                .size(32.0)
                .strong()
                .color(TITLE_COLOR),
        );
    });
}
