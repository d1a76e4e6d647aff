use std::collections::BTreeMap;

use crate::chart::figure::Figure;
use crate::dashboard::{Dashboard, InputId, Inputs, LayoutSpec, OutputId};
use crate::data::filter::SiteSelector;

// ---------------------------------------------------------------------------
// Desktop application state
// ---------------------------------------------------------------------------

/// The desktop UI state, independent of rendering.
pub struct AppState {
    pub dashboard: Dashboard,

    /// Controls description (dropdown options, slider bounds).
    pub layout: LayoutSpec,

    /// Current widget values.
    pub inputs: Inputs,

    /// Last rendered figure per output.
    pub figures: BTreeMap<OutputId, Figure>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        let layout = dashboard.layout();
        let inputs = layout.initial.clone();
        let figures = dashboard.render_all(&inputs);
        Self {
            dashboard,
            layout,
            inputs,
            figures,
        }
    }

    pub fn figure(&self, output: OutputId) -> Option<&Figure> {
        self.figures.get(&output)
    }

    /// Select a site in the dropdown.
    pub fn set_site(&mut self, site: SiteSelector) {
        if self.inputs.site == site {
            return;
        }
        self.inputs.site = site;
        self.apply(InputId::SiteDropdown);
    }

    /// Move the payload sliders. The low handle never passes the high one.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let slider = &self.layout.payload_slider;
        let high = high.clamp(slider.min, slider.max);
        let low = low.clamp(slider.min, high);
        if self.inputs.payload.low == low && self.inputs.payload.high == high {
            return;
        }
        self.inputs.payload.low = low;
        self.inputs.payload.high = high;
        self.apply(InputId::PayloadSlider);
    }

    fn apply(&mut self, changed: InputId) {
        let updated = self.dashboard.dispatch(changed, &self.inputs);
        self.figures.extend(updated);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::tests::three_launches;

    fn state() -> AppState {
        AppState::new(Dashboard::new(
            Arc::new(three_launches()),
            DashboardConfig::default(),
        ))
    }

    #[test]
    fn starts_with_every_figure_rendered() {
        let st = state();
        assert_eq!(st.inputs.site, SiteSelector::All);
        assert_eq!(
            st.figure(OutputId::SuccessPie).unwrap().pie_slices(),
            vec![("SiteA", 2), ("SiteB", 1)]
        );
        assert_eq!(st.figure(OutputId::PayloadScatter).unwrap().point_count(), 3);
    }

    #[test]
    fn site_selection_updates_both_figures() {
        let mut st = state();
        st.set_site(SiteSelector::from("SiteB"));
        assert_eq!(
            st.figure(OutputId::SuccessPie).unwrap().pie_slices(),
            vec![("Success", 1)]
        );
        assert_eq!(st.figure(OutputId::PayloadScatter).unwrap().point_count(), 1);
    }

    #[test]
    fn slider_keeps_pie_and_clamps_handles() {
        let mut st = state();
        let pie_before = st.figure(OutputId::SuccessPie).cloned();

        st.set_payload_range(3000.0, 1000.0);
        assert_eq!(st.inputs.payload.low, 1000.0);
        assert_eq!(st.inputs.payload.high, 1000.0);
        assert_eq!(st.figure(OutputId::PayloadScatter).unwrap().point_count(), 0);

        st.set_payload_range(-50.0, 20000.0);
        assert_eq!(st.inputs.payload.low, 0.0);
        assert_eq!(st.inputs.payload.high, 10000.0);
        assert_eq!(st.figure(OutputId::PayloadScatter).unwrap().point_count(), 3);

        assert_eq!(st.figure(OutputId::SuccessPie).cloned(), pie_before);
    }
}
