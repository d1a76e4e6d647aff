//! The reactive binding between the two inputs and the two charts.
//!
//! Every callback declares the output it renders and the inputs it reads.
//! When an input changes, exactly the callbacks that read it run again,
//! from scratch, against the shared read-only dataset.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chart::builder::{pie_chart, pie_title, scatter_chart, scatter_title, PieMode};
use crate::chart::figure::Figure;
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{by_payload, by_site, PayloadRange, SiteSelector, ALL_SITES};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Component ids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputId {
    #[serde(rename = "site-dropdown")]
    SiteDropdown,
    #[serde(rename = "payload-slider")]
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutputId {
    #[serde(rename = "success-pie-chart")]
    SuccessPie,
    #[serde(rename = "success-payload-scatter-chart")]
    PayloadScatter,
}

/// Current value of every input widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(rename = "site-dropdown")]
    pub site: SiteSelector,
    #[serde(rename = "payload-slider")]
    pub payload: PayloadRange,
}

// ---------------------------------------------------------------------------
// Layout description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
}

/// Everything a front end needs to draw the controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSpec {
    pub title: String,
    pub site_options: Vec<DropdownOption>,
    pub payload_slider: SliderSpec,
    pub initial: Inputs,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

struct Callback {
    output: OutputId,
    inputs: &'static [InputId],
    render: fn(&Dashboard, &Inputs) -> Figure,
}

/// Dataset, colour maps and the callback table.
pub struct Dashboard {
    dataset: Arc<LaunchDataset>,
    config: DashboardConfig,
    site_colors: ColorMap,
    booster_colors: ColorMap,
    callbacks: Vec<Callback>,
}

impl Dashboard {
    pub fn new(dataset: Arc<LaunchDataset>, config: DashboardConfig) -> Self {
        let site_colors = ColorMap::new(dataset.sites.iter().cloned());
        let booster_colors = ColorMap::new(dataset.booster_versions.iter().cloned());

        let callbacks = vec![
            Callback {
                output: OutputId::SuccessPie,
                inputs: &[InputId::SiteDropdown],
                render: render_success_pie,
            },
            Callback {
                output: OutputId::PayloadScatter,
                inputs: &[InputId::SiteDropdown, InputId::PayloadSlider],
                render: render_payload_scatter,
            },
        ];

        Self {
            dataset,
            config,
            site_colors,
            booster_colors,
            callbacks,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    /// Inputs on first page load: all sites, slider spanning the data.
    pub fn initial_inputs(&self) -> Inputs {
        let (low, high) = self
            .dataset
            .payload_bounds
            .unwrap_or((self.config.slider_min, self.config.slider_max));
        Inputs {
            site: SiteSelector::All,
            payload: PayloadRange::new(low, high),
        }
    }

    pub fn layout(&self) -> LayoutSpec {
        let site_options = std::iter::once(DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(self.dataset.sites.iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect();

        let cfg = &self.config;
        let mut marks = Vec::new();
        let mut value = cfg.slider_min;
        while value <= cfg.slider_max {
            marks.push(SliderMark {
                value,
                label: format!("{value}"),
            });
            value += cfg.slider_step;
        }

        LayoutSpec {
            title: cfg.title.clone(),
            site_options,
            payload_slider: SliderSpec {
                min: cfg.slider_min,
                max: cfg.slider_max,
                step: cfg.slider_step,
                marks,
            },
            initial: self.initial_inputs(),
        }
    }

    /// Render every output, as on first page load.
    pub fn render_all(&self, inputs: &Inputs) -> BTreeMap<OutputId, Figure> {
        self.callbacks
            .iter()
            .map(|cb| (cb.output, (cb.render)(self, inputs)))
            .collect()
    }

    /// Re-render the outputs that depend on `changed`.
    pub fn dispatch(&self, changed: InputId, inputs: &Inputs) -> BTreeMap<OutputId, Figure> {
        let outputs: BTreeMap<OutputId, Figure> = self
            .callbacks
            .iter()
            .filter(|cb| cb.inputs.contains(&changed))
            .map(|cb| (cb.output, (cb.render)(self, inputs)))
            .collect();
        log::debug!(
            "{changed:?} changed (site={}, payload={:?}): re-rendered {:?}",
            inputs.site,
            inputs.payload,
            outputs.keys().collect::<Vec<_>>()
        );
        outputs
    }
}

fn render_success_pie(dash: &Dashboard, inputs: &Inputs) -> Figure {
    let subset = by_site(&dash.dataset.records, &inputs.site);
    pie_chart(
        &subset,
        PieMode::from(&inputs.site),
        pie_title(&inputs.site),
        &dash.site_colors,
    )
}

fn render_payload_scatter(dash: &Dashboard, inputs: &Inputs) -> Figure {
    let in_range = by_payload(&dash.dataset.records, &inputs.payload);
    let subset = by_site(in_range, &inputs.site);
    scatter_chart(&subset, scatter_title(&inputs.site), &dash.booster_colors)
}
