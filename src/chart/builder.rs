use super::figure::{
    Axis, Figure, Layout, PieMarker, PieTrace, ScatterMarker, ScatterTrace, Title, Trace,
};
use crate::color::{outcome_color, ColorMap};
use crate::data::filter::SiteSelector;
use crate::data::loader::{COL_CLASS, COL_PAYLOAD};
use crate::data::model::{LaunchRecord, Outcome};

const MARKER_SIZE: f64 = 9.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// What the pie slices count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieMode {
    /// One slice per launch site.
    BySite,
    /// Success / failure slices for a single site.
    ByOutcome,
}

impl From<&SiteSelector> for PieMode {
    fn from(site: &SiteSelector) -> Self {
        match site {
            SiteSelector::All => PieMode::BySite,
            SiteSelector::Site(_) => PieMode::ByOutcome,
        }
    }
}

/// Count launches per site or per outcome, slices in first-appearance order.
pub fn pie_chart(
    records: &[&LaunchRecord],
    mode: PieMode,
    title: impl Into<String>,
    site_colors: &ColorMap,
) -> Figure {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<u64> = Vec::new();
    let mut colors = Vec::new();

    for rec in records {
        let (label, color) = match mode {
            PieMode::BySite => (
                rec.launch_site.as_str(),
                site_colors.color_for(&rec.launch_site),
            ),
            PieMode::ByOutcome => (rec.outcome.label(), outcome_color(rec.outcome)),
        };
        match labels.iter().position(|l| l == label) {
            Some(i) => values[i] += 1,
            None => {
                labels.push(label.to_string());
                values.push(1);
                colors.push(color);
            }
        }
    }

    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels,
            values,
            marker: PieMarker { colors },
            sort: false,
        })],
        layout: Layout {
            title: Title::new(title),
            xaxis: None,
            yaxis: None,
        },
    }
}

/// Title of the pie for the current dropdown value.
pub fn pie_title(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "Total Successful Launches for All Sites".to_string(),
        SiteSelector::Site(name) => format!("Success vs. Failure for {name}"),
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Payload mass against outcome class, one trace per booster version.
pub fn scatter_chart(
    records: &[&LaunchRecord],
    title: impl Into<String>,
    booster_colors: &ColorMap,
) -> Figure {
    let mut traces: Vec<ScatterTrace> = Vec::new();

    for rec in records {
        let idx = match traces.iter().position(|t| t.name == rec.booster_version) {
            Some(i) => i,
            None => {
                traces.push(ScatterTrace {
                    name: rec.booster_version.clone(),
                    mode: "markers",
                    x: Vec::new(),
                    y: Vec::new(),
                    text: Vec::new(),
                    marker: ScatterMarker {
                        color: booster_colors.color_for(&rec.booster_version),
                        size: MARKER_SIZE,
                    },
                });
                traces.len() - 1
            }
        };
        let trace = &mut traces[idx];
        trace.x.push(rec.payload_mass_kg);
        trace.y.push(rec.outcome.class());
        trace.text.push(rec.describe());
    }

    Figure {
        data: traces.into_iter().map(Trace::Scatter).collect(),
        layout: Layout {
            title: Title::new(title),
            xaxis: Some(Axis {
                title: Title::new(COL_PAYLOAD),
                tickvals: None,
            }),
            yaxis: Some(Axis {
                title: Title::new(COL_CLASS),
                tickvals: Some(vec![
                    Outcome::Failure.class() as f64,
                    Outcome::Success.class() as f64,
                ]),
            }),
        },
    }
}

pub fn scatter_title(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "Payload vs. Launch Outcome for All Sites".to_string(),
        SiteSelector::Site(name) => format!("Payload vs. Launch Outcome for {name}"),
    }
}
