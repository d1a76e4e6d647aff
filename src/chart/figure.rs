use serde::Serialize;

use crate::color::Rgb;

// ---------------------------------------------------------------------------
// Figure – a chart description in Plotly's JSON shape
// ---------------------------------------------------------------------------

/// A chart description: traces plus layout.
///
/// Serializes to the `{ "data": [...], "layout": {...} }` object that
/// `Plotly.react` accepts; the desktop view walks the same structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub marker: PieMarker,
    /// Keep slices in data order instead of Plotly's default descending sort.
    pub sort: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<Rgb>,
}

/// One colour group of the payload scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    pub text: Vec<String>,
    pub marker: ScatterMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMarker {
    pub color: Rgb,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// `(label, count)` of every pie slice, in drawing order.
    pub fn pie_slices(&self) -> Vec<(&str, u64)> {
        self.data
            .iter()
            .filter_map(|t| match t {
                Trace::Pie(p) => Some(p),
                Trace::Scatter(_) => None,
            })
            .flat_map(|p| p.labels.iter().map(String::as_str).zip(p.values.iter().copied()))
            .collect()
    }

    pub fn scatter_traces(&self) -> impl Iterator<Item = &ScatterTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Scatter(s) => Some(s),
            Trace::Pie(_) => None,
        })
    }

    /// Total number of points across all scatter traces.
    pub fn point_count(&self) -> usize {
        self.scatter_traces().map(|s| s.x.len()).sum()
    }
}
