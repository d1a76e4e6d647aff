use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, PlotUi, Points, Polygon, Text};

use crate::chart::figure::{Figure, PieTrace, ScatterTrace, Trace};

/// Largest angle drawn as a single polygon; egui_plot only fills convex shapes.
const MAX_WEDGE: f64 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Figure plot (central panel)
// ---------------------------------------------------------------------------

/// Render one figure with its title above it.
pub fn figure_plot(ui: &mut Ui, id: &str, figure: &Figure, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(figure.title());
    });

    let is_pie = figure.data.iter().any(|t| matches!(t, Trace::Pie(_)));
    let mut plot = Plot::new(id)
        .height(height)
        .legend(Legend::default());

    if is_pie {
        plot = plot
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);
    } else {
        if let Some(axis) = &figure.layout.xaxis {
            plot = plot.x_axis_label(axis.title.text.clone());
        }
        if let Some(axis) = &figure.layout.yaxis {
            plot = plot.y_axis_label(axis.title.text.clone());
        }
        plot = plot.include_x(0.0).include_y(-0.25).include_y(1.25);
    }

    let total: u64 = figure.pie_slices().iter().map(|(_, n)| n).sum();

    plot.show(ui, |plot_ui| {
        for trace in &figure.data {
            match trace {
                Trace::Pie(pie) => draw_pie(plot_ui, pie, total),
                Trace::Scatter(scatter) => draw_scatter(plot_ui, scatter),
            }
        }
    });
}

fn draw_pie(plot_ui: &mut PlotUi, pie: &PieTrace, total: u64) {
    if total == 0 {
        plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), "No launches"));
        return;
    }

    // Slices start at 12 o'clock and run clockwise.
    let mut start = 0.0;
    for (i, (label, count)) in pie.labels.iter().zip(&pie.values).enumerate() {
        let sweep = *count as f64 / total as f64 * TAU;
        let color: Color32 = pie.marker.colors.get(i).copied().map(Into::into).unwrap_or(Color32::GRAY);
        let name = format!("{label}: {count}");

        let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
        let piece = sweep / pieces as f64;
        for p in 0..pieces {
            let from = start + p as f64 * piece;
            plot_ui.polygon(
                Polygon::new(wedge(from, piece))
                    .name(&name)
                    .fill_color(color)
                    .stroke(Stroke::new(1.0, color)),
            );
        }
        start += sweep;
    }
}

/// Unit-circle wedge from angle `from` (clockwise from the top) spanning `sweep`.
fn wedge(from: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 90.0).ceil().max(2.0) as usize;
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|s| {
            let a = FRAC_PI_2 - (from + sweep * s as f64 / steps as f64);
            [a.cos(), a.sin()]
        }))
        .collect()
}

fn draw_scatter(plot_ui: &mut PlotUi, trace: &ScatterTrace) {
    let points: PlotPoints = trace
        .x
        .iter()
        .zip(&trace.y)
        .map(|(&x, &y)| [x, y as f64])
        .collect();

    plot_ui.points(
        Points::new(points)
            .name(&trace.name)
            .color(Color32::from(trace.marker.color))
            .radius((trace.marker.size / 2.0) as f32)
            .filled(true),
    );
}
