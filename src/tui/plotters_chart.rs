//! Plotters-powered fit chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::series::CurveSeries;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call (see
/// `plot::series::chart_data`), so `render()` only draws.
pub struct FitPlottersChart<'a> {
    /// Scatter series for the raw samples.
    pub samples: &'a [(f64, f64)],
    /// Fitted curves, drawn in order.
    pub curves: &'a [CurveSeries],
    /// X bounds (hours).
    pub x_bounds: [f64; 2],
    /// Y bounds (score).
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for FitPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines are noise at terminal resolution; axes are enough.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Curves first so the samples stay visible on top.
            for series in self.curves {
                let (r, g, b) = series.kind.rgb();
                let color = RGBColor(r, g, b);
                chart.draw_series(LineSeries::new(series.points.iter().copied(), &color))?;
            }

            // `Circle` radii are mis-scaled by the ratatui backend; a pixel dot
            // renders cleanly.
            chart.draw_series(self.samples.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
