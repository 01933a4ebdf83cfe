//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed samples: `o` (drawn last, always visible)
//! - fitted curves: one glyph per curve (see `CurveKind::glyph`); earlier
//!   curves win where lines overlap, so the Cholesky line hides QR and LSQR

use crate::models::CurveKind;
use crate::plot::series::{ChartData, TITLE, X_LABEL, Y_LABEL};

/// Render the chart as text.
pub fn render_ascii_plot(data: &ChartData, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let [x_min, x_max] = data.x_bounds;
    let [y_min, y_max] = data.y_bounds;

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay).
    for curve in &data.curves {
        draw_curve(&mut grid, &curve.points, curve.kind.glyph(), data.x_bounds, data.y_bounds);
    }

    for &(x, y) in &data.samples {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&format!(
        "{X_LABEL}=[{x_min:.2}, {x_max:.2}] | {Y_LABEL}=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out.push_str(&legend(data));
    out
}

fn legend(data: &ChartData) -> String {
    let mut parts = vec!["o samples".to_string()];
    parts.extend(
        CurveKind::ALL
            .iter()
            .filter(|k| data.curve(**k).is_some())
            .map(|k| format!("{} {}", k.glyph(), k.display_name())),
    );
    format!("{}\n", parts.join(" | "))
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], ch: char, x_bounds: [f64; 2], y_bounds: [f64; 2]) {
    if curve.is_empty() {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, x_bounds[0], x_bounds[1], width);
        let row = map_y(y, y_bounds[0], y_bounds[1], height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None if grid[row][col] == ' ' => grid[row][col] = ch,
            None => {}
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinearFit, SolverKind};
    use crate::models::FittedModel;
    use crate::plot::series::CurveSeries;

    #[test]
    fn plot_golden_snapshot_small() {
        let fit = LinearFit {
            intercept: 0.0,
            slope: 1.0,
        };
        let data = ChartData {
            samples: vec![(0.0, 0.0), (9.0, 4.0)],
            curves: vec![CurveSeries {
                kind: CurveKind::Linear(SolverKind::Cholesky),
                model: FittedModel::Linear(fit),
                points: vec![(0.0, 0.0), (9.0, 4.0)],
            }],
            x_bounds: [0.0, 9.0],
            y_bounds: [0.0, 4.0],
        };

        let txt = render_ascii_plot(&data, 10, 5);
        let expected = concat!(
            "Dot Plot showing the correlation between Hours studied and exam score\n",
            "Hours studied=[0.00, 9.00] | Exam score=[0.00, 4.00]\n",
            "        =o\n",
            "      ==\n",
            "    ==\n",
            "  ==\n",
            "o=\n",
            "o samples | = Cholesky\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn coordinates_map_to_grid_corners() {
        assert_eq!(map_x(0.0, 0.0, 1.0, 10), 0);
        assert_eq!(map_x(1.0, 0.0, 1.0, 10), 9);
        assert_eq!(map_x(5.0, 0.0, 1.0, 10), 9);
        assert_eq!(map_y(1.0, 0.0, 1.0, 5), 0);
        assert_eq!(map_y(0.0, 0.0, 1.0, 5), 4);
    }
}
