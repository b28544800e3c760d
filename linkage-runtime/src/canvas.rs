use std::io::Write;

use ansi_term::Colour::{Blue, Fixed, Yellow};
use linkage_core::nalgebra::Point2;

use crate::{
    consts::{MAX_CANVAS_WIDTH, MIN_CANVAS_WIDTH},
    surface::{Control, Surface},
    ArmConfig,
};

/// Width of a control slider track in columns.
const SLIDER_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Empty,
    Grid,
    Link,
    Joint,
    Text(char),
}

/// Axis limits of the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Viewport {
    /// Square viewport around the full reach of the arm.
    pub fn from_config(config: &ArmConfig) -> Self {
        let extent = config.links.reach() + config.viewport.margin;
        let shift_y = config.viewport.shift_y;

        Self {
            x: (-extent, extent),
            y: (-extent + shift_y, extent + shift_y),
        }
    }
}

/// Terminal canvas.
///
/// Renders the arm on a character grid with equal axes, a dashed grid
/// on every whole unit, the status label in the top left corner and a
/// slider readout per joint control underneath the plot.
pub struct Canvas<W: Write> {
    out: W,
    title: String,
    viewport: Viewport,
    width: usize,
    height: usize,
    color: bool,
    points: Vec<Point2<f64>>,
    label: String,
    sliders: Vec<String>,
}

impl<W: Write> Canvas<W> {
    /// Construct a new canvas.
    ///
    /// Terminal cells are about twice as high as they are wide, so the
    /// height is half the width to keep the aspect ratio equal.
    pub fn new(out: W, config: &ArmConfig, width: usize) -> Self {
        let width = width.clamp(MIN_CANVAS_WIDTH, MAX_CANVAS_WIDTH);

        Self {
            out,
            title: config.title(),
            viewport: Viewport::from_config(config),
            width,
            height: width / 2,
            color: false,
            points: vec![],
            label: String::new(),
            sliders: vec![],
        }
    }

    /// Enable colored output.
    ///
    /// A colored canvas also clears the terminal before every repaint.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Reference to the underlying writer.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Map a point onto a grid cell, if visible.
    fn cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (x_min, x_max) = self.viewport.x;
        let (y_min, y_max) = self.viewport.y;

        if x < x_min || x > x_max || y < y_min || y > y_max {
            return None;
        }

        let col = ((x - x_min) / (x_max - x_min) * (self.width - 1) as f64).round() as usize;
        let row = ((y_max - y) / (y_max - y_min) * (self.height - 1) as f64).round() as usize;

        Some((row, col))
    }

    fn plot(&self) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::Empty; self.width]; self.height];

        let (x_min, x_max) = self.viewport.x;
        let (y_min, y_max) = self.viewport.y;

        for tick in (x_min.ceil() as i64)..=(x_max.floor() as i64) {
            if let Some((_, col)) = self.cell(tick as f64, y_min) {
                for row in (0..self.height).step_by(2) {
                    grid[row][col] = Cell::Grid;
                }
            }
        }
        for tick in (y_min.ceil() as i64)..=(y_max.floor() as i64) {
            if let Some((row, _)) = self.cell(x_min, tick as f64) {
                for col in (0..self.width).step_by(2) {
                    grid[row][col] = Cell::Grid;
                }
            }
        }

        // A segment never needs more samples than it takes to cross the grid.
        let max_steps = (self.width + self.height) * 2;

        for pair in self.points.windows(2) {
            let (from, to) = (pair[0], pair[1]);

            let steps = {
                let dx = (to.x - from.x) / (x_max - x_min) * self.width as f64;
                let dy = (to.y - from.y) / (y_max - y_min) * self.height as f64;
                (dx.abs().max(dy.abs()).ceil() as usize)
                    .max(1)
                    .saturating_mul(2)
                    .min(max_steps)
            };

            for step in 0..=steps {
                let t = step as f64 / steps as f64;
                let point = from + (to - from) * t;

                if let Some((row, col)) = self.cell(point.x, point.y) {
                    grid[row][col] = Cell::Link;
                }
            }
        }

        for point in &self.points {
            if let Some((row, col)) = self.cell(point.x, point.y) {
                grid[row][col] = Cell::Joint;
            }
        }

        self.draw_label(&mut grid);

        grid
    }

    fn draw_label(&self, grid: &mut [Vec<Cell>]) {
        if self.label.is_empty() {
            return;
        }

        let lines: Vec<&str> = self.label.lines().collect();
        let inner = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let mut boxed = vec![format!("╭{}╮", "─".repeat(inner + 2))];
        for line in &lines {
            let padding = inner - line.chars().count();
            boxed.push(format!("│ {}{} │", line, " ".repeat(padding)));
        }
        boxed.push(format!("╰{}╯", "─".repeat(inner + 2)));

        for (row, line) in boxed.iter().enumerate() {
            let row = row + 1;
            if row >= self.height {
                break;
            }
            for (col, ch) in line.chars().enumerate() {
                let col = col + 1;
                if col >= self.width {
                    break;
                }
                grid[row][col] = Cell::Text(ch);
            }
        }
    }

    fn paint(&self, cell: Cell) -> String {
        let (symbol, colour) = match cell {
            Cell::Empty => (' ', None),
            Cell::Grid => ('·', Some(Fixed(240))),
            Cell::Link => ('#', Some(Blue)),
            Cell::Joint => ('o', Some(Yellow)),
            Cell::Text(ch) => (ch, None),
        };

        match colour {
            Some(colour) if self.color => colour.paint(symbol.to_string()).to_string(),
            _ => symbol.to_string(),
        }
    }

    /// Render the canvas into a string.
    pub fn render(&self) -> String {
        let mut s = String::new();

        let padding = (self.width + 2).saturating_sub(self.title.chars().count()) / 2;
        s.push_str(&" ".repeat(padding));
        s.push_str(&self.title);
        s.push('\n');

        let border = format!("+{}+\n", "-".repeat(self.width));
        s.push_str(&border);
        for row in self.plot() {
            s.push('|');
            for cell in row {
                s.push_str(&self.paint(cell));
            }
            s.push_str("|\n");
        }
        s.push_str(&border);

        for slider in &self.sliders {
            s.push_str(slider);
            s.push('\n');
        }

        s
    }
}

/// Format a slider readout.
fn slider(control: &Control, value: f64) -> String {
    let span = control.max - control.min;
    let ratio = if span > 0.0 {
        ((value - control.min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let knob = (ratio * (SLIDER_WIDTH - 1) as f64).round() as usize;

    let track: String = (0..SLIDER_WIDTH)
        .map(|idx| if idx == knob { 'o' } else { '-' })
        .collect();

    format!("{:>10} [{}] {:>7.1}", control.label, track, value)
}

impl<W: Write> Surface for Canvas<W> {
    fn draw_linkage(&mut self, points: &[Point2<f64>]) {
        self.points = points.to_vec();
    }

    fn set_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn draw_controls(&mut self, controls: &[(&Control, f64)]) {
        self.sliders = controls
            .iter()
            .map(|(control, value)| slider(control, *value))
            .collect();
    }

    fn repaint(&mut self) -> std::io::Result<()> {
        let frame = self.render();

        if self.color {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}
