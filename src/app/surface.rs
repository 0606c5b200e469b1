//! Rendering surfaces.
//!
//! [`Frame`] is a declarative snapshot of what should be on screen. A
//! [`Surface`] presents it; [`Canvas`] rasterizes it to characters, which is
//! what both the terminal surface and the tests look at.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::{debug, info};

use super::views::Views;
use crate::core::Result;
use crate::visual::{CellRect, GridGeometry, GridLabel, Image, LayoutEngine, Panel, PanelContent};

/// What a panel contains.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    /// Amplitude squares plus their captions.
    Grid {
        /// Filled squares, one per non-zero amplitude.
        cells: Vec<CellRect>,
        /// Basis captions around the grid.
        labels: Vec<GridLabel>,
    },
    /// A pre-rendered image.
    Image(Image),
}

/// A placed panel with its title and contents.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePanel {
    /// Where the panel sits.
    pub panel: Panel,
    /// Text set into the top border.
    pub title: &'static str,
    /// What is drawn inside.
    pub body: PanelBody,
}

/// Everything to draw for one screen update.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Status line above the panels.
    pub caption: String,
    /// Every panel, in layout order.
    pub panels: Vec<FramePanel>,
}

impl Frame {
    /// Snapshot of `views` placed by `layout`.
    pub fn compose(views: &Views, layout: &LayoutEngine, cell_pitch: u32) -> Self {
        let panels = layout
            .panels()
            .map(|panel| {
                // Content starts inside the border.
                let geometry = GridGeometry {
                    x_offset: f64::from(panel.x + 1),
                    y_offset: f64::from(panel.y + 1),
                    cell_pitch: f64::from(cell_pitch),
                };
                let grid_body = |grid: &crate::visual::AmplitudeGrid| PanelBody::Grid {
                    cells: grid.drawable_cells().map(|c| c.rect(&geometry)).collect(),
                    labels: grid.labels(&geometry),
                };
                let (title, body) = match panel.content {
                    PanelContent::CircuitDiagram => ("circuit", PanelBody::Image(views.diagram.clone())),
                    PanelContent::StateGrid => ("statevector", grid_body(&views.state_grid)),
                    PanelContent::UnitaryGrid => ("unitary", grid_body(&views.unitary_grid)),
                    PanelContent::Histogram => ("counts", PanelBody::Image(views.histogram.clone())),
                    PanelContent::QSphere => ("q-sphere", PanelBody::Image(views.qsphere.clone())),
                };
                FramePanel { panel: panel.clone(), title, body }
            })
            .collect();
        Self { caption: views.caption(), panels }
    }
}

/// Something that can show a [`Frame`].
pub trait Surface {
    /// Replaces whatever is shown with `frame`.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// A fixed-size character buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    /// Blank canvas of `width` x `height` characters.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![' '; width * height] }
    }

    /// Writes `ch` at (x, y); anything off-canvas is clipped.
    pub fn put(&mut self, x: i64, y: i64, ch: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = ch;
    }

    /// Writes `text` left to right from (x, y), clipped like [`put`](Self::put).
    pub fn text(&mut self, x: i64, y: i64, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i64, y, ch);
        }
    }

    /// Character at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Rows of the canvas, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        self.cells.chunks(self.width.max(1)).map(|row| row.iter().collect()).collect()
    }

    fn border(&mut self, panel: &Panel, title: &str) {
        if panel.width < 2 || panel.height < 2 {
            return;
        }
        let (x0, y0) = (i64::from(panel.x), i64::from(panel.y));
        let (x1, y1) = (i64::from(panel.right()) - 1, i64::from(panel.bottom()) - 1);
        for x in x0 + 1..x1 {
            self.put(x, y0, '─');
            self.put(x, y1, '─');
        }
        for y in y0 + 1..y1 {
            self.put(x0, y, '│');
            self.put(x1, y, '│');
        }
        self.put(x0, y0, '┌');
        self.put(x1, y0, '┐');
        self.put(x0, y1, '└');
        self.put(x1, y1, '┘');
        let room = (panel.width as usize).saturating_sub(4);
        let title: String = title.chars().take(room).collect();
        self.text(x0 + 2, y0, &title);
    }

    fn square(&mut self, rect: &CellRect) {
        let side = rect.size.round() as i64;
        let (x, y) = (rect.x.round() as i64, rect.y.round() as i64);
        for dy in 0..side {
            for dx in 0..side {
                self.put(x + dx, y + dy, '█');
            }
        }
    }

    /// Rasterizes a whole frame: caption on the first row, then every panel.
    pub fn draw(&mut self, frame: &Frame) {
        self.text(1, 0, &frame.caption);
        for fp in &frame.panels {
            self.border(&fp.panel, fp.title);
            match &fp.body {
                PanelBody::Grid { cells, labels } => {
                    for label in labels {
                        self.text(label.x.round() as i64, label.y.round() as i64, &label.text);
                    }
                    for rect in cells {
                        self.square(rect);
                    }
                }
                PanelBody::Image(image) => {
                    let (x, y) = (i64::from(fp.panel.x) + 1, i64::from(fp.panel.y) + 1);
                    for (i, line) in image.text_lines().iter().enumerate() {
                        self.text(x, y + i as i64, line);
                    }
                }
            }
        }
    }
}

/// Full-screen crossterm surface: alternate screen, raw mode, black on white.
///
/// The terminal is restored by [`restore`](Self::restore) or, failing that,
/// on drop.
pub struct TerminalSurface {
    out: Stdout,
    active: bool,
}

impl TerminalSurface {
    /// Switches the terminal to raw mode and the alternate screen.
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        info!("terminal surface entered");
        Ok(Self { out, active: true })
    }

    /// Leaves the alternate screen and raw mode. Safe to call twice.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        info!("terminal surface restored");
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let (w, h) = terminal::size()?;
        let mut canvas = Canvas::new(usize::from(w), usize::from(h));
        canvas.draw(frame);
        queue!(self.out, SetBackgroundColor(Color::White), SetForegroundColor(Color::Black))?;
        for (row, line) in canvas.lines().iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()?;
        debug!(width = w, height = h, panels = frame.panels.len(), "frame presented");
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
}
