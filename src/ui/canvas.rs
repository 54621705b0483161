//! Cell canvas for one lane.
//!
//! Lane coordinates (pixels) are scaled onto a grid of terminal cells. The
//! session draws into it through [`Renderer`], then the grid is stamped row
//! by row as styled spans.

use dino_jockey::core::{
    DinoPose, ObstacleStyle, PlayerSlot, Renderer, Vec2, Viewport, Visual, VisualKind,
};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: Color::Reset, bg }
    }
}

pub struct CellCanvas {
    cells: Vec<Cell>,
    cols: u16,
    rows: u16,
    origin: Vec2,
    /// Cells per pixel.
    x_scale: f64,
    y_scale: f64,
}

impl CellCanvas {
    pub fn new(viewport: &Viewport, cols: u16, rows: u16, background: Color) -> Self {
        Self {
            cells: vec![Cell::blank(background); cols as usize * rows as usize],
            cols,
            rows,
            origin: viewport.origin,
            x_scale: cols as f64 / viewport.width,
            y_scale: rows as f64 / viewport.height,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn col_of(&self, x: f64) -> i32 {
        ((x - self.origin.x) * self.x_scale).floor() as i32
    }

    pub fn row_of(&self, y: f64) -> i32 {
        ((y - self.origin.y) * self.y_scale).floor() as i32
    }

    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Set a glyph, keeping the cell's background. Out of range is ignored.
    pub fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    pub fn fill_row(&mut self, row: i32, cell: impl Fn(i32) -> Cell) {
        for col in 0..self.cols as i32 {
            if let Some(i) = self.index(col, row) {
                self.cells[i] = cell(col);
            }
        }
    }

    pub fn put_text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    /// Right-aligned text with a one-cell margin.
    pub fn put_text_right(&mut self, row: i32, text: &str, fg: Color) {
        let col = self.cols as i32 - text.chars().count() as i32 - 1;
        self.put_text(col.max(0), row, text, fg);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = self.rows.min(area.height);
        let cols = self.cols.min(area.width) as usize;

        for row in 0..rows {
            let start = row as usize * self.cols as usize;
            let row_cells = &self.cells[start..start + cols];

            let mut spans: Vec<Span> = Vec::new();
            let mut style = Style::default();
            let mut text = String::new();
            for cell in row_cells {
                let cell_style = Style::default().fg(cell.fg).bg(cell.bg);
                if cell_style != style && !text.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut text), style));
                }
                style = cell_style;
                text.push(cell.ch);
            }
            if !text.is_empty() {
                spans.push(Span::styled(text, style));
            }

            let row_area = Rect::new(area.x, area.y + row, cols as u16, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

fn dino_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::One => Color::LightYellow,
        PlayerSlot::Two => Color::LightCyan,
    }
}

fn obstacle_glyph(style: ObstacleStyle) -> (char, Color) {
    match style {
        ObstacleStyle::Cactus => ('|', Color::Rgb(60, 140, 60)),
        ObstacleStyle::TallCactus => ('‖', Color::Rgb(50, 160, 70)),
        ObstacleStyle::CactusCluster => ('#', Color::Rgb(90, 130, 50)),
    }
}

impl Renderer for CellCanvas {
    fn draw_sprite(&mut self, visual: Visual, position: Vec2) {
        let half_w = visual.size.half_width();
        let half_h = visual.size.half_height();
        let left = self.col_of(position.x - half_w);
        let right = self.col_of(position.x + half_w).max(left + 1);
        let top = self.row_of(position.y - half_h);
        let bottom = self.row_of(position.y + half_h).max(top + 1);

        match visual.kind {
            VisualKind::Obstacle(style) => {
                let (ch, fg) = obstacle_glyph(style);
                for row in top..bottom {
                    for col in left..right {
                        self.put(col, row, ch, fg);
                    }
                }
            }
            VisualKind::Dino { slot, pose } => {
                let fg = match pose {
                    DinoPose::Dead => Color::DarkGray,
                    _ => dino_color(slot),
                };
                let feet = bottom - 1;
                for row in top..bottom {
                    for col in left..right {
                        let first = col == left;
                        let ch = match pose {
                            DinoPose::Dead => 'x',
                            DinoPose::Walk if row == feet => {
                                // Alternate legs every animation frame
                                match (visual.frame % 2 == 0, first) {
                                    (true, true) | (false, false) => '/',
                                    _ => '\\',
                                }
                            }
                            DinoPose::Jump if row == feet => '▀',
                            _ if row == top && col == right - 1 => '▛',
                            _ => '█',
                        };
                        self.put(col, row, ch, fg);
                    }
                }
            }
        }
    }
}
