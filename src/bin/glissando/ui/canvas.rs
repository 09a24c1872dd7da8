//! Cell-based render surface: canvas pixels are squeezed onto terminal
//! cells, each cell blending whatever covers it into its background colour.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use glissando::{
    color::Rgba,
    mapping::CoordinateMapper,
    path::Point,
    visual::RenderSurface,
    voices::VoiceKind,
};

const BACKGROUND: (u8, u8, u8) = (140, 140, 140);
const PLAYHEAD: Rgba = Rgba::new(255, 165, 0, 1.0);
const BEATS: u32 = 8;

/// Piano rows counted up from A: naturals are light, sharps dark
const NATURALS: [u32; 7] = [0, 2, 3, 5, 7, 8, 10];

pub struct CellCanvas {
    area: Rect,
    cells: Vec<(u8, u8, u8)>,
    /// Canvas pixels per cell
    cell_w: f32,
    cell_h: f32,
    width: f32,
    global_alpha: f32,
}

impl CellCanvas {
    pub fn new(area: Rect, width: f32, height: f32) -> Self {
        let cols = area.width.max(1) as f32;
        let rows = area.height.max(1) as f32;
        Self {
            area,
            cells: vec![BACKGROUND; area.width as usize * area.height as usize],
            cell_w: width / cols,
            cell_h: height / rows,
            width,
            global_alpha: 1.0,
        }
    }

    fn blend(&mut self, col: u16, row: u16, color: Rgba) {
        if col >= self.area.width || row >= self.area.height {
            return;
        }
        let index = row as usize * self.area.width as usize + col as usize;
        self.cells[index] = color.over(self.cells[index]);
    }

    /// Pitch rows, beat lines and the hovered row
    pub fn paint_grid(&mut self, mapper: &CoordinateMapper, selected: VoiceKind, hover_y: Option<f32>) {
        let active = selected.color().with_alpha(0.15);
        let hover_row = hover_y.map(|y| (y / self.cell_h) as u16);

        for row in 0..self.area.height {
            let y = (row as f32 + 0.5) * self.cell_h;
            let note = ((mapper.height() - y) / mapper.row_height()).round() as u32;
            let shade = if NATURALS.contains(&(note % 12)) {
                Rgba::new(255, 255, 255, 0.08)
            } else {
                Rgba::new(40, 40, 40, 0.08)
            };

            for col in 0..self.area.width {
                self.blend(col, row, shade);
                if hover_row == Some(row) {
                    self.blend(col, row, active);
                }
            }
        }

        for beat in 0..BEATS {
            let x = beat as f32 * self.width / BEATS as f32;
            let col = (x / self.cell_w) as u16;
            for row in 0..self.area.height {
                self.blend(col, row, Rgba::new(0, 0, 0, 0.1));
            }
        }
    }

    /// The stroke still being drawn
    pub fn paint_stroke(&mut self, stroke: &[Point], selected: VoiceKind) {
        let color = selected.color().with_alpha(1.0);
        for point in stroke {
            self.fill_rect(*point, self.cell_w, self.cell_h, color);
        }
    }

    pub fn paint_playhead(&mut self, progress: f32) {
        let col = (progress * self.width / self.cell_w) as u16;
        for row in 0..self.area.height {
            self.blend(col, row, PLAYHEAD);
        }
    }

    /// Copy the blended cells into the frame buffer.
    pub fn flush(&self, buf: &mut Buffer) {
        for row in 0..self.area.height {
            for col in 0..self.area.width {
                let (r, g, b) = self.cells[row as usize * self.area.width as usize + col as usize];
                if let Some(cell) = buf.cell_mut((self.area.x + col, self.area.y + row)) {
                    cell.set_symbol(" ").set_bg(Color::Rgb(r, g, b));
                }
            }
        }
    }
}

impl RenderSurface for CellCanvas {
    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
    }

    /// Every touched cell is blended by the fraction of it the rect covers.
    fn fill_rect(&mut self, center: Point, width: f32, height: f32, color: Rgba) {
        let (left, right) = (center.x - width / 2.0, center.x + width / 2.0);
        let (top, bottom) = (center.y - height / 2.0, center.y + height / 2.0);
        if right <= 0.0 || bottom <= 0.0 {
            return;
        }

        let first_col = (left.max(0.0) / self.cell_w) as u16;
        let last_col = (right / self.cell_w).ceil() as u16;
        let first_row = (top.max(0.0) / self.cell_h) as u16;
        let last_row = (bottom / self.cell_h).ceil() as u16;

        for row in first_row..last_row.min(self.area.height) {
            let cell_top = row as f32 * self.cell_h;
            let cover_h = (bottom.min(cell_top + self.cell_h) - top.max(cell_top)) / self.cell_h;

            for col in first_col..last_col.min(self.area.width) {
                let cell_left = col as f32 * self.cell_w;
                let cover_w =
                    (right.min(cell_left + self.cell_w) - left.max(cell_left)) / self.cell_w;

                let coverage = (cover_w * cover_h).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(col, row, color.fade(self.global_alpha * coverage));
                }
            }
        }
    }
}
