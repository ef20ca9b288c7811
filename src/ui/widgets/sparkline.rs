//! Temperature sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperature levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline widget showing hourly temperatures over time
///
/// Values are normalized over the observed min..max range so the strip uses
/// the full block height regardless of season; a flat series renders at
/// mid-height.
pub struct TempSparkline<'a> {
    /// Temperatures for each time slot, integer Celsius
    temps: &'a [i32],
    /// Current position marker (index into temps)
    current_position: Option<usize>,
    /// Style for the sparkline
    style: Style,
    /// Style for the current position marker
    marker_style: Style,
}

impl<'a> TempSparkline<'a> {
    pub fn new(temps: &'a [i32]) -> Self {
        Self {
            temps,
            current_position: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn current_position(mut self, pos: usize) -> Self {
        self.current_position = Some(pos);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[allow(dead_code)]
    pub fn marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }

    /// Observed value range of the series
    fn range(&self) -> (i32, i32) {
        let min = self.temps.iter().copied().min().unwrap_or(0);
        let max = self.temps.iter().copied().max().unwrap_or(0);
        (min, max)
    }

    fn temp_to_block(&self, temp: i32, min: i32, max: i32) -> char {
        if max == min {
            return BLOCKS[3];
        }
        let normalized =
            (f64::from(temp - min) / f64::from(max - min)).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TempSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (min, max) = self.range();
        let width = area.width as usize;

        for (i, temp) in self.temps.iter().take(width).enumerate() {
            let block = self.temp_to_block(*temp, min, max);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if self.current_position == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
