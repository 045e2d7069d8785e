//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// How much evidence stands against one suspect, measured against the
/// number of clues an accusation needs
pub struct EvidenceMeter {
    label: String,
    count: u32,
    threshold: u32,
    color: Color,
    met_color: Color,
}

impl EvidenceMeter {
    pub fn new(label: &str, count: u32, threshold: u32) -> Self {
        Self {
            label: label.to_string(),
            count,
            threshold: threshold.max(1),
            color: Color::Yellow,
            met_color: Color::Green,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn met_color(mut self, color: Color) -> Self {
        self.met_color = color;
        self
    }
}

impl Widget for EvidenceMeter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.count >= self.threshold {
            self.met_color
        } else {
            self.color
        };

        let label = format!("{}: {}/{}", self.label, self.count, self.threshold);
        buf.set_stringn(area.x, area.y, &label, area.width as usize, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            let inner = area.width - 2;
            let filled = (self.count.min(self.threshold) as u64 * inner as u64
                / self.threshold as u64) as u16;

            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());
            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// ASCII art box for dramatic moments
pub struct DramaticBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
    text_color: Color,
}

impl DramaticBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
            text_color: Color::White,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

impl Widget for DramaticBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        // Double-line border
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }
        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(area.x, bottom, "╚", style);
        buf.set_string(right, bottom, "╝", style);

        let title = format!(" {} ", self.title);
        let title_width = title.chars().count() as u16;
        if title_width + 2 <= area.width {
            buf.set_string(area.x + (area.width - title_width) / 2, area.y, &title, style);
        }

        let text_width = area.width.saturating_sub(4) as usize;
        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            buf.set_stringn(area.x + 2, y, line, text_width, Style::default().fg(self.text_color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn meter_fills_up_to_threshold() {
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        EvidenceMeter::new("Mordomo", 1, 2).render(area, &mut buf);
        assert!(row(&buf, 0).starts_with("Mordomo: 1/2"));
        assert_eq!(row(&buf, 1), "[█████░░░░░]");

        let mut buf = Buffer::empty(area);
        EvidenceMeter::new("Cozinheiro", 3, 2).render(area, &mut buf);
        assert_eq!(row(&buf, 1), "[██████████]");
    }

    #[test]
    fn box_survives_tiny_areas() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        DramaticBox::new("VERDICT")
            .content(vec!["a very long line".to_string()])
            .render(area, &mut buf);

        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        DramaticBox::new("VERDICT")
            .content(vec!["a very long line".to_string(), "hidden".to_string()])
            .render(area, &mut buf);
        assert_eq!(row(&buf, 0), "╔══════╗");
        assert_eq!(row(&buf, 1), "║ a ve ║");
    }
}
