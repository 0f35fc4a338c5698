use ophidia_data::{Cell, FrameSnapshot};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

/// Terminal columns used per board cell, keeping cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const BODY: &str = "██";
const HEAD: &str = "▓▓";
const FRUIT: &str = "()";

/// Draws one [`FrameSnapshot`] inside a bordered board.
pub struct BoardWidget<'a> {
    snapshot: &'a FrameSnapshot,
    width: u16,
    height: u16,
    caption: Option<&'a str>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(snapshot: &'a FrameSnapshot, width: u16, height: u16) -> Self {
        Self {
            snapshot,
            width,
            height,
            caption: None,
        }
    }

    #[must_use]
    pub fn caption(mut self, caption: &'a str) -> Self {
        self.caption = Some(caption);
        self
    }

    /// Screen size needed to show the whole board with its border.
    #[must_use]
    pub fn required_size(width: u16, height: u16) -> (u16, u16) {
        (width * CELL_WIDTH + 2, height + 2)
    }

    pub fn get_inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    /// Top-left screen position of `cell`, if it is on the board and visible.
    pub fn cell_to_screen(cell: Cell, width: u16, height: u16, area: Rect) -> Option<(u16, u16)> {
        let inner = Self::get_inner_area(area);
        if cell.x < 0 || cell.y < 0 || cell.x >= i32::from(width) || cell.y >= i32::from(height) {
            return None;
        }
        let x = inner.x + cell.x as u16 * CELL_WIDTH;
        let y = inner.y + cell.y as u16;
        if x + CELL_WIDTH <= inner.right() && y < inner.bottom() {
            Some((x, y))
        } else {
            None
        }
    }

    fn put(&self, buf: &mut Buffer, area: Rect, cell: Cell, symbol: &str, color: Color) {
        if let Some((x, y)) = Self::cell_to_screen(cell, self.width, self.height, area) {
            for (offset, ch) in symbol.chars().enumerate() {
                let target = &mut buf[(x + offset as u16, y)];
                target.set_symbol(&ch.to_string());
                target.set_fg(color);
            }
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.caption {
            Some(caption) => format!("{caption} | Score: {}", self.snapshot.score),
            None => format!("Score: {}", self.snapshot.score),
        };
        Block::default().title(title).borders(Borders::ALL).render(area, buf);

        let rgb = self.snapshot.color;
        let color = Color::Rgb(rgb.r, rgb.g, rgb.b);
        self.put(buf, area, self.snapshot.fruit, FRUIT, Color::Red);
        // head last so it stays visible on a self collision
        for &cell in self.snapshot.body.iter().skip(1) {
            self.put(buf, area, cell, BODY, color);
        }
        if let Some(&head) = self.snapshot.body.first() {
            self.put(buf, area, head, HEAD, color);
        }
    }
}
