pub mod board;

pub use board::BoardWidget;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ophidia_data::FrameSnapshot;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, Stdout};

/// Alternate-screen terminal used by the replay viewer.
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }

    pub fn init(&mut self) -> Result<()> {
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Draws `snapshot` on a `width` x `height` board.
    pub fn draw(
        &mut self,
        snapshot: &FrameSnapshot,
        width: u16,
        height: u16,
        caption: &str,
    ) -> Result<()> {
        self.terminal.draw(|f| {
            let (w, h) = BoardWidget::required_size(width, height);
            let area = f.area();
            let board = Rect::new(area.x, area.y, w.min(area.width), h.min(area.height));
            f.render_widget(
                BoardWidget::new(snapshot, width, height).caption(caption),
                board,
            );
        })?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    }
}
