use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::error::{Result, SnakeError};
use crate::render::{Color, ScoreSink, Surface};

/// Terminal position (column, row)
pub type Coords = (u16, u16);

/// Terminal columns used for one board cell. Characters are about twice as
/// tall as they are wide, so two of them make a roughly square cell.
const COLS_PER_CELL: i32 = 2;

const FULL_BLOCK: char = '█';
const LEFT_BLOCK: char = '▌';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Color>,
}

const BLANK: Glyph = Glyph { ch: ' ', color: None };
// Never drawn; marks the front buffer as out of date
const STALE: Glyph = Glyph { ch: '\0', color: None };

/// Character buffer covering the board. Board pixels are mapped onto it one
/// grid cell at a time.
pub struct Canvas {
    grid: i32,
    cells: i32,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(grid: i32, board_size: i32) -> Self {
        let cells = board_size / grid;
        let side = cells.max(0) as usize;
        Canvas { grid, cells, glyphs: vec![BLANK; side * COLS_PER_CELL as usize * side] }
    }

    pub fn cols(&self) -> u16 {
        (self.cells * COLS_PER_CELL) as u16
    }

    pub fn rows(&self) -> u16 {
        self.cells as u16
    }

    pub fn glyph(&self, col: u16, row: u16) -> Glyph {
        self.glyphs[self.index(col, row)]
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.cols() as usize + col as usize
    }

    fn set(&mut self, col: u16, row: u16, glyph: Glyph) {
        let i = self.index(col, row);
        self.glyphs[i] = glyph;
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        for g in self.glyphs.iter_mut() {
            *g = BLANK;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }

        let first_col = x.div_euclid(self.grid).max(0);
        let last_col = (x + w - 1).div_euclid(self.grid).min(self.cells - 1);
        let first_row = y.div_euclid(self.grid).max(0);
        let last_row = (y + h - 1).div_euclid(self.grid).min(self.cells - 1);

        for cy in first_row..=last_row {
            for cx in first_col..=last_col {
                let cell_x = cx * self.grid;
                let covers_width = x <= cell_x && x + w >= cell_x + self.grid;
                let right = if covers_width { FULL_BLOCK } else { LEFT_BLOCK };

                let col = (cx * COLS_PER_CELL) as u16;
                let row = cy as u16;
                self.set(col, row, Glyph { ch: FULL_BLOCK, color: Some(color) });
                self.set(col + 1, row, Glyph { ch: right, color: Some(color) });
            }
        }
    }
}

pub struct TermManager<W: Write = Stdout> {
    out: W,
    // Top-left terminal position of the board, inside the border
    origin: Coords,
    back: Canvas,
    front: Vec<Glyph>,
    current_msg: Option<Message>,
    // First failed score write, reported by the next present()
    score_error: Option<io::Error>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermManager<Stdout> {
    pub fn new(grid: i32, board_size: i32) -> Result<Self> {
        let size = terminal::size()?;
        TermManager::with_writer(stdout(), size, grid, board_size)
    }
}

impl<W: Write> TermManager<W> {
    /// Board drawn into `out`, for a terminal of `size` columns and rows
    pub fn with_writer(out: W, size: Coords, grid: i32, board_size: i32) -> Result<Self> {
        if grid <= 0 || board_size < grid {
            return Err(SnakeError::InvalidConfig(format!(
                "board_size {} does not hold a single {}px cell",
                board_size, grid
            )));
        }

        // Border on every side plus one line for the score
        let cells = (board_size / grid) as usize;
        let (need_w, need_h) = (cells * COLS_PER_CELL as usize + 2, cells + 3);
        let (have_w, have_h) = size;
        if (have_w as usize) < need_w || (have_h as usize) < need_h {
            return Err(SnakeError::TerminalTooSmall { need_w, need_h, have_w, have_h });
        }

        let back = Canvas::new(grid, board_size);
        let front = vec![STALE; back.glyphs.len()];
        Ok(TermManager { out, origin: (1, 1), back, front, current_msg: None, score_error: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.out, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(ev);
                }
            }
        }
    }

    /// Drains every key event that is already waiting, without blocking
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        execute!(self.out, terminal::Clear(ClearType::All))?;
        self.invalidate();
        Ok(())
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let end_x = self.back.cols() + 1;
        let end_y = self.back.rows() + 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    /// Writes the cells that changed since the last call
    pub fn present(&mut self) -> Result<()> {
        if let Some(e) = self.score_error.take() {
            return Err(e.into());
        }

        let cols = self.back.cols();

        for (i, glyph) in self.back.glyphs.iter().enumerate() {
            if self.front[i] == *glyph {
                continue;
            }

            let (col, row) = ((i % cols as usize) as u16, (i / cols as usize) as u16);
            let pos = (self.origin.0 + col, self.origin.1 + row);
            queue!(self.out, cursor::MoveTo(pos.0, pos.1))?;
            match glyph.color {
                Some(color) => queue!(self.out, style::SetForegroundColor(term_color(color)))?,
                None => queue!(self.out, style::ResetColor)?,
            }
            queue!(self.out, style::Print(glyph.ch))?;
            self.front[i] = *glyph;
        }

        queue!(self.out, style::ResetColor)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = (self.origin.0 + self.back.cols() / 2, self.origin.1 + self.back.rows() / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y_diff in 0..msg_height {
            let line = match y_diff {
                0 => "",
                d if d == msg_height - 1 => "",
                d => lines[d as usize - 1],
            };
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.out, cursor::MoveTo(top_left.0, top_left.1 + y_diff), style::Print(padded_line))?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Removes the message box and repaints what it covered
    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        let blank = " ".repeat(msg.width as usize);
        for y_diff in 0..msg.height {
            queue!(self.out, cursor::MoveTo(msg.top_left.0, msg.top_left.1 + y_diff), style::Print(&blank))?;
        }

        self.invalidate();
        self.draw_borders()?;
        self.present()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.out, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    // Forces the next present() to rewrite every cell
    fn invalidate(&mut self) {
        for g in self.front.iter_mut() {
            *g = STALE;
        }
    }
}

impl<W: Write> Surface for TermManager<W> {
    fn clear(&mut self) {
        self.back.clear();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.back.fill_rect(x, y, w, h, color);
    }
}

impl<W: Write> ScoreSink for TermManager<W> {
    fn show_score(&mut self, score: u32) {
        let line = format!("Score: {:<10}", score);
        let row = self.origin.1 + self.back.rows() + 1;
        if let Err(e) = queue!(self.out, cursor::MoveTo(0, row), style::ResetColor, style::Print(line)) {
            if self.score_error.is_none() {
                self.score_error = Some(e);
            }
        }
    }
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size() {
        let canvas = Canvas::new(16, 400);
        assert_eq!(canvas.cols(), 50);
        assert_eq!(canvas.rows(), 25);
    }

    #[test]
    fn test_gap_square_maps_to_one_cell() {
        let mut canvas = Canvas::new(16, 400);
        canvas.fill_rect(32, 16, 15, 15, Color::Green);

        assert_eq!(canvas.glyph(4, 1), Glyph { ch: FULL_BLOCK, color: Some(Color::Green) });
        assert_eq!(canvas.glyph(5, 1), Glyph { ch: LEFT_BLOCK, color: Some(Color::Green) });
        assert_eq!(canvas.glyph(6, 1), BLANK);
        assert_eq!(canvas.glyph(4, 2), BLANK);
        assert_eq!(canvas.glyph(4, 0), BLANK);
    }

    #[test]
    fn test_full_rect_spans_cells() {
        let mut canvas = Canvas::new(16, 400);
        canvas.fill_rect(0, 0, 32, 16, Color::Red);

        for col in 0..4 {
            assert_eq!(canvas.glyph(col, 0).ch, FULL_BLOCK);
        }
        assert_eq!(canvas.glyph(4, 0), BLANK);
    }

    #[test]
    fn test_off_board_is_clipped() {
        let mut canvas = Canvas::new(16, 400);
        canvas.fill_rect(-16, 0, 15, 15, Color::Green);
        canvas.fill_rect(400, 400, 15, 15, Color::Green);
        assert!(canvas.glyphs.iter().all(|g| *g == BLANK));
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(16, 400);
        canvas.fill_rect(384, 384, 15, 15, Color::Red);
        assert_eq!(canvas.glyph(48, 24).color, Some(Color::Red));

        canvas.clear();
        assert_eq!(canvas.glyph(48, 24), BLANK);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_huge_board_is_too_small_for_terminal() {
        let res = TermManager::with_writer(Vec::new(), (80, 24), 2, 100_000);
        match res {
            Err(SnakeError::TerminalTooSmall { need_w, need_h, have_w, have_h }) => {
                assert_eq!((need_w, need_h), (100_002, 50_003));
                assert_eq!((have_w, have_h), (80, 24));
            }
            _ => panic!("expected TerminalTooSmall"),
        }
    }

    #[test]
    fn test_default_board_fits() {
        assert!(TermManager::with_writer(Vec::new(), (52, 28), 16, 400).is_ok());
        assert!(TermManager::with_writer(Vec::new(), (51, 28), 16, 400).is_err());
        assert!(TermManager::with_writer(Vec::new(), (52, 27), 16, 400).is_err());
    }

    #[test]
    fn test_present_writes_changed_cells() {
        let mut term = TermManager::with_writer(Vec::new(), (52, 28), 16, 400).unwrap();
        term.fill_rect(0, 0, 15, 15, Color::Green);
        term.present().unwrap();

        let drawn = String::from_utf8_lossy(&term.out).into_owned();
        assert!(drawn.contains(FULL_BLOCK));
        assert!(drawn.contains(LEFT_BLOCK));

        term.out.clear();
        term.present().unwrap();
        assert!(!String::from_utf8_lossy(&term.out).contains(FULL_BLOCK));
    }

    #[test]
    fn test_failed_score_write_surfaces_on_present() {
        let mut term = TermManager::with_writer(BrokenPipe, (52, 28), 16, 400).unwrap();
        term.show_score(3);
        assert!(matches!(term.present(), Err(SnakeError::Io(_))));
    }
}
