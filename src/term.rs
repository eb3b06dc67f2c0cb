use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};

use crate::grid::{Cell, Grid};

const BODY_GLYPH: &str = " * ";
const FOOD_GLYPH: &str = " @ ";
const EMPTY_GLYPH: &str = "---";

/// Owns the output stream and, once `setup` has run, the terminal's raw mode.
/// Raw mode is given back on `restore` or, failing that, on drop.
pub struct TermManager<W: Write = Stdout> {
    out: W,
    raw: bool,
    rows_drawn: u16,
}

impl TermManager<Stdout> {
    pub fn stdout() -> Self {
        TermManager::new(stdout())
    }
}

impl<W: Write> TermManager<W> {
    pub fn new(out: W) -> Self {
        TermManager { out, raw: false, rows_drawn: 0 }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(self.out, cursor::Hide)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.raw {
            return Ok(());
        }

        self.raw = false;
        let res = execute!(self.out, cursor::Show);
        terminal::disable_raw_mode()?;
        res
    }

    /// Draws one frame and parks the cursor at its top left corner, so the
    /// next frame lands on top of this one.
    pub fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        let rows = u16::try_from(grid.height()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("board of {} rows is too tall to redraw", grid.height()))
        })?;
        queue!(self.out, cursor::MoveToColumn(0))?;

        for row in grid.rows() {
            for cell in row {
                queue!(self.out, style::Print(glyph(*cell)))?;
            }
            // Raw mode: a newline does not return the carriage
            queue!(self.out, style::Print("\n"), cursor::MoveToColumn(0))?;
        }

        self.rows_drawn = rows;
        if self.rows_drawn > 0 {
            queue!(self.out, cursor::MoveUp(self.rows_drawn))?;
        }
        self.out.flush()
    }

    /// Moves below the last frame and prints `lines` there.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.rows_drawn > 0 {
            queue!(self.out, cursor::MoveDown(self.rows_drawn))?;
            self.rows_drawn = 0;
        }

        for line in lines {
            queue!(self.out, cursor::MoveToColumn(0), style::Print(line), style::Print("\n"))?;
        }
        queue!(self.out, cursor::MoveToColumn(0))?;
        self.out.flush()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Drop for TermManager<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {}", e);
        }
    }
}

fn glyph(cell: Cell) -> &'static str {
    match cell {
        Cell::Body => BODY_GLYPH,
        Cell::Food => FOOD_GLYPH,
        Cell::Empty => EMPTY_GLYPH,
    }
}
