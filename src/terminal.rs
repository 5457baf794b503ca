use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

/// Border glyph sets for boxed panels
#[derive(Clone, Copy)]
pub enum BoxStyle {
    Plain,
    Rounded,
}

impl BoxStyle {
    fn corners(self) -> (char, char, char, char) {
        match self {
            BoxStyle::Plain => ('┌', '┐', '└', '┘'),
            BoxStyle::Rounded => ('╭', '╮', '╰', '╯'),
        }
    }
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        let buffer = vec![vec![Cell::default(); width as usize]; height as usize];

        Ok(Self {
            width,
            height,
            buffer,
            alternate_screen,
        })
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        self.set_cell(
            x,
            y,
            Cell {
                ch,
                fg,
                bg: None,
                bold,
            },
        );
    }

    fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = cell;
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Set a string with both foreground and background (title bars)
    pub fn set_str_bg(&mut self, x: i32, y: i32, s: &str, fg: Color, bg: Color, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set_cell(
                x + i as i32,
                y,
                Cell {
                    ch,
                    fg: Some(fg),
                    bg: Some(bg),
                    bold,
                },
            );
        }
    }

    /// Draw a box outline of w x h cells with its top-left corner at (x, y)
    pub fn draw_box(&mut self, x: i32, y: i32, w: usize, h: usize, style: BoxStyle, fg: Color) {
        if w < 2 || h < 2 {
            return;
        }
        let (tl, tr, bl, br) = style.corners();
        let right = x + w as i32 - 1;
        let bottom = y + h as i32 - 1;

        self.set(x, y, tl, Some(fg), false);
        self.set(right, y, tr, Some(fg), false);
        self.set(x, bottom, bl, Some(fg), false);
        self.set(right, bottom, br, Some(fg), false);

        for cx in (x + 1)..right {
            self.set(cx, y, '─', Some(fg), false);
            self.set(cx, bottom, '─', Some(fg), false);
        }
        for cy in (y + 1)..bottom {
            self.set(x, cy, '│', Some(fg), false);
            self.set(right, cy, '│', Some(fg), false);
        }
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            execute!(stdout, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    execute!(stdout, SetAttribute(Attribute::Bold))?;
                }

                if let Some(bg) = cell.bg {
                    execute!(stdout, SetBackgroundColor(bg))?;
                }

                if let Some(fg) = cell.fg {
                    execute!(stdout, SetForegroundColor(fg), Print(cell.ch), ResetColor)?;
                } else {
                    execute!(stdout, Print(cell.ch), ResetColor)?;
                }

                if cell.bold {
                    execute!(stdout, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
