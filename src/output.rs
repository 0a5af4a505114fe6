//! Console output for studentdb.
//!
//! Every line the program prints goes through a [`Console`], which prefixes
//! it with a colored category tag. Colors come from an immutable [`Palette`]
//! owned by the console; a plain palette prints the same text without escape
//! codes.

use crate::core::Result;
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Stdout, Write};

/// Source of a console message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Progress of the program itself
    Program,
    /// Fatal diagnostics
    Error,
    /// Results reported by the database
    Database,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Program => "PROGRAM",
            Category::Error => "ERROR",
            Category::Database => "DATABASE",
        }
    }

    fn color(&self) -> Color {
        match self {
            Category::Program => Color::DarkYellow,
            Category::Error => Color::DarkRed,
            Category::Database => Color::DarkMagenta,
        }
    }
}

/// Color settings for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn colored() -> Self {
        Palette { color: true }
    }

    pub fn plain() -> Self {
        Palette { color: false }
    }

    /// Colors on when `enabled` and the `NO_COLOR` environment variable is unset.
    pub fn from_settings(enabled: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty());
        if enabled && !no_color {
            Palette::colored()
        } else {
            Palette::plain()
        }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// `[LABEL]: ` with the label in the category color.
    pub fn tag(&self, category: Category) -> String {
        format!("[{}]: ", self.paint(category.label(), category.color()))
    }

    /// Highlights a user-supplied value.
    pub fn input(&self, text: &str) -> String {
        self.paint(text, Color::DarkCyan)
    }

    /// Highlights a table name or a row id.
    pub fn table(&self, text: &str) -> String {
        self.paint(text, Color::DarkBlue)
    }
}

/// Writes categorized messages to an output stream
pub struct Console<W: Write> {
    out: W,
    palette: Palette,
}

impl Console<Stdout> {
    pub fn stdout(palette: Palette) -> Self {
        Console::new(io::stdout(), palette)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Console { out, palette }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn message(&mut self, category: Category, text: &str) -> Result<()> {
        writeln!(self.out, "{}{}", self.palette.tag(category), text)?;
        Ok(())
    }

    pub fn program(&mut self, text: &str) -> Result<()> {
        self.message(Category::Program, text)
    }

    pub fn error(&mut self, text: &str) -> Result<()> {
        self.message(Category::Error, text)
    }

    pub fn database(&mut self, text: &str) -> Result<()> {
        self.message(Category::Database, text)
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// Writes pre-rendered text as is.
    pub fn block(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
