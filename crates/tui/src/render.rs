use crate::terminal::TerminalCapabilities;
use cpuspeed_core::{ThreadRecord, ThreadTable};
use crossterm::style::Stylize;
use std::io::{self, Write};

/// Outer width of every column, borders excluded. Fixed so that every
/// render covers the same cells as the previous one.
pub const COLUMN_WIDTHS: [usize; 6] = [8, 6, 8, 12, 10, 7];

const HEADERS: [&str; 6] = ["Thread", "Core", "Online", "Speed, MHz", "Temp, °C", "Usage"];

const VERTICAL: char = '│';
const HORIZONTAL: char = '─';

/// Lines printed above the first data row: top border, header, separator
const HEADER_LINES: u16 = 3;

/// How the next render gets back to the first data row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Move up over the rows drawn last time
    Inline,
    /// Alternate screen, absolute positioning
    Fullscreen,
}

/// Redraws the data rows of the table in place
#[derive(Debug)]
pub struct Renderer {
    mode: DisplayMode,
    origin_row: u16,
    rendered_rows: Option<usize>,
}

impl Renderer {
    pub fn new(mode: DisplayMode, banner_shown: bool) -> Self {
        Self {
            mode,
            origin_row: u16::from(banner_shown) + HEADER_LINES,
            rendered_rows: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Row of the first data line in fullscreen mode
    pub fn origin_row(&self) -> u16 {
        self.origin_row
    }

    /// Draw the data rows, overwriting the previous render if there was one
    pub fn draw<W: Write, T: TerminalCapabilities>(
        &mut self,
        writer: &mut W,
        term: &T,
        table: &ThreadTable,
    ) -> io::Result<()> {
        if let Some(rows) = self.rendered_rows {
            match self.mode {
                DisplayMode::Fullscreen => term.move_cursor(writer, 0, self.origin_row)?,
                DisplayMode::Inline => {
                    term.move_up(writer, u16::try_from(rows).unwrap_or(u16::MAX))?;
                    term.move_to_column(writer, 0)?;
                }
            }
        }

        writer.write_all(rows(table).as_bytes())?;
        writer.flush()?;
        self.rendered_rows = Some(table.len());
        Ok(())
    }

    /// Leave the cursor below the table
    pub fn finish<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.mode == DisplayMode::Inline && self.rendered_rows.is_some() {
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

/// The processor line shown above the table
pub fn banner(model: &str, styled: bool) -> String {
    if styled {
        format!("Processor: {}\n", model.blue())
    } else {
        format!("Processor: {}\n", model)
    }
}

/// Top border, column titles and separator, printed once
pub fn header() -> String {
    let mut out = border('┌', '┬', '┐');
    out.push('\n');
    out.push_str(&line(HEADERS.map(str::to_string)));
    out.push('\n');
    out.push_str(&border('├', '┼', '┤'));
    out.push('\n');
    out
}

/// One line per thread followed by the bottom border, without a trailing
/// newline so the cursor stays on the table.
pub fn rows(table: &ThreadTable) -> String {
    let mut out = String::new();
    for record in table {
        out.push_str(&line(cells(record)));
        out.push('\n');
    }
    out.push_str(&border('└', '┴', '┘'));
    out
}

/// Offline threads show zeroes instead of their last known values
fn cells(record: &ThreadRecord) -> [String; 6] {
    let (frequency, temperature, usage) = if record.online {
        (record.frequency_mhz, record.temperature_c, record.usage_percent)
    } else {
        (0.0, 0.0, 0)
    };

    [
        record.index.to_string(),
        record.core_id.to_string(),
        u8::from(record.online).to_string(),
        format!("{:.3}", frequency),
        format!("{:.1}", temperature),
        format!("{}%", usage),
    ]
}

fn line(cells: [String; 6]) -> String {
    let mut out = String::new();
    out.push(VERTICAL);
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        out.push_str(&format!(" {:>w$} {}", cell, VERTICAL, w = width - 2));
    }
    out
}

fn border(left: char, junction: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (i, width) in COLUMN_WIDTHS.iter().enumerate() {
        out.extend(std::iter::repeat(HORIZONTAL).take(*width));
        out.push(if i + 1 == COLUMN_WIDTHS.len() { right } else { junction });
    }
    out
}
