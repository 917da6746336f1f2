use crossterm::{cursor, queue, terminal, tty::IsTty};
use std::io::{self, Write};

/// Cursor and screen control the renderer relies on.
///
/// Every operation is a no-op on terminals that cannot do it.
pub trait TerminalCapabilities {
    /// Move to an absolute position, zero-based
    fn move_cursor<W: Write>(&self, writer: &mut W, column: u16, row: u16) -> io::Result<()>;

    fn move_up<W: Write>(&self, writer: &mut W, lines: u16) -> io::Result<()>;

    fn move_to_column<W: Write>(&self, writer: &mut W, column: u16) -> io::Result<()>;

    fn hide_cursor<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn show_cursor<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn enter_fullscreen<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn exit_fullscreen<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Whether an alternate screen is available
    fn supports_fullscreen(&self) -> bool;

    /// Whether colored output is understood
    fn supports_style(&self) -> bool;
}

/// A terminal that understands ANSI control sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTerminal;

impl TerminalCapabilities for AnsiTerminal {
    fn move_cursor<W: Write>(&self, writer: &mut W, column: u16, row: u16) -> io::Result<()> {
        queue!(writer, cursor::MoveTo(column, row))
    }

    fn move_up<W: Write>(&self, writer: &mut W, lines: u16) -> io::Result<()> {
        // CSI 0 A moves one line on most terminals.
        if lines == 0 {
            return Ok(());
        }
        queue!(writer, cursor::MoveUp(lines))
    }

    fn move_to_column<W: Write>(&self, writer: &mut W, column: u16) -> io::Result<()> {
        queue!(writer, cursor::MoveToColumn(column))
    }

    fn hide_cursor<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, cursor::Hide)
    }

    fn show_cursor<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, cursor::Show)
    }

    fn enter_fullscreen<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, terminal::EnterAlternateScreen)
    }

    fn exit_fullscreen<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        queue!(writer, terminal::LeaveAlternateScreen)
    }

    fn supports_fullscreen(&self) -> bool {
        true
    }

    fn supports_style(&self) -> bool {
        true
    }
}

/// Output that is not a capable terminal, e.g. a pipe or `TERM=dumb`
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTerminal;

impl TerminalCapabilities for NullTerminal {
    fn move_cursor<W: Write>(&self, _writer: &mut W, _column: u16, _row: u16) -> io::Result<()> {
        Ok(())
    }

    fn move_up<W: Write>(&self, _writer: &mut W, _lines: u16) -> io::Result<()> {
        Ok(())
    }

    fn move_to_column<W: Write>(&self, _writer: &mut W, _column: u16) -> io::Result<()> {
        Ok(())
    }

    fn hide_cursor<W: Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor<W: Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn enter_fullscreen<W: Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn exit_fullscreen<W: Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn supports_fullscreen(&self) -> bool {
        false
    }

    fn supports_style(&self) -> bool {
        false
    }
}

/// The capability set of the process' stdout
#[derive(Debug, Clone, Copy)]
pub enum Detected {
    Ansi(AnsiTerminal),
    Null(NullTerminal),
}

/// Pick capabilities from whether stdout is a terminal and what `TERM` says
pub fn detect() -> Detected {
    let term = std::env::var("TERM").ok();
    if io::stdout().is_tty() && is_capable(term.as_deref()) {
        Detected::Ansi(AnsiTerminal)
    } else {
        log::debug!("stdout is not a capable terminal (TERM={:?})", term);
        Detected::Null(NullTerminal)
    }
}

fn is_capable(term: Option<&str>) -> bool {
    matches!(term, Some(term) if !term.is_empty() && term != "dumb")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_capable() {
        assert!(is_capable(Some("xterm-256color")));
        assert!(!is_capable(Some("dumb")));
        assert!(!is_capable(Some("")));
        assert!(!is_capable(None));
    }

    #[test]
    fn test_null_terminal_writes_nothing() {
        let mut out = Vec::new();
        let term = NullTerminal;
        term.enter_fullscreen(&mut out).unwrap();
        term.move_cursor(&mut out, 0, 4).unwrap();
        term.move_up(&mut out, 3).unwrap();
        term.hide_cursor(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_ansi_move_up_zero_is_noop() {
        let mut out = Vec::new();
        AnsiTerminal.move_up(&mut out, 0).unwrap();
        assert!(out.is_empty());

        AnsiTerminal.move_up(&mut out, 3).unwrap();
        assert_eq!(out, b"\x1b[3A");
    }
}
