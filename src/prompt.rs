//! Line input with Tab completion.
//!
//! On a terminal, [`TerminalInput`] runs a small raw-mode line editor:
//! typing, Backspace, Tab to cycle through completion candidates, Enter to
//! submit, and Esc / Ctrl-C / Ctrl-D (on an empty line) for end of input.
//! Anywhere else (pipes, tests) [`BufferedInput`] reads plain lines.

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{BufRead, IsTerminal, Write, stdout};

use crate::logger::Log;

/// Produces completion candidates for the text typed so far.
pub type Completer<'a> = &'a dyn Fn(&str) -> Vec<String>;

pub trait LineInput {
    /// Show `prompt` and read one line, without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str, completer: Option<Completer<'_>>)
    -> Result<Option<String>>;
}

/// Plain line reader over any `BufRead`.
pub struct BufferedInput<R> {
    reader: R,
}

impl<R: BufRead> BufferedInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineInput for BufferedInput<R> {
    fn read_line(
        &mut self,
        prompt: &str,
        _completer: Option<Completer<'_>>,
    ) -> Result<Option<String>> {
        if Log::is_enabled() {
            print!("┃ {}", prompt);
            stdout().flush()?;
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Restores cooked mode when dropped, even on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Candidates for the text typed before the first Tab, and the next to show.
struct TabCycle {
    candidates: Vec<String>,
    index: usize,
}

/// Raw-mode line editor for interactive terminals.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    fn redraw(prompt: &str, buffer: &str) -> Result<()> {
        let mut out = stdout();
        out.execute(Print("\r"))?;
        out.execute(Clear(ClearType::CurrentLine))?;
        out.execute(Print(format!("┃ {}{}", prompt, buffer)))?;
        out.flush()?;
        Ok(())
    }
}

impl LineInput for TerminalInput {
    fn read_line(
        &mut self,
        prompt: &str,
        completer: Option<Completer<'_>>,
    ) -> Result<Option<String>> {
        let mut buffer = String::new();
        let mut cycle: Option<TabCycle> = None;

        let guard = RawModeGuard::enable()?;
        Self::redraw(prompt, &buffer)?;

        let result = loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Enter => break Some(buffer),
                KeyCode::Esc => break None,
                KeyCode::Char('c') if ctrl => break None,
                KeyCode::Char('d') if ctrl && buffer.is_empty() => break None,
                KeyCode::Tab => {
                    if let Some(complete) = completer {
                        let state = cycle.get_or_insert_with(|| TabCycle {
                            candidates: complete(&buffer),
                            index: 0,
                        });
                        if !state.candidates.is_empty() {
                            buffer = state.candidates[state.index % state.candidates.len()].clone();
                            state.index += 1;
                        }
                    }
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    cycle = None;
                }
                KeyCode::Char(c) if !ctrl => {
                    buffer.push(c);
                    cycle = None;
                }
                _ => {}
            }

            Self::redraw(prompt, &buffer)?;
        };

        drop(guard);
        println!();
        Ok(result)
    }
}

/// The right reader for this process's stdin.
pub fn stdin_input() -> Box<dyn LineInput> {
    if std::io::stdin().is_terminal() {
        Box::new(TerminalInput::new())
    } else {
        Box::new(BufferedInput::new(std::io::stdin().lock()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_buffered_reads_lines_then_eof() {
        Log::set_enabled(false);
        let mut input = BufferedInput::new(Cursor::new("Tokyo\r\n  Paris \n\nlast"));

        assert_eq!(input.read_line("> ", None).unwrap().as_deref(), Some("Tokyo"));
        assert_eq!(input.read_line("> ", None).unwrap().as_deref(), Some("  Paris "));
        assert_eq!(input.read_line("> ", None).unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line("> ", None).unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line("> ", None).unwrap(), None);
    }
}
