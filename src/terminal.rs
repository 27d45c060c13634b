// Copyright (c) 2026 glyphrain contributors

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

/// The character grid the engine paints on: size query, clear, cursor
/// positioning and per-cell colored writes. The real implementation wraps
/// crossterm; engine tests substitute a recording fake.
pub trait Renderer {
    fn size(&self) -> (u16, u16);
    fn clear(&mut self) -> Result<()>;
    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()>;
    fn write_glyph(&mut self, ch: char, fg: Color, bg: Color) -> Result<()>;
    /// Flush everything queued since the last call.
    fn present(&mut self) -> Result<()>;
    /// Wait up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>>;
}

pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self { stdout: out })
    }
}

impl Renderer for Terminal {
    fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 25))
    }

    fn clear(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn write_glyph(&mut self, ch: char, fg: Color, bg: Color) -> Result<()> {
        self.stdout.queue(SetForegroundColor(fg))?;
        self.stdout.queue(SetBackgroundColor(bg))?;
        self.stdout.queue(Print(ch))?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush()
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>> {
        if event::poll(timeout)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press {
                    return Ok(Some(k.code));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

/// Used by the panic hook and signal handlers, which cannot reach the
/// `Terminal` value owned by the main loop.
pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

#[cfg(test)]
pub(crate) struct FakeRenderer {
    pub width: u16,
    pub height: u16,
    pub clears: usize,
    /// (x, y, ch, fg, bg) for every write that reached the surface.
    pub writes: Vec<(u16, u16, char, Color, Color)>,
    /// Scripted key presses handed out one per poll.
    pub keys: std::collections::VecDeque<KeyCode>,
    cursor: (u16, u16),
}

#[cfg(test)]
impl FakeRenderer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            clears: 0,
            writes: Vec::new(),
            keys: std::collections::VecDeque::new(),
            cursor: (0, 0),
        }
    }
}

#[cfg(test)]
impl Renderer for FakeRenderer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn write_glyph(&mut self, ch: char, fg: Color, bg: Color) -> Result<()> {
        self.writes.push((self.cursor.0, self.cursor.1, ch, fg, bg));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<KeyCode>> {
        Ok(self.keys.pop_front())
    }
}
