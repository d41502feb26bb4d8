//! Terminal output for the replay viewer.
//!
//! Every drawn frame is compared with the one last shown and only the cells
//! that changed are rewritten, grouped into horizontal runs. Mouse reporting
//! is on while the viewer owns the screen so drags and the wheel reach the
//! input layer.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Writes framebuffers to a terminal (stdout unless built with
/// [`TerminalRenderer::with_writer`]).
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            bytes: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, mouse reporting, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(EnableMouseCapture)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(DisableMouseCapture)?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (resize, screen corruption).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`.
    ///
    /// On return `fb` holds the previously shown buffer, resized to match, so
    /// the caller can rasterize the next frame into it.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let spare = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.bytes)?;
                shown
            }
            stale => {
                encode_full_into(fb, &mut self.bytes)?;
                let mut spare = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                spare.resize(fb.width(), fb.height());
                spare
            }
        };
        self.write_out()?;

        self.shown = Some(std::mem::replace(fb, spare));
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Escape sequences that clear the screen and paint every cell of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.paint_run(out, fb, 0, y, fb.width())?;
    }
    pen.finish(out)
}

/// Escape sequences that turn `prev` into `next` (same size) on screen.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in changed_runs(prev, next) {
        pen.paint_run(out, next, x, y, len)?;
    }
    pen.finish(out)
}

/// Tracks the active style so runs only emit style changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn paint_run(
        &mut self,
        out: &mut Vec<u8>,
        fb: &FrameBuffer,
        x: u16,
        y: u16,
        len: u16,
    ) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x.saturating_add(len) {
            let cell = fb.get(cx, y).unwrap_or_default();
            if self.style != Some(cell.style) {
                queue_style(out, cell.style)?;
                self.style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(ResetColor)?;
        }
        Ok(())
    }
}

/// Attribute reset comes first: SGR 0 would also clear the colors.
fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(truecolor(style.fg)))?;
    out.queue(SetBackgroundColor(truecolor(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` of every horizontal run where `prev` and `next` differ.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let differs = prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, y, next.width() - s));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn marked(width: u16, height: u16, at: &[(u16, u16)]) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for &(x, y) in at {
            fb.set(x, y, Cell {
                ch: '●',
                style: CellStyle::default(),
            });
        }
        fb
    }

    #[test]
    fn runs_group_adjacent_changes() {
        let prev = FrameBuffer::new(6, 2);
        let next = marked(6, 2, &[(1, 0), (2, 0), (3, 0), (5, 1)]);
        assert_eq!(changed_runs(&prev, &next), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn unchanged_frame_writes_no_cells() {
        let fb = marked(4, 4, &[(2, 2)]);
        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn first_draw_is_full_then_diffs() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = marked(8, 3, &[(0, 0)]);
        renderer.draw_swap(&mut fb).unwrap();
        let full_len = renderer.writer().len();
        assert!(String::from_utf8_lossy(renderer.writer()).contains("\x1b[2J"));
        assert_eq!(fb.width(), 8);

        let mut next = marked(8, 3, &[(0, 0), (4, 1)]);
        renderer.draw_swap(&mut next).unwrap();
        let diff_len = renderer.writer().len() - full_len;
        assert!(diff_len > 0 && diff_len < full_len);

        renderer.invalidate();
        let before = renderer.writer().len();
        renderer.draw_swap(&mut fb).unwrap();
        let repaint = String::from_utf8_lossy(&renderer.writer()[before..]).into_owned();
        assert!(repaint.contains("\x1b[2J"));
    }
}
