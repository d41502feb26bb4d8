//! Mouse drag-to-pan and wheel-to-zoom.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::ViewerCommand;

/// Tracks an in-progress left-button drag.
///
/// Terminal columns are half a screen unit wide, so horizontal motion is
/// accumulated until a whole unit has been dragged.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    last: Option<(u16, u16)>,
    pending_cols: i32,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn handle(&mut self, event: MouseEvent) -> Option<ViewerCommand> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last = Some((event.column, event.row));
                self.pending_cols = 0;
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (lx, ly) = self.last?;
                self.last = Some((event.column, event.row));
                self.pending_cols += event.column as i32 - lx as i32;
                let dx = self.pending_cols / 2;
                self.pending_cols -= dx * 2;
                let dy = event.row as i32 - ly as i32;
                if dx == 0 && dy == 0 {
                    return None;
                }
                Some(ViewerCommand::Pan { dx, dy })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.last = None;
                self.pending_cols = 0;
                None
            }
            MouseEventKind::ScrollUp => Some(ViewerCommand::ZoomIn),
            MouseEventKind::ScrollDown => Some(ViewerCommand::ZoomOut),
            _ => None,
        }
    }
}
