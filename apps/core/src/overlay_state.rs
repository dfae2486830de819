use crate::host::{HostWindow, Point};

/// Pointer movement below this many pixels on both axes is treated as jitter.
pub const DRAG_JITTER_PX: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    ShowAndFocus,
    Hide,
    FocusExisting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    visible: bool,
    tray_mode: bool,
    drag_start: Option<Point>,
}

impl OverlayState {
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn tray_mode(&self) -> bool {
        self.tray_mode
    }

    /// Global hotkey: show when hidden, hide when focused, refocus otherwise.
    pub fn on_hotkey(&mut self, has_focus: bool) -> ToggleAction {
        if !self.visible {
            self.visible = true;
            return ToggleAction::ShowAndFocus;
        }

        if has_focus {
            self.visible = false;
            return ToggleAction::Hide;
        }

        ToggleAction::FocusExisting
    }

    pub fn on_escape(&mut self) -> bool {
        if self.visible {
            self.visible = false;
            return true;
        }
        false
    }

    pub fn set_tray_mode(&mut self, enabled: bool, host: &mut dyn HostWindow) {
        self.tray_mode = enabled;
        host.set_tray_mode(enabled);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    pub fn drag_down(&mut self, origin: Point, host: &mut dyn HostWindow) {
        self.drag_start = Some(origin);
        host.begin_drag(origin);
    }

    /// Returns whether the move was forwarded to the host.
    pub fn drag_move(&mut self, point: Point, host: &mut dyn HostWindow) -> bool {
        let Some(start) = self.drag_start else {
            return false;
        };
        let dx = (point.x - start.x).abs();
        let dy = (point.y - start.y).abs();
        if dx < DRAG_JITTER_PX && dy < DRAG_JITTER_PX {
            return false;
        }
        host.drag_to(point);
        true
    }

    pub fn drag_up(&mut self, host: &mut dyn HostWindow) {
        if self.drag_start.take().is_some() {
            host.end_drag();
        }
    }
}
