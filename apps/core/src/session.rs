#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Show,
    Hide,
}

/// Shell-owned visibility/reload state. The hosting shell feeds its signal
/// handlers into this value instead of flipping process-wide booleans; the
/// core itself holds no global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    visible: bool,
    reload_pending: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        // a fresh session starts hidden and wants one initial index build
        Self {
            visible: false,
            reload_pending: true,
        }
    }
}

impl SessionState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_toggle_signal(&mut self) -> ToggleAction {
        self.visible = !self.visible;
        if self.visible {
            ToggleAction::Show
        } else {
            ToggleAction::Hide
        }
    }

    pub fn on_escape(&mut self) -> bool {
        if self.visible {
            self.visible = false;
            return true;
        }
        false
    }

    pub fn on_reload_signal(&mut self) {
        self.reload_pending = true;
    }

    pub fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }
}
