/// Default quiet period before an autosave runs.
pub const DEFAULT_AUTOSAVE_MS: u64 = 500;

/// Single-timer debounce for autosave.
///
/// Every queued input restarts the window; at most one save is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveDebouncer {
    delay_ms: u64,
    pending: Option<u64>,
}

impl AutosaveDebouncer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record an input at `now_ms`, replacing any pending one.
    pub const fn queue(&mut self, now_ms: u64) {
        self.pending = Some(now_ms);
    }

    /// Whether the quiet window has elapsed; clears the pending save if so.
    pub fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.pending else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub const fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for AutosaveDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_MS)
    }
}
