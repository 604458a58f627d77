/// Token for a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

/// Cancellable per-frame callback registry.
///
/// At most one request is pending. The host drains it with [`take_due`]
/// once per display frame; the demo engine re-requests after each tick while
/// a demo is active. A cancelled request never fires.
///
/// [`take_due`]: FrameScheduler::take_due
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a callback on the next frame, replacing any pending request.
    pub fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending = Some(request);
        request
    }

    /// Cancels the pending request. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending request, if any; the caller runs its callback.
    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }
}
