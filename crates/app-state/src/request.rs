//! Request tracking
//!
//! Every dispatch of a view action takes a [`Ticket`] from the slot it will
//! report to. Tickets are issued in increasing order per slot, and only the
//! most recent one may settle the slot; older completions are discarded
//! without touching the slot's result, error or loading flag.

/// Sequence number of one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number within the issuing slot
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// What happened to a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion was the latest for its slot and was applied
    Applied,
    /// A newer request was dispatched (or the slot was reset); the completion was dropped
    Stale,
}

impl Completion {
    /// Check if the completion was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied)
    }
}

/// Loading state and ticket counter of one request slot
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    issued: u64,
    loading: bool,
}

impl RequestTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the latest request is still in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Issue a ticket for a new request and mark the slot loading
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;
        Ticket(self.issued)
    }

    /// Whether `ticket` is the latest issued
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Settle the slot for `ticket`
    ///
    /// Clears the loading flag if `ticket` is current; otherwise leaves the
    /// tracker untouched and reports the completion as stale.
    pub fn settle(&mut self, ticket: Ticket) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale completion"
            );
            return Completion::Stale;
        }
        self.loading = false;
        Completion::Applied
    }

    /// Invalidate any in-flight request and clear the loading flag
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.loading = false;
    }
}

/// A request slot holding the last successful result and the last error
#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    tracker: RequestTracker,
    value: Option<T>,
    error: Option<String>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            value: None,
            error: None,
        }
    }
}

impl<T> RequestSlot<T> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successful result
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Last error message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    /// Start a request, clearing the previous error but keeping the result
    pub fn begin(&mut self) -> Ticket {
        self.error = None;
        self.tracker.begin()
    }

    /// Start a request, clearing both the previous result and error
    pub fn begin_replacing(&mut self) -> Ticket {
        self.value = None;
        self.begin()
    }

    /// Apply the outcome of the request identified by `ticket`
    ///
    /// On success the result is replaced wholesale and the error cleared; on
    /// failure the error is set to `message(err)`.
    pub fn finish<E>(
        &mut self,
        ticket: Ticket,
        result: Result<T, E>,
        message: impl FnOnce(E) -> String,
    ) -> Completion {
        if self.tracker.settle(ticket) == Completion::Stale {
            return Completion::Stale;
        }
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(err) => self.error = Some(message(err)),
        }
        Completion::Applied
    }

    /// Replace the result directly, dropping any in-flight request
    pub fn set(&mut self, value: T) {
        self.tracker.invalidate();
        self.value = Some(value);
        self.error = None;
    }

    /// Clear result and error, dropping any in-flight request
    pub fn reset(&mut self) {
        self.tracker.invalidate();
        self.value = None;
        self.error = None;
    }
}
