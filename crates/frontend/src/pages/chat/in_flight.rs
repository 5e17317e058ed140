//! Chat Page - In-flight request bookkeeping
//!
//! Each started stream gets a generation number. Stopping, replacing or
//! disposing bumps the generation, so callbacks of the old stream see that
//! they are no longer current and leave the session alone.

#[derive(Debug)]
pub struct InFlight<H> {
    generation: u64,
    handle: Option<H>,
}

impl<H> Default for InFlight<H> {
    fn default() -> Self {
        Self {
            generation: 0,
            handle: None,
        }
    }
}

impl<H> InFlight<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request. Returns its generation and the handle of the
    /// request it replaces, which the caller must cancel.
    pub fn start(&mut self, handle: H) -> (u64, Option<H>) {
        self.generation += 1;
        (self.generation, self.handle.replace(handle))
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Invalidate the running request and hand back its handle for aborting
    pub fn cancel(&mut self) -> Option<H> {
        self.generation += 1;
        self.handle.take()
    }

    /// The request of `generation` ended on its own. Returns `false` when it
    /// was cancelled or replaced meanwhile.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.handle = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_request_clears_handle() {
        let mut in_flight = InFlight::new();
        let (generation, replaced) = in_flight.start("req-1");
        assert_eq!(replaced, None);

        assert!(in_flight.finish(generation));
        assert!(in_flight.is_current(generation));
        assert_eq!(in_flight.cancel(), None);
    }

    #[test]
    fn cancelled_request_is_no_longer_current() {
        let mut in_flight = InFlight::new();
        let (generation, _) = in_flight.start("req-1");

        assert_eq!(in_flight.cancel(), Some("req-1"));
        assert!(!in_flight.is_current(generation));
        assert!(!in_flight.finish(generation));
        assert_eq!(in_flight.cancel(), None);
    }

    #[test]
    fn newer_request_supersedes_older_one() {
        let mut in_flight = InFlight::new();
        let (first, _) = in_flight.start("req-1");
        let (second, replaced) = in_flight.start("req-2");

        assert_eq!(replaced, Some("req-1"));
        assert!(!in_flight.is_current(first));
        assert!(!in_flight.finish(first));
        assert!(in_flight.finish(second));
    }
}
