//! Subscription - one sink paired with its own batch policy
//!
//! The session drives each subscription in subscription order. The policy is
//! owned by value and swapped in place on mode transitions, so the sink never
//! has to be recreated.

use bulk_sinks::{Sink, SinkReport};

use crate::policy::BatchPolicy;

/// A subscribed sink with its batch policy and maximum bulk size
pub struct Subscription {
    sink: Box<dyn Sink>,
    policy: BatchPolicy,
    max_bulk_size: usize,
}

impl Subscription {
    /// Subscribe a sink, starting in sized mode
    pub fn new(sink: Box<dyn Sink>, max_bulk_size: usize) -> Self {
        Self {
            sink,
            policy: BatchPolicy::sized(),
            max_bulk_size,
        }
    }

    /// Sink name
    #[inline]
    pub fn name(&self) -> &str {
        self.sink.name()
    }

    /// Current batch policy
    #[inline]
    pub fn policy(&self) -> &BatchPolicy {
        &self.policy
    }

    /// Maximum bulk size in sized mode
    #[inline]
    pub fn max_bulk_size(&self) -> usize {
        self.max_bulk_size
    }

    /// Feed one line to the sink and its policy, posting any committed bulk
    pub fn update(&mut self, line: &str) {
        self.sink.observe_line(line);
        if let Some(bulk) = self.policy.update(line, self.max_bulk_size) {
            self.sink.post_bulk(bulk);
        }
    }

    /// Post whatever is pending, keeping the current mode
    pub fn flush(&mut self) {
        let bulk = self.policy.flush();
        self.sink.post_bulk(bulk);
    }

    /// Shut the sink down and collect its report lines
    pub fn report(&mut self) -> Vec<SinkReport> {
        self.sink.report()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("sink", &self.sink.name())
            .field("policy", &self.policy)
            .field("max_bulk_size", &self.max_bulk_size)
            .finish()
    }
}
