//! Simulation-wide services consumed by the collision subsystem.

use crate::collision::CollisionParams;

/// The channel through which non-fatal runtime errors are reported.
///
/// Reporting an error does not interrupt the caller: it flags the current step
/// as failed, and the outer simulation loop decides what to do about it.
pub trait ErrorChannel {
    /// Reports a runtime error.
    fn report_runtime_error(&mut self, message: String);
}

/// The domain-decomposition service distributing particles among ranks.
pub trait DomainDecomposition {
    /// Announces that particles must be resorted among ranks before the next
    /// neighbor search.
    fn request_resort(&mut self);
}

/// The inter-rank communication layer.
pub trait Communicator {
    /// The number of ranks taking part in the simulation.
    fn n_ranks(&self) -> usize;

    /// Replicates `params` on every rank.
    ///
    /// This is a collective operation: every rank blocks until it completes.
    fn broadcast_collision_params(&mut self, params: &CollisionParams);
}

/// Collects runtime errors raised during a step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeErrors {
    messages: Vec<String>,
}

impl RuntimeErrors {
    /// An empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The errors reported since the last call to [`RuntimeErrors::take`].
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Has any error been reported?
    pub fn step_failed(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Removes and returns all the errors reported so far.
    pub fn take(&mut self) -> Vec<String> {
        core::mem::take(&mut self.messages)
    }
}

impl ErrorChannel for RuntimeErrors {
    fn report_runtime_error(&mut self, message: String) {
        log::error!("{}", message);
        self.messages.push(message);
    }
}

/// A flag raised whenever a resort is requested.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResortFlag {
    requested: bool,
}

impl ResortFlag {
    /// Is a resort pending?
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Clears the flag, returning whether a resort was pending.
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.requested, false)
    }
}

impl DomainDecomposition for ResortFlag {
    fn request_resort(&mut self) {
        self.requested = true;
    }
}

/// The communicator of a simulation running on a single rank.
#[derive(Copy, Clone, Debug, Default)]
pub struct SingleRank;

impl Communicator for SingleRank {
    fn n_ranks(&self) -> usize {
        1
    }

    fn broadcast_collision_params(&mut self, params: &CollisionParams) {
        log::debug!("Single rank: nothing to broadcast for {:?}.", params.mode);
    }
}
