//! Latest-request-wins sequencing for fire-and-forget fetches.

use log::debug;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues strictly increasing tickets.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn latest(&self) -> Option<Ticket> {
        (self.latest > 0).then_some(Ticket(self.latest))
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest() == Some(ticket)
    }
}

/// Holds the response to the most recent request only.
///
/// Responses for older tickets are rejected, so out-of-order arrivals cannot
/// regress the stored value.
#[derive(Debug)]
pub struct LatestSlot<T> {
    sequence: RequestSequence,
    value: Option<T>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            sequence: RequestSequence::default(),
            value: None,
        }
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> Ticket {
        self.sequence.issue()
    }

    /// Store `value` if `ticket` is the latest issued. Returns whether it was.
    pub fn apply(&mut self, ticket: Ticket, value: T) -> bool {
        if !self.sequence.is_latest(ticket) {
            debug!("dropping response for superseded request {ticket:?}");
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
