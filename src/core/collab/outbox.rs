//=========================================================================
// Outbox
//=========================================================================
//
// Queue of fire-and-forget notifications for a collaborator.
//
// The orchestrator pushes here while it advances; the runtime takes the
// whole queue at the tick boundary and hands it to the collaborator.
//
//=========================================================================

//=== Outbox ==============================================================

/// Ordered queue of notifications of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbox<T> {
    queue: Vec<T>,
}

impl<T> Outbox<T> {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a notification for the next tick boundary.
    pub fn push(&mut self, item: T) {
        self.queue.push(item);
    }

    /// Returns an iterator over the queued notifications.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes every queued notification, leaving the outbox empty.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.queue)
    }
}

impl<T> Default for Outbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_order_and_empties() {
        let mut outbox = Outbox::new();
        outbox.push("flash");
        outbox.push("reveal");

        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox.take(), vec!["flash", "reveal"]);
        assert!(outbox.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut outbox = Outbox::new();
        outbox.push(1);
        outbox.push(2);

        assert_eq!(outbox.iter().sum::<i32>(), 3);
        assert_eq!(outbox.len(), 2);
    }
}
