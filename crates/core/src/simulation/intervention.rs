//! Queued player interventions
//!
//! Player actions (dropping water on a tile, lighting a back-burn) are never
//! applied mid-step. They are queued here and drained by the driver right
//! before the next spread step, which keeps each step's reads consistent.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Kind of external grid mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterventionKind {
    /// Put out a burning tile
    Extinguish,
    /// Set an unburned tile burning
    Ignite,
}

impl InterventionKind {
    /// Convert from a raw code used by front ends
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(InterventionKind::Extinguish),
            1 => Some(InterventionKind::Ignite),
            _ => None,
        }
    }

    /// Convert to a raw code
    pub fn as_u8(&self) -> u8 {
        match self {
            InterventionKind::Extinguish => 0,
            InterventionKind::Ignite => 1,
        }
    }
}

/// A single queued intervention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub kind: InterventionKind,
    /// Target tile
    pub x: usize,
    pub y: usize,
    /// Simulated time when the intervention was submitted
    pub timestamp: f32,
}

impl Intervention {
    pub fn new(kind: InterventionKind, x: usize, y: usize, timestamp: f32) -> Self {
        Self {
            kind,
            x,
            y,
            timestamp,
        }
    }

    pub fn extinguish(x: usize, y: usize, timestamp: f32) -> Self {
        Self::new(InterventionKind::Extinguish, x, y, timestamp)
    }

    pub fn ignite(x: usize, y: usize, timestamp: f32) -> Self {
        Self::new(InterventionKind::Ignite, x, y, timestamp)
    }
}

/// Pending interventions plus a bounded history of applied ones
#[derive(Debug)]
pub struct InterventionQueue {
    pending: Vec<Intervention>,
    history: VecDeque<Intervention>,
    max_history: usize,
}

impl Default for InterventionQueue {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl InterventionQueue {
    /// Create a queue keeping at most `max_history` applied interventions
    pub fn new(max_history: usize) -> Self {
        Self {
            pending: Vec::with_capacity(16),
            history: VecDeque::with_capacity(max_history.min(1024)),
            max_history,
        }
    }

    /// Queue an intervention for the next step
    pub fn submit(&mut self, intervention: Intervention) {
        self.pending.push(intervention);
    }

    pub fn pending(&self) -> &[Intervention] {
        &self.pending
    }

    /// Take all pending interventions for processing
    pub fn take_pending(&mut self) -> Vec<Intervention> {
        std::mem::take(&mut self.pending)
    }

    /// Record an intervention that changed the grid
    pub fn mark_applied(&mut self, intervention: Intervention) {
        if self.max_history == 0 {
            return;
        }
        if self.history.len() == self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(intervention);
    }

    /// Applied interventions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Intervention> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear all state (for restart)
    pub fn clear(&mut self) {
        self.pending.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_conversion() {
        assert_eq!(InterventionKind::Extinguish.as_u8(), 0);
        assert_eq!(InterventionKind::Ignite.as_u8(), 1);
        assert_eq!(InterventionKind::from_u8(0), Some(InterventionKind::Extinguish));
        assert_eq!(InterventionKind::from_u8(1), Some(InterventionKind::Ignite));
        assert_eq!(InterventionKind::from_u8(2), None);
    }

    #[test]
    fn test_submit_and_take() {
        let mut queue = InterventionQueue::new(10);
        queue.submit(Intervention::extinguish(3, 4, 0.0));
        assert_eq!(queue.pending().len(), 1);

        let pending = queue.take_pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].kind, InterventionKind::Extinguish);
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut queue = InterventionQueue::new(5);
        for i in 0..7 {
            queue.mark_applied(Intervention::ignite(i, 0, i as f32));
        }
        assert_eq!(queue.history_len(), 5);
        // Oldest entries are dropped first
        assert_eq!(queue.history().next().map(|i| i.timestamp), Some(2.0));
    }

    #[test]
    fn test_clear() {
        let mut queue = InterventionQueue::default();
        queue.submit(Intervention::ignite(0, 0, 0.0));
        queue.mark_applied(Intervention::ignite(1, 0, 0.0));
        queue.clear();
        assert!(queue.pending().is_empty());
        assert_eq!(queue.history_len(), 0);
    }
}
