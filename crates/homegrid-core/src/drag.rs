//! Drag-to-reorder gesture state machine.
//!
//! One controller per grid (home or dock). Continuous pointer motion is
//! folded into a single candidate target slot, committed to the store only
//! when the pointer is released:
//!
//! ```text
//! Idle --begin--> Dragging --release--> CommittingMove --settle--> Idle
//!                    |    \--release (no move)---------------------^
//!                    \--cancel--> Cancelled --settle---------------^
//! ```
//!
//! A drag proposes at most one slot of travel: right of the step distance
//! proposes `source + 1`, left proposes `source - 1`, anything else proposes
//! nothing.

use crate::config::DragConfig;
use crate::input::{DragEvent, Offset};
use crate::placement::{PlacementStore, SequenceId};

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub source: usize,
    pub target: usize,
    pub offset: Offset,
    /// Sequence length when the drag began.
    len: usize,
}

/// A move that will be applied when the gesture settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(ActiveDrag),
    CommittingMove(MoveIntent),
    Cancelled,
}

/// Result of feeding an event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing to report (gesture still running, or event ignored).
    Pending,
    /// Released and the store was reordered.
    Moved(MoveIntent),
    /// Released without a move (candidate equal to source, or store refused).
    Unchanged,
    /// Gesture cancelled; the store was not touched.
    Cancelled,
}

/// Candidate target for an accumulated `offset` dragged from `source` in a
/// sequence of `len` slots.
pub fn candidate_target(source: usize, len: usize, offset: Offset, config: &DragConfig) -> usize {
    if len == 0 || offset.distance_squared() <= config.threshold_sq {
        return source;
    }
    let last = len - 1;
    if offset.x > config.step_px {
        (source + 1).min(last)
    } else if offset.x < -config.step_px {
        source.saturating_sub(1)
    } else {
        source
    }
}

/// Gesture controller for one grid.
#[derive(Debug, Clone)]
pub struct DragReorderController {
    sequence: SequenceId,
    config: DragConfig,
    phase: DragPhase,
}

impl DragReorderController {
    pub fn new(sequence: SequenceId, config: DragConfig) -> Self {
        Self {
            sequence,
            config,
            phase: DragPhase::Idle,
        }
    }

    pub fn sequence(&self) -> SequenceId {
        self.sequence
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Start dragging slot `index` of a `len`-slot sequence.
    ///
    /// Only valid from `Idle`; returns `false` (and stays put) otherwise or
    /// when `index` is out of range.
    pub fn begin(&mut self, index: usize, len: usize) -> bool {
        if self.phase != DragPhase::Idle || index >= len {
            return false;
        }
        log::debug!("{} drag started at slot {index}", self.sequence);
        self.phase = DragPhase::Dragging(ActiveDrag {
            source: index,
            target: index,
            offset: Offset::ZERO,
            len,
        });
        true
    }

    /// Accumulate pointer displacement and recompute the candidate target.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        if let DragPhase::Dragging(drag) = &mut self.phase {
            drag.offset += Offset::new(dx, dy);
            drag.target = candidate_target(drag.source, drag.len, drag.offset, &self.config);
        }
    }

    /// Pointer released. Returns the pending move, if the candidate differs
    /// from the source.
    pub fn release(&mut self) -> Option<MoveIntent> {
        let DragPhase::Dragging(drag) = self.phase else {
            return None;
        };
        if drag.target == drag.source {
            self.phase = DragPhase::Idle;
            return None;
        }
        let intent = MoveIntent {
            from: drag.source,
            to: drag.target,
        };
        self.phase = DragPhase::CommittingMove(intent);
        Some(intent)
    }

    /// Gesture interrupted: drop the candidate.
    pub fn cancel(&mut self) {
        if matches!(self.phase, DragPhase::Dragging(_)) {
            log::debug!("{} drag cancelled", self.sequence);
            self.phase = DragPhase::Cancelled;
        }
    }

    /// Apply any pending move to `store` and return to `Idle`.
    pub fn settle(&mut self, store: &mut PlacementStore) -> DragOutcome {
        let outcome = match self.phase {
            DragPhase::CommittingMove(intent) => {
                if store.move_entry(self.sequence, intent.from, intent.to) {
                    DragOutcome::Moved(intent)
                } else {
                    DragOutcome::Unchanged
                }
            },
            DragPhase::Cancelled => DragOutcome::Cancelled,
            DragPhase::Idle | DragPhase::Dragging(_) => return DragOutcome::Pending,
        };
        self.phase = DragPhase::Idle;
        outcome
    }

    /// Drive the state machine with one event.
    pub fn handle(&mut self, event: DragEvent, store: &mut PlacementStore) -> DragOutcome {
        match event {
            DragEvent::Start { index } => {
                let len = store.sequence(self.sequence).len();
                self.begin(index, len);
                DragOutcome::Pending
            },
            DragEvent::Move { dx, dy } => {
                self.drag_by(dx, dy);
                DragOutcome::Pending
            },
            DragEvent::End => {
                if !matches!(self.phase, DragPhase::Dragging(_)) {
                    return DragOutcome::Pending;
                }
                match self.release() {
                    Some(_) => self.settle(store),
                    None => DragOutcome::Unchanged,
                }
            },
            DragEvent::Cancel => {
                if !matches!(self.phase, DragPhase::Dragging(_)) {
                    return DragOutcome::Pending;
                }
                self.cancel();
                self.settle(store)
            },
        }
    }

    /// Drop any gesture state. Used when the store is rebuilt underneath.
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Whether slot `index` is the one being dragged.
    pub fn is_dragging(&self, index: usize) -> bool {
        matches!(self.phase, DragPhase::Dragging(d) if d.source == index)
    }

    /// Whether slot `index` is the current candidate drop slot (and differs
    /// from the source).
    pub fn is_target(&self, index: usize) -> bool {
        matches!(self.phase, DragPhase::Dragging(d) if d.target == index && d.target != d.source)
    }

    /// Visual offset of the dragged item (zero when not dragging).
    pub fn offset(&self) -> Offset {
        match self.phase {
            DragPhase::Dragging(d) => d.offset,
            _ => Offset::ZERO,
        }
    }
}
