//! Platform-agnostic drag input types.
//!
//! Every frontend maps its native pointer gestures to these events. The
//! engine never sees raw touch or mouse input.

use serde::{Deserialize, Serialize};

/// A 2-D pointer displacement in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// One step of a drag gesture on a grid item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragEvent {
    /// Long-press/drag began on the item at `index`.
    Start { index: usize },
    /// Pointer moved by a relative amount since the previous event.
    Move { dx: f32, dy: f32 },
    /// Pointer released.
    End,
    /// Gesture interrupted by the system.
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_distance_squared() {
        assert_eq!(Offset::new(3.0, 4.0).distance_squared(), 25.0);
        assert_eq!(Offset::ZERO.distance_squared(), 0.0);
    }

    #[test]
    fn offset_add_assign_accumulates() {
        let mut o = Offset::ZERO;
        o += Offset::new(10.0, -5.0);
        o += Offset::new(2.5, 1.0);
        assert_eq!(o, Offset::new(12.5, -4.0));
        assert_eq!(o + Offset::new(-12.5, 4.0), Offset::ZERO);
    }

    #[test]
    fn drag_event_variants_distinct() {
        let events = [
            DragEvent::Start { index: 0 },
            DragEvent::Move { dx: 0.0, dy: 0.0 },
            DragEvent::End,
            DragEvent::Cancel,
        ];
        for (i, a) in events.iter().enumerate() {
            for (j, b) in events.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "variants {i} and {j} should differ");
                }
            }
        }
    }

    #[test]
    fn drag_event_serde_roundtrip() {
        let e = DragEvent::Move { dx: 120.0, dy: -8.5 };
        let json = serde_json::to_string(&e).unwrap();
        let back: DragEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn add_matches_add_assign(
                ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
                bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            ) {
                let a = Offset::new(ax, ay);
                let b = Offset::new(bx, by);
                let mut c = a;
                c += b;
                prop_assert_eq!(a + b, c);
                prop_assert_eq!(a + Offset::ZERO, a);
            }

            #[test]
            fn distance_squared_is_symmetric_and_non_negative(
                x in -1000.0f32..1000.0, y in -1000.0f32..1000.0,
            ) {
                let d = Offset::new(x, y).distance_squared();
                prop_assert!(d >= 0.0);
                prop_assert_eq!(d, Offset::new(-x, -y).distance_squared());
                prop_assert_eq!(d, Offset::new(y, x).distance_squared());
            }
        }
    }
}
