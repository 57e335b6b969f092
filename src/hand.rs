// Hand landmarks, the finger up/down classifier, and the gesture table.
// A detector (see tracker.rs) hands us 21 joint positions per frame; this
// module turns them into one of a small closed set of gestures.

use crate::draw;
use crate::types::{FrameBuffer, Point};

/// The 21 hand joints, in detector order. Indexing a landmark set by name
/// instead of by raw integer keeps the tip/joint pairs below honest.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(usize)]
pub enum Landmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

/// Number of joints in a complete hand.
pub const LANDMARK_COUNT: usize = 21;

/// Finger bone chains, wrist outward. Only used for the cosmetic overlay.
const BONES: [(Landmark, Landmark); 20] = [
    (Landmark::Wrist, Landmark::ThumbCmc),
    (Landmark::ThumbCmc, Landmark::ThumbMcp),
    (Landmark::ThumbMcp, Landmark::ThumbIp),
    (Landmark::ThumbIp, Landmark::ThumbTip),
    (Landmark::Wrist, Landmark::IndexMcp),
    (Landmark::IndexMcp, Landmark::IndexPip),
    (Landmark::IndexPip, Landmark::IndexDip),
    (Landmark::IndexDip, Landmark::IndexTip),
    (Landmark::Wrist, Landmark::MiddleMcp),
    (Landmark::MiddleMcp, Landmark::MiddlePip),
    (Landmark::MiddlePip, Landmark::MiddleDip),
    (Landmark::MiddleDip, Landmark::MiddleTip),
    (Landmark::Wrist, Landmark::RingMcp),
    (Landmark::RingMcp, Landmark::RingPip),
    (Landmark::RingPip, Landmark::RingDip),
    (Landmark::RingDip, Landmark::RingTip),
    (Landmark::Wrist, Landmark::PinkyMcp),
    (Landmark::PinkyMcp, Landmark::PinkyPip),
    (Landmark::PinkyPip, Landmark::PinkyDip),
    (Landmark::PinkyDip, Landmark::PinkyTip),
];

/// One detected hand: joint positions in frame pixel coordinates.
/// A detector may deliver fewer than 21 points; consumers treat such a set
/// as a degraded "all fingers down" hand rather than an error.
#[derive(Clone, Debug)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// True when all 21 joints are present.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= LANDMARK_COUNT
    }

    /// Position of a named joint, if the detector delivered it.
    pub fn get(&self, lm: Landmark) -> Option<Point> {
        self.points.get(lm as usize).copied()
    }
}

/// Up/down flag per finger, order {thumb, index, middle, ring, pinky}.
pub type FingerVector = [bool; 5];

/// Classify which fingers are raised.
///
/// Thumb: tip right of its IP joint. After the frame is mirrored this holds
/// for a right hand facing the camera; the opposite orientation flips the
/// flag (known limitation of the heuristic).
/// Other fingers: tip above the PIP joint in image space (smaller y).
/// An incomplete set classifies as all-down; tracking loss is a defined
/// degraded state, never a failure.
pub fn finger_states(hand: &LandmarkSet) -> FingerVector {
    if !hand.is_complete() {
        return [false; 5];
    }

    // is_complete() held, so every get() below succeeds.
    let at = |lm: Landmark| hand.get(lm).unwrap_or(Point::new(0, 0));

    const PAIRS: [(Landmark, Landmark); 4] = [
        (Landmark::IndexTip, Landmark::IndexPip),
        (Landmark::MiddleTip, Landmark::MiddlePip),
        (Landmark::RingTip, Landmark::RingPip),
        (Landmark::PinkyTip, Landmark::PinkyPip),
    ];

    let mut fingers = [false; 5];
    fingers[0] = at(Landmark::ThumbTip).x > at(Landmark::ThumbIp).x;
    for (i, (tip, pip)) in PAIRS.iter().enumerate() {
        fingers[i + 1] = at(*tip).y < at(*pip).y;
    }
    fingers
}

/// The gestures the painter understands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Gesture {
    /// Index finger only: draw (or erase) at the fingertip.
    Draw,
    /// Open palm: pause drawing.
    PauseAll,
    /// Anything else: no gesture this cycle; prior state persists.
    None,
}

/// Exact-match gesture vocabulary. Adding a gesture means adding a row,
/// not another branch in the control flow.
const GESTURE_TABLE: [(FingerVector, Gesture); 2] = [
    ([false, true, false, false, false], Gesture::Draw),
    ([true, true, true, true, true], Gesture::PauseAll),
];

/// Map a finger vector to a gesture. No partial matches, no hysteresis;
/// every cycle re-evaluates from scratch.
pub fn interpret(fingers: FingerVector) -> Gesture {
    for (pattern, gesture) in GESTURE_TABLE {
        if fingers == pattern {
            return gesture;
        }
    }
    Gesture::None
}

/// Cosmetic joint overlay: yellow bones, green joints, drawn onto the live
/// frame (never the canvas). Nothing downstream reads these pixels.
pub fn draw_landmarks(overlay: &mut FrameBuffer, hand: &LandmarkSet) {
    const BONE_COLOR: u32 = 0x00FFFF00;
    const JOINT_COLOR: u32 = 0x0000FF00;

    for (a, b) in BONES {
        if let (Some(pa), Some(pb)) = (hand.get(a), hand.get(b)) {
            draw::draw_line(overlay, pa.x, pa.y, pb.x, pb.y, BONE_COLOR);
        }
    }
    for lm_idx in 0..LANDMARK_COUNT {
        if let Some(p) = hand.points.get(lm_idx) {
            draw::fill_circle(overlay, p.x, p.y, 3, JOINT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_with(points: Vec<Point>) -> LandmarkSet {
        LandmarkSet::new(points)
    }

    #[test]
    fn short_landmark_set_reads_as_all_down() {
        let hand = hand_with(vec![Point::new(5, 5); 10]);
        assert_eq!(finger_states(&hand), [false; 5]);
        let empty = hand_with(vec![]);
        assert_eq!(finger_states(&empty), [false; 5]);
    }

    #[test]
    fn index_above_pip_reads_as_up() {
        // All joints stacked at (100,100); lift the index tip above its PIP.
        let mut pts = vec![Point::new(100, 100); LANDMARK_COUNT];
        pts[Landmark::IndexTip as usize] = Point::new(100, 40);
        let fingers = finger_states(&hand_with(pts));
        assert_eq!(fingers, [false, true, false, false, false]);
    }

    #[test]
    fn thumb_uses_x_axis() {
        let mut pts = vec![Point::new(100, 100); LANDMARK_COUNT];
        pts[Landmark::ThumbTip as usize] = Point::new(140, 100);
        let fingers = finger_states(&hand_with(pts));
        assert!(fingers[0]);
        assert_eq!(&fingers[1..], &[false; 4]);
    }

    #[test]
    fn only_two_vectors_map_to_gestures() {
        // Every vector except the two table rows must interpret as None.
        for bits in 0u8..32 {
            let v = [
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            ];
            let expected = if v == [false, true, false, false, false] {
                Gesture::Draw
            } else if v == [true; 5] {
                Gesture::PauseAll
            } else {
                Gesture::None
            };
            assert_eq!(interpret(v), expected, "vector {v:?}");
        }
    }
}
