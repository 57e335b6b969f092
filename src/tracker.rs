// Hand-detection seam. Landmark inference is an external capability: the
// painter only needs *something* that yields 21 joint positions per frame.
// PointerTracker is the built-in stand-in: it synthesizes a consistent
// hand around the window pointer so the whole pipeline runs (and is
// testable) without a landmark model. A real detector implements the same
// trait and drops in unchanged.

use crate::hand::{LandmarkSet, Landmark, LANDMARK_COUNT};
use crate::types::{FrameBuffer, Point};

/// Per-frame hand detection. Returns None when no hand is visible; the
/// session treats that as broken stroke continuity, not an error.
pub trait HandTracker {
    fn detect(&mut self, frame: &FrameBuffer) -> Option<LandmarkSet>;
}

/// Poses the pointer stand-in can fake.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandPose {
    /// Index finger extended, everything else curled (the draw gesture).
    Point,
    /// All five fingers extended (the pause gesture).
    OpenPalm,
    /// Index and middle extended: a visible hand making no gesture.
    Rest,
}

/// Mouse-driven tracker. The window feeds it pointer position and button
/// state each cycle; left button = Point pose, right button = OpenPalm.
pub struct PointerTracker {
    pointer: Option<Point>,
    pose: HandPose,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self { pointer: None, pose: HandPose::Rest }
    }

    /// Update from this cycle's window state. `pointer` None means the
    /// cursor left the window: report no hand.
    pub fn set_input(&mut self, pointer: Option<Point>, left_down: bool, right_down: bool) {
        self.pointer = pointer;
        self.pose = if right_down {
            HandPose::OpenPalm
        } else if left_down {
            HandPose::Point
        } else {
            HandPose::Rest
        };
    }
}

impl HandTracker for PointerTracker {
    fn detect(&mut self, _frame: &FrameBuffer) -> Option<LandmarkSet> {
        self.pointer.map(|tip| synthesize_hand(tip, self.pose))
    }
}

/// Build a 21-joint hand whose index fingertip sits exactly at `tip` and
/// whose geometry classifies as the requested pose. The proportions are
/// nominal; only the tip/joint orderings the classifier reads matter.
pub fn synthesize_hand(tip: Point, pose: HandPose) -> LandmarkSet {
    let extended: [bool; 5] = match pose {
        HandPose::Point => [false, true, false, false, false],
        HandPose::OpenPalm => [true; 5],
        HandPose::Rest => [false, true, true, false, false],
    };

    let mut pts = vec![Point::new(0, 0); LANDMARK_COUNT];
    pts[Landmark::Wrist as usize] = Point::new(tip.x + 10, tip.y + 140);

    // Thumb runs sideways: the classifier compares tip.x against IP.x.
    let thumb_ip = Point::new(tip.x - 60, tip.y + 70);
    let thumb_dx = if extended[0] { 15 } else { -15 };
    pts[Landmark::ThumbCmc as usize] = Point::new(tip.x - 40, tip.y + 110);
    pts[Landmark::ThumbMcp as usize] = Point::new(tip.x - 50, tip.y + 90);
    pts[Landmark::ThumbIp as usize] = thumb_ip;
    pts[Landmark::ThumbTip as usize] = Point::new(thumb_ip.x + thumb_dx, thumb_ip.y - 10);

    // The four fingers run upward: extended tips sit above their PIP joint,
    // curled tips below it. Index tip is pinned to the pointer.
    let chains: [( Landmark, Landmark, Landmark, Landmark, i32); 4] = [
        (Landmark::IndexMcp, Landmark::IndexPip, Landmark::IndexDip, Landmark::IndexTip, 0),
        (Landmark::MiddleMcp, Landmark::MiddlePip, Landmark::MiddleDip, Landmark::MiddleTip, 25),
        (Landmark::RingMcp, Landmark::RingPip, Landmark::RingDip, Landmark::RingTip, 50),
        (Landmark::PinkyMcp, Landmark::PinkyPip, Landmark::PinkyDip, Landmark::PinkyTip, 75),
    ];

    for (i, (mcp, pip, dip, tip_lm, dx)) in chains.into_iter().enumerate() {
        let x = tip.x + dx;
        let pip_y = tip.y + 45;
        let tip_y = if extended[i + 1] { tip.y } else { tip.y + 70 };
        pts[mcp as usize] = Point::new(x, tip.y + 85);
        pts[pip as usize] = Point::new(x, pip_y);
        pts[dip as usize] = Point::new(x, (pip_y + tip_y) / 2);
        pts[tip_lm as usize] = Point::new(x, tip_y);
    }

    LandmarkSet::new(pts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{finger_states, interpret, Gesture};

    #[test]
    fn point_pose_classifies_as_draw() {
        let hand = synthesize_hand(Point::new(300, 200), HandPose::Point);
        let fingers = finger_states(&hand);
        assert_eq!(fingers, [false, true, false, false, false]);
        assert_eq!(interpret(fingers), Gesture::Draw);
    }

    #[test]
    fn open_palm_classifies_as_pause() {
        let hand = synthesize_hand(Point::new(300, 200), HandPose::OpenPalm);
        assert_eq!(interpret(finger_states(&hand)), Gesture::PauseAll);
    }

    #[test]
    fn rest_pose_makes_no_gesture() {
        let hand = synthesize_hand(Point::new(300, 200), HandPose::Rest);
        assert_eq!(interpret(finger_states(&hand)), Gesture::None);
    }

    #[test]
    fn index_tip_is_pinned_to_the_pointer() {
        let tip = Point::new(123, 77);
        for pose in [HandPose::Point, HandPose::OpenPalm, HandPose::Rest] {
            let hand = synthesize_hand(tip, pose);
            assert_eq!(hand.get(Landmark::IndexTip), Some(tip));
        }
    }

    #[test]
    fn tracker_reports_no_hand_without_a_pointer() {
        let mut tracker = PointerTracker::new();
        let frame = FrameBuffer::new(8, 8);
        assert!(tracker.detect(&frame).is_none());

        tracker.set_input(Some(Point::new(4, 4)), true, false);
        assert!(tracker.detect(&frame).is_some());
    }
}
