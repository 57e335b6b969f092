// The painter session: canvas, palette and stroke engine bundled into one
// context object, advanced exactly once per captured frame. main.rs owns
// the I/O (camera, window, keys); everything with state or decisions lives
// here so it can be driven in tests without a camera.

use crate::draw;
use crate::hand::{self, Gesture, Landmark, LandmarkSet};
use crate::palette::Palette;
use crate::shape::{self, ShapeLabel};
use crate::stroke::{Mode, StrokeEngine};
use crate::types::FrameBuffer;

/// Radius of the fingertip marker drawn on the live overlay.
const MARKER_RADIUS: i32 = 10;

/// What one cycle did, for HUD text and logging.
pub struct CycleReport {
    pub gesture: Gesture,
    /// Swatch name if the fingertip sat inside a palette box this cycle.
    pub selected: Option<&'static str>,
    pub segment_drawn: bool,
}

pub struct PainterSession {
    pub canvas: FrameBuffer,
    pub palette: Palette,
    pub engine: StrokeEngine,
}

impl PainterSession {
    /// Canvas dimensions must match the camera frame; the compositor
    /// insists on it.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: FrameBuffer::new(width, height),
            palette: Palette::standard(),
            engine: StrokeEngine::new(),
        }
    }

    /// Run one cycle: classify fingers, interpret the gesture, resolve a
    /// palette hit, advance the stroke engine, mark the fingertip on the
    /// overlay. `hand` is None when the detector saw nothing this frame.
    ///
    /// A palette hit wins over the gesture: while the fingertip sits inside
    /// a swatch box the gesture is not applied, so hovering a swatch can
    /// never draw through it.
    pub fn cycle(&mut self, hand: Option<&LandmarkSet>, overlay: &mut FrameBuffer) -> CycleReport {
        let mut report = CycleReport {
            gesture: Gesture::None,
            selected: None,
            segment_drawn: false,
        };

        let Some(hand) = hand else {
            self.engine.hand_lost();
            return report;
        };
        let Some(tip) = hand.get(Landmark::IndexTip) else {
            // Degraded detection without a fingertip: same as no hand.
            self.engine.hand_lost();
            return report;
        };

        report.gesture = hand::interpret(hand::finger_states(hand));

        if let Some(swatch) = self.palette.hit_test(tip) {
            report.selected = Some(swatch.name);
            self.engine.select_swatch(swatch);
        } else {
            self.engine.apply_gesture(report.gesture);
        }

        report.segment_drawn = self.engine.advance(&mut self.canvas, tip);

        // Fingertip marker on the live overlay (never the canvas), drawn
        // whenever a hand is visible, drawing or not.
        draw::fill_circle(overlay, tip.x, tip.y, MARKER_RADIUS, self.engine.active_color());

        report
    }

    /// The `d` command: classify the dominant shape, then reset the canvas.
    /// The two always happen together; the label is only valid for the
    /// canvas that was just cleared.
    pub fn classify_and_clear(&mut self) -> ShapeLabel {
        let label = shape::classify(&self.canvas);
        self.canvas.clear();
        label
    }

    /// One-line HUD status for the current engine state.
    pub fn status_line(&self) -> &'static str {
        if self.engine.manual_pause() {
            return "PAUSED";
        }
        match self.engine.mode() {
            Mode::Paused => "PAUSED",
            Mode::Drawing => "DRAWING MODE",
            Mode::Erasing => "ERASER ON",
            Mode::Idle => {
                if self.engine.color_selected() {
                    "READY"
                } else {
                    "PICK A COLOR"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{synthesize_hand, HandPose};
    use crate::types::{pack_rgb, Point};

    const W: usize = 640;
    const H: usize = 480;

    fn overlay() -> FrameBuffer {
        FrameBuffer::new(W, H)
    }

    fn hand_at(x: i32, y: i32, pose: HandPose) -> LandmarkSet {
        synthesize_hand(Point::new(x, y), pose)
    }

    #[test]
    fn select_red_then_draw_a_red_segment() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        // Cycle 1: fingertip inside the red swatch (centered ~ (50,40)).
        let report = session.cycle(Some(&hand_at(50, 40, HandPose::Point)), &mut ov);
        assert_eq!(report.selected, Some("red"));
        assert!(!report.segment_drawn);
        assert_eq!(session.engine.active_color(), pack_rgb(255, 0, 0));
        assert!(!session.engine.eraser_mode());
        assert!(session.engine.color_selected());
        assert_eq!(session.engine.mode(), Mode::Idle);

        // Cycle 2: Draw gesture away from the palette seats the anchor.
        let report = session.cycle(Some(&hand_at(200, 300, HandPose::Point)), &mut ov);
        assert_eq!(report.gesture, Gesture::Draw);
        assert!(!report.segment_drawn);

        // Cycle 3: one red segment between the two fingertip positions.
        let report = session.cycle(Some(&hand_at(260, 300, HandPose::Point)), &mut ov);
        assert!(report.segment_drawn);
        let idx = 300 * W + 230;
        assert_eq!(session.canvas.pixels[idx], pack_rgb(255, 0, 0));
    }

    #[test]
    fn gestures_are_inert_until_a_color_is_picked() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        for x in [200, 260, 320] {
            let report = session.cycle(Some(&hand_at(x, 300, HandPose::Point)), &mut ov);
            assert_eq!(report.gesture, Gesture::Draw);
            assert!(!report.segment_drawn);
        }
        assert!(session.canvas.is_blank());
    }

    #[test]
    fn hovering_a_swatch_never_draws_through_it() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        // Arm the engine on red, then drag the Draw pose across a swatch.
        session.cycle(Some(&hand_at(50, 40, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(200, 300, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(260, 300, HandPose::Point)), &mut ov);
        assert!(!session.canvas.is_blank());

        // Over the green swatch (~(130,40)): selection wins, nothing drawn.
        let report = session.cycle(Some(&hand_at(130, 40, HandPose::Point)), &mut ov);
        assert_eq!(report.selected, Some("green"));
        assert!(!report.segment_drawn);
        assert_eq!(session.engine.mode(), Mode::Idle);
        assert!(session.engine.prev_point().is_none());
    }

    #[test]
    fn open_palm_pauses_and_pointing_resumes_fresh() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        session.cycle(Some(&hand_at(50, 40, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(200, 300, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(240, 300, HandPose::Point)), &mut ov);

        let report = session.cycle(Some(&hand_at(240, 300, HandPose::OpenPalm)), &mut ov);
        assert_eq!(report.gesture, Gesture::PauseAll);
        assert_eq!(session.engine.mode(), Mode::Paused);
        assert!(session.engine.prev_point().is_none());

        // Resume far away: the first Draw cycle only re-seats the anchor.
        let report = session.cycle(Some(&hand_at(500, 100, HandPose::Point)), &mut ov);
        assert!(!report.segment_drawn);
        let report = session.cycle(Some(&hand_at(540, 100, HandPose::Point)), &mut ov);
        assert!(report.segment_drawn);
    }

    #[test]
    fn losing_the_hand_breaks_continuity() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        session.cycle(Some(&hand_at(50, 40, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(200, 300, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(240, 300, HandPose::Point)), &mut ov);

        session.cycle(None, &mut ov);
        assert!(session.engine.prev_point().is_none());

        let report = session.cycle(Some(&hand_at(500, 100, HandPose::Point)), &mut ov);
        assert!(!report.segment_drawn);
    }

    #[test]
    fn marker_follows_the_fingertip_on_the_overlay() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        // No selection yet and no gesture: the marker still appears.
        session.cycle(Some(&hand_at(320, 240, HandPose::Rest)), &mut ov);
        let idx = 240 * W + 320;
        assert_eq!(ov.pixels[idx], session.engine.active_color());
        // The canvas stays untouched.
        assert!(session.canvas.is_blank());
    }

    #[test]
    fn classify_and_clear_always_resets_the_canvas() {
        let mut session = PainterSession::new(W, H);
        let mut ov = overlay();

        assert_eq!(session.classify_and_clear(), ShapeLabel::NoShape);
        assert!(session.canvas.is_blank());

        // Draw something, then classify: the canvas must come back blank.
        session.cycle(Some(&hand_at(50, 40, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(200, 300, HandPose::Point)), &mut ov);
        session.cycle(Some(&hand_at(400, 300, HandPose::Point)), &mut ov);
        assert!(!session.canvas.is_blank());

        let label = session.classify_and_clear();
        assert_ne!(label, ShapeLabel::NoShape);
        assert!(session.canvas.is_blank());
    }
}
