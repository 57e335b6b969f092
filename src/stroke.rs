// The gesture-to-stroke state machine. One StrokeEngine lives for the whole
// session; each cycle feeds it the recognized gesture (or a palette hit, or
// tracking loss) and then advances it with the current fingertip position.
//
// Stroke continuity is carried entirely by `prev`: whenever it is None the
// next advance re-seats the anchor instead of drawing, so a fresh stroke
// never connects to a stale position.

use crate::draw;
use crate::hand::Gesture;
use crate::palette::Swatch;
use crate::types::{pack_rgb, FrameBuffer, Point};

/// Brush width for normal strokes (pixels).
pub const BRUSH_THICKNESS: i32 = 7;
/// Eraser width; deliberately much wider than the brush.
pub const ERASER_THICKNESS: i32 = 50;

/// Canvas background. Erasing paints this, and the compositor treats it as
/// transparent.
const CANVAS_BG: u32 = 0x00000000;

/// What the engine is doing this cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Idle,
    Drawing,
    Erasing,
    /// Parked by the open-palm gesture; a later Draw gesture resumes.
    Paused,
}

pub struct StrokeEngine {
    mode: Mode,
    /// Keyboard pause. Independent of the gesture pause and sticky: it gates
    /// stroke advancement until toggled off again.
    manual_pause: bool,
    eraser_mode: bool,
    /// Latched by the first palette selection; drawing gestures are inert
    /// until then.
    color_selected: bool,
    active_color: u32,
    prev: Option<Point>,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            manual_pause: false,
            eraser_mode: false,
            color_selected: false,
            active_color: pack_rgb(255, 0, 0), // red until the first selection
            prev: None,
        }
    }

    /// Apply this cycle's gesture. Draw only arms the engine once a color
    /// has been picked; PauseAll parks it and breaks continuity immediately
    /// so that resuming starts a fresh stroke.
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::PauseAll => {
                self.mode = Mode::Paused;
                self.prev = None;
            }
            Gesture::Draw => {
                if self.color_selected {
                    self.mode = if self.eraser_mode { Mode::Erasing } else { Mode::Drawing };
                }
            }
            Gesture::None => {} // prior state persists
        }
    }

    /// Palette hit: take the swatch's color, switch eraser mode if it is the
    /// eraser swatch, and force the engine idle for this cycle: selection
    /// always interrupts drawing, even if the hand is also making the Draw
    /// gesture.
    pub fn select_swatch(&mut self, swatch: &Swatch) {
        self.active_color = swatch.color;
        self.eraser_mode = swatch.is_eraser();
        self.color_selected = true;
        self.mode = Mode::Idle;
        self.prev = None;
    }

    /// Keyboard eraser toggle. If a stroke mode is active it switches over
    /// in place.
    pub fn toggle_eraser(&mut self) {
        self.eraser_mode = !self.eraser_mode;
        self.mode = match (self.mode, self.eraser_mode) {
            (Mode::Drawing, true) => Mode::Erasing,
            (Mode::Erasing, false) => Mode::Drawing,
            (m, _) => m,
        };
    }

    /// Keyboard pause toggle; returns the new state for the caller to log.
    pub fn toggle_manual_pause(&mut self) -> bool {
        self.manual_pause = !self.manual_pause;
        self.manual_pause
    }

    /// Tracking lost this cycle: continuity always breaks.
    pub fn hand_lost(&mut self) {
        self.prev = None;
    }

    /// True when the next advance with a fingertip position will stroke.
    fn stroking(&self) -> bool {
        matches!(self.mode, Mode::Drawing | Mode::Erasing)
            && self.color_selected
            && !self.manual_pause
    }

    /// Advance one cycle with the fingertip at `tip`. Returns true if a
    /// segment was actually laid onto the canvas.
    ///
    /// The first active cycle after continuity breaks only re-seats the
    /// anchor; connecting from a stale anchor would paint a spurious line.
    pub fn advance(&mut self, canvas: &mut FrameBuffer, tip: Point) -> bool {
        if !self.stroking() {
            self.prev = None;
            return false;
        }

        let Some(anchor) = self.prev else {
            self.prev = Some(tip);
            return false;
        };

        let (color, thickness) = if self.mode == Mode::Erasing {
            (CANVAS_BG, ERASER_THICKNESS)
        } else {
            (self.active_color, BRUSH_THICKNESS)
        };
        draw::draw_segment(canvas, anchor, tip, color, thickness);
        self.prev = Some(tip);
        true
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_color(&self) -> u32 {
        self.active_color
    }

    pub fn eraser_mode(&self) -> bool {
        self.eraser_mode
    }

    pub fn manual_pause(&self) -> bool {
        self.manual_pause
    }

    pub fn color_selected(&self) -> bool {
        self.color_selected
    }

    pub fn prev_point(&self) -> Option<Point> {
        self.prev
    }
}
