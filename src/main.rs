// Gesture Painter.
// • Live camera (mirrored) is always the base image.
// • Point with the index finger to draw; open the palm to pause.
// • Hover a palette box at the top to pick a color (black = eraser).
// • Keys: E toggles the eraser, P toggles pause, D names the drawn shape
//   and clears the canvas, Q quits.
//
// Without a landmark model the built-in pointer tracker stands in for the
// hand: move the mouse, hold Left to point, hold Right for the open palm.

mod camera;
mod draw;
mod error;
mod hand;
mod palette;
mod session;
mod shape;
mod stroke;
mod tracker;
mod types;
mod vision;

use std::time::{Duration, Instant};

use camera::CameraCapture;
use draw::{draw_text_5x7, Drawer};
use error::Error;
use session::PainterSession;
use tracker::{HandTracker, PointerTracker};
use types::Point;

/// How long the shape label stays on screen before normal cycling resumes.
const SHAPE_LABEL_HOLD: Duration = Duration::from_secs(2);

fn main() -> Result<(), Error> {
    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::new(0, 640, 480)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    let mut drawer = Drawer::new("Gesture Painter", w, h)?;

    /* --- Session state: canvas, palette, stroke engine --- */
    let mut session = PainterSession::new(w, h);

    /* --- Hand detection stand-in (see tracker.rs) --- */
    let mut tracker = PointerTracker::new();

    /* --- FPS bookkeeping, printed once per second like the HUD --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        /* 1) Fresh frame, mirrored so motion matches the user. A camera
              failure ends the session; painting over stale frames is worse. */
        let mut frame = cam.next_frame()?;
        vision::mirror_horizontal(&mut frame);

        /* 2) The overlay starts as the live frame; UI and the hand skeleton
              are drawn onto it, the canvas is composited over it. */
        let mut overlay = frame.clone();

        /* 3) Detect the hand for this cycle. */
        tracker.set_input(
            drawer
                .mouse_pos()
                .map(|(x, y)| Point::new(x as i32, y as i32)),
            drawer.left_mouse_down(),
            drawer.right_mouse_down(),
        );
        let detected = tracker.detect(&frame);
        if let Some(hand) = &detected {
            hand::draw_landmarks(&mut overlay, hand);
        }

        /* 4) One session cycle: gesture -> palette -> stroke engine. */
        let report = session.cycle(detected.as_ref(), &mut overlay);

        /* 5) Palette strip, then the canvas on top of everything. */
        session
            .palette
            .render(&mut overlay, session.engine.active_color());
        vision::composite_canvas(&mut overlay, &session.canvas)?;

        /* 6) HUD: engine status, selection feedback, FPS. */
        draw_text_5x7(&mut overlay, 10, 90, session.status_line(), 0x00FFFFFF, 2);
        if let Some(name) = report.selected {
            let text = format!("{name} SELECTED");
            // Dark swatch names get white text; their own color would vanish.
            let color = if vision::is_ink(session.engine.active_color()) {
                session.engine.active_color()
            } else {
                0x00FFFFFF
            };
            draw_text_5x7(&mut overlay, 10, 130, &text, color, 2);
        }
        draw_text_5x7(&mut overlay, 10, h as i32 - 20, &hud_fps_text, 0x00FFFFFF, 1);

        /* 7) Keyboard, polled once per cycle. */
        if drawer.e_pressed_once() {
            session.engine.toggle_eraser();
            println!(
                "Eraser {}",
                if session.engine.eraser_mode() { "on" } else { "off" }
            );
        }
        if drawer.p_pressed_once() {
            let paused = session.engine.toggle_manual_pause();
            println!("{}", if paused { "Paused" } else { "Resumed" });
        }
        if drawer.q_pressed_once() {
            break;
        }

        if drawer.d_pressed_once() {
            /* Shape detection: classify, show the label for a moment, and
               come back with the canvas already cleared. This pause is a
               deliberate synchronous hold, not background work. */
            let label = session.classify_and_clear();
            println!("Detected shape: {}", label.as_str());
            let text = format!("DETECTED SHAPE: {}", label.as_str());
            draw_text_5x7(&mut overlay, 10, h as i32 - 50, &text, 0x0000FF00, 2);
            drawer.present(&overlay)?;
            std::thread::sleep(SHAPE_LABEL_HOLD);
            continue;
        }

        /* 8) Present the composited frame. */
        drawer.present(&overlay)?;

        /* 9) FPS counter (terminal + HUD once per second). */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            println!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
