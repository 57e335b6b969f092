// Per-pixel passes over whole frames: the selfie mirror applied to every
// captured frame, and the compositor that lays the persistent canvas over
// the live overlay.

use crate::error::Error;
use crate::types::{unpack_rgb, FrameBuffer};

/// Luminance threshold separating canvas ink from background. Shared with
/// the shape classifier so both agree on what counts as a stroke.
pub const INK_THRESHOLD: u8 = 20;

/// Rec.601 luma approximation, integer-only.
#[inline]
pub fn luma(px: u32) -> u8 {
    let (r, g, b) = unpack_rgb(px);
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

/// True where the canvas holds visible ink.
#[inline]
pub fn is_ink(px: u32) -> bool {
    luma(px) > INK_THRESHOLD
}

/// Flip a frame horizontally in place. The camera feed is mirrored before
/// any processing so the hand moves the same way the user does.
pub fn mirror_horizontal(fb: &mut FrameBuffer) {
    for row in fb.pixels.chunks_mut(fb.width) {
        row.reverse();
    }
}

/// Composite the canvas over the live overlay, in place.
///
/// Binarizing the canvas by luminance gives an opacity mask; masked pixels
/// take the canvas value, the rest keep the overlay (camera + UI) pixel.
/// Strokes stay fully visible over the video without per-pixel alpha, and
/// an all-zero canvas leaves the overlay untouched.
pub fn composite_canvas(overlay: &mut FrameBuffer, canvas: &FrameBuffer) -> Result<(), Error> {
    if overlay.width != canvas.width || overlay.height != canvas.height {
        return Err(Error::SizeMismatch(
            "composite: overlay and canvas differ".into(),
        ));
    }

    for (out, &ink) in overlay.pixels.iter_mut().zip(canvas.pixels.iter()) {
        if is_ink(ink) {
            *out = ink;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pack_rgb;

    #[test]
    fn blank_canvas_leaves_overlay_unchanged() {
        let mut overlay = FrameBuffer::new(16, 16);
        for (i, px) in overlay.pixels.iter_mut().enumerate() {
            *px = (i as u32) * 31 % 0x0100_0000;
        }
        let before = overlay.pixels.clone();

        let canvas = FrameBuffer::new(16, 16);
        composite_canvas(&mut overlay, &canvas).unwrap();
        assert_eq!(overlay.pixels, before);
    }

    #[test]
    fn ink_wins_over_the_overlay() {
        let mut overlay = FrameBuffer::new(4, 1);
        overlay.pixels = vec![0x00101010; 4];

        let mut canvas = FrameBuffer::new(4, 1);
        canvas.pixels[1] = pack_rgb(255, 0, 0);
        canvas.pixels[3] = pack_rgb(0, 0, 10); // below threshold: not ink

        composite_canvas(&mut overlay, &canvas).unwrap();
        assert_eq!(overlay.pixels[0], 0x00101010);
        assert_eq!(overlay.pixels[1], pack_rgb(255, 0, 0));
        assert_eq!(overlay.pixels[2], 0x00101010);
        assert_eq!(overlay.pixels[3], 0x00101010);
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let mut overlay = FrameBuffer::new(8, 8);
        let canvas = FrameBuffer::new(4, 4);
        assert!(composite_canvas(&mut overlay, &canvas).is_err());
    }

    #[test]
    fn mirror_reverses_each_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.pixels = vec![1, 2, 3, 4, 5, 6];
        mirror_horizontal(&mut fb);
        assert_eq!(fb.pixels, vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn luma_tracks_channel_weights() {
        assert_eq!(luma(0), 0);
        assert!(luma(pack_rgb(0, 0, 30)) <= INK_THRESHOLD);
        assert!(luma(pack_rgb(255, 0, 0)) > INK_THRESHOLD);
        assert!(luma(pack_rgb(0, 255, 0)) > luma(pack_rgb(255, 0, 0)));
    }
}
