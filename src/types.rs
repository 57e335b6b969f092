// Core types shared by every module.

/// One raster buffer. The camera frame, the live overlay, and the persistent
/// drawing canvas are all FrameBuffers of identical dimensions.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // frame width on screen (pixels)
    pub height: usize,     // frame height on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-black buffer. The canvas starts (and is reset to) this state.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Reset every pixel to black (0x00000000).
    pub fn clear(&mut self) {
        for px in &mut self.pixels {
            *px = 0;
        }
    }

    /// True when nothing has been drawn (every pixel still zero).
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&px| px == 0)
    }
}

/// A pixel position in frame coordinates. May sit outside the frame
/// (the drawing primitives clip).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// Pack/unpack helpers for the 0x00RRGGBB layout.

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}
