// Color palette: a fixed strip of swatch boxes along the top of the frame.
// Hovering the fingertip inside a box selects that color; the "black"
// swatch doubles as the eraser.

use crate::draw;
use crate::types::{pack_rgb, FrameBuffer, Point};

// Layout: boxes laid left-to-right at a fixed offset from the top-left.
const X_OFFSET: i32 = 20;
const Y_OFFSET: i32 = 10;
const BOX_WIDTH: i32 = 60;
const BOX_HEIGHT: i32 = 60;
const SPACING: i32 = 20;

/// Name of the swatch that switches the brush into eraser mode.
const ERASER_NAME: &str = "black";

/// One selectable color box. Coordinates are the box corners in frame space.
#[derive(Clone, Copy, Debug)]
pub struct Swatch {
    pub name: &'static str,
    pub color: u32,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Swatch {
    /// Selecting this swatch switches the brush to erasing.
    pub fn is_eraser(&self) -> bool {
        self.name == ERASER_NAME
    }
}

/// The fixed swatch strip. Built once at startup, never mutated.
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    /// Lay out boxes left-to-right in declaration order.
    pub fn new(entries: &[(&'static str, u32)]) -> Self {
        let swatches = entries
            .iter()
            .enumerate()
            .map(|(i, &(name, color))| {
                let x1 = X_OFFSET + i as i32 * (BOX_WIDTH + SPACING);
                Swatch {
                    name,
                    color,
                    x1,
                    y1: Y_OFFSET,
                    x2: x1 + BOX_WIDTH,
                    y2: Y_OFFSET + BOX_HEIGHT,
                }
            })
            .collect();
        Self { swatches }
    }

    /// The painter's six colors; black is the eraser.
    pub fn standard() -> Self {
        Self::new(&[
            ("red", pack_rgb(255, 0, 0)),
            ("green", pack_rgb(0, 255, 0)),
            ("blue", pack_rgb(0, 0, 255)),
            ("yellow", pack_rgb(255, 255, 0)),
            ("white", pack_rgb(255, 255, 255)),
            ("black", pack_rgb(0, 0, 0)),
        ])
    }

    /// First swatch (in layout order) whose box strictly contains the
    /// pointer. Box edges do not count as a hit.
    pub fn hit_test(&self, p: Point) -> Option<&Swatch> {
        self.swatches
            .iter()
            .find(|s| s.x1 < p.x && p.x < s.x2 && s.y1 < p.y && p.y < s.y2)
    }

    /// Draw the strip onto the live overlay. The swatch matching the active
    /// color gets a 3px black outline so the current selection is visible.
    pub fn render(&self, overlay: &mut FrameBuffer, active_color: u32) {
        for s in &self.swatches {
            draw::fill_rect(overlay, s.x1, s.y1, s.x2, s.y2, s.color);
            if s.color == active_color {
                draw::stroke_rect(overlay, s.x1, s.y1, s.x2, s.y2, 0x00000000, 3);
            }
        }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_is_strict_containment() {
        let palette = Palette::standard();
        let first = palette.swatches()[0];

        // Dead center hits
        let center = Point::new((first.x1 + first.x2) / 2, (first.y1 + first.y2) / 2);
        assert_eq!(palette.hit_test(center).map(|s| s.name), Some("red"));

        // Edges and corners miss
        assert!(palette.hit_test(Point::new(first.x1, center.y)).is_none());
        assert!(palette.hit_test(Point::new(center.x, first.y1)).is_none());
        assert!(palette.hit_test(Point::new(first.x2, first.y2)).is_none());
    }

    #[test]
    fn boxes_do_not_overlap() {
        let palette = Palette::standard();
        for pair in palette.swatches().windows(2) {
            assert!(pair[0].x2 < pair[1].x1);
        }
    }

    #[test]
    fn black_is_the_eraser() {
        let palette = Palette::standard();
        let eraser: Vec<_> = palette
            .swatches()
            .iter()
            .filter(|s| s.is_eraser())
            .collect();
        assert_eq!(eraser.len(), 1);
        assert_eq!(eraser[0].name, "black");
        assert_eq!(eraser[0].color, 0);
    }

    #[test]
    fn below_the_strip_misses() {
        let palette = Palette::standard();
        assert!(palette.hit_test(Point::new(50, 200)).is_none());
    }
}
