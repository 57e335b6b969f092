// On-demand shape classification of the drawn canvas.
//
// The canvas is binarized with the same luminance threshold the compositor
// uses, the outer boundary of each connected ink region is traced, and the
// largest region's boundary is approximated as a polygon. The vertex count
// (plus a roundness check) names the shape. All of it is software passes
// over the pixel buffer, same as the rest of the vision code.

use crate::types::{FrameBuffer, Point};
use crate::vision::is_ink;

/// Smallest contour area that counts as a deliberate drawing.
pub const MIN_SHAPE_AREA: f64 = 100.0;

/// Polygon-approximation tolerance as a fraction of the contour perimeter.
const APPROX_EPSILON_RATIO: f64 = 0.04;

/// Accepted circularity band around a perfect circle's 1.0.
const CIRCULARITY_MIN: f64 = 0.7;
const CIRCULARITY_MAX: f64 = 1.2;

/// Classification result for the dominant closed region.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeLabel {
    NoShape,
    TooSmall,
    Triangle,
    Rectangle,
    Circle,
    Polygon,
    Unknown,
}

impl ShapeLabel {
    /// HUD / terminal spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeLabel::NoShape => "NO SHAPE",
            ShapeLabel::TooSmall => "TOO SMALL",
            ShapeLabel::Triangle => "TRIANGLE",
            ShapeLabel::Rectangle => "RECTANGLE",
            ShapeLabel::Circle => "CIRCLE",
            ShapeLabel::Polygon => "POLYGON",
            ShapeLabel::Unknown => "UNKNOWN",
        }
    }
}

/// Classify the dominant closed shape on the canvas.
pub fn classify(canvas: &FrameBuffer) -> ShapeLabel {
    let mask: Vec<bool> = canvas.pixels.iter().map(|&px| is_ink(px)).collect();
    let contours = external_contours(&mask, canvas.width, canvas.height);

    let largest = contours
        .into_iter()
        .map(|c| {
            let area = polygon_area(&c);
            (c, area)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1));

    let Some((contour, area)) = largest else {
        return ShapeLabel::NoShape;
    };
    if area < MIN_SHAPE_AREA {
        return ShapeLabel::TooSmall;
    }

    let perim = perimeter(&contour);
    let approx = approx_polygon(&contour, APPROX_EPSILON_RATIO * perim);

    match approx.len() {
        3 => ShapeLabel::Triangle,
        4 => ShapeLabel::Rectangle,
        n if n > 4 => {
            // Roundness: 1.0 for a perfect circle, lower for anything
            // elongated or concave.
            let circularity = 4.0 * std::f64::consts::PI * area / (perim * perim);
            if CIRCULARITY_MIN < circularity && circularity < CIRCULARITY_MAX {
                ShapeLabel::Circle
            } else {
                ShapeLabel::Polygon
            }
        }
        // Fewer than 3 vertices: degenerate boundary, nothing nameable.
        _ => ShapeLabel::Unknown,
    }
}

/* ---------------- connected regions and boundary tracing ---------------- */

// Neighbor ring, clockwise in screen coordinates (y grows downward):
// E, SE, S, SW, W, NW, N, NE.
const DIRS: [(i32, i32); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
];

/// Outer boundary of every 8-connected ink region, one contour per region.
/// Hole boundaries are never traced.
fn external_contours(mask: &[bool], width: usize, height: usize) -> Vec<Vec<Point>> {
    let mut seen = vec![false; mask.len()];
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if !mask[idx] || seen[idx] {
                continue;
            }
            // Row-major scan reaches each region at its topmost-leftmost
            // pixel first: exactly the anchor boundary tracing needs.
            contours.push(trace_boundary(mask, width, height, Point::new(x as i32, y as i32)));
            flood_mark(mask, &mut seen, width, height, x, y);
        }
    }
    contours
}

/// Mark a whole 8-connected region as seen (iterative flood fill).
fn flood_mark(mask: &[bool], seen: &mut [bool], width: usize, height: usize, x: usize, y: usize) {
    let mut stack = vec![(x as i32, y as i32)];
    seen[y * width + x] = true;
    while let Some((cx, cy)) = stack.pop() {
        for (dx, dy) in DIRS {
            let (nx, ny) = (cx + dx, cy + dy);
            if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                continue;
            }
            let nidx = ny as usize * width + nx as usize;
            if mask[nidx] && !seen[nidx] {
                seen[nidx] = true;
                stack.push((nx, ny));
            }
        }
    }
}

/// Moore-neighbor boundary trace, clockwise, starting at the region's
/// topmost-leftmost pixel. Terminates when the first move repeats
/// (Jacob's criterion), with a hard step cap as a safety net.
fn trace_boundary(mask: &[bool], width: usize, height: usize, start: Point) -> Vec<Point> {
    let fg = |x: i32, y: i32| {
        x >= 0
            && y >= 0
            && x < width as i32
            && y < height as i32
            && mask[y as usize * width + x as usize]
    };

    let mut contour = vec![start];
    let mut cur = start;
    // The start pixel's west neighbor is background (leftmost in the top
    // row of its region), so the initial backtrack points west.
    let mut backtrack = 4usize;
    let mut first_move: Option<Point> = None;

    let cap = 4 * mask.len().max(16);
    for _ in 0..cap {
        // Scan clockwise from just past the backtrack direction.
        let mut hit = None;
        for step in 1..=8usize {
            let d = (backtrack + step) % 8;
            let nx = cur.x + DIRS[d].0;
            let ny = cur.y + DIRS[d].1;
            if fg(nx, ny) {
                hit = Some((d, Point::new(nx, ny)));
                break;
            }
        }
        let Some((d, next)) = hit else {
            break; // isolated single pixel
        };

        if cur == start && first_move == Some(next) {
            break; // came back around and would repeat the first move
        }

        // New backtrack: the last background neighbor examined before the
        // hit, expressed as a direction from the pixel we move onto.
        let prev_d = (d + 7) % 8;
        let bg = Point::new(cur.x + DIRS[prev_d].0, cur.y + DIRS[prev_d].1);
        cur = next;
        backtrack = direction_index(cur, bg);

        if first_move.is_none() {
            first_move = Some(cur);
        }
        contour.push(cur);
    }

    contour
}

/// Ring index of the unit step from `from` to its neighbor `to`.
fn direction_index(from: Point, to: Point) -> usize {
    let delta = (to.x - from.x, to.y - from.y);
    DIRS.iter()
        .position(|&d| d == delta)
        .unwrap_or(4) // non-adjacent input cannot happen for traced pixels
}

/* --------------------- polygon measurement & approx --------------------- */

/// Shoelace area of a closed contour (points in boundary order).
fn polygon_area(contour: &[Point]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[(i + 1) % contour.len()];
        twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (twice.abs() as f64) / 2.0
}

/// Closed polyline length, including the closing edge.
fn perimeter(contour: &[Point]) -> f64 {
    if contour.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[(i + 1) % contour.len()];
        let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
        total += (dx * dx + dy * dy).sqrt();
    }
    total
}

/// Approximate a closed contour with a polygon, tolerance `epsilon`.
/// The contour is split at the point farthest from its first point and each
/// arc is simplified independently, so the closed curve has no privileged
/// "open end".
fn approx_polygon(contour: &[Point], epsilon: f64) -> Vec<Point> {
    if contour.len() < 3 {
        return contour.to_vec();
    }

    let anchor = contour[0];
    let mut far = 0usize;
    let mut far_d2 = -1.0f64;
    for (i, p) in contour.iter().enumerate() {
        let (dx, dy) = ((p.x - anchor.x) as f64, (p.y - anchor.y) as f64);
        let d2 = dx * dx + dy * dy;
        if d2 > far_d2 {
            far_d2 = d2;
            far = i;
        }
    }
    if far == 0 {
        return vec![anchor]; // all points coincide
    }

    let mut arc_back: Vec<Point> = contour[far..].to_vec();
    arc_back.push(anchor);

    let front = rdp(&contour[..=far], epsilon);
    let back = rdp(&arc_back, epsilon);

    // front ends where back begins, and back closes on front's first point.
    let mut out = front;
    out.extend_from_slice(&back[1..back.len() - 1]);
    out
}

/// Ramer-Douglas-Peucker over an open polyline; endpoints always survive.
fn rdp(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut split = 0usize;
    let mut dmax = 0.0f64;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = deviation(*p, first, last);
        if d > dmax {
            dmax = d;
            split = i;
        }
    }

    if dmax <= epsilon {
        return vec![first, last];
    }

    let mut left = rdp(&points[..=split], epsilon);
    let right = rdp(&points[split..], epsilon);
    left.pop(); // split point is the first element of `right`
    left.extend(right);
    left
}

/// Perpendicular distance from `p` to the line through `a` and `b`
/// (plain distance to `a` when the two coincide).
fn deviation(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let (apx, apy) = ((p.x - a.x) as f64, (p.y - a.y) as f64);
    let len = (abx * abx + aby * aby).sqrt();
    if len == 0.0 {
        return (apx * apx + apy * apy).sqrt();
    }
    (abx * apy - aby * apx).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw;
    use crate::types::pack_rgb;

    const INK: u32 = 0x00FFFFFF;

    fn canvas() -> FrameBuffer {
        FrameBuffer::new(640, 480)
    }

    fn fill_triangle(fb: &mut FrameBuffer) {
        // Right triangle: vertices (100,100), (100,340), (340,340).
        for y in 100..=340 {
            let x_end = 100 + (y - 100);
            draw::fill_rect(fb, 100, y, x_end, y, INK);
        }
    }

    #[test]
    fn empty_canvas_is_no_shape() {
        assert_eq!(classify(&canvas()), ShapeLabel::NoShape);
    }

    #[test]
    fn tiny_blob_is_too_small() {
        let mut fb = canvas();
        draw::fill_rect(&mut fb, 300, 200, 305, 205, INK);
        assert_eq!(classify(&fb), ShapeLabel::TooSmall);
    }

    #[test]
    fn filled_triangle_classifies_as_triangle() {
        let mut fb = canvas();
        fill_triangle(&mut fb);
        assert_eq!(classify(&fb), ShapeLabel::Triangle);
    }

    #[test]
    fn filled_rectangle_classifies_as_rectangle() {
        let mut fb = canvas();
        draw::fill_rect(&mut fb, 120, 140, 420, 340, INK);
        assert_eq!(classify(&fb), ShapeLabel::Rectangle);
    }

    #[test]
    fn filled_disc_classifies_as_circle() {
        let mut fb = canvas();
        draw::fill_circle(&mut fb, 320, 240, 90, INK);
        assert_eq!(classify(&fb), ShapeLabel::Circle);
    }

    #[test]
    fn concave_cross_classifies_as_polygon() {
        let mut fb = canvas();
        // Plus sign: two overlapping bars. 12 corners, low circularity.
        draw::fill_rect(&mut fb, 260, 100, 380, 400, INK);
        draw::fill_rect(&mut fb, 140, 220, 500, 280, INK);
        assert_eq!(classify(&fb), ShapeLabel::Polygon);
    }

    #[test]
    fn largest_region_wins() {
        let mut fb = canvas();
        // A small square next to a big disc: the disc decides the label.
        draw::fill_rect(&mut fb, 20, 400, 60, 440, INK);
        draw::fill_circle(&mut fb, 380, 220, 100, INK);
        assert_eq!(classify(&fb), ShapeLabel::Circle);
    }

    #[test]
    fn near_black_ink_does_not_count() {
        let mut fb = canvas();
        // Below the luminance threshold everywhere: reads as empty.
        draw::fill_rect(&mut fb, 100, 100, 400, 400, pack_rgb(0, 0, 30));
        assert_eq!(classify(&fb), ShapeLabel::NoShape);
    }
}
