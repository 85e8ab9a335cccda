//! Bresenham segment rasterization.
//!
//! A [`Segment`] yields the ordered pixel coordinates it covers through a
//! lazy iterator. Endpoints are normalized at construction so traversal
//! always runs from the lower-x endpoint (lower-y for verticals), making the
//! coordinate order canonical regardless of how the caller ordered the two
//! points. The rasterizer never clips: callers own the bounds policy.

/// A straight line between two integer endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Segment {
    pub fn new(a: (i32, i32), b: (i32, i32)) -> Self {
        let ((mut x1, mut y1), (mut x2, mut y2)) = (a, b);
        if x1 > x2 || (x1 == x2 && y1 > y2) {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }
        Segment { x1, y1, x2, y2 }
    }

    /// The pixel coordinates covered by this segment, both endpoints
    /// included. Re-invocation yields an identical sequence.
    pub fn pixels(&self) -> Pixels {
        let dx = self.x2 - self.x1; // >= 0 after normalization
        let dy = self.y2 - self.y1;
        let ady = dy.abs();
        let sy = if dy < 0 { -1 } else { 1 };

        let mut p = Pixels {
            x: self.x1,
            y: self.y1,
            rem: 0,
            x_step: 0,
            y_step: 0,
            x_minor: 0,
            y_minor: 0,
            err: 0,
            minor2: 0,
            major2: 0,
            tail: None,
            done: false,
        };

        if dx == 0 && ady == 0 {
            // single point, p already set up to emit it once
        } else if ady == 0 {
            p.rem = dx;
            p.x_step = 1;
        } else if dx == 0 {
            p.rem = ady;
            p.y_step = sy;
        } else if dx == ady {
            p.rem = dx;
            p.x_step = 1;
            p.y_step = sy;
        } else if dx > ady {
            // x drives; y carries on the error accumulator, exact endpoint
            // appended after the main run
            p.rem = dx;
            p.x_step = 1;
            p.y_minor = sy;
            p.err = dx;
            p.minor2 = 2 * ady;
            p.major2 = 2 * dx;
            p.tail = Some((self.x2, self.y2));
        } else {
            p.rem = ady;
            p.y_step = sy;
            p.x_minor = 1;
            p.err = ady;
            p.minor2 = 2 * dx;
            p.major2 = 2 * ady;
            p.tail = Some((self.x2, self.y2));
        }
        p
    }
}

/// Lazy iterator over the pixels of one segment.
pub struct Pixels {
    x: i32,
    y: i32,
    rem: i32,
    x_step: i32,
    y_step: i32,
    x_minor: i32,
    y_minor: i32,
    err: i32,
    minor2: i32,
    major2: i32,
    tail: Option<(i32, i32)>,
    done: bool,
}

impl Iterator for Pixels {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        if self.rem == 0 {
            self.done = true;
            return Some(self.tail.unwrap_or((self.x, self.y)));
        }
        let out = (self.x, self.y);
        self.rem -= 1;
        self.x += self.x_step;
        self.y += self.y_step;
        self.err -= self.minor2;
        if self.err < 0 {
            self.x += self.x_minor;
            self.y += self.y_minor;
            self.err += self.major2;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn path(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
        Segment::new(a, b).pixels().collect()
    }

    #[test]
    fn degenerate_segment_is_one_pixel() {
        assert_eq!(path((3, 7), (3, 7)), vec![(3, 7)]);
    }

    #[test]
    fn horizontal_and_vertical_runs() {
        assert_eq!(path((2, 5), (6, 5)), vec![(2, 5), (3, 5), (4, 5), (5, 5), (6, 5)]);
        // caller order must not matter
        assert_eq!(path((6, 5), (2, 5)), path((2, 5), (6, 5)));
        assert_eq!(path((1, 4), (1, 1)), vec![(1, 1), (1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn perfect_diagonals() {
        assert_eq!(path((0, 0), (3, 3)), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(path((0, 3), (3, 0)), vec![(0, 3), (1, 2), (2, 1), (3, 0)]);
    }

    #[test]
    fn shallow_slope_steps_the_driving_axis_every_pixel() {
        let p = path((0, 0), (5, 1));
        assert_eq!(p.first(), Some(&(0, 0)));
        assert_eq!(p.last(), Some(&(5, 1)));
        // every x column between the endpoints is visited exactly once
        let xs: Vec<i32> = p.iter().map(|&(x, _)| x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn steep_slope_steps_y_every_pixel() {
        let p = path((0, 0), (1, 5));
        assert_eq!(p.first(), Some(&(0, 0)));
        assert_eq!(p.last(), Some(&(1, 5)));
        let ys: Vec<i32> = p.iter().map(|&(_, y)| y).collect();
        assert_eq!(ys, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn endpoints_present_and_chain_is_8_connected() {
        let corners = [-7, -3, 0, 1, 4, 9];
        for &ax in &corners {
            for &ay in &corners {
                for &bx in &corners {
                    for &by in &corners {
                        let p = path((ax, ay), (bx, by));
                        assert!(p.contains(&(ax, ay)), "{ax},{ay} -> {bx},{by}");
                        assert!(p.contains(&(bx, by)), "{ax},{ay} -> {bx},{by}");
                        for w in p.windows(2) {
                            let (dx, dy) = (w[1].0 - w[0].0, w[1].1 - w[0].1);
                            assert!(
                                dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0),
                                "gap between {:?} and {:?} on {ax},{ay} -> {bx},{by}",
                                w[0],
                                w[1]
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn reversed_endpoints_cover_the_same_pixels() {
        let cases = [((0, 0), (9, 4)), ((2, 8), (5, 1)), ((-3, 2), (4, -6))];
        for (a, b) in cases {
            let fwd: HashSet<_> = path(a, b).into_iter().collect();
            let rev: HashSet<_> = path(b, a).into_iter().collect();
            assert_eq!(fwd, rev);
        }
    }

    #[test]
    fn repeated_invocation_is_deterministic() {
        let seg = Segment::new((1, 2), (17, 9));
        let first: Vec<_> = seg.pixels().collect();
        let second: Vec<_> = seg.pixels().collect();
        assert_eq!(first, second);
    }
}
