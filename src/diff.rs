//! Path-restricted perceptual distance between two images.

use crate::canvas::{Image, Pixel};

/// Sum, over every coordinate on `path`, of the Euclidean distance in
/// (r, g, b, a) channel space between the corresponding pixels of `a` and
/// `b`. The square root is taken per pixel, then the per-pixel distances are
/// added — not one combined distance across the whole path.
///
/// Pure: never touches a coordinate off the path, so the cost of one call is
/// bounded by the segment length rather than the canvas size.
pub fn path_diff<I>(a: &Image, b: &Image, path: I) -> f64
where
    I: IntoIterator<Item = (i32, i32)>,
{
    path.into_iter()
        .map(|(x, y)| pixel_distance(a.get(x, y), b.get(x, y)))
        .sum()
}

fn pixel_distance(p: Pixel, q: Pixel) -> f64 {
    let d = |a: u16, b: u16| {
        let d = a as f64 - b as f64;
        d * d
    };
    (d(p.r, q.r) + d(p.g, q.g) + d(p.b, q.b) + d(p.a, q.a)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_images_score_zero() {
        let img = Image::filled(4, 4, Pixel::BLACK);
        let path = vec![(0, 0), (1, 1), (2, 3), (-5, 9)];
        assert_eq!(path_diff(&img, &img, path), 0.0);
    }

    #[test]
    fn known_distance_single_channel() {
        let a = Image::filled(2, 2, Pixel::BLACK);
        let mut b = Image::filled(2, 2, Pixel::BLACK);
        b.set(1, 0, Pixel { r: 300, g: 0, b: 0, a: 0xffff });
        b.set(1, 1, Pixel { r: 0, g: 400, b: 0, a: 0xffff });

        // per-pixel sqrt, then summed: 300 + 400, not sqrt(300^2 + 400^2)
        let d = path_diff(&a, &b, vec![(1, 0), (1, 1)]);
        assert!((d - 700.0).abs() < 1e-9);
    }

    #[test]
    fn off_path_pixels_never_contribute() {
        let a = Image::filled(3, 3, Pixel::BLACK);
        let mut b = Image::filled(3, 3, Pixel::BLACK);
        b.set(2, 2, Pixel { r: 0xffff, g: 0xffff, b: 0xffff, a: 0 });

        assert_eq!(path_diff(&a, &b, vec![(0, 0), (1, 1)]), 0.0);
    }

    #[test]
    fn never_negative() {
        let a = Image::filled(2, 1, Pixel { r: 1, g: 2, b: 3, a: 4 });
        let b = Image::filled(2, 1, Pixel { r: 9, g: 8, b: 7, a: 6 });
        assert!(path_diff(&a, &b, vec![(0, 0), (1, 0)]) >= 0.0);
        assert!(path_diff(&b, &a, vec![(0, 0), (1, 0)]) >= 0.0);
    }
}
