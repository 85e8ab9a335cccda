//! Pixel buffers and the trial/best canvas pair the optimizer mutates.

use image::{Rgba, RgbaImage};

/// One pixel at 16-bit internal precision. 8-bit source channels are widened
/// with `c * 0x101` (the `c << 8 | c` expansion of the usual color model), so
/// channel distances computed on these values match distances computed on the
/// decoded input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Pixel {
    /// Opaque black, the background both canvases start from.
    pub const BLACK: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0xffff,
    };

    pub fn from_rgba8(p: [u8; 4]) -> Self {
        let widen = |c: u8| c as u16 * 0x101;
        Pixel {
            r: widen(p[0]),
            g: widen(p[1]),
            b: widen(p[2]),
            a: widen(p[3]),
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r >> 8) as u8,
            (self.g >> 8) as u8,
            (self.b >> 8) as u8,
            (self.a >> 8) as u8,
        ]
    }
}

/// A fixed-size row-major pixel grid.
///
/// Coordinates are signed because candidate segments are generated without
/// clamping: reads outside the grid return the zero pixel and writes outside
/// it are dropped, which is what the accept/reject arithmetic expects when a
/// path wanders off-canvas (both buffers see the same zero there).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    pub fn filled(width: u32, height: u32, fill: Pixel) -> Self {
        Image {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn from_rgba8(img: &RgbaImage) -> Self {
        Image {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| Pixel::from_rgba8(p.0)).collect(),
        }
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.get(x as i32, y as i32).to_rgba8())
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major iteration over every pixel.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.pixels.iter().copied()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Pixel {
        match self.index(x, y) {
            Some(i) => self.pixels[i],
            None => Pixel::default(),
        }
    }

    pub fn set(&mut self, x: i32, y: i32, p: Pixel) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = p;
        }
    }
}

/// The per-frame canvas state: the immutable target plus the trial and best
/// working buffers.
///
/// Invariant: at every iteration boundary `trial` and `best` are identical
/// outside the most recently rasterized path; they diverge only along that
/// path, and only until the accept/reject decision commits one way.
#[derive(Clone, Debug)]
pub struct Frame {
    target: Image,
    trial: Image,
    best: Image,
}

impl Frame {
    pub fn new(target: Image, background: Pixel) -> Self {
        let blank = Image::filled(target.width(), target.height(), background);
        Frame {
            trial: blank.clone(),
            best: blank,
            target,
        }
    }

    pub fn target(&self) -> &Image {
        &self.target
    }

    pub fn trial(&self) -> &Image {
        &self.trial
    }

    pub fn best(&self) -> &Image {
        &self.best
    }

    /// Overwrite `trial` with `color` along `path`.
    pub fn draw_trial<I>(&mut self, path: I, color: Pixel)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (x, y) in path {
            self.trial.set(x, y, color);
        }
    }

    /// Accept: copy the path pixels of `trial` into `best`. This is the only
    /// mutation `best` ever sees.
    pub fn commit_trial_to_best<I>(&mut self, path: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        copy_path(&self.trial, &mut self.best, path);
    }

    /// Reject: copy the path pixels of `best` back into `trial`, restoring
    /// the boundary invariant for the next iteration.
    pub fn restore_trial_from_best<I>(&mut self, path: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        copy_path(&self.best, &mut self.trial, path);
    }
}

fn copy_path<I>(src: &Image, dst: &mut Image, path: I)
where
    I: IntoIterator<Item = (i32, i32)>,
{
    for (x, y) in path {
        dst.set(x, y, src.get(x, y));
    }
}
