//! The accept/reject optimization loop.
//!
//! Each iteration proposes one random line segment in one random palette
//! color, draws it into the trial buffer, scores trial and best against the
//! target along that segment only, and keeps whichever buffer is closer. Over
//! millions of iterations the best buffer converges toward a sketch of the
//! target.

use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::canvas::{Frame, Pixel};
use crate::diff::path_diff;
use crate::error::SketchResult;
use crate::palette::Palette;
use crate::raster::Segment;
use crate::snapshot::SnapshotSink;

/// Knobs for one frame's run.
pub struct Options {
    /// Iteration budget; negative means unbounded.
    pub iter_limit: i64,
    /// Line length limit L: the second endpoint is the first offset by a
    /// uniform value in [-L/2, L/2) on each axis. Must be positive.
    pub line_len: u32,
    /// Incremental snapshot interval in seconds; <= 0 disables.
    pub save_interval: f64,
    /// Statistics reporting interval in seconds.
    pub stat_interval: f64,
}

/// Snapshot numbering, threaded explicitly through every frame so the
/// incremental counter is monotonic for the whole process and frame numbers
/// run sequentially from the configured start.
pub struct Counters {
    pub incremental: u32,
    pub frame: u32,
}

impl Counters {
    pub fn new(start_frame: u32) -> Self {
        Counters {
            incremental: 1,
            frame: start_frame,
        }
    }
}

/// Interval counters, reset at each statistics report.
#[derive(Default)]
struct RunStats {
    iterations: u64,
    accepted: u64,
}

/// Explicit wall-clock interval checker for the time-gated side effects.
/// Polled only every 50th iteration, so interval boundaries are approximate
/// by design.
struct Pacing {
    last_save: Instant,
    last_stat: Instant,
}

impl Pacing {
    fn new() -> Self {
        let now = Instant::now();
        Pacing {
            last_save: now,
            last_stat: now,
        }
    }

    fn save_due(&mut self, now: Instant, interval: f64) -> bool {
        if interval > 0.0 && now.duration_since(self.last_save).as_secs_f64() >= interval {
            self.last_save = now;
            true
        } else {
            false
        }
    }

    /// Returns the elapsed seconds when a report is due.
    fn stat_due(&mut self, now: Instant, interval: f64) -> Option<f64> {
        let elapsed = now.duration_since(self.last_stat).as_secs_f64();
        if elapsed >= interval {
            self.last_stat = now;
            Some(elapsed)
        } else {
            None
        }
    }
}

/// The pure accept/reject step: draw `color` along `seg` in the trial
/// buffer, score both buffers against the target over that path, and commit
/// the cheaper one. Returns whether the candidate was accepted.
pub fn try_candidate(frame: &mut Frame, seg: &Segment, color: Pixel) -> bool {
    frame.draw_trial(seg.pixels(), color);

    let trial = path_diff(frame.target(), frame.trial(), seg.pixels());
    let best = path_diff(frame.target(), frame.best(), seg.pixels());

    if trial < best {
        frame.commit_trial_to_best(seg.pixels());
        true
    } else {
        frame.restore_trial_from_best(seg.pixels());
        false
    }
}

/// Run the optimization loop for one frame, then write the finished frame
/// snapshot. Draw order per iteration is fixed (x1, y1, x2 offset, y2
/// offset, color) so a seeded source reproduces a run exactly.
pub fn sketch<R: Rng>(
    frame: &mut Frame,
    palette: &Palette,
    opts: &Options,
    rng: &mut R,
    counters: &mut Counters,
    sink: &mut dyn SnapshotSink,
) -> SketchResult<()> {
    let w = frame.target().width() as i32;
    let h = frame.target().height() as i32;
    let span = opts.line_len as i32;
    let half = span / 2;

    let mut stats = RunStats::default();
    let mut pacing = Pacing::new();

    let mut i: i64 = 0;
    while i < opts.iter_limit || opts.iter_limit < 0 {
        stats.iterations += 1;

        let x1 = rng.random_range(0..w);
        let y1 = rng.random_range(0..h);
        // intentionally unclamped; the canvas tolerates off-grid coordinates
        let x2 = x1 - half + rng.random_range(0..span);
        let y2 = y1 - half + rng.random_range(0..span);
        let color = palette.pick(rng);

        let seg = Segment::new((x1, y1), (x2, y2));
        if try_candidate(frame, &seg, color) {
            stats.accepted += 1;
        }

        // coarse polling: don't read the clock every iteration
        if i % 50 == 0 {
            let now = Instant::now();
            if pacing.save_due(now, opts.save_interval) {
                sink.write(frame.best(), &format!("incr_{:03}", counters.incremental))?;
                counters.incremental += 1;
            }
            if let Some(elapsed) = pacing.stat_due(now, opts.stat_interval) {
                let ips = stats.iterations as f64 / elapsed;
                let aps = stats.accepted as f64 / elapsed;
                info!(
                    "{:8} iters {:10.2} iter/s {:9.2} accept/s {:6.2}% a/i",
                    i,
                    ips,
                    aps,
                    100.0 * aps / ips
                );
                stats = RunStats::default();
            }
        }

        i += 1;
    }

    sink.write(frame.best(), &format!("frame_{:03}", counters.frame))?;
    counters.frame += 1;
    Ok(())
}
