//! Durable snapshots of the best buffer.

use std::path::PathBuf;

use tracing::info;

use crate::canvas::Image;
use crate::error::{SketchError, SketchResult};

/// Where the optimizer sends snapshots of `best`. Injected so the loop stays
/// free of file-system concerns; tests use an in-memory sink.
pub trait SnapshotSink {
    fn write(&mut self, image: &Image, name: &str) -> SketchResult<()>;
}

/// Writes `<name>.png` to the working directory, narrowing the 16-bit
/// channels back to the 8-bit output depth.
pub struct PngSink;

impl SnapshotSink for PngSink {
    fn write(&mut self, image: &Image, name: &str) -> SketchResult<()> {
        let path = PathBuf::from(format!("{name}.png"));
        image
            .to_rgba8()
            .save(&path)
            .map_err(|source| SketchError::Output {
                path: path.clone(),
                source,
            })?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
