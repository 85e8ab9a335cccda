use std::path::PathBuf;

pub type SketchResult<T> = Result<T, SketchError>;

/// Fatal failures: a broken input, a failed output, or a frame with nothing
/// to draw from. A missing input file is not an error — the frame driver
/// treats it as the end of the sequence.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("target image has no pixels, nothing to draw from")]
    EmptyPalette,
}
