mod detect;
mod optimize;

pub use detect::{classify, DetectJunctions, DEFAULT_JUNCTION_TOLERANCE};
pub use optimize::{OptimizeConnections, DEFAULT_SNAP_RATIO};
