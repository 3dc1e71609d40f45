pub mod detector;
pub mod graph;

pub use detector::{AspectPattern, PatternDetector, PatternKind};
pub use graph::AspectGraph;
