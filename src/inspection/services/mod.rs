mod monorepo_detector;

pub use monorepo_detector::{Ecosystem, MonorepoDetector, MonorepoReport};
