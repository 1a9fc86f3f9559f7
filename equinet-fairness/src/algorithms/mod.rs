pub mod kmeans;
pub mod seed;

pub use kmeans::{kmeans, KMeansFit, KMeansParams};
pub use seed::SplitMix64;
