// src/core/mod.rs

pub mod net;
pub mod random;
pub mod sanitize;

pub use net::{HttpFetcher, PageFetcher};
pub use random::{SeededRandom, SuffixSource, ThreadRandom};
