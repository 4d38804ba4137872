pub mod app;
pub mod config;
pub mod detection;
pub mod error;
pub mod homography;
pub mod matching;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod template;
pub mod types;
pub mod visualization;
