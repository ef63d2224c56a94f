pub mod image_store;
pub mod stdin;

pub use image_store::{ImageStore, ImageStoreError, PredictionImage};
