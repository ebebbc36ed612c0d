pub mod image_loader;

pub use image_loader::ImageAssetLoader;
