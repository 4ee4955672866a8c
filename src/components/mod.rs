pub mod app;
pub mod lens_preview;
pub mod zoom_controls;
pub mod zoom_image;

pub use app::App;
pub use zoom_image::{ZoomImage, ZoomImageProps};
