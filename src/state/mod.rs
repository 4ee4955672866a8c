pub mod gesture;
pub mod lens;
pub mod transform;

pub use gesture::{Bounds, DragSession, DragUpdate};
pub use lens::{LensFrame, lens_frame};
pub use transform::{Size, Transform, ZoomDirection};
