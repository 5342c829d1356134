pub mod camera;
pub mod math;
pub mod paint;
pub mod primitives;
pub mod room;
