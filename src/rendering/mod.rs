pub mod bresenham;
pub mod fonts;
pub mod shapes;
pub mod surface;
pub mod transform;
