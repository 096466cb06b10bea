pub mod circle;
pub mod line;
pub mod polyline;

pub use circle::Circle;
pub use line::Line;
pub use polyline::Polyline;
