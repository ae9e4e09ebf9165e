//! Export backends for the [`Canvas`](crate::canvas::Canvas) drawing surface.

mod svg;

pub use svg::SvgCanvas;
