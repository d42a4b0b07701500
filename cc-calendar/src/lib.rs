//! Calendar heatmap layout for combined contribution series.
//!
//! [`grid`] maps dates onto week columns and weekday rows, [`classify`]
//! bins counts into five intensity levels, [`render`] turns a summary into
//! pixel geometry, and [`svg`] encodes that geometry as an image.

pub mod classify;
pub mod grid;
pub mod render;
pub mod svg;

pub use classify::{classify, Level};
pub use grid::{CalendarGrid, MonthLabel};
pub use render::{render, Geometry, RenderedCalendar};
pub use svg::{to_svg, Palette};
