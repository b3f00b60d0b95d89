//! Renders one calendar month as an image, with every day cell colored
//! either directly or by mapping its value through a colormap.

pub mod annotation;
pub mod calendar;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod plot;
pub mod raster;
pub mod table;
pub mod week;

pub use error::{Error, ErrorKind, Result};
pub use plot::{MonthPlot, MonthPlotBuilder};
