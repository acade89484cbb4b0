//! Charts module - Chart series and rendering

mod plotter;
mod renderer;
pub mod series;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use series::ChartSeries;
