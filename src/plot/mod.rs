//! Text renderings of the dashboard views.

pub mod ascii;
pub mod choropleth;

pub use ascii::{render_bar_chart, render_scatter_plot};
pub use choropleth::{render_tile_map, shade_for};
