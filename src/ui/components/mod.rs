pub mod input;
pub mod trend_chart;

pub use input::{InputWidget, SelectWidget};
pub use trend_chart::{ChartInstance, TrendChart, TrendChartWidget};
