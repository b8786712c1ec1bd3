pub mod advisor;
pub mod rules;
pub mod surface;
pub mod trend;
pub mod weather;

pub use advisor::Advisor;
pub use rules::Resolver;
pub use surface::DisplaySurface;
pub use trend::{Trend, TrendSummary};
