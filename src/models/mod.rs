pub mod condition;
pub mod crop;
pub mod market;
pub mod recommendation;
pub mod weather;

pub use condition::*;
pub use crop::*;
pub use market::*;
pub use recommendation::*;
pub use weather::*;
