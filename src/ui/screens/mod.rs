pub mod advisor;
pub mod home;

pub use advisor::AdvisorScreen;
pub use home::HomeScreen;
