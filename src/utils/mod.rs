pub mod distance;
pub mod loader;
