pub mod cache;
pub mod config;
pub mod drawing;
pub mod error;
pub mod markings;
pub mod math;
pub mod model;
pub mod operations;
pub mod path;
pub mod tessellation;

pub use error::{CitylineError, Result};
