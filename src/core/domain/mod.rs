pub mod error;
pub mod gateway;
pub mod model;
pub mod sleeper;
pub mod value_object;
