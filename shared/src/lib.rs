pub mod config;
pub mod controller;
pub mod ops;
pub mod scheduler;
pub mod style;

pub use config::*;
pub use controller::*;
pub use ops::*;
pub use scheduler::*;
pub use style::*;
