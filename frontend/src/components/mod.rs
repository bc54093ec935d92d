pub mod global_loader;

pub use global_loader::GlobalLoader;
