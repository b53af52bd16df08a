pub mod config;
pub mod implementations;

pub use implementations::hello_world;
