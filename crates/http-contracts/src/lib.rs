pub mod error;
pub mod hello_world;

pub use error::schema::ErrorResponse;
pub use hello_world::{HelloWorldResponse, error::ConstructionError};
