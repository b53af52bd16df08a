use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservabilityError {
    #[error("Invalid log filter directive, {0}")]
    InvalidDirective(#[from] tracing_subscriber::filter::ParseError),

    #[error("Global subscriber already installed, {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}
