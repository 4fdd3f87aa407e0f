use thiserror::Error;

/// Errors raised while constructing a simulation or loading its parameters.
///
/// The step engine itself is total; these only surface at the boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("a simulation needs at least one vehicle")]
    NoVehicles,

    #[error("state sequences differ in length: {xs} positions, {vs} velocities, {accs} accelerations")]
    LengthMismatch { xs: usize, vs: usize, accs: usize },

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
