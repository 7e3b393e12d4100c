use thiserror::Error;

/// Top-level error type for the cityline geometry core.
#[derive(Debug, Error)]
pub enum CitylineError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while constructing scene objects.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{field} = {value} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("non-finite coordinate at point {index}")]
    NonFinitePoint { index: usize },

    #[error("unknown {object_type} variant: {name}")]
    UnknownVariant {
        object_type: &'static str,
        name: String,
    },

    #[error("object type {0} is not a linear object")]
    NotLinear(String),
}

/// Errors raised while loading or validating visual configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no visual style for variant {0}")]
    MissingVariant(String),

    #[error("invalid value for {field} in {variant}: {reason}")]
    InvalidValue {
        variant: String,
        field: &'static str,
        reason: String,
    },

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),
}

/// Convenience type alias for results using [`CitylineError`].
pub type Result<T> = std::result::Result<T, CitylineError>;
