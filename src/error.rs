use std::fmt;

/// Error raised while loading or editing motion parameters.
///
/// Frame execution never produces errors; everything that can go wrong is
/// caught here, before a parameter set reaches the motion model.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// A parameter is non-finite or outside its documented range.
    InvalidConfiguration {
        param: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// No parameter with this name exists on the addressed params struct.
    UnknownParameter(String),
    /// The TOML document could not be deserialized.
    Parse(toml::de::Error),
    /// The configuration file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration {
                param,
                value,
                min,
                max,
            } => write!(
                f,
                "invalid configuration: {param} = {value} is outside [{min}, {max}]"
            ),
            Self::UnknownParameter(name) => write!(f, "unknown parameter '{name}'"),
            Self::Parse(err) => write!(f, "failed to parse configuration: {err}"),
            Self::Io(err) => write!(f, "failed to read configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
