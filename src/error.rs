use core::fmt;

/// Rejected session configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Settings JSON could not be parsed
    Parse(serde_json::Error),
    /// A size, speed or duration that must be strictly positive
    NonPositive { field: &'static str },
    /// A per-tick spawn probability outside [0, 1]
    InvalidProbability { field: &'static str },
    /// A difficulty cap below 1.0 or a negative growth rate
    InvalidMultiplier { field: &'static str },
    /// The spawn band or the player does not fit inside the play field
    PlayfieldTooSmall { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
            Self::NonPositive { field } => write!(f, "{field} must be greater than zero"),
            Self::InvalidProbability { field } => {
                write!(f, "{field} must be a probability between 0 and 1")
            }
            Self::InvalidMultiplier { field } => write!(
                f,
                "{field} must be at least 1.0 (caps) or non-negative (rates)"
            ),
            Self::PlayfieldTooSmall { width, height } => {
                write!(f, "play field {width}x{height} is too small for the spawn band")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
