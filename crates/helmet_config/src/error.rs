use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidColor { value: String },
    UnknownZone { value: String },
    UnknownFinish { value: String },
    UnknownPattern { value: String },
    OutOfRange { field: &'static str, value: f32 },
    InvalidZoneMap { reason: String },
    Serialize { reason: String },
    Deserialize { reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidColor { value } => {
                write!(f, "invalid hex color {:?}, expected #RRGGBB", value)
            }
            ConfigError::UnknownZone { value } => write!(f, "unknown helmet zone: {}", value),
            ConfigError::UnknownFinish { value } => write!(f, "unknown material finish: {}", value),
            ConfigError::UnknownPattern { value } => write!(f, "unknown pattern type: {}", value),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{} out of range [0, 1]: {}", field, value)
            }
            ConfigError::InvalidZoneMap { reason } => write!(f, "invalid zone map: {}", reason),
            ConfigError::Serialize { reason } => {
                write!(f, "failed to serialize config: {}", reason)
            }
            ConfigError::Deserialize { reason } => {
                write!(f, "failed to deserialize config: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
