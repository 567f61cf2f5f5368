use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("data load error: {message}")]
    DataLoad { message: String },
    #[error("selection payload missing field: {field}")]
    MissingSelectionField { field: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("region unavailable: {region}")]
    RegionUnavailable { region: String },
}

impl AtlasError {
    pub fn data_load(message: impl Into<String>) -> Self {
        Self::DataLoad {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingSelectionField {
            field: field.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn region_unavailable(region: impl Into<String>) -> Self {
        Self::RegionUnavailable {
            region: region.into(),
        }
    }

    /// Fatal errors abort startup; everything else is per-interaction.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataLoad { .. })
    }
}

pub type AtlasResult<T> = Result<T, AtlasError>;
