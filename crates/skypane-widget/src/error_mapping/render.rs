use crate::error::RenderError;
use skypane_core::{AppError, RenderFailure};

impl From<RenderError> for RenderFailure {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::InvalidDate { .. } => RenderFailure::InvalidData(e.to_string()),
            RenderError::InvalidReferenceHour(_)
            | RenderError::NotEnoughDays { .. }
            | RenderError::NotEnoughHours { .. } => RenderFailure::InsufficientData(e.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e.into())
    }
}
