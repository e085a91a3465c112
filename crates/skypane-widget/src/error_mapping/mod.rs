//! Maps widget errors to skypane_core::AppError for consistent user-facing messages.

mod render;
mod weather;
