//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{RandomizeResponse, ResultOrigin, ZapOutcome, ZapTarget};
pub use services::ResultCache;
pub use use_cases::{CacheAdminUseCase, RandomizeUseCase};
