//! Data transfer objects.

mod gifr_dto;

pub use gifr_dto::{RandomizeResponse, ResultOrigin, ZAP_ALL_KEYWORD, ZapOutcome, ZapTarget};
