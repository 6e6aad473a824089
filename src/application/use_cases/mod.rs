//! Use case implementations.

mod cache_admin_use_case;
mod randomize_use_case;

pub use cache_admin_use_case::CacheAdminUseCase;
pub use randomize_use_case::RandomizeUseCase;
