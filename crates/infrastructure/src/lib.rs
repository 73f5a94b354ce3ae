//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod file_admin_user_repository;
mod in_memory_page_view_repository;
mod in_memory_rate_limit_repository;
mod rate_limit_sweeper;
mod route_table_file;
mod system_clock;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use file_admin_user_repository::FileAdminUserRepository;
pub use in_memory_page_view_repository::{DEFAULT_MAX_TRACKED_PATHS, InMemoryPageViewRepository};
pub use in_memory_rate_limit_repository::InMemoryRateLimitRepository;
pub use rate_limit_sweeper::{DEFAULT_SWEEP_INTERVAL, RateLimitSweeper};
pub use route_table_file::{builtin_route_table, load_route_table, parse_route_table};
pub use system_clock::SystemClock;
