//! Student API: CRUD over students and classes backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod state;
pub mod storage;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, DecodeError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use models::{AttendanceRecord, AttendanceReport, AttendanceStatus, Class, Student};
pub use pagination::{Paginated, Pagination};
pub use routes::{app_router, class_routes, common_routes, student_routes};
pub use state::AppState;
pub use storage::{MemoryStorage, PgStorage, Storage, StorageError};
