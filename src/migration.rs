//! Database bootstrap: create the target database when missing, then the
//! `students` and `classes` tables.
//!
//! No `attendance_records` table is created here; attendance storage is not
//! provisioned by this service.

use crate::error::{AppError, ConfigError};
use crate::storage::StorageError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const CREATE_CLASSES: &str = r#"
    CREATE TABLE IF NOT EXISTS classes (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        grade TEXT NOT NULL,
        section TEXT NOT NULL,
        teacher_name TEXT NOT NULL
    )
"#;

const CREATE_STUDENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        age INTEGER NOT NULL
    )
"#;

/// Columns added after the first schema; applied to existing tables too.
const STUDENT_UPGRADES: &[&str] = &[
    "ALTER TABLE students ADD COLUMN IF NOT EXISTS class_id BIGINT",
    "ALTER TABLE students ADD COLUMN IF NOT EXISTS roll_no TEXT",
];

/// Idempotent: safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let tables = [CREATE_CLASSES, CREATE_STUDENTS];
    for ddl in tables.into_iter().chain(STUDENT_UPGRADES.iter().copied()) {
        tracing::debug!(sql = %ddl.trim(), "migration");
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(StorageError::from)?;
    }
    tracing::info!("schema up to date");
    Ok(())
}

/// Connects to the server's `postgres` database and creates the database
/// named in `database_url` if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| {
        ConfigError::Invalid {
            var: "DATABASE_URL",
            reason: e.to_string(),
        }
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(StorageError::from)?;
    let sql = "SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)";
    let exists: (bool,) = sqlx::query_as(sql)
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(StorageError::from)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(StorageError::from)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: "DATABASE_URL",
        reason: reason.to_string(),
    };
    let scheme_end = url.find("://").ok_or_else(|| invalid("missing scheme"))? + 3;
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid("no database path"))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
