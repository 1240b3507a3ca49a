//! Storage capability for students, classes and attendance, with a
//! PostgreSQL backend and an in-memory backend.

mod error;
mod memory;
mod postgres;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use postgres::PgStorage;

use crate::models::{
    AttendancePayload, AttendanceRecord, AttendanceReport, AttendanceStatus, Class, ClassPayload,
    RecordId, Student, StudentPayload,
};
use crate::validation::Validate;
use async_trait::async_trait;
use chrono::NaiveDate;

/// CRUD over every persisted resource.
///
/// Identities are assigned by the implementation on create and never change.
/// Operations that take an identity fail with [`StorageError::NotFound`] when
/// nothing exists under it; they are never a silent no-op. `list_*` makes no
/// ordering promise.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Short name of the backing engine, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    async fn create_student(&self, student: &StudentPayload) -> StorageResult<RecordId>;
    async fn get_student(&self, id: RecordId) -> StorageResult<Student>;
    async fn list_students(&self) -> StorageResult<Vec<Student>>;
    async fn update_student(&self, id: RecordId, student: &StudentPayload) -> StorageResult<()>;
    async fn delete_student(&self, id: RecordId) -> StorageResult<()>;

    async fn create_class(&self, class: &ClassPayload) -> StorageResult<RecordId>;
    async fn get_class(&self, id: RecordId) -> StorageResult<Class>;
    async fn list_classes(&self) -> StorageResult<Vec<Class>>;
    async fn update_class(&self, id: RecordId, class: &ClassPayload) -> StorageResult<()>;
    async fn delete_class(&self, id: RecordId) -> StorageResult<()>;

    // Attendance is not routed. Only creation persists anything; the queries
    // below return empty results until a real aggregation exists.

    /// `record` must already be validated.
    async fn create_attendance_record(&self, record: &AttendancePayload) -> StorageResult<RecordId>;

    async fn get_attendance_by_date(
        &self,
        _class_id: RecordId,
        _date: NaiveDate,
    ) -> StorageResult<Vec<AttendanceRecord>> {
        Ok(Vec::new())
    }

    async fn get_attendance_by_student(
        &self,
        _student_id: RecordId,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> StorageResult<Vec<AttendanceRecord>> {
        Ok(Vec::new())
    }

    async fn update_attendance_record(
        &self,
        _id: RecordId,
        _record: &AttendancePayload,
    ) -> StorageResult<()> {
        Ok(())
    }

    async fn delete_attendance_record(&self, _id: RecordId) -> StorageResult<()> {
        Ok(())
    }

    async fn get_attendance_report(
        &self,
        _student_id: RecordId,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> StorageResult<AttendanceReport> {
        Ok(AttendanceReport::default())
    }
}

/// Date and status of an attendance payload that passes validation. Both
/// backends call this before writing, so bad input is rejected rather than
/// stored with substituted values.
fn checked_attendance(record: &AttendancePayload) -> StorageResult<(NaiveDate, AttendanceStatus)> {
    let invalid = |reason: String| StorageError::Invalid {
        entity: "attendance record",
        reason,
    };
    let violations = record.violations();
    if !violations.is_empty() {
        let reasons: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        return Err(invalid(reasons.join(", ")));
    }
    match (record.date, AttendanceStatus::parse(&record.status)) {
        (Some(date), Some(status)) => Ok((date, status)),
        _ => Err(invalid("date and status are required".into())),
    }
}
