//! Records persisted by the storage layer and the request payloads that carry
//! their mutable fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned identity of a persisted record.
pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub class_id: Option<RecordId>,
    pub roll_no: Option<String>,
}

/// Mutable fields of a student. Absent fields decode to their zero value so
/// that validation can report every missing field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub class_id: Option<RecordId>,
    pub roll_no: Option<String>,
}

impl StudentPayload {
    pub fn into_student(self, id: RecordId) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            class_id: self.class_id,
            roll_no: self.roll_no,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Class {
    pub id: RecordId,
    pub name: String,
    pub grade: String,
    pub section: String,
    pub teacher_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassPayload {
    pub name: String,
    pub grade: String,
    pub section: String,
    pub teacher_name: String,
}

impl ClassPayload {
    pub fn into_class(self, id: RecordId) -> Class {
        Class {
            id,
            name: self.name,
            grade: self.grade,
            section: self.section,
            teacher_name: self.teacher_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub student_id: RecordId,
    pub class_id: RecordId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// Attendance fields as submitted. `status` stays a string until validated
/// so an unknown value surfaces as a field violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendancePayload {
    pub student_id: RecordId,
    pub class_id: RecordId,
    pub date: Option<NaiveDate>,
    pub status: String,
    pub remarks: Option<String>,
}

/// Attendance counts for one student over a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub student_id: RecordId,
    pub student_name: String,
    pub class_name: String,
    pub total_days: u32,
    pub present_days: u32,
    pub absent_days: u32,
    pub late_days: u32,
    pub attendance_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_payload_defaults_missing_fields() {
        let payload: StudentPayload = serde_json::from_str(r#"{"email":"a@b.io"}"#).unwrap();
        assert_eq!(payload.name, "");
        assert_eq!(payload.age, 0);
        assert_eq!(payload.class_id, None);
    }

    #[test]
    fn attendance_status_round_trips_through_str() {
        for status in AttendanceStatus::ALL {
            assert_eq!(AttendanceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::parse("present"), None);
    }
}
