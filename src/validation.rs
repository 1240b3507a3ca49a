//! Field validation for request payloads. Every rule is checked and all
//! failures are returned together.

use crate::error::AppError;
use crate::models::{AttendancePayload, AttendanceStatus, ClassPayload, StudentPayload};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 120;

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

/// Implemented by payloads that can be checked before reaching storage.
pub trait Validate {
    fn violations(&self) -> Vec<FieldViolation>;

    fn validate(&self) -> Result<(), AppError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &str, rule: &'static str, message: String) {
        self.0.push(FieldViolation {
            field: field.to_string(),
            rule,
            message,
        });
    }

    /// Returns false when the field was missing, so dependent rules can be skipped.
    fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, "required", format!("{} is required", field));
            return false;
        }
        true
    }

    fn email(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if !email_regex().is_match(value) {
            self.push(field, "email", format!("{} must be a valid email", field));
        }
    }

    fn range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.push(
                field,
                "range",
                format!("{} must be between {} and {}", field, min, max),
            );
        }
    }

    fn positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.push(field, "positive", format!("{} must be a positive id", field));
        }
    }

    fn optional_not_blank(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if v.trim().is_empty() {
                self.push(field, "required", format!("{} must not be blank when given", field));
            }
        }
    }

    fn finish(self) -> Vec<FieldViolation> {
        self.0
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

impl Validate for StudentPayload {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::default();
        v.required("name", &self.name);
        if v.required("email", &self.email) {
            v.email("email", &self.email);
        }
        if self.age == 0 {
            v.push("age", "required", "age is required".into());
        } else {
            v.range("age", self.age.into(), MIN_AGE.into(), MAX_AGE.into());
        }
        if let Some(class_id) = self.class_id {
            v.positive("class_id", class_id);
        }
        v.optional_not_blank("roll_no", self.roll_no.as_deref());
        v.finish()
    }
}

impl Validate for ClassPayload {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::default();
        v.required("name", &self.name);
        v.required("grade", &self.grade);
        v.required("section", &self.section);
        v.required("teacher_name", &self.teacher_name);
        v.finish()
    }
}

impl Validate for AttendancePayload {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::default();
        v.positive("student_id", self.student_id);
        v.positive("class_id", self.class_id);
        if self.date.is_none() {
            v.push("date", "required", "date is required".into());
        }
        if v.required("status", &self.status) && AttendanceStatus::parse(&self.status).is_none() {
            let allowed: Vec<&str> = AttendanceStatus::ALL.iter().map(|s| s.as_str()).collect();
            v.push(
                "status",
                "one_of",
                format!("status must be one of: {}", allowed.join(", ")),
            );
        }
        v.finish()
    }
}
