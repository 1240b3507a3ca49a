//! In-memory storage, used by tests and by embedders that want a
//! throwaway backend.

use super::{checked_attendance, Storage, StorageError, StorageResult};
use crate::models::{
    AttendancePayload, AttendanceRecord, Class, ClassPayload, RecordId, Student, StudentPayload,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows of one resource plus the next identity to hand out. Identities start
/// at 1 and are never reused, even after a delete.
struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }

    fn get(&self, entity: &'static str, id: RecordId) -> StorageResult<T> {
        self.rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(entity, id))
    }

    fn replace(&mut self, entity: &'static str, id: RecordId, row: T) -> StorageResult<()> {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(StorageError::not_found(entity, id)),
        }
    }

    fn remove(&mut self, entity: &'static str, id: RecordId) -> StorageResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(entity, id))
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

#[derive(Default)]
struct Tables {
    students: Table<Student>,
    classes: Table<Class>,
    attendance: Table<AttendanceRecord>,
}

#[derive(Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    // A panic while holding the lock leaves the maps structurally intact, so
    // poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }

}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_student(&self, student: &StudentPayload) -> StorageResult<RecordId> {
        let payload = student.clone();
        Ok(self.write().students.insert_with(|id| payload.into_student(id)))
    }

    async fn get_student(&self, id: RecordId) -> StorageResult<Student> {
        self.read().students.get("student", id)
    }

    async fn list_students(&self) -> StorageResult<Vec<Student>> {
        Ok(self.read().students.all())
    }

    async fn update_student(&self, id: RecordId, student: &StudentPayload) -> StorageResult<()> {
        let row = student.clone().into_student(id);
        self.write().students.replace("student", id, row)
    }

    async fn delete_student(&self, id: RecordId) -> StorageResult<()> {
        self.write().students.remove("student", id)
    }

    async fn create_class(&self, class: &ClassPayload) -> StorageResult<RecordId> {
        let payload = class.clone();
        Ok(self.write().classes.insert_with(|id| payload.into_class(id)))
    }

    async fn get_class(&self, id: RecordId) -> StorageResult<Class> {
        self.read().classes.get("class", id)
    }

    async fn list_classes(&self) -> StorageResult<Vec<Class>> {
        Ok(self.read().classes.all())
    }

    async fn update_class(&self, id: RecordId, class: &ClassPayload) -> StorageResult<()> {
        let row = class.clone().into_class(id);
        self.write().classes.replace("class", id, row)
    }

    async fn delete_class(&self, id: RecordId) -> StorageResult<()> {
        self.write().classes.remove("class", id)
    }

    async fn create_attendance_record(
        &self,
        record: &AttendancePayload,
    ) -> StorageResult<RecordId> {
        let (date, status) = checked_attendance(record)?;
        let record = record.clone();
        Ok(self.write().attendance.insert_with(|id| AttendanceRecord {
            id,
            student_id: record.student_id,
            class_id: record.class_id,
            date,
            status,
            remarks: record.remarks,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::NaiveDate;

    fn student(name: &str) -> StudentPayload {
        StudentPayload {
            name: name.into(),
            email: format!("{}@school.edu", name.to_lowercase()),
            age: 15,
            class_id: None,
            roll_no: None,
        }
    }

    fn math() -> ClassPayload {
        ClassPayload {
            name: "Math".into(),
            grade: "10".into(),
            section: "A".into(),
            teacher_name: "X".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_round_trips() {
        let store = MemoryStorage::new();
        let first = store.create_student(&student("Oliver")).await.unwrap();
        let second = store.create_student(&student("Amelia")).await.unwrap();
        assert!(second > first);

        let fetched = store.get_student(second).await.unwrap();
        assert_eq!(fetched, student("Amelia").into_student(second));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStorage::new();
        let id = store.create_class(&math()).await.unwrap();
        store.delete_class(id).await.unwrap();
        let next = store.create_class(&math()).await.unwrap();
        assert!(next > id);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStorage::new();
        assert!(store.get_student(42).await.unwrap_err().is_not_found());
        assert!(store.update_student(42, &student("Ava")).await.unwrap_err().is_not_found());
        assert!(store.delete_student(42).await.unwrap_err().is_not_found());
        assert!(store.get_class(7).await.unwrap_err().is_not_found());
        assert!(store.update_class(7, &math()).await.unwrap_err().is_not_found());
        assert!(store.delete_class(7).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let store = MemoryStorage::new();
        let id = store.create_class(&math()).await.unwrap();
        let renamed = ClassPayload {
            name: "Advanced Math".into(),
            ..math()
        };
        store.update_class(id, &renamed).await.unwrap();

        let class = store.get_class(id).await.unwrap();
        assert_eq!(class.name, "Advanced Math");
        assert_eq!(class.grade, "10");
        assert_eq!(class.section, "A");
        assert_eq!(class.teacher_name, "X");
    }

    #[tokio::test]
    async fn attendance_queries_are_empty_stubs() {
        let store = MemoryStorage::new();
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let record = AttendancePayload {
            student_id: 1,
            class_id: 1,
            date: Some(date),
            status: "Late".into(),
            remarks: Some("bus delay".into()),
        };
        let id = store.create_attendance_record(&record).await.unwrap();
        assert_eq!(id, 1);
        let stored = store.read().attendance.get("attendance record", id).unwrap();
        assert_eq!(stored.status, AttendanceStatus::Late);
        assert_eq!(stored.date, date);

        assert!(store.get_attendance_by_date(1, date).await.unwrap().is_empty());
        assert!(store.get_attendance_by_student(1, date, date).await.unwrap().is_empty());
        let report = store.get_attendance_report(1, date, date).await.unwrap();
        assert_eq!(report.total_days, 0);
        assert_eq!(report.attendance_rate, 0.0);
        store.update_attendance_record(99, &record).await.unwrap();
        store.delete_attendance_record(99).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_attendance_is_rejected_not_rewritten() {
        let store = MemoryStorage::new();
        let record = AttendancePayload {
            student_id: -1,
            class_id: 0,
            date: None,
            status: "Sick".into(),
            remarks: None,
        };
        let err = store.create_attendance_record(&record).await.unwrap_err();
        assert!(matches!(err, StorageError::Invalid { entity: "attendance record", .. }));
        assert!(store.read().attendance.all().is_empty());

        let undated = AttendancePayload {
            student_id: 1,
            class_id: 1,
            date: None,
            status: "Present".into(),
            remarks: None,
        };
        let err = store.create_attendance_record(&undated).await.unwrap_err();
        assert!(err.to_string().contains("date is required"));
    }
}
