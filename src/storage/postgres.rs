//! PostgreSQL-backed storage.

use super::{checked_attendance, Storage, StorageError, StorageResult};
use crate::models::{AttendancePayload, Class, ClassPayload, RecordId, Student, StudentPayload};
use async_trait::async_trait;
use sqlx::PgPool;

const SELECT_STUDENT: &str = "SELECT id, name, email, age, class_id, roll_no FROM students";
const SELECT_CLASS: &str = "SELECT id, name, grade, section, teacher_name FROM classes";

#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs a DELETE or UPDATE and turns "zero rows affected" into NotFound.
    async fn expect_one_row(
        &self,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
        entity: &'static str,
        id: RecordId,
    ) -> StorageResult<()> {
        let result = query.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(entity, id));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for PgStorage {
    fn backend(&self) -> &'static str {
        "PostgreSQL"
    }

    async fn create_student(&self, student: &StudentPayload) -> StorageResult<RecordId> {
        let sql = "INSERT INTO students (name, email, age, class_id, roll_no) \
                   VALUES ($1, $2, $3, $4, $5) RETURNING id";
        tracing::debug!(sql = %sql, "query");
        let id = sqlx::query_scalar::<_, i64>(sql)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .bind(student.class_id)
            .bind(student.roll_no.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get_student(&self, id: RecordId) -> StorageResult<Student> {
        let sql = format!("{} WHERE id = $1 LIMIT 1", SELECT_STUDENT);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("student", id))
    }

    async fn list_students(&self) -> StorageResult<Vec<Student>> {
        tracing::debug!(sql = %SELECT_STUDENT, "query");
        let rows = sqlx::query_as::<_, Student>(SELECT_STUDENT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_student(&self, id: RecordId, student: &StudentPayload) -> StorageResult<()> {
        let sql = "UPDATE students SET name = $1, email = $2, age = $3, class_id = $4, \
                   roll_no = $5 WHERE id = $6";
        tracing::debug!(sql = %sql, id, "query");
        let query = sqlx::query(sql)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .bind(student.class_id)
            .bind(student.roll_no.as_deref())
            .bind(id);
        self.expect_one_row(query, "student", id).await
    }

    async fn delete_student(&self, id: RecordId) -> StorageResult<()> {
        let sql = "DELETE FROM students WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        self.expect_one_row(sqlx::query(sql).bind(id), "student", id).await
    }

    async fn create_class(&self, class: &ClassPayload) -> StorageResult<RecordId> {
        let sql = "INSERT INTO classes (name, grade, section, teacher_name) \
                   VALUES ($1, $2, $3, $4) RETURNING id";
        tracing::debug!(sql = %sql, "query");
        let id = sqlx::query_scalar::<_, i64>(sql)
            .bind(&class.name)
            .bind(&class.grade)
            .bind(&class.section)
            .bind(&class.teacher_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get_class(&self, id: RecordId) -> StorageResult<Class> {
        let sql = format!("{} WHERE id = $1 LIMIT 1", SELECT_CLASS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Class>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("class", id))
    }

    async fn list_classes(&self) -> StorageResult<Vec<Class>> {
        tracing::debug!(sql = %SELECT_CLASS, "query");
        let rows = sqlx::query_as::<_, Class>(SELECT_CLASS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_class(&self, id: RecordId, class: &ClassPayload) -> StorageResult<()> {
        let sql = "UPDATE classes SET name = $1, grade = $2, section = $3, teacher_name = $4 \
                   WHERE id = $5";
        tracing::debug!(sql = %sql, id, "query");
        let query = sqlx::query(sql)
            .bind(&class.name)
            .bind(&class.grade)
            .bind(&class.section)
            .bind(&class.teacher_name)
            .bind(id);
        self.expect_one_row(query, "class", id).await
    }

    async fn delete_class(&self, id: RecordId) -> StorageResult<()> {
        let sql = "DELETE FROM classes WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        self.expect_one_row(sqlx::query(sql).bind(id), "class", id).await
    }

    // attendance_records is not created by apply_migrations, so this fails
    // with a database error until that table is provisioned out of band.
    async fn create_attendance_record(
        &self,
        record: &AttendancePayload,
    ) -> StorageResult<RecordId> {
        let (date, status) = checked_attendance(record)?;
        let sql = "INSERT INTO attendance_records (student_id, class_id, date, status, remarks) \
                   VALUES ($1, $2, $3, $4, $5) RETURNING id";
        tracing::debug!(sql = %sql, "query");
        let id = sqlx::query_scalar::<_, i64>(sql)
            .bind(record.student_id)
            .bind(record.class_id)
            .bind(date)
            .bind(status.as_str())
            .bind(record.remarks.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }
}
