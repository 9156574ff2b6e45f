use anyhow::{Context as _, anyhow};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
    TransactionTrait,
};
use uuid::Uuid;

use gradebook_domain::class::{ClassLevel, ClassNumber};
use gradebook_schema::{grades, students, subjects, teachers};

use crate::domain::repository::{
    GradeRepository, StudentRepository, SubjectRepository, TeacherRepository,
};
use crate::domain::types::{Grade, GradeEntry, GradeFilter, Student, Subject, Teacher};
use crate::error::GradebookServiceError;

/// Constraint message of a unique-key rejection, if `err` is one.
fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
        _ => None,
    }
}

fn class_from_column(value: i16) -> anyhow::Result<ClassNumber> {
    ClassNumber::try_from(value).context("stored class out of range")
}

// ── Teacher repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeacherRepository {
    pub db: DatabaseConnection,
}

impl TeacherRepository for DbTeacherRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, GradebookServiceError> {
        let model = teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find teacher by id")?;
        Ok(model.map(teacher_from_model).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, GradebookServiceError> {
        let model = teachers::Entity::find()
            .filter(teachers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find teacher by email")?;
        Ok(model.map(teacher_from_model).transpose()?)
    }

    async fn find_by_class(
        &self,
        class: ClassNumber,
    ) -> Result<Option<Teacher>, GradebookServiceError> {
        let model = teachers::Entity::find()
            .filter(teachers::Column::AssignedClass.eq(i16::from(class)))
            .one(&self.db)
            .await
            .context("find teacher by class")?;
        Ok(model.map(teacher_from_model).transpose()?)
    }

    async fn create(&self, teacher: &Teacher) -> Result<(), GradebookServiceError> {
        let result = teachers::ActiveModel {
            id: Set(teacher.id),
            email: Set(teacher.email.clone()),
            name: Set(teacher.name.clone()),
            password_hash: Set(teacher.password_hash.clone()),
            assigned_class: Set(i16::from(teacher.assigned_class)),
            created_at: Set(teacher.created_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match unique_violation(&e) {
                Some(msg) if msg.contains("assigned_class") => {
                    Err(GradebookServiceError::ClassAlreadyAssigned)
                }
                Some(_) => Err(GradebookServiceError::EmailAlreadyUsed),
                None => Err(anyhow::Error::new(e).context("create teacher").into()),
            },
        }
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<bool, GradebookServiceError> {
        let txn = self.db.begin().await.context("begin delete teacher")?;

        grades::Entity::delete_many()
            .filter(grades::Column::TeacherId.eq(id))
            .exec(&txn)
            .await
            .context("delete teacher grades")?;
        students::Entity::delete_many()
            .filter(students::Column::TeacherId.eq(id))
            .exec(&txn)
            .await
            .context("delete teacher students")?;
        let deleted = teachers::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete teacher")?;

        txn.commit().await.context("commit delete teacher")?;
        Ok(deleted.rows_affected > 0)
    }
}

fn teacher_from_model(model: teachers::Model) -> anyhow::Result<Teacher> {
    Ok(Teacher {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        assigned_class: class_from_column(model.assigned_class)?,
        created_at: model.created_at,
    })
}

// ── Student repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStudentRepository {
    pub db: DatabaseConnection,
}

impl StudentRepository for DbStudentRepository {
    async fn list(
        &self,
        teacher_id: Uuid,
        class: ClassNumber,
    ) -> Result<Vec<Student>, GradebookServiceError> {
        let models = students::Entity::find()
            .filter(students::Column::TeacherId.eq(teacher_id))
            .filter(students::Column::Class.eq(i16::from(class)))
            .order_by_asc(students::Column::Name)
            .all(&self.db)
            .await
            .context("list students")?;
        Ok(models
            .into_iter()
            .map(student_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, GradebookServiceError> {
        let model = students::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find student by id")?;
        Ok(model.map(student_from_model).transpose()?)
    }

    async fn find_by_nisn(&self, nisn: &str) -> Result<Option<Student>, GradebookServiceError> {
        let model = students::Entity::find()
            .filter(students::Column::Nisn.eq(nisn))
            .one(&self.db)
            .await
            .context("find student by nisn")?;
        Ok(model.map(student_from_model).transpose()?)
    }

    async fn create(&self, student: &Student) -> Result<(), GradebookServiceError> {
        students::ActiveModel {
            id: Set(student.id),
            name: Set(student.name.clone()),
            nisn: Set(student.nisn.clone()),
            class: Set(i16::from(student.class)),
            teacher_id: Set(student.teacher_id),
            created_at: Set(student.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| student_write_error(e, "create student"))?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        nisn: Option<&str>,
    ) -> Result<Student, GradebookServiceError> {
        let model = students::ActiveModel {
            id: Set(id),
            name: Set(name.to_owned()),
            nisn: Set(nisn.map(str::to_owned)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| student_write_error(e, "update student"))?;
        Ok(student_from_model(model)?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GradebookServiceError> {
        let txn = self.db.begin().await.context("begin delete student")?;
        grades::Entity::delete_many()
            .filter(grades::Column::StudentId.eq(id))
            .exec(&txn)
            .await
            .context("delete student grades")?;
        students::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete student")?;
        txn.commit().await.context("commit delete student")?;
        Ok(())
    }
}

fn student_write_error(err: DbErr, action: &'static str) -> GradebookServiceError {
    if unique_violation(&err).is_some() {
        return GradebookServiceError::NisnAlreadyUsed;
    }
    if matches!(err, DbErr::RecordNotUpdated) {
        return GradebookServiceError::StudentNotFound;
    }
    anyhow::Error::new(err).context(action).into()
}

fn student_from_model(model: students::Model) -> anyhow::Result<Student> {
    Ok(Student {
        id: model.id,
        name: model.name,
        nisn: model.nisn,
        class: class_from_column(model.class)?,
        teacher_id: model.teacher_id,
        created_at: model.created_at,
    })
}

// ── Subject repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubjectRepository {
    pub db: DatabaseConnection,
}

impl SubjectRepository for DbSubjectRepository {
    async fn list(&self, level: ClassLevel) -> Result<Vec<Subject>, GradebookServiceError> {
        let models = subjects::Entity::find()
            .filter(subjects::Column::ClassLevel.eq(level.as_i16()))
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .context("list subjects")?;
        Ok(models
            .into_iter()
            .map(subject_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Subject>, GradebookServiceError> {
        let model = subjects::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .context("find subject by id")?;
        Ok(model.map(subject_from_model).transpose()?)
    }
}

fn subject_from_model(model: subjects::Model) -> anyhow::Result<Subject> {
    let class_level = u8::try_from(model.class_level)
        .ok()
        .and_then(ClassLevel::from_u8)
        .ok_or_else(|| anyhow!("unknown class level {}", model.class_level))?;
    Ok(Subject {
        id: model.id,
        name: model.name,
        class_level,
    })
}

// ── Grade repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGradeRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct GradeRow {
    id: Uuid,
    student_id: Uuid,
    subject_id: String,
    teacher_id: Uuid,
    task_name: String,
    score: f64,
    max_score: f64,
    date: chrono::DateTime<chrono::Utc>,
    student_name: String,
    student_nisn: Option<String>,
    subject_name: String,
}

impl GradeRepository for DbGradeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grade>, GradebookServiceError> {
        let model = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find grade by id")?;
        Ok(model.map(grade_from_model))
    }

    async fn list(
        &self,
        teacher_id: Uuid,
        filter: &GradeFilter,
    ) -> Result<Vec<GradeEntry>, GradebookServiceError> {
        let mut query = grades::Entity::find()
            .select_only()
            .columns([
                grades::Column::Id,
                grades::Column::StudentId,
                grades::Column::SubjectId,
                grades::Column::TeacherId,
                grades::Column::TaskName,
                grades::Column::Score,
                grades::Column::MaxScore,
                grades::Column::Date,
            ])
            .column_as(students::Column::Name, "student_name")
            .column_as(students::Column::Nisn, "student_nisn")
            .column_as(subjects::Column::Name, "subject_name")
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .filter(grades::Column::TeacherId.eq(teacher_id));

        if let Some(student_id) = filter.student_id {
            query = query.filter(grades::Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = filter.subject_id.as_deref() {
            query = query.filter(grades::Column::SubjectId.eq(subject_id));
        }

        let rows = query
            .order_by_desc(grades::Column::Date)
            .order_by_asc(students::Column::Name)
            .into_model::<GradeRow>()
            .all(&self.db)
            .await
            .context("list grades")?;

        Ok(rows
            .into_iter()
            .map(|row| GradeEntry {
                grade: Grade {
                    id: row.id,
                    student_id: row.student_id,
                    subject_id: row.subject_id,
                    teacher_id: row.teacher_id,
                    task_name: row.task_name,
                    score: row.score,
                    max_score: row.max_score,
                    date: row.date,
                },
                student_name: row.student_name,
                student_nisn: row.student_nisn,
                subject_name: row.subject_name,
            })
            .collect())
    }

    async fn create(&self, grade: &Grade) -> Result<(), GradebookServiceError> {
        grades::ActiveModel {
            id: Set(grade.id),
            student_id: Set(grade.student_id),
            subject_id: Set(grade.subject_id.clone()),
            teacher_id: Set(grade.teacher_id),
            task_name: Set(grade.task_name.clone()),
            score: Set(grade.score),
            max_score: Set(grade.max_score),
            date: Set(grade.date),
        }
        .insert(&self.db)
        .await
        .context("create grade")?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        task_name: &str,
        score: f64,
        max_score: f64,
    ) -> Result<Grade, GradebookServiceError> {
        let result = grades::ActiveModel {
            id: Set(id),
            task_name: Set(task_name.to_owned()),
            score: Set(score),
            max_score: Set(max_score),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(model) => Ok(grade_from_model(model)),
            Err(DbErr::RecordNotUpdated) => Err(GradebookServiceError::GradeNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update grade").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), GradebookServiceError> {
        grades::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete grade")?;
        Ok(())
    }
}

fn grade_from_model(model: grades::Model) -> Grade {
    Grade {
        id: model.id,
        student_id: model.student_id,
        subject_id: model.subject_id,
        teacher_id: model.teacher_id,
        task_name: model.task_name,
        score: model.score,
        max_score: model.max_score,
        date: model.date,
    }
}
