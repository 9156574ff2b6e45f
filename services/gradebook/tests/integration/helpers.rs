use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gradebook::domain::repository::{
    GradeRepository, PasswordHasherPort, StudentRepository, SubjectRepository, TeacherRepository,
};
use gradebook::domain::types::{Grade, GradeEntry, GradeFilter, Student, Subject, Teacher};
use gradebook::error::GradebookServiceError;
use gradebook::usecase::grade::CreateGradeUseCase;
use gradebook_domain::class::{ClassLevel, ClassNumber};
use gradebook_domain::subject::seed_catalog;

// ── InMemoryStore ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StoreState {
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub grades: Vec<Grade>,
}

/// Shared in-memory stand-in for every repository, with the same unique keys
/// and cascades as the database schema. Clones share state.
#[derive(Clone)]
pub struct InMemoryStore {
    pub state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Empty store with the subject catalog seeded.
    pub fn seeded() -> Self {
        let subjects = seed_catalog()
            .into_iter()
            .map(|e| Subject {
                id: e.id,
                name: e.name.to_owned(),
                class_level: e.level,
            })
            .collect();
        Self {
            state: Arc::new(Mutex::new(StoreState {
                subjects,
                ..Default::default()
            })),
        }
    }

    pub fn add_teacher(&self, name: &str, class: u8) -> Teacher {
        let teacher = Teacher {
            id: Uuid::now_v7(),
            email: format!("{}@school.id", name.to_lowercase().replace(' ', ".")),
            name: name.to_owned(),
            password_hash: format!("plain:{name}"),
            assigned_class: ClassNumber::new(class).unwrap(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().teachers.push(teacher.clone());
        teacher
    }

    pub fn add_student(&self, teacher: &Teacher, name: &str, nisn: Option<&str>) -> Student {
        let student = Student {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            nisn: nisn.map(str::to_owned),
            class: teacher.assigned_class,
            teacher_id: teacher.id,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().students.push(student.clone());
        student
    }

    pub fn add_grade(
        &self,
        student: &Student,
        subject_id: &str,
        score: f64,
        max_score: f64,
        date: DateTime<Utc>,
    ) -> Grade {
        let grade = Grade {
            id: Uuid::now_v7(),
            student_id: student.id,
            subject_id: subject_id.to_owned(),
            teacher_id: student.teacher_id,
            task_name: "Tugas".to_owned(),
            score,
            max_score,
            date,
        };
        self.state.lock().unwrap().grades.push(grade.clone());
        grade
    }

    pub fn student_count(&self, teacher_id: Uuid) -> usize {
        let state = self.state.lock().unwrap();
        state.students.iter().filter(|s| s.teacher_id == teacher_id).count()
    }

    pub fn grade_count(&self, teacher_id: Uuid) -> usize {
        let state = self.state.lock().unwrap();
        state.grades.iter().filter(|g| g.teacher_id == teacher_id).count()
    }

    pub fn has_teacher(&self, teacher_id: Uuid) -> bool {
        let state = self.state.lock().unwrap();
        state.teachers.iter().any(|t| t.id == teacher_id)
    }

    pub fn create_grade_usecase(
        &self,
    ) -> CreateGradeUseCase<InMemoryStore, InMemoryStore, InMemoryStore> {
        CreateGradeUseCase {
            students: self.clone(),
            subjects: self.clone(),
            grades: self.clone(),
        }
    }
}

/// Subject id for `name` in the band of `class`, as seeded.
pub fn subject_for(name: &str, class: u8) -> String {
    gradebook_domain::subject::subject_id(name, ClassLevel::of(class))
}

impl TeacherRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.teachers.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.teachers.iter().find(|t| t.email == email).cloned())
    }

    async fn find_by_class(
        &self,
        class: ClassNumber,
    ) -> Result<Option<Teacher>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .teachers
            .iter()
            .find(|t| t.assigned_class == class)
            .cloned())
    }

    async fn create(&self, teacher: &Teacher) -> Result<(), GradebookServiceError> {
        let mut state = self.state.lock().unwrap();
        if state.teachers.iter().any(|t| t.email == teacher.email) {
            return Err(GradebookServiceError::EmailAlreadyUsed);
        }
        if state
            .teachers
            .iter()
            .any(|t| t.assigned_class == teacher.assigned_class)
        {
            return Err(GradebookServiceError::ClassAlreadyAssigned);
        }
        state.teachers.push(teacher.clone());
        Ok(())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<bool, GradebookServiceError> {
        let mut state = self.state.lock().unwrap();
        state.grades.retain(|g| g.teacher_id != id);
        state.students.retain(|s| s.teacher_id != id);
        let before = state.teachers.len();
        state.teachers.retain(|t| t.id != id);
        Ok(state.teachers.len() != before)
    }
}

impl StudentRepository for InMemoryStore {
    async fn list(
        &self,
        teacher_id: Uuid,
        class: ClassNumber,
    ) -> Result<Vec<Student>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<_> = state
            .students
            .iter()
            .filter(|s| s.teacher_id == teacher_id && s.class == class)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_nisn(&self, nisn: &str) -> Result<Option<Student>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .students
            .iter()
            .find(|s| s.nisn.as_deref() == Some(nisn))
            .cloned())
    }

    async fn create(&self, student: &Student) -> Result<(), GradebookServiceError> {
        let mut state = self.state.lock().unwrap();
        if student.nisn.is_some() && state.students.iter().any(|s| s.nisn == student.nisn) {
            return Err(GradebookServiceError::NisnAlreadyUsed);
        }
        state.students.push(student.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        nisn: Option<&str>,
    ) -> Result<Student, GradebookServiceError> {
        let mut state = self.state.lock().unwrap();
        if nisn.is_some()
            && state
                .students
                .iter()
                .any(|s| s.id != id && s.nisn.as_deref() == nisn)
        {
            return Err(GradebookServiceError::NisnAlreadyUsed);
        }
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(GradebookServiceError::StudentNotFound)?;
        student.name = name.to_owned();
        student.nisn = nisn.map(str::to_owned);
        Ok(student.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), GradebookServiceError> {
        let mut state = self.state.lock().unwrap();
        state.grades.retain(|g| g.student_id != id);
        state.students.retain(|s| s.id != id);
        Ok(())
    }
}

impl SubjectRepository for InMemoryStore {
    async fn list(&self, level: ClassLevel) -> Result<Vec<Subject>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<_> = state
            .subjects
            .iter()
            .filter(|s| s.class_level == level)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Subject>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.subjects.iter().find(|s| s.id == id).cloned())
    }
}

impl GradeRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grade>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.grades.iter().find(|g| g.id == id).cloned())
    }

    async fn list(
        &self,
        teacher_id: Uuid,
        filter: &GradeFilter,
    ) -> Result<Vec<GradeEntry>, GradebookServiceError> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<GradeEntry> = state
            .grades
            .iter()
            .filter(|g| g.teacher_id == teacher_id)
            .filter(|g| filter.student_id.is_none_or(|id| g.student_id == id))
            .filter(|g| {
                filter
                    .subject_id
                    .as_deref()
                    .is_none_or(|id| g.subject_id == id)
            })
            .filter_map(|g| {
                let student = state.students.iter().find(|s| s.id == g.student_id)?;
                let subject = state.subjects.iter().find(|s| s.id == g.subject_id)?;
                Some(GradeEntry {
                    grade: g.clone(),
                    student_name: student.name.clone(),
                    student_nisn: student.nisn.clone(),
                    subject_name: subject.name.clone(),
                })
            })
            .collect();
        out.sort_by(|a, b| {
            b.grade
                .date
                .cmp(&a.grade.date)
                .then(a.student_name.cmp(&b.student_name))
        });
        Ok(out)
    }

    async fn create(&self, grade: &Grade) -> Result<(), GradebookServiceError> {
        self.state.lock().unwrap().grades.push(grade.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        task_name: &str,
        score: f64,
        max_score: f64,
    ) -> Result<Grade, GradebookServiceError> {
        let mut state = self.state.lock().unwrap();
        let grade = state
            .grades
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(GradebookServiceError::GradeNotFound)?;
        grade.task_name = task_name.to_owned();
        grade.score = score;
        grade.max_score = max_score;
        Ok(grade.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), GradebookServiceError> {
        self.state.lock().unwrap().grades.retain(|g| g.id != id);
        Ok(())
    }
}

// ── PlainHasher ──────────────────────────────────────────────────────────────

/// Reversible stand-in for Argon2 so tests stay fast.
#[derive(Clone, Copy)]
pub struct PlainHasher;

impl PasswordHasherPort for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, GradebookServiceError> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, GradebookServiceError> {
        Ok(hash == format!("plain:{password}"))
    }

    async fn verify_absent(&self, _password: &str) -> Result<bool, GradebookServiceError> {
        Ok(false)
    }
}
