use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use drivewise_core::AppError;
use drivewise_models::ids::{ExamId, StudentId};

use super::model::{CreateStudentDto, RosterEntry, RosterList, Student, UpdateScoresDto};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, db.operation = "INSERT", db.table = "students"))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.user_id)
                .fetch_one(db)
                .await?;
        if !user_exists {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (user_id) VALUES ($1) RETURNING id, user_id, created_at",
        )
        .bind(dto.user_id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "User is already a student"))?;

        info!(student.id = %student.id, "Student created");
        Ok(student)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>("SELECT id, user_id, created_at FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    /// Students whose registration went through, with their best score per
    /// exam type. `None` spans every course.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "course_registrations"))]
    pub async fn list_registered_students(
        db: &PgPool,
        course_id: Option<Uuid>,
    ) -> Result<RosterList, AppError> {
        let items = sqlx::query_as::<_, RosterEntry>(
            r#"SELECT s.id AS student_id, u.id AS user_id, u.user_name, u.email, u.phone_number,
                      p.full_name, c.id AS course_id, c.course_name, cr.id AS registration_id,
                      MAX(er.score) FILTER (WHERE e.type = 'theory') AS theory_score,
                      MAX(er.score) FILTER (WHERE e.type = 'practice') AS practical_score
               FROM course_registrations cr
               JOIN students s ON s.id = cr.student_id
               JOIN users u ON u.id = s.user_id
               JOIN courses c ON c.id = cr.course_id
               LEFT JOIN LATERAL (
                   SELECT full_name FROM personal_info_documents
                   WHERE user_id = u.id
                   ORDER BY created_at DESC, id DESC
                   LIMIT 1
               ) p ON TRUE
               LEFT JOIN exams e ON e.course_id = c.id
               LEFT JOIN exam_results er ON er.exam_id = e.id AND er.student_id = s.id
               WHERE cr.status = 'successful'
                 AND ($1::uuid IS NULL OR cr.course_id = $1)
               GROUP BY s.id, u.id, p.full_name, c.id, cr.id
               ORDER BY c.course_name, u.user_name, cr.id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        let total = items.len() as i64;
        Ok(RosterList { items, total })
    }

    /// Writes the supplied scores, creating the course's exam rows on first
    /// use, and returns the refreshed roster for that course.
    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, course.id = %dto.course_id, db.table = "exam_results"))]
    pub async fn update_scores(db: &PgPool, dto: UpdateScoresDto) -> Result<RosterList, AppError> {
        let mut tx = db.begin().await?;

        let student_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(dto.student_id)
                .fetch_one(&mut *tx)
                .await?;
        if !student_exists {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        let course_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(dto.course_id)
                .fetch_one(&mut *tx)
                .await?;
        if !course_exists {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        for (exam_type, score) in dto.scores() {
            // The no-op update makes RETURNING yield the existing row on conflict.
            let exam_id = sqlx::query_scalar::<_, ExamId>(
                r#"INSERT INTO exams (course_id, type) VALUES ($1, $2)
                   ON CONFLICT (course_id, type) DO UPDATE SET type = EXCLUDED.type
                   RETURNING id"#,
            )
            .bind(dto.course_id)
            .bind(exam_type)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"INSERT INTO exam_results (exam_id, student_id, score) VALUES ($1, $2, $3)
                   ON CONFLICT (exam_id, student_id)
                   DO UPDATE SET score = EXCLUDED.score, updated_at = NOW()"#,
            )
            .bind(exam_id)
            .bind(dto.student_id)
            .bind(score)
            .execute(&mut *tx)
            .await?;

            info!(exam.id = %exam_id, exam.kind = %exam_type, score, "Score recorded");
        }

        tx.commit().await?;

        Self::list_registered_students(db, Some(dto.course_id.into_inner())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use drivewise_models::ids::{CourseId, UserId};

    struct Enrolment {
        student_id: StudentId,
        course_id: CourseId,
    }

    async fn enrol(pool: &PgPool, status: &str) -> Enrolment {
        let user_id = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (user_name, email, phone_number, password) VALUES ('079201001234', 'mai@drivewise.dev', '0901234567', 'x') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        sqlx::query(
            r#"INSERT INTO personal_info_documents
                   (user_id, full_name, date_of_birth, gender, address, identity_number,
                    identity_img_front, identity_img_back, avatar)
               VALUES ($1, 'Tran Thi Mai', '2001-04-02', 'female', '12 Le Loi', '079201001234', 'f', 'b', 'a')"#,
        )
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
        let student_id = sqlx::query_scalar::<_, StudentId>(
            "INSERT INTO students (user_id) VALUES ($1) RETURNING id",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
        let license_type_id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO license_types (type_name, age_requirement, health_requirements, training_duration, fee)
               VALUES ('B2', '18+', '', 90, 0) RETURNING id"#,
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let course_id = sqlx::query_scalar::<_, CourseId>(
            r#"INSERT INTO courses (course_name, license_type_id, start_date, end_date, max_students, price)
               VALUES ('B2 Weekend', $1, '2025-05-01', '2025-06-30', 30, 0) RETURNING id"#,
        )
        .bind(license_type_id)
        .fetch_one(pool)
        .await
        .unwrap();
        sqlx::query(
            r#"INSERT INTO course_registrations (student_id, course_id, method, status)
               VALUES ($1, $2, 'online', $3::registration_status)"#,
        )
        .bind(student_id)
        .bind(course_id)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
        Enrolment {
            student_id,
            course_id,
        }
    }

    fn scores(enrolment: &Enrolment, theory: Option<f64>, practical: Option<f64>) -> UpdateScoresDto {
        UpdateScoresDto {
            student_id: enrolment.student_id,
            course_id: enrolment.course_id,
            theory_score: theory,
            practical_score: practical,
        }
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_scores_upsert_instead_of_duplicating(pool: PgPool) {
        let enrolment = enrol(&pool, "successful").await;

        let roster = StudentService::update_scores(&pool, scores(&enrolment, Some(8.5), None))
            .await
            .unwrap();
        assert_eq!(roster.total, 1);
        assert_eq!(roster.items[0].theory_score, Some(8.5));
        assert_eq!(roster.items[0].practical_score, None);
        assert_eq!(roster.items[0].full_name.as_deref(), Some("Tran Thi Mai"));

        let roster = StudentService::update_scores(&pool, scores(&enrolment, Some(9.0), None))
            .await
            .unwrap();
        assert_eq!(roster.items[0].theory_score, Some(9.0));
        assert_eq!(count(&pool, "exams").await, 1);
        assert_eq!(count(&pool, "exam_results").await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_absent_score_leaves_other_exam_untouched(pool: PgPool) {
        let enrolment = enrol(&pool, "successful").await;
        StudentService::update_scores(&pool, scores(&enrolment, Some(7.0), Some(6.0)))
            .await
            .unwrap();

        let roster = StudentService::update_scores(&pool, scores(&enrolment, None, Some(9.5)))
            .await
            .unwrap();
        assert_eq!(roster.items[0].theory_score, Some(7.0));
        assert_eq!(roster.items[0].practical_score, Some(9.5));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_roster_only_lists_successful_registrations(pool: PgPool) {
        let enrolment = enrol(&pool, "pending").await;

        let roster = StudentService::list_registered_students(&pool, None).await.unwrap();
        assert_eq!(roster.total, 0);

        sqlx::query("UPDATE course_registrations SET status = 'successful'")
            .execute(&pool)
            .await
            .unwrap();
        let roster = StudentService::list_registered_students(&pool, None).await.unwrap();
        assert_eq!(roster.total, 1);
        assert_eq!(roster.items[0].student_id, enrolment.student_id);

        let other = StudentService::list_registered_students(&pool, Some(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(other.items.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_student_or_course_writes_nothing(pool: PgPool) {
        let enrolment = enrol(&pool, "successful").await;

        let mut dto = scores(&enrolment, Some(5.0), None);
        dto.course_id = CourseId::new();
        let err = StudentService::update_scores(&pool, dto).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Course not found");

        let mut dto = scores(&enrolment, Some(5.0), None);
        dto.student_id = StudentId::new();
        let err = StudentService::update_scores(&pool, dto).await.unwrap_err();
        assert_eq!(err.public_message(), "Student not found");
        assert_eq!(count(&pool, "exams").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_one_student_per_user(pool: PgPool) {
        let user_id = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (user_name, email, password) VALUES ('u', 'u@drivewise.dev', 'x') RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let student = StudentService::create_student(&pool, CreateStudentDto { user_id })
            .await
            .unwrap();
        assert_eq!(
            StudentService::get_student(&pool, student.id).await.unwrap(),
            student
        );

        let err = StudentService::create_student(&pool, CreateStudentDto { user_id })
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.public_message(), "User is already a student");
    }
}
