use anyhow::anyhow;
use axum::http::StatusCode;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use drivewise_core::{AppError, hash_password};
use drivewise_models::enums::{
    HealthDocumentStatus, RegistrationMethod, RegistrationStatus, UserRole,
};
use drivewise_models::ids::{CourseId, CourseRegistrationId, StudentId, UserId};

use crate::modules::health_check_documents::service::HealthCheckDocumentService;
use crate::modules::personal_info_documents::service::PersonalInfoDocumentService;
use crate::modules::users::service::duplicate_user_error;

use super::model::{
    CourseRegistration, CourseScheduleRow, CreateCourseRegistrationDto, RegistrationAck,
    RegistrationDetail, RegistrationDetailRow, RegistrationFilterParams, RegistrationList,
    RegistrationListItem, RegistrationListRow, StatusAck, UpdateCourseRegistrationDto,
};

const REGISTRATION_COLUMNS: &str =
    "id, student_id, course_id, method, status, note, created_at, updated_at";

pub struct CourseRegistrationService;

impl CourseRegistrationService {
    async fn ensure_exists(
        db: &PgPool,
        query: &str,
        id: Uuid,
        message: &'static str,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(query)
            .bind(id)
            .fetch_one(db)
            .await?;
        if !exists {
            return Err(AppError::not_found(anyhow!(message)));
        }
        Ok(())
    }

    /// Creates the user, student, personal info, health check document and
    /// registration for one submission. Either all five rows are written or
    /// none are.
    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.operation = "INSERT", db.table = "course_registrations"))]
    pub async fn register(
        db: &PgPool,
        dto: CreateCourseRegistrationDto,
    ) -> Result<RegistrationAck, AppError> {
        Self::ensure_exists(
            db,
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)",
            dto.course_id.into_inner(),
            "Course not found",
        )
        .await?;
        Self::ensure_exists(
            db,
            "SELECT EXISTS(SELECT 1 FROM health_check_schedules WHERE id = $1)",
            dto.health_check_schedule_id.into_inner(),
            "Health check schedule not found",
        )
        .await?;
        Self::ensure_exists(
            db,
            "SELECT EXISTS(SELECT 1 FROM license_types WHERE id = $1)",
            dto.license_type_id.into_inner(),
            "License type not found",
        )
        .await?;

        let method = RegistrationMethod::for_submitter(&dto.role);

        let mut tx = db.begin().await?;
        let registration_id = Self::write_registration(&mut tx, &dto, method)
            .await
            .map_err(|e| e.within("Course registration failed"))?;
        tx.commit().await?;

        info!(
            registration.id = %registration_id,
            registration.method = %method,
            "Course registration created"
        );

        Ok(RegistrationAck {
            status_code: StatusCode::CREATED.as_u16(),
            message: "Course registration created successfully.".to_string(),
            registration_id,
        })
    }

    async fn write_registration(
        tx: &mut Transaction<'_, Postgres>,
        dto: &CreateCourseRegistrationDto,
        method: RegistrationMethod,
    ) -> Result<CourseRegistrationId, AppError> {
        let identity_number = dto.identity_number.trim();
        let hashed_password = hash_password(identity_number)?;
        let email = dto.login_email();

        let user_id = sqlx::query_scalar::<_, UserId>(
            r#"INSERT INTO users (user_name, email, phone_number, password, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(identity_number)
        .bind(&email)
        .bind(dto.phone_number.trim())
        .bind(&hashed_password)
        .bind(UserRole::User)
        .fetch_one(&mut **tx)
        .await
        .map_err(duplicate_user_error)?;

        let student_id = sqlx::query_scalar::<_, StudentId>(
            "INSERT INTO students (user_id) VALUES ($1) RETURNING id",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::from_write(e, "User is already a student"))?;

        sqlx::query(
            r#"INSERT INTO personal_info_documents
                   (user_id, full_name, date_of_birth, gender, address, email, phone_number,
                    identity_number, identity_img_front, identity_img_back, avatar)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(user_id)
        .bind(dto.full_name.trim())
        .bind(dto.date_of_birth)
        .bind(&dto.gender)
        .bind(&dto.address)
        .bind(&email)
        .bind(dto.phone_number.trim())
        .bind(identity_number)
        .bind(&dto.identity_image_front)
        .bind(&dto.identity_image_back)
        .bind(&dto.avatar)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::from_write(e, "Personal info document already exists"))?;

        sqlx::query(
            r#"INSERT INTO health_check_documents (student_id, health_check_id, status)
               VALUES ($1, $2, $3)"#,
        )
        .bind(student_id)
        .bind(dto.health_check_schedule_id)
        .bind(HealthDocumentStatus::Registered)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::from_write(e, "Health check document already exists"))?;

        let registration_id = sqlx::query_scalar::<_, CourseRegistrationId>(
            r#"INSERT INTO course_registrations (student_id, course_id, method, status)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(student_id)
        .bind(dto.course_id)
        .bind(method)
        .bind(RegistrationStatus::Pending)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::from_write(e, "Course registration already exists"))?;

        Ok(registration_id)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "course_registrations"))]
    pub async fn get_registration(
        db: &PgPool,
        id: CourseRegistrationId,
    ) -> Result<CourseRegistration, AppError> {
        sqlx::query_as::<_, CourseRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM course_registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course registration not found")))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "course_registrations"))]
    pub async fn get_registration_detail(
        db: &PgPool,
        id: CourseRegistrationId,
    ) -> Result<RegistrationDetail, AppError> {
        let row = sqlx::query_as::<_, RegistrationDetailRow>(
            r#"SELECT cr.id, cr.method, cr.status, cr.note, cr.created_at, cr.updated_at,
                      s.id AS student_id, u.id AS user_id, u.user_name, u.email, u.phone_number,
                      c.id AS course_id, c.course_name, c.start_date, c.end_date,
                      c.max_students, c.current_students, c.price, c.status AS course_status,
                      lt.id AS license_type_id, lt.type_name AS license_type_name
               FROM course_registrations cr
               JOIN students s ON s.id = cr.student_id
               JOIN users u ON u.id = s.user_id
               JOIN courses c ON c.id = cr.course_id
               JOIN license_types lt ON lt.id = c.license_type_id
               WHERE cr.id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course registration not found")))?;

        let personal_doc = PersonalInfoDocumentService::find_latest_for_user(db, row.user_id).await?;
        let health_check_doc =
            HealthCheckDocumentService::find_latest_for_student(db, row.student_id).await?;

        Ok(RegistrationDetail::assemble(row, personal_doc, health_check_doc))
    }

    /// Resolves an identity number to the holder's earliest registration.
    #[instrument(skip(db, identity_number), fields(db.operation = "SELECT", db.table = "course_registrations"))]
    pub async fn get_by_identity_number(
        db: &PgPool,
        identity_number: &str,
    ) -> Result<RegistrationDetail, AppError> {
        let registration_id = sqlx::query_scalar::<_, CourseRegistrationId>(
            r#"SELECT cr.id
               FROM personal_info_documents p
               JOIN students s ON s.user_id = p.user_id
               JOIN course_registrations cr ON cr.student_id = s.id
               WHERE p.identity_number = $1
               ORDER BY cr.created_at, cr.id
               LIMIT 1"#,
        )
        .bind(identity_number.trim())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course registration not found")))?;

        Self::get_registration_detail(db, registration_id).await
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "course_registrations"))]
    pub async fn list_registrations(
        db: &PgPool,
        filters: RegistrationFilterParams,
    ) -> Result<RegistrationList, AppError> {
        let method = filters
            .method
            .as_deref()
            .map(str::parse::<RegistrationMethod>)
            .transpose()
            .map_err(|e| AppError::unprocessable(anyhow!(e)))?;
        let status = filters
            .status
            .as_deref()
            .map(str::parse::<RegistrationStatus>)
            .transpose()
            .map_err(|e| AppError::unprocessable(anyhow!(e)))?;
        let method = method.map(|m| m.as_str());
        let status = status.map(|s| s.as_str());

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM course_registrations
               WHERE ($1::text IS NULL OR method::text = $1)
                 AND ($2::text IS NULL OR status::text = $2)"#,
        )
        .bind(method)
        .bind(status)
        .fetch_one(db)
        .await?;

        let rows = sqlx::query_as::<_, RegistrationListRow>(
            r#"SELECT cr.id, cr.method, cr.status, cr.created_at,
                      u.email AS user_email, u.phone_number AS user_phone,
                      c.id AS course_id, c.course_name,
                      lt.id AS license_type_id, lt.type_name AS license_type_name,
                      c.start_date, c.end_date, c.max_students,
                      (SELECT COUNT(*) FROM course_registrations x
                       WHERE x.course_id = cr.course_id) AS registered_count,
                      p.full_name, p.identity_number, p.address, p.gender, p.date_of_birth,
                      p.avatar, p.identity_img_front, p.identity_img_back,
                      h.document AS health_document, h.status AS health_document_status,
                      hs.id AS health_check_id, hs.description AS health_check_description,
                      hs.scheduled_datetime AS health_check_datetime,
                      hs.address AS health_check_address, hs.status AS health_check_status,
                      (SELECT AVG(er.score) FROM exam_results er
                       JOIN exams e ON e.id = er.exam_id
                       WHERE er.student_id = cr.student_id
                         AND e.course_id = cr.course_id) AS score_overall
               FROM course_registrations cr
               LEFT JOIN students s ON s.id = cr.student_id
               LEFT JOIN users u ON u.id = s.user_id
               LEFT JOIN courses c ON c.id = cr.course_id
               LEFT JOIN license_types lt ON lt.id = c.license_type_id
               LEFT JOIN LATERAL (
                   SELECT full_name, identity_number, address, gender, date_of_birth,
                          avatar, identity_img_front, identity_img_back
                   FROM personal_info_documents
                   WHERE user_id = u.id
                   ORDER BY created_at DESC, id DESC
                   LIMIT 1
               ) p ON TRUE
               LEFT JOIN LATERAL (
                   SELECT document, status, health_check_id
                   FROM health_check_documents
                   WHERE student_id = s.id
                   ORDER BY created_at DESC, id DESC
                   LIMIT 1
               ) h ON TRUE
               LEFT JOIN health_check_schedules hs ON hs.id = h.health_check_id
               WHERE ($1::text IS NULL OR cr.method::text = $1)
                 AND ($2::text IS NULL OR cr.status::text = $2)
               ORDER BY cr.created_at, cr.id
               LIMIT $3 OFFSET $4"#,
        )
        .bind(method)
        .bind(status)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.skip())
        .fetch_all(db)
        .await?;

        let mut course_ids: Vec<CourseId> = rows.iter().filter_map(|r| r.course_id).collect();
        course_ids.sort_unstable_by_key(|id| id.into_inner());
        course_ids.dedup();

        let schedules = if course_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, CourseScheduleRow>(
                r#"SELECT s.id, s.course_id, s.type AS schedule_type, s.start_time, s.end_time,
                          s.location, s.instructor_id, u.user_name AS teacher
                   FROM schedules s
                   LEFT JOIN instructors i ON i.id = s.instructor_id
                   LEFT JOIN users u ON u.id = i.user_id
                   WHERE s.course_id = ANY($1)
                   ORDER BY s.start_time, s.id"#,
            )
            .bind(&course_ids)
            .fetch_all(db)
            .await?
        };

        let items = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                let item = RegistrationListItem::from_row(row, &schedules);
                if item.is_none() {
                    warn!(registration.id = %id, "Skipping registration with incomplete records");
                }
                item
            })
            .collect();

        Ok(RegistrationList { items, total })
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "course_registrations"))]
    pub async fn update_registration(
        db: &PgPool,
        id: CourseRegistrationId,
        dto: UpdateCourseRegistrationDto,
    ) -> Result<CourseRegistration, AppError> {
        let existing = Self::get_registration(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }

        let registration = sqlx::query_as::<_, CourseRegistration>(&format!(
            r#"UPDATE course_registrations
               SET status = $1, note = $2, updated_at = NOW()
               WHERE id = $3
               RETURNING {REGISTRATION_COLUMNS}"#
        ))
        .bind(dto.status.unwrap_or(existing.status))
        .bind(dto.note.or(existing.note))
        .bind(id)
        .fetch_one(db)
        .await?;

        info!(registration.id = %id, registration.status = %registration.status, "Course registration updated");
        Ok(registration)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "course_registrations"))]
    pub async fn delete_registration(
        db: &PgPool,
        id: CourseRegistrationId,
    ) -> Result<StatusAck, AppError> {
        let result = sqlx::query("DELETE FROM course_registrations WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Course registration not found")));
        }

        Ok(StatusAck {
            status_code: StatusCode::OK.as_u16(),
            message: "Course registration deleted successfully.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drivewise_core::PaginationParams;
    use drivewise_models::ids::{HealthCheckScheduleId, LicenseTypeId};

    struct Catalogue {
        license_type_id: LicenseTypeId,
        course_id: CourseId,
        health_check_id: HealthCheckScheduleId,
    }

    async fn catalogue(pool: &PgPool) -> Catalogue {
        let license_type_id = sqlx::query_scalar::<_, LicenseTypeId>(
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
        let health_check_id = sqlx::query_scalar::<_, HealthCheckScheduleId>(
            r#"INSERT INTO health_check_schedules (course_id, address, scheduled_datetime, description)
               VALUES ($1, 'District 3 Clinic', NOW() + INTERVAL '2 days', 'Morning') RETURNING id"#,
        )
        .bind(course_id)
        .fetch_one(pool)
        .await
        .unwrap();
        Catalogue {
            license_type_id,
            course_id,
            health_check_id,
        }
    }

    fn submission(catalogue: &Catalogue, identity_number: &str, role: &str) -> CreateCourseRegistrationDto {
        CreateCourseRegistrationDto {
            identity_number: identity_number.to_string(),
            full_name: "Tran Thi Mai".to_string(),
            gender: "female".to_string(),
            phone_number: "0901234567".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 4, 2).unwrap(),
            address: "12 Le Loi".to_string(),
            email: None,
            license_type_id: catalogue.license_type_id,
            identity_image_front: "front.png".to_string(),
            identity_image_back: "back.png".to_string(),
            avatar: "avatar.png".to_string(),
            course_id: catalogue.course_id,
            health_check_schedule_id: catalogue.health_check_id,
            role: role.to_string(),
        }
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_writes_every_record(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let ack = CourseRegistrationService::register(&pool, submission(&catalogue, "079201001234", "parent"))
            .await
            .unwrap();
        assert_eq!(ack.status_code, 201);
        assert_eq!(ack.message, "Course registration created successfully.");

        let (user_name, email, role): (String, String, UserRole) = sqlx::query_as(
            "SELECT user_name, email, role FROM users",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(user_name, "079201001234");
        assert_eq!(email, "079201001234@placeholder");
        assert_eq!(role, UserRole::User);
        assert_eq!(count(&pool, "students").await, 1);
        assert_eq!(count(&pool, "personal_info_documents").await, 1);

        let detail = CourseRegistrationService::get_registration_detail(&pool, ack.registration_id)
            .await
            .unwrap();
        assert_eq!(detail.status, RegistrationStatus::Pending);
        assert_eq!(detail.method, RegistrationMethod::Online);
        assert_eq!(detail.course.id, catalogue.course_id);
        let health_doc = detail.health_check_doc.unwrap();
        assert_eq!(health_doc.status, HealthDocumentStatus::Registered);
        assert_eq!(health_doc.health_check_id, catalogue.health_check_id);
        let personal_doc = detail.personal_doc.unwrap();
        assert_eq!(personal_doc.email.as_deref(), Some("079201001234@placeholder"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_admin_submission_is_offline(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let ack = CourseRegistrationService::register(&pool, submission(&catalogue, "1", "  Admin "))
            .await
            .unwrap();
        let registration = CourseRegistrationService::get_registration(&pool, ack.registration_id)
            .await
            .unwrap();
        assert_eq!(registration.method, RegistrationMethod::Offline);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_course_writes_nothing(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let mut dto = submission(&catalogue, "079201001234", "");
        dto.course_id = CourseId::new();

        let err = CourseRegistrationService::register(&pool, dto).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Course not found");
        assert_eq!(count(&pool, "users").await, 0);
        assert_eq!(count(&pool, "students").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_health_check_schedule_writes_nothing(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let mut dto = submission(&catalogue, "079201001234", "");
        dto.health_check_schedule_id = HealthCheckScheduleId::new();

        let err = CourseRegistrationService::register(&pool, dto).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Health check schedule not found");
        assert_eq!(count(&pool, "users").await, 0);
        assert_eq!(count(&pool, "students").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_user_and_personal_doc_share_trimmed_email(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let mut dto = submission(&catalogue, "079201004321", "");
        dto.email = Some("  mai@drivewise.dev ".to_string());
        CourseRegistrationService::register(&pool, dto).await.unwrap();

        let user_email: String = sqlx::query_scalar("SELECT email FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        let doc_email: Option<String> =
            sqlx::query_scalar("SELECT email FROM personal_info_documents")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(user_email, "mai@drivewise.dev");
        assert_eq!(doc_email.as_deref(), Some("mai@drivewise.dev"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_identity_rolls_back(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        CourseRegistrationService::register(&pool, submission(&catalogue, "079201001234", ""))
            .await
            .unwrap();

        let mut dto = submission(&catalogue, "079201001234", "");
        dto.email = Some("someone@else.dev".to_string());
        let err = CourseRegistrationService::register(&pool, dto).await.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(err.public_message().contains("User name already taken"));
        assert_eq!(count(&pool, "users").await, 1);
        assert_eq!(count(&pool, "course_registrations").await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_lookup_by_identity_number(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let ack = CourseRegistrationService::register(&pool, submission(&catalogue, "079201001234", ""))
            .await
            .unwrap();

        let detail = CourseRegistrationService::get_by_identity_number(&pool, "079201001234")
            .await
            .unwrap();
        assert_eq!(detail.id, ack.registration_id);

        let err = CourseRegistrationService::get_by_identity_number(&pool, "000")
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_filters_by_method(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        CourseRegistrationService::register(&pool, submission(&catalogue, "1", "user"))
            .await
            .unwrap();
        CourseRegistrationService::register(&pool, submission(&catalogue, "2", "admin"))
            .await
            .unwrap();

        let all = CourseRegistrationService::list_registrations(&pool, RegistrationFilterParams::default())
            .await
            .unwrap();
        assert_eq!(all.total, 2);
        assert_eq!(all.items.len(), 2);
        assert_eq!(all.items[0].student_infor.choose_data.course.registered_count, 2);

        let offline = CourseRegistrationService::list_registrations(
            &pool,
            RegistrationFilterParams {
                method: Some("offline".to_string()),
                status: None,
                pagination: PaginationParams::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(offline.total, 1);
        assert_eq!(offline.items[0].method, RegistrationMethod::Offline);

        let err = CourseRegistrationService::list_registrations(
            &pool,
            RegistrationFilterParams {
                method: None,
                status: Some("archived".to_string()),
                pagination: PaginationParams::default(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_and_delete(pool: PgPool) {
        let catalogue = catalogue(&pool).await;
        let ack = CourseRegistrationService::register(&pool, submission(&catalogue, "1", ""))
            .await
            .unwrap();

        let updated = CourseRegistrationService::update_registration(
            &pool,
            ack.registration_id,
            UpdateCourseRegistrationDto {
                status: Some(RegistrationStatus::Approved),
                note: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, RegistrationStatus::Approved);
        assert_eq!(updated.note, None);

        let deleted = CourseRegistrationService::delete_registration(&pool, ack.registration_id)
            .await
            .unwrap();
        assert_eq!(deleted.status_code, 200);

        let err = CourseRegistrationService::delete_registration(&pool, ack.registration_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
