use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::{AppError, PaginationParams};

use super::model::{
    CreateInstructorDto, Instructor, InstructorList, InstructorRow, InstructorWithUser,
};

pub struct InstructorService;

impl InstructorService {
    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, db.operation = "INSERT", db.table = "instructors"))]
    pub async fn create_instructor(
        db: &PgPool,
        dto: CreateInstructorDto,
    ) -> Result<Instructor, AppError> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.user_id)
                .fetch_one(db)
                .await?;
        if !user_exists {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        let instructor = sqlx::query_as::<_, Instructor>(
            r#"INSERT INTO instructors (user_id, certification)
               VALUES ($1, $2)
               RETURNING id, user_id, certification, created_at"#,
        )
        .bind(dto.user_id)
        .bind(dto.certification.trim())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "User is already an instructor"))?;

        info!(instructor.id = %instructor.id, "Instructor created");
        Ok(instructor)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "instructors"))]
    pub async fn list_instructors(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<InstructorList, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM instructors")
            .fetch_one(db)
            .await?;

        let rows = sqlx::query_as::<_, InstructorRow>(
            r#"SELECT i.id, i.certification, u.id AS user_id, u.user_name, u.email
               FROM instructors i
               JOIN users u ON u.id = i.user_id
               ORDER BY i.created_at, i.id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.skip())
        .fetch_all(db)
        .await?;

        let items = rows.into_iter().map(InstructorWithUser::from).collect();
        Ok(InstructorList { items, total })
    }
}
