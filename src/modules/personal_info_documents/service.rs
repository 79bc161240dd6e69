use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::AppError;
use drivewise_models::ids::{PersonalInfoDocumentId, UserId};

use super::model::{
    CreatePersonalInfoDocumentDto, PersonalInfoDocument, UpdatePersonalInfoDocumentDto,
};

const COLUMNS: &str = "id, user_id, full_name, date_of_birth, gender, address, email, phone_number, \
     identity_number, identity_img_front, identity_img_back, avatar, created_at, updated_at";

pub struct PersonalInfoDocumentService;

impl PersonalInfoDocumentService {
    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, db.operation = "INSERT", db.table = "personal_info_documents"))]
    pub async fn create_document(
        db: &PgPool,
        dto: CreatePersonalInfoDocumentDto,
    ) -> Result<PersonalInfoDocument, AppError> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.user_id)
                .fetch_one(db)
                .await?;
        if !user_exists {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        let document = sqlx::query_as::<_, PersonalInfoDocument>(&format!(
            r#"INSERT INTO personal_info_documents
                   (user_id, full_name, date_of_birth, gender, address, email, phone_number,
                    identity_number, identity_img_front, identity_img_back, avatar)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.user_id)
        .bind(dto.full_name.trim())
        .bind(dto.date_of_birth)
        .bind(&dto.gender)
        .bind(&dto.address)
        .bind(&dto.email)
        .bind(&dto.phone_number)
        .bind(dto.identity_number.trim())
        .bind(&dto.identity_img_front)
        .bind(&dto.identity_img_back)
        .bind(&dto.avatar)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Personal info document already exists"))?;

        info!(document.id = %document.id, "Personal info document created");
        Ok(document)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "personal_info_documents"))]
    pub async fn get_document(
        db: &PgPool,
        id: PersonalInfoDocumentId,
    ) -> Result<PersonalInfoDocument, AppError> {
        sqlx::query_as::<_, PersonalInfoDocument>(&format!(
            "SELECT {COLUMNS} FROM personal_info_documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Personal info document not found")))
    }

    /// A user may have re-submitted their details; the newest copy wins.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "personal_info_documents"))]
    pub async fn find_latest_for_user(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Option<PersonalInfoDocument>, AppError> {
        let document = sqlx::query_as::<_, PersonalInfoDocument>(&format!(
            r#"SELECT {COLUMNS} FROM personal_info_documents
               WHERE user_id = $1
               ORDER BY created_at DESC, id DESC
               LIMIT 1"#
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(document)
    }

    pub async fn latest_for_user(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<PersonalInfoDocument, AppError> {
        Self::find_latest_for_user(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Personal info document not found")))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "personal_info_documents"))]
    pub async fn update_document(
        db: &PgPool,
        id: PersonalInfoDocumentId,
        dto: UpdatePersonalInfoDocumentDto,
    ) -> Result<PersonalInfoDocument, AppError> {
        let existing = Self::get_document(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }

        let document = sqlx::query_as::<_, PersonalInfoDocument>(&format!(
            r#"UPDATE personal_info_documents
               SET full_name = $1, date_of_birth = $2, gender = $3, address = $4, email = $5,
                   phone_number = $6, identity_number = $7, identity_img_front = $8,
                   identity_img_back = $9, avatar = $10, updated_at = NOW()
               WHERE id = $11
               RETURNING {COLUMNS}"#
        ))
        .bind(
            dto.full_name
                .map(|n| n.trim().to_string())
                .unwrap_or(existing.full_name),
        )
        .bind(dto.date_of_birth.unwrap_or(existing.date_of_birth))
        .bind(dto.gender.unwrap_or(existing.gender))
        .bind(dto.address.unwrap_or(existing.address))
        .bind(dto.email.or(existing.email))
        .bind(dto.phone_number.or(existing.phone_number))
        .bind(
            dto.identity_number
                .map(|n| n.trim().to_string())
                .unwrap_or(existing.identity_number),
        )
        .bind(dto.identity_img_front.unwrap_or(existing.identity_img_front))
        .bind(dto.identity_img_back.unwrap_or(existing.identity_img_back))
        .bind(dto.avatar.unwrap_or(existing.avatar))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Personal info document already exists"))?;

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;

    async fn user(pool: &PgPool) -> UserId {
        sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (user_name, email, password) VALUES ('079201001234', 'a@b.dev', 'x') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn dto(user_id: UserId, full_name: &str) -> CreatePersonalInfoDocumentDto {
        CreatePersonalInfoDocumentDto {
            user_id,
            full_name: full_name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 4, 9).unwrap(),
            gender: "female".to_string(),
            address: "12 Le Loi, District 1".to_string(),
            email: None,
            phone_number: Some("0901234567".to_string()),
            identity_number: "079201001234".to_string(),
            identity_img_front: "https://files.drivewise.dev/id/front.jpg".to_string(),
            identity_img_back: "https://files.drivewise.dev/id/back.jpg".to_string(),
            avatar: "https://files.drivewise.dev/id/avatar.jpg".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_latest_for_user_prefers_newest(pool: PgPool) {
        let user_id = user(&pool).await;
        PersonalInfoDocumentService::create_document(&pool, dto(user_id, "Nguyen Thi A"))
            .await
            .unwrap();
        let newer = PersonalInfoDocumentService::create_document(&pool, dto(user_id, "Nguyen Thi B"))
            .await
            .unwrap();

        let latest = PersonalInfoDocumentService::latest_for_user(&pool, user_id)
            .await
            .unwrap();
        assert_eq!(latest.id, newer.id);
        assert_eq!(latest.full_name, "Nguyen Thi B");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_missing_user_and_document(pool: PgPool) {
        let err = PersonalInfoDocumentService::create_document(&pool, dto(UserId::new(), "X"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "User not found");

        let user_id = user(&pool).await;
        let err = PersonalInfoDocumentService::latest_for_user(&pool, user_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_partial_update_keeps_other_fields(pool: PgPool) {
        let user_id = user(&pool).await;
        let document = PersonalInfoDocumentService::create_document(&pool, dto(user_id, "Tran Van C"))
            .await
            .unwrap();

        let updated = PersonalInfoDocumentService::update_document(
            &pool,
            document.id,
            UpdatePersonalInfoDocumentDto {
                address: Some("88 Hai Ba Trung".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.address, "88 Hai Ba Trung");
        assert_eq!(updated.full_name, "Tran Van C");
        assert_eq!(updated.phone_number.as_deref(), Some("0901234567"));

        let unchanged = PersonalInfoDocumentService::update_document(
            &pool,
            document.id,
            UpdatePersonalInfoDocumentDto::default(),
        )
        .await
        .unwrap();
        assert_eq!(unchanged, updated);
    }
}
