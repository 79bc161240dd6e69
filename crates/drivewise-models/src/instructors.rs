use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{InstructorId, UserId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Instructor {
    pub id: InstructorId,
    pub user_id: UserId,
    pub certification: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateInstructorDto {
    pub user_id: UserId,
    #[validate(length(max = 255, message = "certification must be at most 255 characters"))]
    #[serde(default)]
    pub certification: String,
}

#[derive(FromRow, Debug)]
pub struct InstructorRow {
    pub id: InstructorId,
    pub certification: String,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct InstructorUser {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct InstructorWithUser {
    pub id: InstructorId,
    pub certification: String,
    pub user: InstructorUser,
}

impl From<InstructorRow> for InstructorWithUser {
    fn from(row: InstructorRow) -> Self {
        Self {
            id: row.id,
            certification: row.certification,
            user: InstructorUser {
                id: row.user_id,
                user_name: row.user_name,
                email: row.email,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct InstructorList {
    pub items: Vec<InstructorWithUser>,
    pub total: i64,
}
