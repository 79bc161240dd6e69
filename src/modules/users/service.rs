use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use drivewise_auth::create_access_token;
use drivewise_config::JwtConfig;
use drivewise_core::{AppError, hash_password, verify_password};
use drivewise_models::ids::UserId;

use super::model::{CreateUserDto, LoginRequest, LoginResponse, User, UserCredentials};

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (user_name, email, phone_number, password, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, user_name, email, phone_number, role, is_active, created_at"#,
        )
        .bind(dto.user_name.trim())
        .bind(dto.email.trim())
        .bind(dto.phone_number.trim())
        .bind(&hashed_password)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(duplicate_user_error)?;

        info!(user.id = %user.id, user.role = %user.role, "User created");

        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, user_name, email, phone_number, role, is_active, created_at
               FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password, role, is_active FROM users WHERE email = $1",
        )
        .bind(dto.email.trim())
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            debug!("Login attempt for unknown email");
            return Err(AppError::unauthorized("Incorrect email or password"));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            warn!(user.id = %credentials.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized("Incorrect email or password"));
        }

        if !credentials.is_active {
            return Err(AppError::forbidden("User account is inactive"));
        }

        let access_token = create_access_token(
            credentials.id.into_inner(),
            &credentials.email,
            credentials.role.as_str(),
            jwt_config,
        )?;

        info!(user.id = %credentials.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            role: credentials.role,
        })
    }
}

/// Tells a taken email apart from a taken user name.
pub(crate) fn duplicate_user_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return match db_err.constraint() {
            Some("users_user_name_key") => AppError::conflict(anyhow!("User name already taken")),
            _ => AppError::conflict(anyhow!("Email already registered")),
        };
    }
    AppError::from_write(err, "User already exists")
}
