//! Enumerated value sets.
//!
//! Each enum maps onto a Postgres enum type of the same name, so an
//! out-of-range value is rejected by both the JSON decoder and the database.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

macro_rules! wire_strings {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "Invalid {} '{}'; expected one of: {}",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Staff,
    Admin,
    Teacher,
}

wire_strings!(UserRole {
    User => "user",
    Staff => "staff",
    Admin => "admin",
    Teacher => "teacher",
});

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "course_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    #[default]
    Active,
    Inactive,
}

wire_strings!(CourseStatus {
    Active => "active",
    Inactive => "inactive",
});

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "health_check_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HealthCheckStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Canceled,
}

wire_strings!(HealthCheckStatus {
    Scheduled => "scheduled",
    InProgress => "in_progress",
    Completed => "completed",
    Canceled => "canceled",
});

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "health_document_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HealthDocumentStatus {
    #[default]
    Registered,
    Checked,
}

wire_strings!(HealthDocumentStatus {
    Registered => "registered",
    Checked => "checked",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "registration_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMethod {
    Online,
    Offline,
}

wire_strings!(RegistrationMethod {
    Online => "online",
    Offline => "offline",
});

impl RegistrationMethod {
    /// Staff entering a registration on someone's behalf submit as `admin`;
    /// everyone else is self-service.
    pub fn for_submitter(role: &str) -> Self {
        if role.trim().eq_ignore_ascii_case("admin") {
            RegistrationMethod::Offline
        } else {
            RegistrationMethod::Online
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Payment,
    Successful,
    Rejected,
}

wire_strings!(RegistrationStatus {
    Pending => "pending",
    Approved => "approved",
    Payment => "payment",
    Successful => "successful",
    Rejected => "rejected",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "schedule_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Theory,
    Practice,
    Exam,
}

wire_strings!(ScheduleType {
    Theory => "theory",
    Practice => "practice",
    Exam => "exam",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "exam_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Theory,
    Practice,
}

wire_strings!(ExamType {
    Theory => "theory",
    Practice => "practice",
});

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "license_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    #[default]
    Active,
    Expired,
    Suspended,
    Revoked,
}

wire_strings!(LicenseStatus {
    Active => "active",
    Expired => "expired",
    Suspended => "suspended",
    Revoked => "revoked",
});
