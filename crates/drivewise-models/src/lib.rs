//! # Drivewise Models
//!
//! Domain models and DTOs for the Drivewise API.
//!
//! Row structs derive `sqlx::FromRow`, request DTOs derive `validator::Validate`,
//! and everything that crosses the wire derives `utoipa::ToSchema`.
//!
//! # Modules
//!
//! - [`ids`]: typed UUID newtypes
//! - [`enums`]: status and role enums backed by Postgres enum types
//! - [`courses`], [`license_types`], [`licenses`]: the catalogue
//! - [`health_checks`], [`personal_info`]: per-student paperwork
//! - [`registrations`]: the registration form and its read models
//! - [`students`]: students, exams and the scored roster
//! - [`schedules`], [`instructors`]: the timetable
//! - [`payments`]: payment methods and payments
//!
//! # Example
//!
//! ```ignore
//! use drivewise_models::courses::{Course, CreateCourseDto};
//! use drivewise_models::enums::RegistrationStatus;
//!
//! assert_eq!(RegistrationStatus::default(), RegistrationStatus::Pending);
//! ```

pub mod courses;
pub mod enums;
pub mod health_checks;
pub mod ids;
pub mod instructors;
pub mod license_types;
pub mod licenses;
pub mod payments;
pub mod personal_info;
pub mod registrations;
pub mod schedules;
pub mod students;
pub mod users;

pub use enums::{
    CourseStatus, ExamType, HealthCheckStatus, HealthDocumentStatus, LicenseStatus,
    RegistrationMethod, RegistrationStatus, ScheduleType, UserRole,
};
pub use users::{CreateUserDto, LoginRequest, LoginResponse, User};
