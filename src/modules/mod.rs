pub mod course_registrations;
pub mod courses;
pub mod health_check_documents;
pub mod health_check_schedules;
pub mod instructors;
pub mod license_types;
pub mod licenses;
pub mod payment_methods;
pub mod payments;
pub mod personal_info_documents;
pub mod schedules;
pub mod students;
pub mod users;

pub use self::users::model::{LoginRequest, User};
