//! Course registrations: the submission form, the stored row, and the
//! read models assembled for staff.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use drivewise_core::serde::deserialize_optional_filter;

use crate::enums::{
    CourseStatus, HealthCheckStatus, HealthDocumentStatus, RegistrationMethod, RegistrationStatus,
    ScheduleType,
};
use crate::health_checks::HealthCheckDocument;
use crate::ids::{
    CourseId, CourseRegistrationId, HealthCheckScheduleId, InstructorId, LicenseTypeId,
    ScheduleId, StudentId, UserId,
};
use crate::personal_info::PersonalInfoDocument;

/// Everything needed to register a new student into a course in one call.
#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateCourseRegistrationDto {
    #[validate(length(min = 1, max = 20, message = "identity_number must be 1-20 characters"))]
    pub identity_number: String,
    #[validate(length(min = 1, max = 200, message = "full_name must be 1-200 characters"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 20, message = "gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, max = 20, message = "phone_number is required"))]
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,
    /// Defaults to `<identity_number>@placeholder` when omitted
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub license_type_id: LicenseTypeId,
    #[validate(length(min = 1, max = 2048, message = "identity_image_front is required"))]
    pub identity_image_front: String,
    #[validate(length(min = 1, max = 2048, message = "identity_image_back is required"))]
    pub identity_image_back: String,
    #[validate(length(min = 1, max = 2048, message = "avatar is required"))]
    pub avatar: String,
    pub course_id: CourseId,
    pub health_check_schedule_id: HealthCheckScheduleId,
    /// Role of whoever filled the form; `admin` marks an offline registration
    #[serde(default)]
    pub role: String,
}

impl CreateCourseRegistrationDto {
    pub fn login_email(&self) -> String {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}@placeholder", self.identity_number.trim()))
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RegistrationAck {
    pub status_code: u16,
    pub message: String,
    pub registration_id: CourseRegistrationId,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StatusAck {
    pub status_code: u16,
    pub message: String,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseRegistration {
    pub id: CourseRegistrationId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub method: RegistrationMethod,
    pub status: RegistrationStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateCourseRegistrationDto {
    pub status: Option<RegistrationStatus>,
    #[validate(length(max = 1000, message = "note must be at most 1000 characters"))]
    pub note: Option<String>,
}

impl UpdateCourseRegistrationDto {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.note.is_none()
    }
}

/// `type` filters by registration method; `all` or absent disables a filter.
#[derive(Deserialize, Debug, Default)]
pub struct RegistrationFilterParams {
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_filter")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_filter")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub pagination: drivewise_core::PaginationParams,
}

// ---------------------------------------------------------------------------
// Detail read model
// ---------------------------------------------------------------------------

/// Joined row backing [`RegistrationDetail`].
#[derive(FromRow, Debug)]
pub struct RegistrationDetailRow {
    pub id: CourseRegistrationId,
    pub method: RegistrationMethod,
    pub status: RegistrationStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub student_id: StudentId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub course_id: CourseId,
    pub course_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_students: i32,
    pub current_students: i32,
    pub price: i64,
    pub course_status: CourseStatus,
    pub license_type_id: LicenseTypeId,
    pub license_type_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RegisteredStudent {
    pub id: StudentId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RegisteredCourse {
    pub id: CourseId,
    pub course_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_students: i32,
    pub current_students: i32,
    pub price: i64,
    pub status: CourseStatus,
    pub license_type_id: LicenseTypeId,
    pub license_type_name: String,
}

/// Full picture of one registration.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RegistrationDetail {
    pub id: CourseRegistrationId,
    pub method: RegistrationMethod,
    pub status: RegistrationStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub student: RegisteredStudent,
    pub course: RegisteredCourse,
    pub personal_doc: Option<PersonalInfoDocument>,
    pub health_check_doc: Option<HealthCheckDocument>,
}

impl RegistrationDetail {
    pub fn assemble(
        row: RegistrationDetailRow,
        personal_doc: Option<PersonalInfoDocument>,
        health_check_doc: Option<HealthCheckDocument>,
    ) -> Self {
        // Contact details fall back to the account's when the document has none.
        let personal_doc = personal_doc.map(|mut doc| {
            doc.email.get_or_insert_with(|| row.email.clone());
            doc.phone_number.get_or_insert_with(|| row.phone_number.clone());
            doc
        });

        Self {
            id: row.id,
            method: row.method,
            status: row.status,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
            student: RegisteredStudent {
                id: row.student_id,
                user_id: row.user_id,
                user_name: row.user_name,
                email: row.email,
                phone_number: row.phone_number,
            },
            course: RegisteredCourse {
                id: row.course_id,
                course_name: row.course_name,
                start_date: row.start_date,
                end_date: row.end_date,
                max_students: row.max_students,
                current_students: row.current_students,
                price: row.price,
                status: row.course_status,
                license_type_id: row.license_type_id,
                license_type_name: row.license_type_name,
            },
            personal_doc,
            health_check_doc,
        }
    }
}

// ---------------------------------------------------------------------------
// Bulk listing read model (camelCase wire shape consumed by the admin UI)
// ---------------------------------------------------------------------------

/// One registration joined with everything the listing needs. Columns from
/// optional joins are nullable; rows missing their student, course or
/// personal document are dropped by [`RegistrationListItem::from_row`].
#[derive(FromRow, Debug)]
pub struct RegistrationListRow {
    pub id: CourseRegistrationId,
    pub method: RegistrationMethod,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    pub course_id: Option<CourseId>,
    pub course_name: Option<String>,
    pub license_type_id: Option<LicenseTypeId>,
    pub license_type_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_students: Option<i32>,
    pub registered_count: Option<i64>,
    pub full_name: Option<String>,
    pub identity_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub identity_img_front: Option<String>,
    pub identity_img_back: Option<String>,
    pub health_document: Option<String>,
    pub health_document_status: Option<HealthDocumentStatus>,
    pub health_check_id: Option<HealthCheckScheduleId>,
    pub health_check_description: Option<String>,
    pub health_check_datetime: Option<DateTime<Utc>>,
    pub health_check_address: Option<String>,
    pub health_check_status: Option<HealthCheckStatus>,
    pub score_overall: Option<f64>,
}

/// Schedule row for the courses on the current page.
#[derive(FromRow, Debug, Clone)]
pub struct CourseScheduleRow {
    pub id: ScheduleId,
    pub course_id: Option<CourseId>,
    pub schedule_type: ScheduleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub instructor_id: Option<InstructorId>,
    pub teacher: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub name: String,
    pub identity_number: String,
    pub address: String,
    pub phone: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub license_type: String,
    pub email: String,
    #[serde(rename = "healthCheckDocURL")]
    pub health_check_doc_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalImgData {
    pub avatar: String,
    pub card_img_front: String,
    pub card_img_back: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChosenCourse {
    pub id: CourseId,
    pub name: String,
    pub license_type_id: LicenseTypeId,
    pub exam_date: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registered_count: i64,
    pub max_students: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChosenHealthCheck {
    pub id: HealthCheckScheduleId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub address: String,
    pub status: Option<HealthCheckStatus>,
    pub course_id: CourseId,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChooseData {
    pub course: ChosenCourse,
    pub health_check: Option<ChosenHealthCheck>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub personal_data: PersonalData,
    pub personal_img_data: PersonalImgData,
    pub choose_data: ChooseData,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LicenseTypeLabel {
    pub id: LicenseTypeId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInfo {
    pub id: ScheduleId,
    pub course_id: CourseId,
    pub type_of_license: LicenseTypeLabel,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub instructor_id: Option<InstructorId>,
    pub teacher: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationListItem {
    pub id: CourseRegistrationId,
    pub method: RegistrationMethod,
    pub registration_date: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub student_infor: StudentInfo,
    pub schedule_infor: Vec<ScheduleInfo>,
    /// Mean of the student's exam scores in this course, if any were recorded
    pub score_overall: Option<f64>,
}

impl RegistrationListItem {
    /// Builds the nested listing shape, or `None` when the row lacks the
    /// course or personal document it needs.
    pub fn from_row(row: RegistrationListRow, schedules: &[CourseScheduleRow]) -> Option<Self> {
        let course_id = row.course_id?;
        let license_type_id = row.license_type_id?;
        let license_type_name = row.license_type_name.unwrap_or_default();
        let start_date = row.start_date?;
        let end_date = row.end_date?;
        let birth_date = row.date_of_birth?;
        let full_name = row.full_name?;

        let health_check = match (row.health_check_id, row.health_check_datetime) {
            (Some(id), Some(date)) => Some(ChosenHealthCheck {
                id,
                name: row.health_check_description.unwrap_or_default(),
                date,
                address: row.health_check_address.unwrap_or_default(),
                status: row.health_check_status,
                course_id,
            }),
            _ => None,
        };

        let schedule_infor = schedules
            .iter()
            .filter(|s| s.course_id == Some(course_id))
            .map(|s| ScheduleInfo {
                id: s.id,
                course_id,
                type_of_license: LicenseTypeLabel {
                    id: license_type_id,
                    name: license_type_name.clone(),
                },
                schedule_type: s.schedule_type,
                start_time: s.start_time,
                end_time: s.end_time,
                location: s.location.clone(),
                instructor_id: s.instructor_id,
                teacher: s.teacher.clone(),
            })
            .collect();

        Some(Self {
            id: row.id,
            method: row.method,
            registration_date: row.created_at,
            status: row.status,
            student_infor: StudentInfo {
                personal_data: PersonalData {
                    name: full_name,
                    identity_number: row.identity_number.unwrap_or_default(),
                    address: row.address.unwrap_or_default(),
                    phone: row.user_phone?,
                    gender: row.gender.unwrap_or_default(),
                    birth_date,
                    license_type: license_type_name,
                    email: row.user_email?,
                    health_check_doc_url: row.health_document.unwrap_or_default(),
                },
                personal_img_data: PersonalImgData {
                    avatar: row.avatar.unwrap_or_default(),
                    card_img_front: row.identity_img_front.unwrap_or_default(),
                    card_img_back: row.identity_img_back.unwrap_or_default(),
                },
                choose_data: ChooseData {
                    course: ChosenCourse {
                        id: course_id,
                        name: row.course_name.unwrap_or_default(),
                        license_type_id,
                        exam_date: end_date,
                        start_date,
                        end_date,
                        registered_count: row.registered_count.unwrap_or(0),
                        max_students: row.max_students.unwrap_or(0),
                    },
                    health_check,
                },
            },
            schedule_infor,
            score_overall: row.score_overall,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RegistrationList {
    pub items: Vec<RegistrationListItem>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_row() -> RegistrationListRow {
        RegistrationListRow {
            id: CourseRegistrationId::new(),
            method: RegistrationMethod::Online,
            status: RegistrationStatus::Pending,
            created_at: Utc::now(),
            user_email: Some("079201001234@placeholder".to_string()),
            user_phone: Some("0901234567".to_string()),
            course_id: Some(CourseId::new()),
            course_name: Some("B2 Weekend".to_string()),
            license_type_id: Some(LicenseTypeId::new()),
            license_type_name: Some("B2".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            max_students: Some(30),
            registered_count: Some(3),
            full_name: Some("Tran Thi Mai".to_string()),
            identity_number: Some("079201001234".to_string()),
            address: Some("12 Le Loi".to_string()),
            gender: Some("female".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 4, 2),
            avatar: Some("avatar.png".to_string()),
            identity_img_front: Some("front.png".to_string()),
            identity_img_back: Some("back.png".to_string()),
            health_document: Some(String::new()),
            health_document_status: Some(HealthDocumentStatus::Registered),
            health_check_id: None,
            health_check_description: None,
            health_check_datetime: None,
            health_check_address: None,
            health_check_status: None,
            score_overall: None,
        }
    }

    #[test]
    fn test_login_email_defaults_to_placeholder() {
        let json = format!(
            r#"{{"identity_number":" 0792 ","full_name":"A","gender":"m","phone_number":"1","date_of_birth":"2000-01-01","address":"x","license_type_id":"{0}","identity_image_front":"f","identity_image_back":"b","avatar":"a","course_id":"{0}","health_check_schedule_id":"{0}"}}"#,
            uuid::Uuid::new_v4()
        );
        let dto: CreateCourseRegistrationDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.login_email(), "0792@placeholder");
        assert_eq!(dto.role, "");
    }

    #[test]
    fn test_list_item_uses_camel_case_keys() {
        let item = RegistrationListItem::from_row(list_row(), &[]).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("registrationDate").is_some());
        let personal = &json["studentInfor"]["personalData"];
        assert_eq!(personal["identityNumber"], "079201001234");
        assert!(personal.get("healthCheckDocURL").is_some());
        assert_eq!(json["studentInfor"]["chooseData"]["course"]["registeredCount"], 3);
        assert!(json["studentInfor"]["chooseData"]["healthCheck"].is_null());
    }

    #[test]
    fn test_list_item_skips_rows_without_personal_document() {
        let mut row = list_row();
        row.full_name = None;
        assert!(RegistrationListItem::from_row(row, &[]).is_none());

        let mut row = list_row();
        row.course_id = None;
        assert!(RegistrationListItem::from_row(row, &[]).is_none());
    }

    #[test]
    fn test_list_item_attaches_only_matching_schedules() {
        let row = list_row();
        let course_id = row.course_id.unwrap();
        let schedule = |course| CourseScheduleRow {
            id: ScheduleId::new(),
            course_id: Some(course),
            schedule_type: ScheduleType::Theory,
            start_time: Utc::now(),
            end_time: Utc::now(),
            location: "Room 1".to_string(),
            instructor_id: None,
            teacher: Some("thanh".to_string()),
        };
        let schedules = vec![schedule(course_id), schedule(CourseId::new())];
        let item = RegistrationListItem::from_row(row, &schedules).unwrap();
        assert_eq!(item.schedule_infor.len(), 1);
        assert_eq!(item.schedule_infor[0].type_of_license.name, "B2");
    }
}
