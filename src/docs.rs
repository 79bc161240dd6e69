use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use drivewise_core::PaginationParams;
use drivewise_models::courses::{Course, CourseList, CreateCourseDto, UpdateCourseDto};
use drivewise_models::enums::{
    CourseStatus, ExamType, HealthCheckStatus, HealthDocumentStatus, LicenseStatus,
    RegistrationMethod, RegistrationStatus, ScheduleType, UserRole,
};
use drivewise_models::health_checks::{
    CreateHealthCheckDocumentDto, CreateHealthCheckScheduleDto, HealthCheckDocument,
    HealthCheckDocumentList, HealthCheckSchedule, HealthCheckScheduleList,
    UpdateHealthCheckDocumentDto, UpdateHealthCheckScheduleDto,
};
use drivewise_models::instructors::{
    CreateInstructorDto, Instructor, InstructorList, InstructorUser, InstructorWithUser,
};
use drivewise_models::license_types::{
    CreateLicenseTypeDto, LicenseType, LicenseTypeList, UpdateLicenseTypeDto,
};
use drivewise_models::licenses::{CreateLicenseDto, License, LicenseList, UpdateLicenseDto};
use drivewise_models::payments::{
    CreatePaymentDto, CreatePaymentMethodDto, Payment, PaymentList, PaymentMethod,
    PaymentMethodList, UpdatePaymentMethodDto,
};
use drivewise_models::personal_info::{
    CreatePersonalInfoDocumentDto, PersonalInfoDocument, UpdatePersonalInfoDocumentDto,
};
use drivewise_models::registrations::{
    ChooseData, ChosenCourse, ChosenHealthCheck, CourseRegistration, CreateCourseRegistrationDto,
    LicenseTypeLabel, PersonalData, PersonalImgData, RegisteredCourse, RegisteredStudent,
    RegistrationAck, RegistrationDetail, RegistrationList, RegistrationListItem, ScheduleInfo,
    StatusAck, StudentInfo, UpdateCourseRegistrationDto,
};
use drivewise_models::schedules::{
    CourseRef, CreateScheduleDto, InstructorRef, ScheduleDetail, ScheduleList, ScheduleListItem,
    UpdateScheduleDto,
};
use drivewise_models::students::{
    CreateStudentDto, RosterEntry, RosterList, Student, UpdateScoresDto,
};
use drivewise_models::users::{CreateUserDto, LoginRequest, LoginResponse, User};

/// Body of every 4xx/5xx response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::login,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_user,
        crate::modules::license_types::controller::create_license_type,
        crate::modules::license_types::controller::list_license_types,
        crate::modules::license_types::controller::get_license_type,
        crate::modules::license_types::controller::update_license_type,
        crate::modules::license_types::controller::delete_license_type,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::licenses::controller::create_license,
        crate::modules::licenses::controller::list_licenses,
        crate::modules::licenses::controller::get_license,
        crate::modules::licenses::controller::list_licenses_by_student,
        crate::modules::licenses::controller::list_licenses_by_type,
        crate::modules::licenses::controller::get_license_by_number,
        crate::modules::licenses::controller::update_license,
        crate::modules::licenses::controller::delete_license,
        crate::modules::health_check_schedules::controller::create_health_check_schedule,
        crate::modules::health_check_schedules::controller::list_health_check_schedules,
        crate::modules::health_check_schedules::controller::get_health_check_schedule,
        crate::modules::health_check_schedules::controller::update_health_check_schedule,
        crate::modules::health_check_schedules::controller::delete_health_check_schedule,
        crate::modules::health_check_documents::controller::create_health_check_document,
        crate::modules::health_check_documents::controller::list_health_check_documents,
        crate::modules::health_check_documents::controller::get_health_check_document,
        crate::modules::health_check_documents::controller::update_health_check_document,
        crate::modules::health_check_documents::controller::delete_health_check_document,
        crate::modules::personal_info_documents::controller::create_personal_info_document,
        crate::modules::personal_info_documents::controller::get_personal_info_for_user,
        crate::modules::personal_info_documents::controller::get_personal_info_document,
        crate::modules::personal_info_documents::controller::update_personal_info_document,
        crate::modules::course_registrations::controller::create_course_registration,
        crate::modules::course_registrations::controller::list_course_registrations,
        crate::modules::course_registrations::controller::get_registration_by_identity_number,
        crate::modules::course_registrations::controller::get_course_registration,
        crate::modules::course_registrations::controller::update_course_registration,
        crate::modules::course_registrations::controller::delete_course_registration,
        crate::modules::payment_methods::controller::create_payment_method,
        crate::modules::payment_methods::controller::list_payment_methods,
        crate::modules::payment_methods::controller::get_payment_method,
        crate::modules::payment_methods::controller::update_payment_method,
        crate::modules::payments::controller::create_payment,
        crate::modules::payments::controller::list_payments,
        crate::modules::payments::controller::get_payment,
        crate::modules::schedules::controller::list_schedules,
        crate::modules::schedules::controller::get_schedule,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::update_schedule,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::instructors::controller::list_instructors,
        crate::modules::instructors::controller::create_instructor,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_registered_students,
        crate::modules::students::controller::update_scores,
        crate::modules::students::controller::get_student,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationParams,
            UserRole,
            CourseStatus,
            HealthCheckStatus,
            HealthDocumentStatus,
            RegistrationMethod,
            RegistrationStatus,
            ScheduleType,
            ExamType,
            LicenseStatus,
            User,
            CreateUserDto,
            LoginRequest,
            LoginResponse,
            LicenseType,
            CreateLicenseTypeDto,
            UpdateLicenseTypeDto,
            LicenseTypeList,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            CourseList,
            License,
            CreateLicenseDto,
            UpdateLicenseDto,
            LicenseList,
            HealthCheckSchedule,
            CreateHealthCheckScheduleDto,
            UpdateHealthCheckScheduleDto,
            HealthCheckScheduleList,
            HealthCheckDocument,
            CreateHealthCheckDocumentDto,
            UpdateHealthCheckDocumentDto,
            HealthCheckDocumentList,
            PersonalInfoDocument,
            CreatePersonalInfoDocumentDto,
            UpdatePersonalInfoDocumentDto,
            CourseRegistration,
            CreateCourseRegistrationDto,
            UpdateCourseRegistrationDto,
            RegistrationAck,
            StatusAck,
            RegistrationDetail,
            RegisteredStudent,
            RegisteredCourse,
            RegistrationList,
            RegistrationListItem,
            StudentInfo,
            PersonalData,
            PersonalImgData,
            ChooseData,
            ChosenCourse,
            ChosenHealthCheck,
            ScheduleInfo,
            LicenseTypeLabel,
            PaymentMethod,
            CreatePaymentMethodDto,
            UpdatePaymentMethodDto,
            PaymentMethodList,
            Payment,
            CreatePaymentDto,
            PaymentList,
            ScheduleDetail,
            ScheduleListItem,
            ScheduleList,
            CreateScheduleDto,
            UpdateScheduleDto,
            CourseRef,
            InstructorRef,
            Instructor,
            InstructorWithUser,
            InstructorUser,
            InstructorList,
            CreateInstructorDto,
            Student,
            CreateStudentDto,
            UpdateScoresDto,
            RosterEntry,
            RosterList,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Accounts and login"),
        (name = "License Types", description = "License classes and their requirements"),
        (name = "Courses", description = "Training courses"),
        (name = "Licenses", description = "Issued driving licenses"),
        (name = "Health Checks", description = "Health check slots and attendance documents"),
        (name = "Personal Info", description = "Identity and biographic documents"),
        (name = "Course Registrations", description = "Enrolment workflow and registration review"),
        (name = "Payments", description = "Payment methods and payments"),
        (name = "Schedules", description = "Lesson and exam timetable"),
        (name = "Instructors", description = "Driving instructors"),
        (name = "Students", description = "Students, rosters and exam scores")
    ),
    info(
        title = "Drivewise API",
        version = "0.1.0",
        description = "Administrative backend for a driving school, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
