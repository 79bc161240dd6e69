pub use drivewise_models::registrations::{
    CourseRegistration, CourseScheduleRow, CreateCourseRegistrationDto, RegistrationAck,
    RegistrationDetail, RegistrationDetailRow, RegistrationFilterParams, RegistrationList,
    RegistrationListItem, RegistrationListRow, StatusAck, UpdateCourseRegistrationDto,
};
