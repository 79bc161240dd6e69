pub use drivewise_models::schedules::{
    CreateScheduleDto, Schedule, ScheduleDetail, ScheduleDetailRow, ScheduleList,
    ScheduleListItem, ScheduleWindowQuery, UpdateScheduleDto, check_schedule_times,
};
