pub use drivewise_models::health_checks::{
    CreateHealthCheckScheduleDto, HealthCheckSchedule, HealthCheckScheduleFilterParams,
    HealthCheckScheduleList, UpdateHealthCheckScheduleDto,
};
