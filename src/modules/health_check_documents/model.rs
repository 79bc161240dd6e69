pub use drivewise_models::health_checks::{
    CreateHealthCheckDocumentDto, HealthCheckDocument, HealthCheckDocumentFilterParams,
    HealthCheckDocumentList, UpdateHealthCheckDocumentDto,
};
