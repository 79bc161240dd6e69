pub use drivewise_models::license_types::*;
