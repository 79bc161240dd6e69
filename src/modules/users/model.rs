pub use drivewise_models::users::*;
