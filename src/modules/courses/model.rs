pub use drivewise_models::courses::*;
