pub use drivewise_models::licenses::*;
