pub use drivewise_models::payments::{CreatePaymentDto, Payment, PaymentFilterParams, PaymentList};
