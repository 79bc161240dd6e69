pub use drivewise_models::payments::{
    CreatePaymentMethodDto, PaymentMethod, PaymentMethodList, UpdatePaymentMethodDto,
};
