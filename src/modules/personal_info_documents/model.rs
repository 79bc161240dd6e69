pub use drivewise_models::personal_info::{
    CreatePersonalInfoDocumentDto, PersonalInfoDocument, UpdatePersonalInfoDocumentDto,
};
