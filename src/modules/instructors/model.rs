pub use drivewise_models::instructors::{
    CreateInstructorDto, Instructor, InstructorList, InstructorRow, InstructorWithUser,
};
