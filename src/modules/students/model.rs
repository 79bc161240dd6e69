pub use drivewise_models::students::{
    CreateStudentDto, RosterEntry, RosterList, RosterQuery, Student, UpdateScoresDto,
};
