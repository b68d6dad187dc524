pub mod completion;
pub mod course;
pub mod enrollment;
pub mod exam;
