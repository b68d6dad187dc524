pub use course::Course;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use exam::Exam;
pub use student::Student;
pub use submission::ExamSubmission;

mod course;
mod enrollment;
mod exam;
mod student;
mod submission;
