pub mod admin;

pub mod assignments;

pub mod auth;

pub mod classrooms;

pub mod exams;

pub mod files;

pub mod student;

pub mod teacher;

pub use admin::configure_admin_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use classrooms::configure_classroom_routes;
pub use exams::configure_exam_routes;
pub use files::configure_file_routes;
pub use student::configure_student_routes;
pub use teacher::configure_teacher_routes;
