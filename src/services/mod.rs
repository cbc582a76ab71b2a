pub mod activities;
pub mod admin;
pub mod assignments;
pub mod auth;
pub mod classrooms;
pub mod exams;
pub mod files;
pub mod notifications;
pub mod planner;
pub mod study_plans;
pub mod users;

pub use activities::ActivityService;
pub use admin::AdminService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use classrooms::ClassroomService;
pub use exams::ExamService;
pub use files::FileService;
pub use notifications::NotificationService;
pub use study_plans::StudyPlanService;
pub use users::UserService;
