/*!
 * 学习计划启发式算法
 *
 * 纯函数实现，不依赖存储层：
 *
 * - `dates`：从自由文本中提取考试日期
 * - `builder`：生成话题轮换计划与按科目难度加权的计划
 *
 * 服务层（exams / study_plans）负责取数、鉴权与落库。
 */

pub mod builder;
pub mod dates;

pub use builder::{
    PlanOptions, build_student_plan, build_topic_plan, build_weighted_plan, student_topic_rotation,
    topic_pool,
};
pub use dates::extract_exam_date;
