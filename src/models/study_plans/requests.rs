use serde::Deserialize;
use ts_rs::TS;

// 班级级计划生成请求（教师）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct GenerateClassPlanRequest {
    pub exam_id: i64,
    #[serde(default = "default_sessions_per_day")]
    pub sessions_per_day: u32,
}

fn default_sessions_per_day() -> u32 {
    2
}

// 个人计划生成请求（学生）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct GenerateStudentPlanRequest {
    /// 缺省时取最近一场未来考试
    pub exam_id: Option<i64>,
    /// 每日学习时长（分钟），缺省 60
    pub preferred_daily_minutes: Option<u32>,
}

// 按科目权重的个人计划生成请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct GenerateWeightedPlanRequest {
    pub exam_id: Option<i64>,
    pub subjects: Vec<WeightedSubject>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct WeightedSubject {
    pub name: String,
    /// "hard" | "medium" | "easy"
    pub difficulty: String,
}
