/*!
 * 学习计划编排
 *
 * 两种生成模式：
 *
 * - 话题轮换：话题池（考试标题 + 科目 + 大纲文件名）按日轮流分配，
 *   每天 `sessions_per_day` 场，起始时间 18:00 起按 1.5 小时递推
 * - 科目加权：按 hard/medium/easy 难度给科目分配天数配额
 *   （55% / 30% / 剩余），空档次向相邻档次借用
 *
 * 所有函数均为纯函数，日期参数由调用方传入。
 */

use chrono::{Duration, NaiveDate};

use crate::models::files::entities::FileRef;
use crate::models::study_plans::entities::StudySession;
use crate::models::study_plans::requests::WeightedSubject;

/// 话题池最多收录的大纲文件数
const MAX_SYLLABUS_TOPICS: usize = 10;

/// 话题池为空时的兜底话题
const FALLBACK_TOPIC: &str = "General review";

/// 每日首场开始小时
const BASE_HOUR: u32 = 18;

/// 学生个人计划的基础话题轮换
const STUDENT_BASE_TOPICS: [&str; 4] = [
    "Review notes",
    "Practice problems",
    "Summarize key concepts",
    "Mock test",
];

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub sessions_per_day: u32,
    pub duration_minutes: u32,
    pub days: i64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            sessions_per_day: 2,
            duration_minutes: 60,
            days: 14,
        }
    }
}

/// 由考试信息拼出话题池：标题、科目、至多 10 个大纲文件名。
/// 全部为空时退化为单话题 "General review"。
pub fn topic_pool(title: &str, subject: Option<&str>, syllabus: &[FileRef]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    if !title.trim().is_empty() {
        topics.push(title.trim().to_string());
    }
    if let Some(subject) = subject
        && !subject.trim().is_empty()
    {
        topics.push(subject.trim().to_string());
    }
    for file in syllabus.iter().take(MAX_SYLLABUS_TOPICS) {
        if !file.file_name.trim().is_empty() {
            topics.push(file.file_name.trim().to_string());
        }
    }
    if topics.is_empty() {
        topics.push(FALLBACK_TOPIC.to_string());
    }
    topics
}

fn session_time(slot: u32) -> String {
    let hour = BASE_HOUR + (slot as f64 * 1.5).floor() as u32;
    format!("{:02}:00", hour.min(23))
}

/// 话题轮换计划：`days` 天、每天 `sessions_per_day` 场，
/// 最后一天落在 `end`（考试日）。
pub fn build_topic_plan(
    topics: &[String],
    end: NaiveDate,
    options: &PlanOptions,
) -> Vec<StudySession> {
    let days = options.days.max(1);
    let sessions_per_day = options.sessions_per_day.max(1);
    let pool: Vec<String> = if topics.is_empty() {
        vec![FALLBACK_TOPIC.to_string()]
    } else {
        topics.to_vec()
    };

    let start = end - Duration::days(days - 1);
    let mut schedule = Vec::with_capacity((days as usize) * (sessions_per_day as usize));
    for day in 0..days {
        let date = start + Duration::days(day);
        for slot in 0..sessions_per_day {
            let index = (day as usize * sessions_per_day as usize + slot as usize) % pool.len();
            schedule.push(StudySession {
                date: date.format("%Y-%m-%d").to_string(),
                time: session_time(slot),
                topic: pool[index].clone(),
                duration_minutes: options.duration_minutes,
            });
        }
    }
    schedule
}

/// 学生个人计划：从 `start`（今天）起每天一场，18:00 开始。
pub fn build_student_plan(
    topics: &[String],
    start: NaiveDate,
    days: i64,
    duration_minutes: u32,
) -> Vec<StudySession> {
    let days = days.max(1);
    let pool: Vec<String> = if topics.is_empty() {
        vec![FALLBACK_TOPIC.to_string()]
    } else {
        topics.to_vec()
    };

    (0..days)
        .map(|day| StudySession {
            date: (start + Duration::days(day)).format("%Y-%m-%d").to_string(),
            time: session_time(0),
            topic: pool[day as usize % pool.len()].clone(),
            duration_minutes,
        })
        .collect()
}

/// 学生计划的话题轮换表：4 个基础话题，
/// 扩展到 `max(4, min(days, 14))` 个，超出一轮后加轮次后缀。
pub fn student_topic_rotation(days: i64) -> Vec<String> {
    let count = days.clamp(4, 14) as usize;
    (0..count)
        .map(|i| {
            let base = STUDENT_BASE_TOPICS[i % STUDENT_BASE_TOPICS.len()];
            let round = i / STUDENT_BASE_TOPICS.len();
            if round == 0 {
                base.to_string()
            } else {
                format!("{} (round {})", base, round + 1)
            }
        })
        .collect()
}

fn tier_names(subjects: &[WeightedSubject], difficulty: &str) -> Vec<String> {
    subjects
        .iter()
        .filter(|s| s.difficulty.eq_ignore_ascii_case(difficulty))
        .map(|s| s.name.clone())
        .collect()
}

/// 空档次的借用顺序：hard→medium→easy、medium→easy→hard、easy→medium→hard。
fn tier_or_borrow(primary: Vec<String>, first: &[String], second: &[String]) -> Vec<String> {
    if !primary.is_empty() {
        primary
    } else if !first.is_empty() {
        first.to_vec()
    } else {
        second.to_vec()
    }
}

/// 科目加权计划：难度高的科目占更多天数，每天一场 18:00。
///
/// 配额：`n_hard = ceil(days × 0.55)`，`n_medium = ceil(days × 0.30)`，
/// `n_easy = days − n_hard − n_medium`（不小于 0）。
pub fn build_weighted_plan(
    subjects: &[WeightedSubject],
    end: NaiveDate,
    options: &PlanOptions,
) -> Vec<StudySession> {
    let days = options.days.max(1);

    let hard = tier_names(subjects, "hard");
    let medium = tier_names(subjects, "medium");
    let easy = tier_names(subjects, "easy");

    let all_names: Vec<String> = subjects.iter().map(|s| s.name.clone()).collect();
    if all_names.is_empty() {
        return build_student_plan(
            &[FALLBACK_TOPIC.to_string()],
            end - Duration::days(days - 1),
            days,
            options.duration_minutes,
        );
    }

    let hard_pool = tier_or_borrow(hard.clone(), &medium, &easy);
    let medium_pool = tier_or_borrow(medium.clone(), &easy, &hard);
    let easy_pool = tier_or_borrow(easy, &medium, &hard);

    let n_hard = (days as f64 * 0.55).ceil() as i64;
    let n_medium = ((days as f64 * 0.30).ceil() as i64).min(days - n_hard);
    let n_easy = (days - n_hard - n_medium).max(0);

    let mut day_topics: Vec<String> = Vec::with_capacity(days as usize);
    for i in 0..n_hard {
        day_topics.push(hard_pool[i as usize % hard_pool.len()].clone());
    }
    for i in 0..n_medium {
        day_topics.push(medium_pool[i as usize % medium_pool.len()].clone());
    }
    for i in 0..n_easy {
        day_topics.push(easy_pool[i as usize % easy_pool.len()].clone());
    }
    // 配额凑不满天数时用全部科目轮换补齐
    let mut pad = 0usize;
    while (day_topics.len() as i64) < days {
        day_topics.push(all_names[pad % all_names.len()].clone());
        pad += 1;
    }

    let start = end - Duration::days(days - 1);
    day_topics
        .into_iter()
        .enumerate()
        .map(|(day, topic)| StudySession {
            date: (start + Duration::days(day as i64))
                .format("%Y-%m-%d")
                .to_string(),
            time: session_time(0),
            topic,
            duration_minutes: options.duration_minutes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, difficulty: &str) -> WeightedSubject {
        WeightedSubject {
            name: name.to_string(),
            difficulty: difficulty.to_string(),
        }
    }

    fn exam_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[test]
    fn test_topic_plan_has_days_times_sessions() {
        let topics = vec!["Algebra".to_string(), "Geometry".to_string()];
        let plan = build_topic_plan(&topics, exam_day(), &PlanOptions::default());
        assert_eq!(plan.len(), 28);
    }

    #[test]
    fn test_topic_plan_chronological_and_ends_at_exam() {
        let topics = vec!["Algebra".to_string()];
        let plan = build_topic_plan(&topics, exam_day(), &PlanOptions::default());

        let mut keys: Vec<(String, String)> = plan
            .iter()
            .map(|s| (s.date.clone(), s.time.clone()))
            .collect();
        let sorted = {
            let mut c = keys.clone();
            c.sort();
            c
        };
        assert_eq!(keys, sorted);

        assert_eq!(plan.first().unwrap().date, "2025-10-21");
        assert_eq!(plan.last().unwrap().date, "2025-11-03");
        keys.dedup();
        assert_eq!(keys.len(), 28);
    }

    #[test]
    fn test_session_hours_step_by_ninety_minutes_floored() {
        let options = PlanOptions {
            sessions_per_day: 4,
            days: 1,
            ..Default::default()
        };
        let plan = build_topic_plan(&["X".to_string()], exam_day(), &options);
        let times: Vec<&str> = plan.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["18:00", "19:00", "21:00", "22:00"]);
    }

    #[test]
    fn test_topics_round_robin() {
        let topics = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let options = PlanOptions {
            sessions_per_day: 2,
            days: 3,
            ..Default::default()
        };
        let plan = build_topic_plan(&topics, exam_day(), &options);
        let seen: Vec<&str> = plan.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(seen, vec!["A", "B", "C", "A", "B", "C"]);
    }

    #[test]
    fn test_empty_topic_pool_falls_back_to_general_review() {
        let pool = topic_pool("  ", None, &[]);
        assert_eq!(pool, vec!["General review".to_string()]);
    }

    #[test]
    fn test_topic_pool_caps_syllabus_at_ten() {
        let syllabus: Vec<FileRef> = (0..15)
            .map(|i| FileRef {
                file_name: format!("chapter-{i}.pdf"),
                url: format!("/files/{i}"),
            })
            .collect();
        let pool = topic_pool("Final", Some("Math"), &syllabus);
        // 标题 + 科目 + 10 个文件名
        assert_eq!(pool.len(), 12);
    }

    #[test]
    fn test_weighted_quotas_with_borrowing() {
        // 3 hard + 1 easy，无 medium：medium 配额向 easy 借用
        let subjects = vec![
            subject("Calculus", "hard"),
            subject("Physics", "hard"),
            subject("Chemistry", "hard"),
            subject("History", "easy"),
        ];
        let plan = build_weighted_plan(&subjects, exam_day(), &PlanOptions::default());
        assert_eq!(plan.len(), 14);

        let hard_days = plan
            .iter()
            .filter(|s| ["Calculus", "Physics", "Chemistry"].contains(&s.topic.as_str()))
            .count();
        let easy_days = plan.iter().filter(|s| s.topic == "History").count();
        assert_eq!(hard_days, 8);
        assert_eq!(easy_days, 6);
    }

    #[test]
    fn test_weighted_plan_ends_at_exam() {
        let subjects = vec![subject("Biology", "medium")];
        let plan = build_weighted_plan(&subjects, exam_day(), &PlanOptions::default());
        assert_eq!(plan.last().unwrap().date, "2025-11-03");
        assert_eq!(plan.first().unwrap().date, "2025-10-21");
    }

    #[test]
    fn test_weighted_single_subject_fills_all_days() {
        let subjects = vec![subject("Biology", "medium")];
        let plan = build_weighted_plan(&subjects, exam_day(), &PlanOptions::default());
        assert_eq!(plan.len(), 14);
        assert!(plan.iter().all(|s| s.topic == "Biology"));
    }

    #[test]
    fn test_weighted_days_clamped_to_one() {
        let subjects = vec![subject("Biology", "easy")];
        let options = PlanOptions {
            days: 0,
            ..Default::default()
        };
        let plan = build_weighted_plan(&subjects, exam_day(), &options);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_student_rotation_minimum_four_topics() {
        let topics = student_topic_rotation(2);
        assert_eq!(topics.len(), 4);
        assert_eq!(topics[0], "Review notes");
    }

    #[test]
    fn test_student_rotation_capped_at_fourteen_with_round_suffix() {
        let topics = student_topic_rotation(30);
        assert_eq!(topics.len(), 14);
        assert_eq!(topics[4], "Review notes (round 2)");
        assert_eq!(topics[13], "Practice problems (round 4)");
    }

    #[test]
    fn test_student_plan_one_session_per_day_from_start() {
        let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let plan = build_student_plan(&student_topic_rotation(5), start, 5, 45);
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[0].date, "2025-10-01");
        assert_eq!(plan[4].date, "2025-10-05");
        assert!(plan.iter().all(|s| s.time == "18:00"));
        assert!(plan.iter().all(|s| s.duration_minutes == 45));
    }
}
