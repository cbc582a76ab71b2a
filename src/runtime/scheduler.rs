/*!
 * 后台调度器
 *
 * 固定间隔执行三类扫描：到期解锁作业、截止前 24 小时提醒、
 * 清理过期的吊销令牌。扫描条件本身排除已处理的行，单次失败
 * 留到下个周期重试即可，不做跨行事务。
 */

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::models::activities::entities::ActivityKind;
use crate::models::assignments::entities::Assignment;
use crate::storage::Storage;

/// 截止提醒的提前量
const REMINDER_WINDOW_SECS: i64 = 24 * 60 * 60;

/// 启动调度循环，随服务器生命周期一直运行
pub fn spawn_scheduler(storage: Arc<dyn Storage>) -> tokio::task::JoinHandle<()> {
    let interval_secs = AppConfig::get().scheduler.interval_secs;

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        // 错过的 tick 不补跑
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        info!("Scheduler started with {}s interval", interval_secs);

        loop {
            ticker.tick().await;
            let now = chrono::Utc::now().timestamp();

            unlock_sweep(&storage, now).await;
            reminder_sweep(&storage, now).await;
            purge_revoked_tokens(&storage, now).await;
        }
    })
}

/// 把解锁时刻已到的作业置为可见，并通知名册上的学生
async fn unlock_sweep(storage: &Arc<dyn Storage>, now: i64) {
    let unlocked = match storage.unlock_due_assignments(now).await {
        Ok(list) => list,
        Err(e) => {
            warn!("Unlock sweep failed: {}", e);
            return;
        }
    };

    if unlocked.is_empty() {
        return;
    }
    debug!("Unlock sweep released {} assignment(s)", unlocked.len());

    for assignment in &unlocked {
        if let Err(e) = storage
            .log_activity(
                ActivityKind::AssignmentUnlocked,
                format!("Assignment \"{}\" was unlocked", assignment.title),
                assignment.classroom_id,
                None,
                Some(serde_json::json!({ "assignment_id": assignment.id })),
            )
            .await
        {
            warn!(
                "Failed to log unlock activity for assignment {}: {}",
                assignment.id, e
            );
        }

        let message = format!("Assignment \"{}\" is now available.", assignment.title);
        notify_roster(storage, assignment, &message).await;
    }
}

/// 对 24 小时内截止且尚未提醒的作业发送提醒
async fn reminder_sweep(storage: &Arc<dyn Storage>, now: i64) {
    let due_soon = match storage
        .list_assignments_due_soon(now, REMINDER_WINDOW_SECS)
        .await
    {
        Ok(list) => list,
        Err(e) => {
            warn!("Reminder sweep failed: {}", e);
            return;
        }
    };

    if due_soon.is_empty() {
        return;
    }
    debug!("Reminder sweep found {} assignment(s) due soon", due_soon.len());

    let mut notified = Vec::with_capacity(due_soon.len());
    for assignment in &due_soon {
        let message = match assignment.due_at {
            Some(due) => format!(
                "Assignment \"{}\" is due at {}.",
                assignment.title,
                due.format("%Y-%m-%d %H:%M UTC")
            ),
            None => continue,
        };
        notify_roster(storage, assignment, &message).await;
        notified.push(assignment.id);
    }

    // 通知失败的也标记，下个周期不重发，避免轰炸
    if !notified.is_empty() {
        if let Err(e) = storage.mark_reminders_sent(&notified).await {
            warn!("Failed to mark reminders sent: {}", e);
        }
    }
}

/// 给作业所属教室的全体学生发通知，无教室的作业跳过
async fn notify_roster(storage: &Arc<dyn Storage>, assignment: &Assignment, message: &str) {
    let Some(classroom_id) = assignment.classroom_id else {
        return;
    };

    let roster = match storage.list_roster(classroom_id).await {
        Ok(roster) => roster,
        Err(e) => {
            warn!(
                "Failed to load roster for classroom {}: {}",
                classroom_id, e
            );
            return;
        }
    };
    if roster.is_empty() {
        return;
    }

    let student_ids: Vec<i64> = roster.iter().map(|s| s.id).collect();
    let link = format!("/assignments/{}", assignment.id);
    match storage
        .create_notifications(&student_ids, message, Some(&link))
        .await
    {
        Ok(count) => debug!(
            "Notified {} student(s) about assignment {}",
            count, assignment.id
        ),
        Err(e) => warn!(
            "Failed to notify roster about assignment {}: {}",
            assignment.id, e
        ),
    }
}

/// 吊销令牌过期后即可清除
async fn purge_revoked_tokens(storage: &Arc<dyn Storage>, now: i64) {
    match storage.purge_expired_revoked_tokens(now).await {
        Ok(0) => {}
        Ok(purged) => debug!("Purged {} expired revoked token(s)", purged),
        Err(e) => warn!("Failed to purge revoked tokens: {}", e),
    }
}
