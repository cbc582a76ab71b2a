use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 上传文件元数据
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    pub id: i64,
    /// 下载用唯一 token
    pub token: String,
    pub file_name: String,
    pub size: i64,
    pub mime_type: String,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 附件引用，作为 JSON 数组嵌入在作业/提交/考试记录中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileRef {
    pub file_name: String,
    pub url: String,
}
