use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::File;

// 上传响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    pub file: File,
    pub url: String,
}
