//! 路径参数安全提取器
//!
//! 将路径片段解析为强类型值，解析失败时直接返回统一的 400 响应，
//! 避免在每个 handler 里重复校验。

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> Error {
    InternalError::from_response(
        "parameter error",
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 正整数 ID 路径参数（`/{id}`）
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        let result = match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SafeIDI64(id)),
            _ => Err(bad_request("Invalid id in path")),
        };
        ready(result)
    }
}

/// 教室加入码路径参数（`/{code}`），只接受大写字母与数字
pub struct SafeClassroomCode(pub String);

impl FromRequest for SafeClassroomCode {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("code").unwrap_or_default();
        let valid = !raw.is_empty()
            && raw.len() <= 16
            && raw
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        let result = if valid {
            Ok(SafeClassroomCode(raw.to_string()))
        } else {
            Err(bad_request("Invalid classroom code in path"))
        };
        ready(result)
    }
}

/// 文件下载 token 路径参数（`/{token}`），UUID 格式
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("token").unwrap_or_default();
        let result = match uuid::Uuid::parse_str(raw) {
            Ok(_) => Ok(SafeFileToken(raw.to_string())),
            Err(_) => Err(bad_request("Invalid file token in path")),
        };
        ready(result)
    }
}
