//! 请求参数反序列化错误的统一处理
//!
//! 把 actix 默认的纯文本 400 替换为标准 ApiResponse 包装。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid JSON payload: {err}");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message)),
    )
    .into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid query parameters: {err}");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message)),
    )
    .into()
}
