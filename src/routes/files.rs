use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::services::FileService;
use crate::utils::SafeFileToken;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn upload_file(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    FILE_SERVICE.upload(&req, payload).await
}

pub async fn download_file(req: HttpRequest, token: SafeFileToken) -> ActixResult<HttpResponse> {
    FILE_SERVICE.download(&req, token.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/files")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .route(web::post().to(upload_file))
                    .wrap(RateLimit::file_upload()),
            )
            .route("/{token}/download", web::get().to(download_file)),
    );
}
