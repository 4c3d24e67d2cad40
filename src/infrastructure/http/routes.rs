//! HTTP Routes
//!
//! API Endpoints:
//! - /health              GET     服务与模型状态
//! - /voices              GET     列出内置与克隆音色
//! - /voices/:voice_id    DELETE  删除克隆音色
//! - /tts                 POST    文本转语音，返回 WAV
//! - /clone               POST    上传参考音频克隆音色（multipart）

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tts", post(handlers::text_to_speech))
        .merge(voice_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voices", get(handlers::list_voices))
        .route("/voices/:voice_id", delete(handlers::delete_voice))
        .route("/clone", post(handlers::clone_voice))
}
