//! Voice HTTP Handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{ApplicationError, CloneVoice, DeleteVoice, ListVoices};
use crate::domain::voice::SampleFormat;
use crate::infrastructure::http::dto::{
    CloneVoiceResponse, DeleteVoiceResponse, VoiceItem, VoiceListResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取音色列表
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoiceListResponse> {
    let voices = state
        .list_voices_handler
        .handle(ListVoices)
        .await
        .into_iter()
        .map(VoiceItem::from)
        .collect();

    Json(VoiceListResponse { voices })
}

/// 上传参考音频克隆音色
///
/// multipart 字段：`audio`（或 `file`）为音频文件，`name` 为音色名称
pub async fn clone_voice(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<CloneVoiceResponse>, ApiError> {
    let mut name: Option<String> = None;
    let mut audio_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => {
                name = Some(field.text().await?);
            }
            "audio" | "file" => {
                // 有文件名时校验扩展名，无文件名时交给引擎判断
                let ext = field
                    .file_name()
                    .map(std::path::Path::new)
                    .and_then(|p| p.extension())
                    .and_then(|e| e.to_str())
                    .map(str::to_string);
                if let Some(ext) = ext {
                    if SampleFormat::from_extension(&ext).is_none() {
                        return Err(ApiError::BadRequest(
                            "Only WAV, MP3, FLAC, OGG audio files are allowed".to_string(),
                        ));
                    }
                }

                audio_data = Some(field.bytes().await?.to_vec());
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ApiError::BadRequest("Name is required".to_string()))?;
    let audio =
        audio_data.ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))?;

    let voice = state
        .clone_voice_handler
        .handle(CloneVoice { name, audio })
        .await?;

    let speaker_id = voice.id().to_string();
    Ok(Json(CloneVoiceResponse {
        success: true,
        message: format!("Voice '{}' cloned successfully", speaker_id),
        speaker_id,
    }))
}

/// 删除克隆音色
pub async fn delete_voice(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<DeleteVoiceResponse>, ApiError> {
    let voice = state
        .delete_voice_handler
        .handle(DeleteVoice { voice_id })
        .await
        .map_err(|e| match e {
            ApplicationError::VoiceNotFound(_) => ApiError::NotFound("Voice not found".to_string()),
            ApplicationError::BuiltinProtected(_) => {
                ApiError::BadRequest("Cannot delete built-in voice".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(DeleteVoiceResponse {
        success: true,
        message: format!("Voice '{}' deleted", voice.id()),
    }))
}
