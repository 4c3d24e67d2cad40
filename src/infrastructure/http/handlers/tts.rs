//! TTS Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::dto::TtsRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const GENERATION_TIME_HEADER: HeaderName = HeaderName::from_static("x-generation-time");
const TEXT_LENGTH_HEADER: HeaderName = HeaderName::from_static("x-text-length");

/// 文本转语音，返回 WAV 字节
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    let command = SynthesizeSpeech {
        params: req.params(),
        text: req.text,
        speaker_id: req.speaker_id,
        language: req.language,
    };

    let result = state.synthesize_handler.handle(command).await?;

    let headers = [
        (header::CONTENT_TYPE, "audio/wav".to_string()),
        (
            GENERATION_TIME_HEADER,
            format!("{:.3}", result.generation_time.as_secs_f64()),
        ),
        (TEXT_LENGTH_HEADER, result.text_length.to_string()),
    ];

    Ok((StatusCode::OK, headers, result.audio.wav_data).into_response())
}
