#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod artifact;
mod error;
pub mod language;
pub mod model;
mod normalizer;
mod request;
mod server;
mod types;
mod validation;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::{HeaderValue, header};
use indexmap::IndexMap;
use tokio_util::io::ReaderStream;
use tracing::Instrument;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

pub use artifact::{Artifact, ArtifactStore, AudioFile};
pub use error::{Result, TtsError};
pub use normalizer::normalize;
pub use request::{REQUEST_ID_HEADER, RequestContext};
pub use server::{Server, TtsServerBuilder};
pub use types::{Endpoint, LanguageList, ModelInfo, ServiceBanner, SynthesisRequest, SynthesisResult};
pub use validation::{ACCENT_COUNT, STYLE_COUNT, ValidatedRequest};
use error::ErrorResponse;
use language::LANGUAGES;
use request::ExtractPayload;

/// Reported service version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the TTS server from configuration
pub fn build_server(config: &voicetech_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// OpenAPI description of the TTS endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VoiceTech for All - TTS API",
        description = "Multilingual text-to-speech for Indian languages"
    ),
    paths(banner, info, languages, synthesize, get_inference, audio),
    tags(
        (name = "service", description = "Service and model information"),
        (name = "synthesis", description = "Speech synthesis and audio retrieval")
    )
)]
pub struct ApiDoc;

/// Create the endpoint router for TTS
///
/// Includes the OpenAPI document at `/openapi.json` and ReDoc pages at
/// `/docs` and `/redoc`.
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/", get(banner))
        .route("/info", get(info))
        .route("/languages", get(languages))
        .route("/synthesize", post(synthesize))
        .route("/Get_Inference", post(get_inference))
        .route("/audio/{filename}", get(audio))
        .route("/openapi.json", get(openapi))
        .merge(Redoc::with_url("/docs", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Service banner
#[utoipa::path(get, path = "/", tag = "service", responses((status = 200, body = ServiceBanner)))]
async fn banner() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        service: "VoiceTech for All - TTS API",
        status: "running",
        version: VERSION,
        docs: "/docs",
    })
}

/// Model information
#[utoipa::path(get, path = "/info", tag = "service", responses((status = 200, body = ModelInfo)))]
async fn info(State(server): State<Arc<Server>>) -> Json<ModelInfo> {
    Json(ModelInfo {
        name: "MultilingualTTS",
        version: VERSION,
        languages: &LANGUAGES,
        accents: ACCENT_COUNT,
        styles: STYLE_COUNT,
        parameters: server.parameter_count(),
    })
}

/// Supported languages, code to name
#[utoipa::path(get, path = "/languages", tag = "service", responses((status = 200, body = LanguageList)))]
async fn languages() -> Json<LanguageList> {
    let languages: IndexMap<_, _> = LANGUAGES.iter().map(|language| (language.code, language.name)).collect();

    Json(LanguageList {
        count: languages.len(),
        languages,
    })
}

/// Synthesize speech
#[utoipa::path(
    post,
    path = "/synthesize",
    tag = "synthesis",
    request_body = SynthesisRequest,
    responses(
        (status = 200, description = "Speech synthesized", body = SynthesisResult),
        (status = 400, description = "Unsupported language or id out of range", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 503, description = "Model not loaded", body = ErrorResponse),
        (status = 500, description = "Inference or storage failed", body = ErrorResponse)
    )
)]
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(context, request): ExtractPayload<SynthesisRequest>,
) -> Response {
    run_synthesis(&server, context, request, Endpoint::Synthesize).await
}

/// Run inference; same contract as `/synthesize`
#[utoipa::path(
    post,
    path = "/Get_Inference",
    tag = "synthesis",
    request_body = SynthesisRequest,
    responses(
        (status = 200, description = "Inference completed", body = SynthesisResult),
        (status = 400, description = "Unsupported language or id out of range", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 503, description = "Model not loaded", body = ErrorResponse),
        (status = 500, description = "Inference or storage failed", body = ErrorResponse)
    )
)]
async fn get_inference(
    State(server): State<Arc<Server>>,
    ExtractPayload(context, request): ExtractPayload<SynthesisRequest>,
) -> Response {
    run_synthesis(&server, context, request, Endpoint::Inference).await
}

/// Run one synthesis call and tag the response, success or error, with the request id
async fn run_synthesis(
    server: &Server,
    context: RequestContext,
    request: SynthesisRequest,
    endpoint: Endpoint,
) -> Response {
    let span = tracing::info_span!(
        "synthesis",
        request_id = %context.request_id,
        endpoint = endpoint.as_str(),
        language = %request.language,
    );

    let mut response = server
        .synthesize(request, endpoint)
        .instrument(span)
        .await
        .map_or_else(IntoResponse::into_response, |result| Json(result).into_response());

    if let Ok(value) = HeaderValue::from_str(&context.request_id) {
        response.headers_mut().insert(&REQUEST_ID_HEADER, value);
    }

    response
}

/// Download a synthesized WAV file
#[utoipa::path(
    get,
    path = "/audio/{filename}",
    tag = "synthesis",
    params(("filename" = String, Path, description = "File name from `audio_url`")),
    responses(
        (status = 200, description = "WAV audio", content_type = "audio/wav", body = Vec<u8>),
        (status = 404, description = "Audio file not found", body = ErrorResponse)
    )
)]
async fn audio(State(server): State<Arc<Server>>, Path(filename): Path<String>) -> Result<Response> {
    let AudioFile { file, len } = server.open_audio(&filename).await?;

    tracing::debug!(file = %filename, bytes = len, "serving audio artifact");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("audio/wav")),
            (header::CONTENT_LENGTH, HeaderValue::from(len)),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
