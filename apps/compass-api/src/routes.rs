use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use compass_service::{
	Error as ServiceError, MatchDecisionRequest, MatchResponse, MenteeProfileUpsert,
	MentorDirectoryResponse, MentorProfileUpsert, MentorRequest, ProfileUpsertResponse,
	RecommendationRequest, RecommendationResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/recommendations", post(recommendations))
		.route("/v1/matches/request", post(request_mentor))
		.route("/v1/matches/respond", post(respond_to_match))
		.route("/v1/profiles/mentee", post(upsert_mentee_profile))
		.route("/v1/profiles/mentor", post(upsert_mentor_profile))
		.route("/v1/mentors", get(list_mentors))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn recommendations(
	State(state): State<AppState>,
	Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
	let response = state.service.recommend_mentors(payload).await?;

	Ok(Json(response))
}

async fn request_mentor(
	State(state): State<AppState>,
	Json(payload): Json<MentorRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
	let response = state.service.request_mentor(payload).await?;

	Ok(Json(response))
}

async fn respond_to_match(
	State(state): State<AppState>,
	Json(payload): Json<MatchDecisionRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
	let response = state.service.respond_to_match(payload).await?;

	Ok(Json(response))
}

async fn upsert_mentee_profile(
	State(state): State<AppState>,
	Json(payload): Json<MenteeProfileUpsert>,
) -> Result<Json<ProfileUpsertResponse>, ApiError> {
	let response = state.service.upsert_mentee_profile(payload).await?;

	Ok(Json(response))
}

async fn upsert_mentor_profile(
	State(state): State<AppState>,
	Json(payload): Json<MentorProfileUpsert>,
) -> Result<Json<ProfileUpsertResponse>, ApiError> {
	let response = state.service.upsert_mentor_profile(payload).await?;

	Ok(Json(response))
}

async fn list_mentors(
	State(state): State<AppState>,
) -> Result<Json<MentorDirectoryResponse>, ApiError> {
	let response = state.service.list_active_mentors().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => {
				(StatusCode::UNPROCESSABLE_ENTITY, "invalid_request")
			},
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
			ServiceError::Storage { .. } => (StatusCode::SERVICE_UNAVAILABLE, "storage_error"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
