use crate::core::{ProfileOutcome, LOGIN_REQUIRED_MESSAGE};
use crate::models::{
    CreateProfileRequest, ErrorResponse, ProfileCreatedResponse, ProfileDraft,
};
use crate::routes::AppState;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::post().to(create_profile));
}

/// Profile creation endpoint
///
/// POST /api/v1/profiles
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "age": 30,
///   "bio": "string",
///   "values": ["kind", "calm"],
///   "isForSomeoneElse": false,
///   "role": "single"
/// }
/// ```
///
/// The session token travels in the Authorization header; its absence is the
/// missing-session case, answered with 401 and no write.
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<CreateProfileRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let token = bearer_token(&http_req);

    let draft = ProfileDraft {
        name: req.name.clone(),
        age: Some(req.age),
        bio: req.bio.clone(),
        values: req.values.iter().copied().collect(),
        is_for_someone_else: req.is_for_someone_else,
        role: req.role,
    };

    match state.profile_flow.submit(token.as_deref(), draft).await {
        ProfileOutcome::Succeeded { user_id, redirect } => {
            HttpResponse::Created().json(ProfileCreatedResponse {
                user_id,
                redirect: redirect.to_string(),
            })
        }
        ProfileOutcome::Rejected { message } if message == LOGIN_REQUIRED_MESSAGE => {
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Not logged in".to_string(),
                message,
                status_code: 401,
            })
        }
        ProfileOutcome::Rejected { message } => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message,
            status_code: 400,
        }),
        ProfileOutcome::Failed { message, .. } => HttpResponse::BadGateway().json(ErrorResponse {
            error: "Profile creation failed".to_string(),
            message,
            status_code: 502,
        }),
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
