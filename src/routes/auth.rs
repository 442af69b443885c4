use crate::core::{AuthAction, AuthOutcome, CredentialFlow};
use crate::models::{Credentials, CredentialsRequest, ErrorResponse, LoginResponse, SignupResponse};
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Configure credential routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/login", web::post().to(login))
        .route("/auth/signup", web::post().to(signup));
}

/// Login endpoint
///
/// POST /api/v1/auth/login
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "password": "string"
/// }
/// ```
async fn login(state: web::Data<AppState>, req: web::Json<CredentialsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let flow = flow_for(&state, &req.email).await;
    let outcome = flow
        .submit(
            AuthAction::SignIn,
            Credentials::new(req.email.clone(), req.password.clone()),
        )
        .await;
    release_settled(&state, &req.email, &flow).await;

    match outcome {
        AuthOutcome::SignedIn { session, redirect } => HttpResponse::Ok().json(LoginResponse {
            session,
            redirect: redirect.to_string(),
        }),
        AuthOutcome::Failed { message } => HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Sign-in failed".to_string(),
            message,
            status_code: 401,
        }),
        AuthOutcome::InFlight => in_flight_response(),
        // submit(SignIn, ..) never produces a signup outcome.
        AuthOutcome::SignupComplete { .. } => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Unexpected outcome".to_string(),
            message: "Sign-in produced a signup result".to_string(),
            status_code: 500,
        }),
    }
}

/// Signup endpoint
///
/// POST /api/v1/auth/signup
///
/// On success the user is not signed in; they log in separately.
async fn signup(state: web::Data<AppState>, req: web::Json<CredentialsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let flow = flow_for(&state, &req.email).await;
    let outcome = flow
        .submit(
            AuthAction::SignUp,
            Credentials::new(req.email.clone(), req.password.clone()),
        )
        .await;
    release_settled(&state, &req.email, &flow).await;

    match outcome {
        AuthOutcome::SignupComplete { message } => HttpResponse::Ok().json(SignupResponse {
            message: message.to_string(),
        }),
        AuthOutcome::Failed { message } => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Sign-up failed".to_string(),
            message,
            status_code: 400,
        }),
        AuthOutcome::InFlight => in_flight_response(),
        // submit(SignUp, ..) never produces a sign-in outcome.
        AuthOutcome::SignedIn { .. } => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Unexpected outcome".to_string(),
            message: "Sign-up produced a sign-in result".to_string(),
            status_code: 500,
        }),
    }
}

fn in_flight_response() -> HttpResponse {
    HttpResponse::Conflict().json(ErrorResponse {
        error: "Request in flight".to_string(),
        message: "A submission for this account is already in progress".to_string(),
        status_code: 409,
    })
}

/// Get or create the credential flow for an email.
async fn flow_for(state: &AppState, email: &str) -> Arc<CredentialFlow> {
    let mut flows = state.credential_flows.lock().await;
    flows
        .entry(email.to_string())
        .or_insert_with(|| Arc::new(CredentialFlow::new(state.identity.clone())))
        .clone()
}

/// Drop the flow entry once it has settled so the map only holds in-flight
/// submissions.
async fn release_settled(state: &AppState, email: &str, flow: &Arc<CredentialFlow>) {
    if !flow.in_flight() {
        let mut flows = state.credential_flows.lock().await;
        if let Some(current) = flows.get(email) {
            if Arc::ptr_eq(current, flow) {
                flows.remove(email);
            }
        }
    }
}
