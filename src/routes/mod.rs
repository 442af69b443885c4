// Route exports
pub mod auth;
pub mod profiles;

use crate::core::{CredentialFlow, IdentityProvider, ProfileFlow, ProfileStore};
use crate::models::HealthResponse;
use crate::services::SupabaseClient;
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    /// Credential flows keyed by submitted email, so duplicate posts for the
    /// same account hit the same single-flight guard.
    pub credential_flows: Arc<Mutex<HashMap<String, Arc<CredentialFlow>>>>,
    pub profile_flow: Arc<ProfileFlow>,
}

impl AppState {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self::with_providers(
            supabase.clone() as Arc<dyn IdentityProvider>,
            supabase as Arc<dyn ProfileStore>,
        )
    }

    /// Wire the workflows to explicit collaborators. Handler tests pass
    /// in-memory doubles here instead of a live client.
    pub fn with_providers(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        let profile_flow = Arc::new(ProfileFlow::new(identity.clone(), store));

        Self {
            identity,
            credential_flows: Arc::new(Mutex::new(HashMap::new())),
            profile_flow,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(auth::configure)
            .configure(profiles::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
