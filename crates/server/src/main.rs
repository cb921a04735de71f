// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use emb_inspect_api::{
    ApiError, handlers,
    request_response::{
        ActionPayload, AddDocumentRequest, AssignDistrictRequest, CreateEstablishmentRequest,
        CreateInspectionRequest, CreateOfficerRequest, DocumentInfo, EstablishmentInfo,
        HistoryEntryInfo, InspectionResponse, ListInspectionsRequest, NotificationInfo,
        OfficerInfo, OverrideStateRequest, ReinspectionInfo,
    },
    translate_domain_error,
};
use emb_inspect_domain::{District, LawSection, Role};
use emb_inspect_events::EmailMessage;
use emb_inspect_persistence::{ObligationListFilter, OfficerListFilter, SqlitePersistence};
use time::{Date, OffsetDateTime};

/// EMB Inspect Server - HTTP server for the EMB inspection workflow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seconds between reinspection reminder sweeps
    #[arg(long, default_value_t = 3600)]
    reminder_interval: u64,
}

/// Outbound email transport.
///
/// Emails are handed over only after the database transaction has
/// committed. A failed send is logged and not retried.
trait Mailer: Send + Sync {
    /// Attempts to deliver one message.
    fn send(&self, email: &EmailMessage) -> Result<(), String>;
}

/// Mailer that writes each message to the log instead of delivering it.
struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &EmailMessage) -> Result<(), String> {
        info!(to = %email.to, subject = %email.subject, "Email dispatched");
        Ok(())
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the outbound email transport.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for all inspection data.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Outbound email transport.
    mailer: Arc<dyn Mailer>,
}

/// Sends each email, logging and swallowing failures.
fn dispatch_emails(mailer: &Arc<dyn Mailer>, emails: &[EmailMessage]) {
    for email in emails {
        if let Err(reason) = mailer.send(email) {
            warn!(to = %email.to, reason, "Email delivery failed");
        }
    }
}

/// JSON request body carrying the acting officer plus a payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Acting<T> {
    /// The officer performing this action.
    actor_id: i64,
    /// The wrapped request payload.
    #[serde(flatten)]
    request: T,
}

/// JSON request body carrying only the acting officer.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorRequest {
    /// The officer performing this action.
    actor_id: i64,
}

/// Query parameters identifying the requesting officer.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The requesting officer.
    actor_id: i64,
}

/// Query parameters for the inspection list endpoint.
#[derive(Debug, Deserialize)]
struct ListInspectionsQuery {
    /// The requesting officer.
    actor_id: i64,
    /// Role-specific tab.
    tab: Option<String>,
    /// Simplified status filter.
    status: Option<String>,
    /// Restrict to inspections currently assigned to the actor.
    #[serde(default)]
    assigned_to_me: bool,
    /// Restrict to inspections created by the actor.
    #[serde(default)]
    created_by_me: bool,
}

/// Query parameters for the notification list endpoint.
#[derive(Debug, Deserialize)]
struct NotificationsQuery {
    /// The officer whose notifications to list.
    officer_id: i64,
    /// Restrict to unread notifications.
    #[serde(default)]
    unread_only: bool,
}

/// Query parameters for the officer list endpoint.
#[derive(Debug, Deserialize)]
struct ListOfficersQuery {
    /// The requesting officer.
    actor_id: i64,
    /// Restrict to one role.
    role: Option<String>,
    /// Restrict to one law section.
    law_section: Option<String>,
    /// Restrict to one district.
    district: Option<String>,
    /// Restrict to active officers.
    #[serde(default)]
    active_only: bool,
}

/// Query parameters for the reinspection list endpoint.
#[derive(Debug, Deserialize)]
struct ReinspectionsQuery {
    /// The requesting officer.
    actor_id: i64,
    /// Restrict to one establishment.
    establishment_id: Option<i64>,
    /// Restrict to obligations due on or before this date.
    due_on_or_before: Option<Date>,
    /// Restrict to pending obligations.
    #[serde(default)]
    pending_only: bool,
}

/// Error response body with a stable machine-readable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    /// Error indicator.
    error: bool,
    /// Stable error code.
    code: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Stable error code.
    code: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorBody> = Json(ErrorBody {
            error: true,
            code: self.code.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::PermissionDenied { .. } | ApiError::NotAssignedToYou { .. } => {
                StatusCode::FORBIDDEN
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. }
            | ApiError::RoleSlotOccupied { .. }
            | ApiError::NoAssigneeFound { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Builds a `400` for a malformed multipart body.
fn bad_multipart<E: std::fmt::Display>(err: E) -> HttpError {
    HttpError {
        status: StatusCode::BAD_REQUEST,
        code: "validation_error",
        message: format!("Malformed multipart body: {err}"),
    }
}

/// Handler for POST `/inspections`.
///
/// Creates a new inspection as the Division Chief.
async fn handle_create_inspection(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Acting<CreateInspectionRequest>>,
) -> Result<(StatusCode, Json<InspectionResponse>), HttpError> {
    info!(
        actor_id = req.actor_id,
        law = %req.request.law,
        "Handling create_inspection request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: InspectionResponse = handlers::create_inspection(
        &mut persistence,
        req.request,
        req.actor_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/inspections/{id}/{action}`.
///
/// Performs one workflow action; emails produced by the transition are
/// dispatched after the transaction has committed.
async fn handle_inspection_action(
    AxumState(app_state): AxumState<AppState>,
    Path((inspection_id, action)): Path<(i64, String)>,
    Json(req): Json<Acting<ActionPayload>>,
) -> Result<Json<InspectionResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        inspection_id,
        action = %action,
        "Handling inspection action request"
    );

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let (response, emails) = handlers::perform_inspection_action(
        &mut persistence,
        inspection_id,
        &action,
        req.request,
        req.actor_id,
        now.date(),
        now,
    )?;
    drop(persistence);

    dispatch_emails(&app_state.mailer, &emails);
    Ok(Json(response))
}

/// Handler for GET `/inspections`.
async fn handle_list_inspections(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListInspectionsQuery>,
) -> Result<Json<Vec<InspectionResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let rows: Vec<InspectionResponse> = handlers::list_inspections(
        &mut persistence,
        ListInspectionsRequest {
            tab: query.tab,
            status: query.status,
            assigned_to_me: query.assigned_to_me,
            created_by_me: query.created_by_me,
        },
        query.actor_id,
    )?;
    drop(persistence);

    Ok(Json(rows))
}

/// Handler for GET `/inspections/{id}`.
async fn handle_get_inspection(
    AxumState(app_state): AxumState<AppState>,
    Path(inspection_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<InspectionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: InspectionResponse =
        handlers::get_inspection(&mut persistence, inspection_id, query.actor_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/inspections/{id}/history`.
async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path(inspection_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<HistoryEntryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let history: Vec<HistoryEntryInfo> =
        handlers::get_history(&mut persistence, inspection_id, query.actor_id)?;
    drop(persistence);

    Ok(Json(history))
}

/// Handler for POST `/inspections/{id}/documents`.
///
/// Accepts a multipart form with a `file` part and an optional
/// `doc_type` part. Only the file reference is recorded; the payload
/// itself is drained.
async fn handle_add_document(
    AxumState(app_state): AxumState<AppState>,
    Path(inspection_id): Path<i64>,
    Query(query): Query<ActorQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentInfo>), HttpError> {
    let mut file_ref: Option<String> = None;
    let mut doc_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        match field.name() {
            Some("file") => {
                let file_name: String = field
                    .file_name()
                    .map_or_else(|| String::from("upload.bin"), ToString::to_string);
                field.bytes().await.map_err(bad_multipart)?;
                file_ref = Some(format!("uploads/{inspection_id}/{file_name}"));
            }
            Some("doc_type") => {
                doc_type = Some(field.text().await.map_err(bad_multipart)?);
            }
            _ => {}
        }
    }

    let request: AddDocumentRequest = AddDocumentRequest {
        file_ref: file_ref.ok_or_else(|| HttpError {
            status: StatusCode::BAD_REQUEST,
            code: "validation_error",
            message: String::from("A 'file' part is required"),
        })?,
        doc_type: doc_type.unwrap_or_else(|| String::from("inspection_report")),
    };

    info!(
        actor_id = query.actor_id,
        inspection_id,
        file_ref = %request.file_ref,
        "Handling add_document request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let document: DocumentInfo = handlers::add_document(
        &mut persistence,
        inspection_id,
        request,
        query.actor_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(document)))
}

/// Handler for GET `/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<Vec<NotificationInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let notifications: Vec<NotificationInfo> =
        handlers::list_notifications(&mut persistence, query.officer_id, query.unread_only)?;
    drop(persistence);

    Ok(Json(notifications))
}

/// Handler for POST `/notifications/{id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    Path(notification_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::mark_notification_read(&mut persistence, notification_id, req.actor_id)?;
    drop(persistence);

    Ok(StatusCode::OK)
}

/// Handler for POST `/officers`.
///
/// Creates an officer. Admin only.
async fn handle_create_officer(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Acting<CreateOfficerRequest>>,
) -> Result<(StatusCode, Json<OfficerInfo>), HttpError> {
    info!(
        actor_id = req.actor_id,
        email = %req.request.email,
        role = %req.request.role,
        "Handling create_officer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let officer: OfficerInfo = handlers::create_officer(
        &mut persistence,
        req.request,
        req.actor_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(officer)))
}

/// Handler for POST `/officers/{id}/activate`.
async fn handle_activate_officer(
    AxumState(app_state): AxumState<AppState>,
    Path(officer_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<OfficerInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        officer_id, "Handling activate_officer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let officer: OfficerInfo =
        handlers::activate_officer(&mut persistence, officer_id, req.actor_id)?;
    drop(persistence);

    Ok(Json(officer))
}

/// Handler for POST `/officers/{id}/deactivate`.
async fn handle_deactivate_officer(
    AxumState(app_state): AxumState<AppState>,
    Path(officer_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<OfficerInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        officer_id, "Handling deactivate_officer request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let officer: OfficerInfo =
        handlers::deactivate_officer(&mut persistence, officer_id, req.actor_id)?;
    drop(persistence);

    Ok(Json(officer))
}

/// Handler for POST `/officers/{id}/district`.
async fn handle_assign_district(
    AxumState(app_state): AxumState<AppState>,
    Path(officer_id): Path<i64>,
    Json(req): Json<Acting<AssignDistrictRequest>>,
) -> Result<Json<OfficerInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        officer_id, "Handling assign_district request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let officer: OfficerInfo =
        handlers::assign_district(&mut persistence, officer_id, req.request, req.actor_id)?;
    drop(persistence);

    Ok(Json(officer))
}

/// Handler for GET `/officers`.
async fn handle_list_officers(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListOfficersQuery>,
) -> Result<Json<Vec<OfficerInfo>>, HttpError> {
    let filter: OfficerListFilter = OfficerListFilter {
        role: query
            .role
            .as_deref()
            .map(Role::from_str)
            .transpose()
            .map_err(translate_domain_error)?,
        law_section: query
            .law_section
            .as_deref()
            .map(LawSection::parse)
            .transpose()
            .map_err(translate_domain_error)?,
        district: query.district.as_deref().map(District::new),
        active_only: query.active_only,
    };

    let mut persistence = app_state.persistence.lock().await;
    let officers: Vec<OfficerInfo> =
        handlers::list_officers(&mut persistence, &filter, query.actor_id)?;
    drop(persistence);

    Ok(Json(officers))
}

/// Handler for POST `/establishments`.
async fn handle_create_establishment(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Acting<CreateEstablishmentRequest>>,
) -> Result<(StatusCode, Json<EstablishmentInfo>), HttpError> {
    info!(
        actor_id = req.actor_id,
        name = %req.request.name,
        "Handling create_establishment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let establishment: EstablishmentInfo = handlers::create_establishment(
        &mut persistence,
        req.request,
        req.actor_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(establishment)))
}

/// Handler for GET `/establishments`.
async fn handle_list_establishments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<EstablishmentInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let establishments: Vec<EstablishmentInfo> =
        handlers::list_establishments(&mut persistence, query.actor_id)?;
    drop(persistence);

    Ok(Json(establishments))
}

/// Handler for GET `/reinspections`.
async fn handle_list_reinspections(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ReinspectionsQuery>,
) -> Result<Json<Vec<ReinspectionInfo>>, HttpError> {
    let filter: ObligationListFilter = ObligationListFilter {
        establishment_id: query.establishment_id,
        due_on_or_before: query.due_on_or_before,
        pending_only: query.pending_only,
        reminder_not_sent: false,
    };

    let mut persistence = app_state.persistence.lock().await;
    let obligations: Vec<ReinspectionInfo> =
        handlers::list_reinspections(&mut persistence, &filter, query.actor_id)?;
    drop(persistence);

    Ok(Json(obligations))
}

/// Handler for POST `/admin/inspections/{id}/state`.
///
/// Forcibly sets an inspection's state. Admin only.
async fn handle_override_state(
    AxumState(app_state): AxumState<AppState>,
    Path(inspection_id): Path<i64>,
    Json(req): Json<Acting<OverrideStateRequest>>,
) -> Result<Json<InspectionResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        inspection_id,
        new_state = %req.request.new_state,
        "Handling override_state request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: InspectionResponse = handlers::override_inspection_state(
        &mut persistence,
        inspection_id,
        req.request,
        req.actor_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/inspections", post(handle_create_inspection))
        .route("/inspections", get(handle_list_inspections))
        .route("/inspections/{id}", get(handle_get_inspection))
        .route("/inspections/{id}/history", get(handle_get_history))
        .route("/inspections/{id}/documents", post(handle_add_document))
        .route("/inspections/{id}/{action}", post(handle_inspection_action))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route("/officers", post(handle_create_officer))
        .route("/officers", get(handle_list_officers))
        .route("/officers/{id}/activate", post(handle_activate_officer))
        .route("/officers/{id}/deactivate", post(handle_deactivate_officer))
        .route("/officers/{id}/district", post(handle_assign_district))
        .route("/establishments", post(handle_create_establishment))
        .route("/establishments", get(handle_list_establishments))
        .route("/reinspections", get(handle_list_reinspections))
        .route("/admin/inspections/{id}/state", post(handle_override_state))
        .with_state(app_state)
}

/// Spawns the periodic reinspection reminder sweep.
///
/// Each pass collects pending obligations due today or earlier whose
/// reminder has not been sent, dispatches their emails, and marks them
/// as reminded.
fn spawn_reminder_sweep(app_state: AppState, interval_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            let mut persistence = app_state.persistence.lock().await;
            let result = handlers::collect_due_reminders(
                &mut persistence,
                OffsetDateTime::now_utc().date(),
            );
            drop(persistence);
            match result {
                Ok(emails) => {
                    if !emails.is_empty() {
                        info!(count = emails.len(), "Reinspection reminders due");
                    }
                    dispatch_emails(&app_state.mailer, &emails);
                }
                Err(err) => error!(error = %err, "Reminder sweep failed"),
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing EMB Inspect Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        mailer: Arc::new(LogMailer),
    };

    spawn_reminder_sweep(app_state.clone(), args.reminder_interval);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use emb_inspect_domain::{Establishment, Law, Officer};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const CHIEF: i64 = 1;
    const EIA_SECTION: i64 = 2;
    const EIA_UNIT: i64 = 5;
    const EIA_MONITOR: i64 = 6;
    const ADMIN: i64 = 9;

    fn officer(
        email: &str,
        role: Role,
        section: Option<LawSection>,
        district: Option<District>,
    ) -> Officer {
        Officer::new(
            email.to_string(),
            format!("Officer {email}"),
            role,
            section,
            district,
            true,
        )
    }

    fn establishment(name: &str) -> Establishment {
        Establishment {
            establishment_id: None,
            name: name.to_string(),
            province: "Ilocos Norte".to_string(),
            city: "Laoag City".to_string(),
            contact_email: Some(format!("{}@factory.example", name.to_lowercase())),
        }
    }

    /// Helper to create test app state with a seeded in-memory database
    /// (officer ids 1..=9 in roster order, establishments 1 and 2).
    fn create_test_app_state() -> AppState {
        let mut persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");

        let district: District = District::new("Ilocos Norte - 1st District");
        let roster: Vec<Officer> = vec![
            officer("chief@emb.gov.ph", Role::DivisionChief, None, None),
            officer(
                "eia.section@emb.gov.ph",
                Role::SectionChief,
                Some(LawSection::Single(Law::Eia)),
                Some(district.clone()),
            ),
            officer(
                "combined.section@emb.gov.ph",
                Role::SectionChief,
                Some(LawSection::EiaAirWater),
                None,
            ),
            officer(
                "tox.section@emb.gov.ph",
                Role::SectionChief,
                Some(LawSection::Single(Law::Toxic)),
                None,
            ),
            officer(
                "eia.unit@emb.gov.ph",
                Role::UnitHead,
                Some(LawSection::Single(Law::Eia)),
                None,
            ),
            officer(
                "eia.monitor@emb.gov.ph",
                Role::MonitoringPersonnel,
                Some(LawSection::Single(Law::Eia)),
                Some(district.clone()),
            ),
            officer(
                "tox.monitor@emb.gov.ph",
                Role::MonitoringPersonnel,
                Some(LawSection::Single(Law::Toxic)),
                Some(district),
            ),
            officer("legal@emb.gov.ph", Role::LegalUnit, None, None),
            officer("admin@emb.gov.ph", Role::Admin, None, None),
        ];
        for member in &roster {
            persistence.create_officer(member).unwrap();
        }
        persistence
            .create_establishment(&establishment("Northwind"))
            .unwrap();
        persistence
            .create_establishment(&establishment("Harborline"))
            .unwrap();

        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            mailer: Arc::new(LogMailer),
        }
    }

    /// Sends one request, returning the status and parsed JSON body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body: Body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Creates an inspection under `law` as the Division Chief.
    async fn create_inspection(app: &Router, law: &str) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/inspections",
            Some(json!({
                "actor_id": CHIEF,
                "establishments": [1, 2],
                "law": law,
                "scheduled_at": "2024-04-01",
                "inspection_notes": "Initial compliance visit",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        body
    }

    /// Posts one workflow action, asserting success.
    async fn act(app: &Router, inspection_id: i64, verb: &str, actor_id: i64, extra: Value) -> Value {
        let mut body: Value = json!({ "actor_id": actor_id });
        if let (Some(map), Some(extra_map)) = (body.as_object_mut(), extra.as_object()) {
            for (key, value) in extra_map {
                map.insert(key.clone(), value.clone());
            }
        }
        let (status, response) = send(
            app,
            "POST",
            &format!("/inspections/{inspection_id}/{verb}"),
            Some(body),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK, "{verb} failed: {response}");
        response
    }

    #[tokio::test]
    async fn test_create_inspection_as_chief_returns_created() {
        let app: Router = build_router(create_test_app_state());

        let body: Value = create_inspection(&app, "PD-1586").await;
        // The code year comes from the wall clock at creation time.
        let year: i32 = OffsetDateTime::now_utc().year();
        assert_eq!(body["code"], format!("EIA-{year}-0001"));
        assert_eq!(body["form"]["scheduled_at"], "2024-04-01");
        assert_eq!(body["state"], "SECTION_ASSIGNED");
        assert_eq!(body["simplified_status"], "IN_PROGRESS");
        assert_eq!(body["district"], "Ilocos Norte - 1st District");
        assert_eq!(body["current_assignee"], EIA_SECTION);
    }

    #[tokio::test]
    async fn test_create_inspection_as_section_chief_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/inspections",
            Some(json!({
                "actor_id": EIA_SECTION,
                "establishments": [1],
                "law": "PD-1586",
                "scheduled_at": null,
                "inspection_notes": null,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "permission_denied");
    }

    #[tokio::test]
    async fn test_create_inspection_unknown_law_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/inspections",
            Some(json!({
                "actor_id": CHIEF,
                "establishments": [1],
                "law": "RA-0000",
                "scheduled_at": null,
                "inspection_notes": null,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_get_inspection_not_found() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/inspections/42?actor_id=1", None).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_action_and_replay_conflict() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        let body: Value = act(&app, 1, "start", EIA_SECTION, json!({})).await;
        assert_eq!(body["state"], "SECTION_IN_PROGRESS");

        // Replaying the same action must observe the advanced state.
        let (status, body) = send(
            &app,
            "POST",
            "/inspections/1/start",
            Some(json!({ "actor_id": EIA_SECTION })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body["code"], "invalid_transition");
    }

    #[tokio::test]
    async fn test_unknown_action_verb_bad_request() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        let (status, body) = send(
            &app,
            "POST",
            "/inspections/1/abandon",
            Some(json!({ "actor_id": EIA_SECTION })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;
        act(&app, 1, "start", EIA_SECTION, json!({})).await;

        let (status, body) = send(&app, "GET", "/inspections/1/history?actor_id=1", None).await;
        assert_eq!(status, HttpStatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["new_state"], "SECTION_IN_PROGRESS");
        assert_eq!(entries[1]["new_state"], "SECTION_ASSIGNED");
        assert_eq!(entries[1]["previous_state"], Value::Null);
    }

    #[tokio::test]
    async fn test_add_document_multipart() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        let boundary: &str = "emb-test-boundary";
        let body: String = format!(
            "--{boundary}\r\n\
             content-disposition: form-data; name=\"doc_type\"\r\n\r\n\
             monitoring_report\r\n\
             --{boundary}\r\n\
             content-disposition: form-data; name=\"file\"; filename=\"report.pdf\"\r\n\
             content-type: application/pdf\r\n\r\n\
             %PDF-1.4 stub\r\n\
             --{boundary}--\r\n"
        );
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/inspections/1/documents?actor_id=2")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(document["file_ref"], "uploads/1/report.pdf");
        assert_eq!(document["doc_type"], "monitoring_report");
        assert_eq!(document["uploaded_by"], 2);

        // The document must land on the form.
        let (_, inspection) = send(&app, "GET", "/inspections/1?actor_id=1", None).await;
        assert_eq!(inspection["form"]["documents"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_document_without_file_bad_request() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        let boundary: &str = "emb-test-boundary";
        let body: String = format!(
            "--{boundary}\r\n\
             content-disposition: form-data; name=\"doc_type\"\r\n\r\n\
             monitoring_report\r\n\
             --{boundary}--\r\n"
        );
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/inspections/1/documents?actor_id=2")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_flow() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        // The assignment handoff notified the Section Chief.
        let (status, body) = send(
            &app,
            "GET",
            "/notifications?officer_id=2&unread_only=true",
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let notifications = body.as_array().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["kind"], "inspection_forward");
        assert_eq!(notifications[0]["related_inspection"], 1);
        let notification_id: i64 = notifications[0]["notification_id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            &format!("/notifications/{notification_id}/read"),
            Some(json!({ "actor_id": EIA_SECTION })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (_, body) = send(
            &app,
            "GET",
            "/notifications?officer_id=2&unread_only=true",
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_mark_foreign_notification_not_found() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        // Notification 1 belongs to officer 2, not the chief.
        let (status, body) = send(
            &app,
            "POST",
            "/notifications/1/read",
            Some(json!({ "actor_id": CHIEF })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_create_officer_and_slot_conflict() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/officers",
            Some(json!({
                "actor_id": ADMIN,
                "email": "air.monitor@emb.gov.ph",
                "name": "Officer Air",
                "role": "MONITORING_PERSONNEL",
                "law_section": "RA-8749",
                "district": "Ilocos Norte - 1st District",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        assert_eq!(body["officer_id"], 10);
        assert_eq!(body["active"], true);

        // The EIA monitoring slot for this district is already held.
        let (status, body) = send(
            &app,
            "POST",
            "/officers",
            Some(json!({
                "actor_id": ADMIN,
                "email": "second.eia.monitor@emb.gov.ph",
                "name": "Officer Duplicate",
                "role": "MONITORING_PERSONNEL",
                "law_section": "PD-1586",
                "district": "Ilocos Norte - 1st District",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body["code"], "role_slot_occupied");
    }

    #[tokio::test]
    async fn test_officer_management_requires_admin() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/officers/5/deactivate",
            Some(json!({ "actor_id": CHIEF })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["code"], "permission_denied");
    }

    #[tokio::test]
    async fn test_deactivate_then_reactivate_officer() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/officers/5/deactivate",
            Some(json!({ "actor_id": ADMIN })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["active"], false);

        let (status, body) = send(
            &app,
            "POST",
            "/officers/5/activate",
            Some(json!({ "actor_id": ADMIN })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["active"], true);
    }

    #[tokio::test]
    async fn test_list_officers_by_role() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "GET",
            "/officers?actor_id=9&role=SECTION_CHIEF&active_only=true",
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_establishment_derives_district() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(
            &app,
            "POST",
            "/establishments",
            Some(json!({
                "actor_id": CHIEF,
                "name": "Southgate Tannery",
                "province": "Ilocos Sur",
                "city": "Vigan City",
                "contact_email": "ops@southgate.example",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        assert_eq!(body["establishment_id"], 3);
        assert_eq!(body["district"], "Ilocos Sur - 1st District");

        let (_, listed) = send(&app, "GET", "/establishments?actor_id=1", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_inspections_received_tab() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        let (status, body) = send(
            &app,
            "GET",
            "/inspections?actor_id=2&tab=received",
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["state"], "SECTION_ASSIGNED");

        // Once started, the inspection moves to the working tab.
        act(&app, 1, "start", EIA_SECTION, json!({})).await;
        let (_, body) = send(&app, "GET", "/inspections?actor_id=2&tab=received", None).await;
        assert_eq!(body.as_array().unwrap().len(), 0);
        let (_, body) = send(
            &app,
            "GET",
            "/inspections?actor_id=2&tab=my_inspections",
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_override_state() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        let (status, body) = send(
            &app,
            "POST",
            "/admin/inspections/1/state",
            Some(json!({
                "actor_id": ADMIN,
                "new_state": "DIVISION_REVIEWED",
                "assignee": CHIEF,
                "reason": "Paper process migrated mid-flight",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["state"], "DIVISION_REVIEWED");
        assert_eq!(body["current_assignee"], CHIEF);

        let (status, body) = send(
            &app,
            "POST",
            "/admin/inspections/1/state",
            Some(json!({
                "actor_id": CHIEF,
                "new_state": "SECTION_ASSIGNED",
                "assignee": EIA_SECTION,
                "reason": "Not an admin",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["code"], "permission_denied");
    }

    #[tokio::test]
    async fn test_full_compliant_walkthrough_creates_reinspections() {
        let app: Router = build_router(create_test_app_state());
        create_inspection(&app, "PD-1586").await;

        act(&app, 1, "start", EIA_SECTION, json!({})).await;
        act(&app, 1, "complete", EIA_SECTION, json!({})).await;
        act(&app, 1, "forward", EIA_SECTION, json!({})).await;
        act(&app, 1, "start", EIA_UNIT, json!({})).await;
        act(&app, 1, "complete", EIA_UNIT, json!({})).await;
        act(&app, 1, "forward", EIA_UNIT, json!({})).await;
        act(&app, 1, "start", EIA_MONITOR, json!({})).await;
        let completed: Value = act(
            &app,
            1,
            "complete",
            EIA_MONITOR,
            json!({ "decision": "COMPLIANT" }),
        )
        .await;
        assert_eq!(completed["state"], "UNIT_REVIEWED");
        act(&app, 1, "review", EIA_UNIT, json!({})).await;
        act(&app, 1, "review", EIA_SECTION, json!({})).await;
        let closed: Value = act(&app, 1, "close", CHIEF, json!({})).await;
        assert_eq!(closed["state"], "CLOSED_COMPLIANT");
        assert_eq!(closed["simplified_status"], "CLOSED");
        assert_eq!(closed["current_assignee"], Value::Null);

        // One pending obligation per establishment inspected.
        let (status, body) = send(
            &app,
            "GET",
            "/reinspections?actor_id=1&pending_only=true",
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let obligations = body.as_array().unwrap();
        assert_eq!(obligations.len(), 2);
        for obligation in obligations {
            assert_eq!(obligation["outcome"], "COMPLIANT");
            assert_eq!(obligation["status"], "PENDING");
            assert_eq!(obligation["reminder_sent"], false);
            assert_eq!(obligation["inspection_id"], 1);
        }
    }
}
