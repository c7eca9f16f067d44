use crate::{
    api::models::*,
    auth::jwt::Session,
    core::{
        models::{
            audit::AuditEntry,
            balance::{Balance, SettlementSuggestion},
            expense::{CreateExpense, Expense},
            group::Group,
            payment::{Payment, PaymentIntent},
            user::User,
        },
        services::DivvyService,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryAuditLog,
        storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::IntoResponse,
};
use http::header;

use std::sync::Arc;

pub type AppService = DivvyService<InMemoryAuditLog, InMemoryStorage, InMemoryCache>;

/// Middleware that validates the bearer token and threads the resulting
/// session into the request; handlers never consult global auth state.
async fn auth_middleware(
    State(service): State<Arc<AppService>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| crate::core::errors::DivvyError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::core::errors::DivvyError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(Session::from(claims));
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    let protected_routes = Router::new()
        .route("/groups", axum::routing::post(create_group))
        .route("/groups", axum::routing::get(list_groups))
        .route("/groups/{group_id}/balances", axum::routing::get(get_group_balances))
        .route(
            "/groups/{group_id}/suggestions",
            axum::routing::get(get_settlement_suggestions),
        )
        .route(
            "/groups/{group_id}/max_payable/{to_user_id}",
            axum::routing::get(get_max_payable),
        )
        .route("/groups/{group_id}/expenses", axum::routing::post(add_expense))
        .route("/groups/{group_id}/expenses", axum::routing::get(get_group_expenses))
        .route("/groups/{group_id}/payments", axum::routing::post(record_payment))
        .route("/logs", axum::routing::get(get_audit_trail))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/login", axum::routing::post(login))
        .route("/users", axum::routing::post(register)) // Unprotected
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub(crate) async fn login(
    State(service): State<Arc<AppService>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, user) = service.authenticate(&req.email, &req.password).await?;
    Ok(Json(LoginResponse { token, user }))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = User),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub(crate) async fn register(
    State(service): State<Arc<AppService>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    let user = service.register_user(&req.email, &req.username, &req.password).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = Group),
        (status = 404, description = "A listed member does not exist", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service.create_group(&req.name, req.member_ids, &session).await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/groups",
    responses((status = 200, description = "Groups the acting user belongs to", body = [Group]))
)]
pub(crate) async fn list_groups(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = service.user_groups(&session).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/balances",
    params(("group_id" = String, Path, description = "Group id")),
    responses(
        (status = 200, description = "Current balance snapshot", body = [Balance]),
        (status = 403, description = "Not a group member", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_balances(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Balance>>, ApiError> {
    let balances = service.group_balances(&group_id, &session).await?;
    Ok(Json(balances))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/suggestions",
    params(("group_id" = String, Path, description = "Group id")),
    responses(
        (status = 200, description = "Advisory settlement transfers", body = [SettlementSuggestion]),
        (status = 403, description = "Not a group member", body = ErrorResponse)
    )
)]
pub(crate) async fn get_settlement_suggestions(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<SettlementSuggestion>>, ApiError> {
    let suggestions = service.settlement_suggestions(&group_id, &session).await?;
    Ok(Json(suggestions))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/max_payable/{to_user_id}",
    params(
        ("group_id" = String, Path, description = "Group id"),
        ("to_user_id" = String, Path, description = "Recipient user id")
    ),
    responses((status = 200, description = "Maximum payable to the recipient", body = MaxPayableResponse))
)]
pub(crate) async fn get_max_payable(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Path((group_id, to_user_id)): Path<(String, String)>,
) -> Result<Json<MaxPayableResponse>, ApiError> {
    let max_payable = service.max_payable(&group_id, &to_user_id, &session).await?;
    Ok(Json(MaxPayableResponse { max_payable }))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "Group id")),
    request_body = CreateExpense,
    responses(
        (status = 200, description = "Expense recorded", body = Expense),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub(crate) async fn add_expense(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Path(group_id): Path<String>,
    Json(req): Json<CreateExpense>,
) -> Result<Json<Expense>, ApiError> {
    let expense = service.add_expense(&group_id, req, &session).await?;
    Ok(Json(expense))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "Group id")),
    responses((status = 200, description = "Expenses for the group", body = [Expense]))
)]
pub(crate) async fn get_group_expenses(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = service.group_expenses(&group_id, &session).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/payments",
    params(("group_id" = String, Path, description = "Group id")),
    request_body = PaymentIntent,
    responses(
        (status = 200, description = "Payment recorded", body = Payment),
        (status = 422, description = "Payment rejected", body = ErrorResponse)
    )
)]
pub(crate) async fn record_payment(
    State(service): State<Arc<AppService>>,
    Extension(session): Extension<Session>,
    Path(group_id): Path<String>,
    Json(intent): Json<PaymentIntent>,
) -> Result<Json<Payment>, ApiError> {
    let payment = service.record_payment(&group_id, intent, &session).await?;
    Ok(Json(payment))
}

#[utoipa::path(
    get,
    path = "/logs",
    responses((status = 200, description = "Audit trail", body = [AuditEntry]))
)]
pub(crate) async fn get_audit_trail(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    let entries = service.audit_trail().await?;
    Ok(Json(entries))
}
