use utoipa::OpenApi;

use crate::{
    api::models::{
        CreateGroupRequest, ErrorResponse, LoginRequest, LoginResponse, MaxPayableResponse, RegisterRequest,
    },
    core::models::{
        audit::AuditEntry,
        balance::{Balance, SettlementSuggestion},
        expense::{CreateExpense, Expense},
        group::Group,
        payment::{Payment, PaymentIntent},
        user::User,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::login,
        super::handlers::register,
        super::handlers::create_group,
        super::handlers::list_groups,
        super::handlers::get_group_balances,
        super::handlers::get_settlement_suggestions,
        super::handlers::get_max_payable,
        super::handlers::add_expense,
        super::handlers::get_group_expenses,
        super::handlers::record_payment,
        super::handlers::get_audit_trail
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        CreateGroupRequest,
        CreateExpense,
        PaymentIntent,
        MaxPayableResponse,
        ErrorResponse,
        User,
        Group,
        Expense,
        Payment,
        Balance,
        SettlementSuggestion,
        AuditEntry
    )),
    info(
        title = "Divvy API",
        description = "API for tracking shared group expenses and settling debts",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
