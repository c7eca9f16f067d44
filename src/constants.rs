//! Audit trail action names.

pub const USER_REGISTERED: &str = "user_registered";
pub const USER_LOGGED_IN: &str = "user_logged_in";
pub const GROUP_CREATED: &str = "group_created";
pub const EXPENSE_ADDED: &str = "expense_added";
pub const PAYMENT_RECORDED: &str = "payment_recorded";
pub const BALANCES_QUERIED: &str = "balances_queried";
pub const SUGGESTIONS_QUERIED: &str = "suggestions_queried";
