//! Error taxonomy and structured error reporting.
//!
//! Every error is classified by category and severity. Reporting appends to
//! a capped log and publishes an `ERROR` event; the host discards both when
//! it rolls back the failed invocation, so they reach only hosts that
//! capture diagnostics before the frame unwinds.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::events;

pub const ERROR_LOG_KEY: Symbol = symbol_short!("ERR_LOG");
pub const ERROR_COUNT_KEY: Symbol = symbol_short!("ERR_CNT");
pub const MAX_ERROR_LOG_SIZE: u32 = 100;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: invalid input parameters or format errors
    Validation = 1,
    /// Authorization errors: role and access-list failures
    Authorization = 2,
    /// Not found errors: resource lookup failures
    NotFound = 3,
    /// State conflict errors: a party already holds a role
    StateConflict = 4,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: non-critical errors, informational
    Low = 1,
    /// Medium severity: important but recoverable errors
    Medium = 2,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user: Option<Address>,
    pub resource_id: Option<String>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorLogEntry {
    pub error_code: u32,
    pub context: ErrorContext,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyRegistered = 1,
    Unauthorized = 2,
    PatientNotFound = 3,
    InstitutionNotFound = 4,
    IndexOutOfRange = 5,
    InvalidInput = 6,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::PatientNotFound
            | ContractError::InstitutionNotFound
            | ContractError::IndexOutOfRange => ErrorCategory::NotFound,
            ContractError::AlreadyRegistered => ErrorCategory::StateConflict,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidInput
            | ContractError::PatientNotFound
            | ContractError::InstitutionNotFound
            | ContractError::IndexOutOfRange => ErrorSeverity::Low,
            ContractError::Unauthorized | ContractError::AlreadyRegistered => {
                ErrorSeverity::Medium
            }
        }
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::AlreadyRegistered => "Party already holds a role",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::PatientNotFound => "Patient is not registered",
            ContractError::InstitutionNotFound => "Institution is not registered",
            ContractError::IndexOutOfRange => "Index is beyond the current length",
            ContractError::InvalidInput => "Invalid input parameters provided",
        }
    }
}

/// Creates an ErrorContext from an error and optional user/resource
/// information, with the category, severity and message filled in.
pub fn create_error_context(
    env: &Env,
    error: ContractError,
    user: Option<Address>,
    resource_id: Option<String>,
) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        user,
        resource_id,
        timestamp: env.ledger().timestamp(),
    }
}

/// Appends an error to the log, keeping only the most recent
/// `MAX_ERROR_LOG_SIZE` entries, and bumps the lifetime counter.
pub fn log_error(
    env: &Env,
    error: ContractError,
    user: Option<Address>,
    resource_id: Option<String>,
) {
    let log_entry = ErrorLogEntry {
        error_code: error as u32,
        context: create_error_context(env, error, user, resource_id),
    };

    let mut error_log: Vec<ErrorLogEntry> = env
        .storage()
        .instance()
        .get(&ERROR_LOG_KEY)
        .unwrap_or(Vec::new(env));

    error_log.push_back(log_entry);

    if error_log.len() > MAX_ERROR_LOG_SIZE {
        let mut new_log = Vec::new(env);
        for i in 1..error_log.len() {
            if let Some(entry) = error_log.get(i) {
                new_log.push_back(entry);
            }
        }
        error_log = new_log;
    }

    env.storage().instance().set(&ERROR_LOG_KEY, &error_log);

    let error_count: u64 = env.storage().instance().get(&ERROR_COUNT_KEY).unwrap_or(0);
    env.storage()
        .instance()
        .set(&ERROR_COUNT_KEY, &error_count.saturating_add(1));
}

/// Logs the error, publishes the matching `ERROR` event, and hands the error
/// back so call sites can `map_err` through it.
pub fn report(
    env: &Env,
    error: ContractError,
    user: Option<Address>,
    resource_id: Option<String>,
) -> ContractError {
    log_error(env, error, user.clone(), resource_id.clone());
    let context = create_error_context(env, error, user, resource_id);
    events::publish_error(env, error as u32, context);
    error
}

/// Retrieves the error log. Empty if no errors have been surfaced.
pub fn get_error_log(env: &Env) -> Vec<ErrorLogEntry> {
    env.storage()
        .instance()
        .get(&ERROR_LOG_KEY)
        .unwrap_or(Vec::new(env))
}

/// Returns the total count of errors that have been surfaced.
pub fn get_error_count(env: &Env) -> u64 {
    env.storage().instance().get(&ERROR_COUNT_KEY).unwrap_or(0)
}
