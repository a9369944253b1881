// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leave_ledger::CoreError;
use leave_ledger_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A cascade stopped partway; the committed prefix is valid and the
    /// operation should be retried via recompute.
    CascadeFailed {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::CascadeFailed { message } => {
                write!(f, "Cascade failed: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into the API contract.
#[must_use]
pub fn translate_domain_error(error: &DomainError) -> ApiError {
    let rule: &str = match error {
        DomainError::AdjustmentSignMismatch { .. } => "adjustment_sign",
        DomainError::AdjustmentDateInPast { .. } => "adjustment_forward_dating",
        DomainError::MissingAdjustmentReason => "adjustment_reason",
        DomainError::AdjustmentNotApproved { .. } => "adjustment_approval",
        DomainError::AllowanceNotApproved { .. } => "allowance_approval",
        DomainError::NegativeAllowance { .. } => "allowance_non_negative",
        DomainError::InvalidDateRange { .. } => "date_range",
        DomainError::DateArithmeticOverflow { .. } | DomainError::DateParseError { .. } => {
            "date_validity"
        }
    };
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: error.to_string(),
    }
}

/// Translates a core error into the API contract.
#[must_use]
pub fn translate_core_error(error: &CoreError) -> ApiError {
    match error {
        CoreError::DomainViolation(domain_error) => translate_domain_error(domain_error),
        CoreError::DuplicateEntry { .. } => ApiError::DomainRuleViolation {
            rule: String::from("entry_uniqueness"),
            message: error.to_string(),
        },
        CoreError::DuplicateAdjustmentRef { .. } => ApiError::DomainRuleViolation {
            rule: String::from("adjustment_ref_uniqueness"),
            message: error.to_string(),
        },
        CoreError::DuplicateAllowanceRef { .. } => ApiError::DomainRuleViolation {
            rule: String::from("allowance_ref_uniqueness"),
            message: error.to_string(),
        },
        CoreError::EntryNotFound { entry_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Ledger entry"),
            message: format!("entry {entry_id}"),
        },
        CoreError::CascadeIncomplete { .. } => ApiError::CascadeFailed {
            message: error.to_string(),
        },
        CoreError::OrderingViolation { .. } | CoreError::Store(_) => ApiError::Internal {
            message: error.to_string(),
        },
    }
}
