// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::records::AdjustmentDirection;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// An adjustment's delta contradicts its declared direction.
    AdjustmentSignMismatch {
        /// The declared direction.
        direction: AdjustmentDirection,
        /// The offending delta.
        delta: f64,
    },
    /// An adjustment is dated before the evaluation day.
    AdjustmentDateInPast {
        /// The adjustment date.
        date: Date,
        /// The evaluation day.
        today: Date,
    },
    /// An adjustment has no reason recorded.
    MissingAdjustmentReason,
    /// The adjustment has not been approved.
    AdjustmentNotApproved {
        /// The adjustment identifier.
        adjustment_id: i64,
    },
    /// The allowance has not been approved.
    AllowanceNotApproved {
        /// The allowance identifier.
        allowance_id: i64,
    },
    /// An allowance grants a negative number of days.
    NegativeAllowance {
        /// The allowance identifier.
        allowance_id: i64,
        /// The offending day count.
        allowed_leaves: f64,
    },
    /// A leave interval ends before it starts.
    InvalidDateRange {
        /// The start of the range.
        start: Date,
        /// The end of the range.
        end: Date,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdjustmentSignMismatch { direction, delta } => {
                write!(
                    f,
                    "Adjustment delta {delta} contradicts its {direction} direction"
                )
            }
            Self::AdjustmentDateInPast { date, today } => {
                write!(
                    f,
                    "Adjustment date {date} is in the past (evaluation day is {today})"
                )
            }
            Self::MissingAdjustmentReason => {
                write!(f, "Adjustment must record a reason")
            }
            Self::AdjustmentNotApproved { adjustment_id } => {
                write!(f, "Adjustment {adjustment_id} is not approved")
            }
            Self::AllowanceNotApproved { allowance_id } => {
                write!(f, "Allowance {allowance_id} is not approved")
            }
            Self::NegativeAllowance {
                allowance_id,
                allowed_leaves,
            } => {
                write!(
                    f,
                    "Allowance {allowance_id} grants a negative day count ({allowed_leaves})"
                )
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Date range ends ({end}) before it starts ({start})")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
