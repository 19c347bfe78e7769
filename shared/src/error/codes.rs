//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Discount errors
//! - 4xxx: Dealer errors
//! - 5xxx: Product / catalog errors
//! - 6xxx: Role errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Discount ====================
    DiscountNotFound = 3001,
    /// A scoped discount was submitted without any target ids
    DiscountScopeEmpty = 3002,
    DiscountInvalidValue = 3003,
    /// End date is not after start date, or a date failed to parse
    DiscountInvalidPeriod = 3004,
    DiscountCalculationFailed = 3005,

    // ==================== 4xxx: Dealer ====================
    DealerNotFound = 4001,
    DealerUserNotFound = 4002,

    // ==================== 5xxx: Product ====================
    ProductNotFound = 5001,
    CategoryNotFound = 5101,
    VariantNotFound = 5201,

    // ==================== 6xxx: Role ====================
    RoleNotFound = 6001,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
    /// In-flight request was cancelled by a newer one or by unmount
    RequestCancelled = 9006,
    StorageFailed = 9401,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default user-facing message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Discount
            ErrorCode::DiscountNotFound => "Discount not found",
            ErrorCode::DiscountScopeEmpty => "Select at least one target for the discount scope",
            ErrorCode::DiscountInvalidValue => "Discount value is invalid",
            ErrorCode::DiscountInvalidPeriod => "Discount period is invalid",
            ErrorCode::DiscountCalculationFailed => "Discount calculation failed",

            // Dealer
            ErrorCode::DealerNotFound => "Dealer not found",
            ErrorCode::DealerUserNotFound => "Dealer user not found",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::VariantNotFound => "Product variant not found",

            // Role
            ErrorCode::RoleNotFound => "Role not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Request timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RequestCancelled => "Request was cancelled",
            ErrorCode::StorageFailed => "Local storage operation failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Discount
            3001 => Ok(ErrorCode::DiscountNotFound),
            3002 => Ok(ErrorCode::DiscountScopeEmpty),
            3003 => Ok(ErrorCode::DiscountInvalidValue),
            3004 => Ok(ErrorCode::DiscountInvalidPeriod),
            3005 => Ok(ErrorCode::DiscountCalculationFailed),

            // Dealer
            4001 => Ok(ErrorCode::DealerNotFound),
            4002 => Ok(ErrorCode::DealerUserNotFound),

            // Product
            5001 => Ok(ErrorCode::ProductNotFound),
            5101 => Ok(ErrorCode::CategoryNotFound),
            5201 => Ok(ErrorCode::VariantNotFound),

            // Role
            6001 => Ok(ErrorCode::RoleNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::RequestCancelled),
            9401 => Ok(ErrorCode::StorageFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
