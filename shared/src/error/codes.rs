//! Unified error codes for the Galley framework
//!
//! Error codes are shared between the server and the admin frontend.
//! Organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
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
    /// Required field missing
    RequiredField = 6,
    /// Lookup needs an id or a unique field value
    AmbiguousLookup = 7,
    /// Delete blocked by live associations
    ReferentialConflict = 8,
    /// Tree write would create a cycle
    TreeCycle = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (telephone/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// SMS verification code expired
    SmsCodeExpired = 1006,
    /// SMS verification code invalid
    SmsCodeInvalid = 1007,
    /// Too many verification attempts
    TooManyAttempts = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// The superuser account/role cannot be modified or deleted
    SuperuserProtected = 2002,
    /// Cannot delete the currently logged-in user
    CannotDeleteSelf = 2003,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,

    // ==================== 6xxx: Product ====================
    /// Referenced dish image does not exist
    DishImageNotFound = 6001,
    /// Malformed image operation directive
    InvalidImageDirective = 6002,
    /// Publishing pipeline is not configured
    PublishNotConfigured = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// File storage error
    StorageError = 9003,
    /// SMS gateway error
    SmsGatewayError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::AmbiguousLookup => "Lookup requires an id or a unique field value",
            Self::ReferentialConflict => "Delete blocked by existing associations",
            Self::TreeCycle => "Operation would create a cycle in the tree",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid telephone or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account is disabled",
            Self::SmsCodeExpired => "Verification code expired",
            Self::SmsCodeInvalid => "Verification code invalid",
            Self::TooManyAttempts => "Too many verification attempts",

            Self::PermissionDenied => "Permission denied",
            Self::SuperuserProtected => "The superuser cannot be modified",
            Self::CannotDeleteSelf => "Cannot delete the current user",

            Self::UserNotFound => "User not found",

            Self::DishImageNotFound => "Dish image not found",
            Self::InvalidImageDirective => "Invalid image operation",
            Self::PublishNotConfigured => "Publishing is not configured",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::StorageError => "File storage error",
            Self::SmsGatewayError => "SMS gateway error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,
            7 => Self::AmbiguousLookup,
            8 => Self::ReferentialConflict,
            9 => Self::TreeCycle,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::SmsCodeExpired,
            1007 => Self::SmsCodeInvalid,
            1008 => Self::TooManyAttempts,

            2001 => Self::PermissionDenied,
            2002 => Self::SuperuserProtected,
            2003 => Self::CannotDeleteSelf,

            3001 => Self::UserNotFound,

            6001 => Self::DishImageNotFound,
            6002 => Self::InvalidImageDirective,
            6003 => Self::PublishNotConfigured,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::StorageError,
            9004 => Self::SmsGatewayError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::ReferentialConflict,
            ErrorCode::TreeCycle,
            ErrorCode::NotAuthenticated,
            ErrorCode::PermissionDenied,
            ErrorCode::DishImageNotFound,
            ErrorCode::InternalError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::PermissionDenied).unwrap();
        assert_eq!(json, "2001");
    }
}
