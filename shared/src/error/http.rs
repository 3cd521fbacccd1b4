//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // Validation / malformed input (400)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::AmbiguousLookup
            | Self::InvalidImageDirective => StatusCode::BAD_REQUEST,

            // Authentication (401)
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SmsCodeExpired
            | Self::SmsCodeInvalid => StatusCode::UNAUTHORIZED,

            // Authorization (403)
            Self::PermissionDenied
            | Self::SuperuserProtected
            | Self::CannotDeleteSelf
            | Self::AccountDisabled => StatusCode::FORBIDDEN,

            // Not found (404)
            Self::NotFound | Self::UserNotFound | Self::DishImageNotFound => {
                StatusCode::NOT_FOUND
            }

            // Conflict (409)
            Self::AlreadyExists | Self::ReferentialConflict => StatusCode::CONFLICT,

            // Business rule (422)
            Self::TreeCycle | Self::PublishNotConfigured => StatusCode::UNPROCESSABLE_ENTITY,

            // Throttling (429)
            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,

            // System (500 / 502)
            Self::SmsGatewayError => StatusCode::BAD_GATEWAY,
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::StorageError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ReferentialConflict.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
