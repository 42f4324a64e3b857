//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound(Snowflake),

    #[error("No post found with id {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found")]
    CommentNotFound(Snowflake),

    #[error("No file exists")]
    FileNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{field} too long: max {max} characters")]
    ContentTooLong { field: &'static str, max: usize },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("You cannot follow yourself")]
    CannotFollowSelf,

    #[error("Comment not found")]
    EmptyComment,

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Invalid identity token: {0}")]
    InvalidIdentityToken(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You do not have permission to perform this action")]
    AdminRequired,

    #[error("You are not allowed to modify this post")]
    NotPostCreator,

    #[error("You are not allowed to delete this comment")]
    NotAllowedToDeleteComment,

    #[error("files can't be updated")]
    FilesImmutable,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    // =========================================================================
    // Consistency Errors
    // =========================================================================
    #[error("Inconsistency found in follow state, try again later")]
    FollowInconsistency {
        follower: Snowflake,
        followee: Snowflake,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::FileNotFound(_) => "UNKNOWN_FILE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::EmptyComment => "EMPTY_COMMENT",

            // Authentication
            Self::InvalidIdentityToken(_) => "INVALID_IDENTITY_TOKEN",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotPostCreator => "NOT_POST_CREATOR",
            Self::NotAllowedToDeleteComment => "NOT_ALLOWED_TO_DELETE_COMMENT",
            Self::FilesImmutable => "FILES_IMMUTABLE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::FileAlreadyExists(_) => "FILE_ALREADY_EXISTS",

            // Consistency
            Self::FollowInconsistency { .. } => "FOLLOW_INCONSISTENCY",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::FileNotFound(_)
        )
    }

    /// Check if this is a validation error.
    ///
    /// A follow inconsistency is reported as a bad request: the client is
    /// expected to retry once the two sides agree again.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ContentTooLong { .. }
                | Self::UnsupportedMediaType(_)
                | Self::CannotFollowSelf
                | Self::EmptyComment
                | Self::FollowInconsistency { .. }
        )
    }

    /// Check if this is an authentication error (caller identity unknown)
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidIdentityToken(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AdminRequired
                | Self::NotPostCreator
                | Self::NotAllowedToDeleteComment
                | Self::FilesImmutable
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::FileAlreadyExists(_))
    }
}
