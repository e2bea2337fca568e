//! Request DTOs
//!
//! Data structures for API request bodies. Browser-flow endpoints post
//! form-encoded bodies, so everything here derives plain `Deserialize`.

use serde::Deserialize;
use validator::Validate;

use crate::domain::EntityKind;

/// Add comment request (form body of POST /comment/add/{discuss_post_id})
#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    /// What the comment targets: "post" or "comment"
    pub entity_kind: EntityKind,

    /// Id of the targeted post or comment
    pub entity_id: i64,

    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// Password change request (form body of POST /user/forgetPassword)
///
/// Blank-field checks are deliberately NOT validator rules: the password
/// flow reports them through the envelope in a fixed order.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default, alias = "oldPassword")]
    pub old_password: String,

    #[serde(default, alias = "newPassword")]
    pub new_password: String,
}

/// Remote avatar handoff request (form body of POST /user/header/url)
#[derive(Debug, Deserialize)]
pub struct UpdateHeaderUrlRequest {
    #[serde(default, alias = "fileName")]
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_comment_request_decodes_from_form() {
        let request: AddCommentRequest =
            serde_urlencoded::from_str("entity_kind=post&entity_id=42&content=hello").unwrap();

        assert_eq!(request.entity_kind, EntityKind::Post);
        assert_eq!(request.entity_id, 42);
        assert_eq!(request.content, "hello");
    }

    #[test]
    fn test_add_comment_request_rejects_unknown_kind() {
        let result: Result<AddCommentRequest, _> =
            serde_urlencoded::from_str("entity_kind=user&entity_id=42&content=hello");

        assert!(result.is_err());
    }

    #[test]
    fn test_change_password_request_defaults_missing_fields_to_blank() {
        let request: ChangePasswordRequest = serde_urlencoded::from_str("").unwrap();

        assert_eq!(request.old_password, "");
        assert_eq!(request.new_password, "");
    }

    #[test]
    fn test_change_password_request_accepts_camel_case_fields() {
        let request: ChangePasswordRequest =
            serde_urlencoded::from_str("oldPassword=a&newPassword=b").unwrap();

        assert_eq!(request.old_password, "a");
        assert_eq!(request.new_password, "b");
    }
}
