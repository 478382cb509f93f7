use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentPayload {
    pub title: String,
    pub text: String,
    pub star: i32,
}

/// Admin variant: the customer reference is caller-supplied.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminCommentPayload {
    pub title: String,
    pub text: String,
    pub star: i32,
    pub customer_name: String,
    pub customer_id: Option<Uuid>,
}
