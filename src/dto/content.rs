use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BlogPayload {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FaqPayload {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContentPayload {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuLinkPayload {
    pub menu_name: String,
    pub menu_url: String,
    pub target_window: Option<String>,
    pub menu_group: Option<String>,
    pub is_dropdown: Option<bool>,
    pub dropdown_items: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnvelopeSchemaPayload {
    pub title: String,
    pub text: String,
}
