use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{FileRecord, Photo};

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderIdQuery {
    pub order_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MediaQuery {
    pub model_type: String,
    pub field_name: String,
    pub record_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoUploadResponse {
    pub photos: Vec<Photo>,
    pub photo_paths: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileUploadResponse {
    pub files: Vec<FileRecord>,
    pub file_paths: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaUploadResponse {
    pub saved_files: Vec<String>,
}
