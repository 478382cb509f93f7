use std::path::Path;

use chrono::Utc;
use chrono_tz::Europe::Istanbul;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tokio::fs;
use uuid::Uuid;

use crate::{
    dto::uploads::{FileUploadResponse, PhotoUploadResponse},
    entity::{
        files::{ActiveModel as FileActive, Column as FileCol, Entity as Files, Model as FileModel},
        orders::{ActiveModel as OrderActive, Entity as Orders, Model as OrderModel},
        photos::{ActiveModel as PhotoActive, Column as PhotoCol, Entity as Photos, Model as PhotoModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{FileRecord, Photo},
    response::{ApiResponse, Meta},
    services::order_service::json_paths,
    state::AppState,
};

pub const ALLOWED_FILE_EXTENSIONS: [&str; 5] = ["pdf", "docx", "xlsx", "xls", "pptx"];

pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_FILE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Unique upload name from timestamp, caller id and a random suffix.
pub fn unique_name(user_id: Uuid, original: Option<&str>) -> String {
    let timestamp = Utc::now().with_timezone(&Istanbul).format("%Y%m%d_%H%M%S");
    let suffix: u32 = rand::random();
    match original.and_then(|name| name.rsplit_once('.')) {
        Some((_, ext)) => format!("{timestamp}_{user_id}_{suffix:08x}.{ext}"),
        None => format!("{timestamp}_{user_id}_{suffix:08x}"),
    }
}

pub async fn save_upload(dir: &str, name: &str, bytes: &[u8]) -> AppResult<String> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let path = Path::new(dir).join(name);
    fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    Ok(path.to_string_lossy().into_owned())
}

pub async fn remove_file(path: &str) {
    if let Err(err) = fs::remove_file(path).await {
        tracing::warn!(path, error = %err, "failed to remove uploaded file");
    }
}

async fn order_for_access(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if order.customer_id != user.user_id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    Ok(order)
}

pub async fn upload_photos(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    uploads: Vec<(Option<String>, Vec<u8>)>,
) -> AppResult<ApiResponse<PhotoUploadResponse>> {
    let order = order_for_access(state, user, order_id).await?;

    let dir = format!("{}/photos", state.config.upload_dir);
    let mut saved = Vec::new();
    let mut paths = json_paths(&order.photos);

    for (_filename, bytes) in uploads {
        let name = unique_name(user.user_id, None);
        let path = save_upload(&dir, &name, &bytes).await?;

        let photo = PhotoActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            path: Set(path.clone()),
        }
        .insert(&state.orm)
        .await?;

        saved.push(photo_from_entity(photo));
        paths.push(path);
    }

    // Mirror the rows into the order's JSON path list.
    let mut active: OrderActive = order.into();
    active.photos = Set(serde_json::Value::from(paths.clone()));
    active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Photos uploaded",
        PhotoUploadResponse {
            photos: saved,
            photo_paths: paths,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_photos(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<Vec<String>>> {
    let order = order_for_access(state, user, order_id).await?;

    let paths = Photos::find()
        .filter(PhotoCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|photo| photo.path)
        .collect();

    Ok(ApiResponse::success("OK", paths, Some(Meta::empty())))
}

pub async fn delete_photo(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    photo_name: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let order = order_for_access(state, user, order_id).await?;

    let photo = Photos::find()
        .filter(PhotoCol::OrderId.eq(order.id))
        .filter(PhotoCol::Path.contains(photo_name))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    remove_file(&photo.path).await;
    let removed_path = photo.path.clone();
    Photos::delete_by_id(photo.id).exec(&state.orm).await?;

    let paths: Vec<String> = json_paths(&order.photos)
        .into_iter()
        .filter(|p| p != &removed_path)
        .collect();
    let mut active: OrderActive = order.into();
    active.photos = Set(serde_json::Value::from(paths));
    active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Photo deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn upload_files(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    uploads: Vec<(Option<String>, Vec<u8>)>,
) -> AppResult<ApiResponse<FileUploadResponse>> {
    let order = order_for_access(state, user, order_id).await?;

    let dir = format!("{}/files", state.config.upload_dir);
    let mut saved = Vec::new();
    let mut paths = json_paths(&order.files);

    for (filename, bytes) in uploads {
        let filename = filename.unwrap_or_default();
        if !allowed_file(&filename) {
            return Err(AppError::BadRequest(
                "Invalid file type. Only PDF, Word and Excel files are allowed".into(),
            ));
        }

        let name = unique_name(user.user_id, Some(&filename));
        let path = save_upload(&dir, &name, &bytes).await?;

        let file = FileActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            path: Set(path.clone()),
        }
        .insert(&state.orm)
        .await?;

        saved.push(file_from_entity(file));
        paths.push(path);
    }

    let mut active: OrderActive = order.into();
    active.files = Set(serde_json::Value::from(paths.clone()));
    active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Files uploaded",
        FileUploadResponse {
            files: saved,
            file_paths: paths,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_files(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<Vec<String>>> {
    let order = order_for_access(state, user, order_id).await?;

    let paths = Files::find()
        .filter(FileCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|file| file.path)
        .collect();

    Ok(ApiResponse::success("OK", paths, Some(Meta::empty())))
}

pub async fn delete_file(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    file_name: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let order = order_for_access(state, user, order_id).await?;

    let file = Files::find()
        .filter(FileCol::OrderId.eq(order.id))
        .filter(FileCol::Path.contains(file_name))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    remove_file(&file.path).await;
    let removed_path = file.path.clone();
    Files::delete_by_id(file.id).exec(&state.orm).await?;

    let paths: Vec<String> = json_paths(&order.files)
        .into_iter()
        .filter(|p| p != &removed_path)
        .collect();
    let mut active: OrderActive = order.into();
    active.files = Set(serde_json::Value::from(paths));
    active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "File deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn photo_from_entity(model: PhotoModel) -> Photo {
    Photo {
        id: model.id,
        order_id: model.order_id,
        path: model.path,
    }
}

fn file_from_entity(model: FileModel) -> FileRecord {
    FileRecord {
        id: model.id,
        order_id: model.order_id,
        path: model.path,
    }
}

#[cfg(test)]
mod tests {
    use super::{allowed_file, unique_name};
    use uuid::Uuid;

    #[test]
    fn allowed_file_accepts_whitelisted_extensions() {
        assert!(allowed_file("dilekce.pdf"));
        assert!(allowed_file("mektup.DOCX"));
        assert!(allowed_file("tablo.xlsx"));
    }

    #[test]
    fn allowed_file_rejects_everything_else() {
        assert!(!allowed_file("resim.png"));
        assert!(!allowed_file("script.sh"));
        assert!(!allowed_file("no_extension"));
    }

    #[test]
    fn unique_name_keeps_extension_and_embeds_user() {
        let user_id = Uuid::new_v4();
        let name = unique_name(user_id, Some("rapor.pdf"));
        assert!(name.ends_with(".pdf"));
        assert!(name.contains(&user_id.to_string()));
    }

    #[test]
    fn unique_names_differ() {
        let user_id = Uuid::new_v4();
        assert_ne!(unique_name(user_id, None), unique_name(user_id, None));
    }
}
