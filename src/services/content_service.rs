use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::{
    dto::content::{BlogPayload, ContentPayload, FaqPayload, MenuLinkPayload},
    dto::uploads::MediaQuery,
    entity::{
        blogs::{ActiveModel as BlogActive, Entity as Blogs, Model as BlogModel},
        contents::{ActiveModel as ContentActive, Entity as Contents, Model as ContentModel},
        faqs::{ActiveModel as FaqActive, Entity as Faqs, Model as FaqModel},
        menu_links::{ActiveModel as MenuLinkActive, Entity as MenuLinks, Model as MenuLinkModel},
    },
    error::{AppError, AppResult},
    models::{Blog, Content, Faq, MenuLink},
    response::{ApiResponse, Meta},
    services::order_service::json_paths,
    state::AppState,
};

/// Lowercase, transliterate the Turkish diacritic set, then collapse
/// whitespace runs to single hyphens. Idempotent.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let transliterated: String = lowered
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            _ => c,
        })
        .collect();
    transliterated.split_whitespace().collect::<Vec<_>>().join("-")
}

pub async fn create_blog(
    state: &AppState,
    payload: BlogPayload,
    icon: Option<String>,
    main_photo: Option<String>,
) -> AppResult<ApiResponse<Blog>> {
    let slug = slugify(&payload.title);

    let blog = BlogActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        slug: Set(slug),
        text: Set(payload.text),
        icon: Set(icon),
        main_photo: Set(main_photo),
        other_photos: Set(serde_json::json!([])),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Blog created",
        blog_from_entity(blog),
        None,
    ))
}

pub async fn list_blogs(state: &AppState) -> AppResult<ApiResponse<Vec<Blog>>> {
    let blogs = Blogs::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(blog_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", blogs, Some(Meta::empty())))
}

pub async fn update_blog(
    state: &AppState,
    id: Uuid,
    payload: BlogPayload,
) -> AppResult<ApiResponse<Blog>> {
    let existing = Blogs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: BlogActive = existing.into();
    active.slug = Set(slugify(&payload.title));
    active.title = Set(payload.title);
    active.text = Set(payload.text);
    let blog = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Blog updated",
        blog_from_entity(blog),
        Some(Meta::empty()),
    ))
}

pub async fn delete_blog(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    Blogs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Blogs::delete_by_id(id).exec(&state.orm).await?;

    Ok(ApiResponse::success(
        "Blog deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn create_faq(state: &AppState, payload: FaqPayload) -> AppResult<ApiResponse<Faq>> {
    let slug = slugify(&payload.title);

    let faq = FaqActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        slug: Set(slug),
        text: Set(payload.text),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success("FAQ created", faq_from_entity(faq), None))
}

pub async fn list_faqs(state: &AppState) -> AppResult<ApiResponse<Vec<Faq>>> {
    let faqs = Faqs::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(faq_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", faqs, Some(Meta::empty())))
}

pub async fn update_faq(
    state: &AppState,
    id: Uuid,
    payload: FaqPayload,
) -> AppResult<ApiResponse<Faq>> {
    let existing = Faqs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: FaqActive = existing.into();
    active.slug = Set(slugify(&payload.title));
    active.title = Set(payload.title);
    active.text = Set(payload.text);
    let faq = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "FAQ updated",
        faq_from_entity(faq),
        Some(Meta::empty()),
    ))
}

pub async fn delete_faq(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    Faqs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Faqs::delete_by_id(id).exec(&state.orm).await?;

    Ok(ApiResponse::success(
        "FAQ deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn create_content(
    state: &AppState,
    payload: ContentPayload,
) -> AppResult<ApiResponse<Content>> {
    let slug = slugify(&payload.title);

    let content = ContentActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        slug: Set(slug),
        text: Set(payload.text),
        main_photo: Set(None),
        other_photos: Set(serde_json::json!([])),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Content created",
        content_from_entity(content),
        None,
    ))
}

pub async fn list_contents(state: &AppState) -> AppResult<ApiResponse<Vec<Content>>> {
    let contents = Contents::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(content_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", contents, Some(Meta::empty())))
}

pub async fn update_content(
    state: &AppState,
    id: Uuid,
    payload: ContentPayload,
) -> AppResult<ApiResponse<Content>> {
    let existing = Contents::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ContentActive = existing.into();
    active.slug = Set(slugify(&payload.title));
    active.title = Set(payload.title);
    active.text = Set(payload.text);
    let content = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Content updated",
        content_from_entity(content),
        Some(Meta::empty()),
    ))
}

pub async fn delete_content(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    Contents::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Contents::delete_by_id(id).exec(&state.orm).await?;

    Ok(ApiResponse::success(
        "Content deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn create_menu_link(
    state: &AppState,
    payload: MenuLinkPayload,
) -> AppResult<ApiResponse<MenuLink>> {
    let is_dropdown = payload.is_dropdown.unwrap_or(false);
    let dropdown_items = payload.dropdown_items.unwrap_or_default();

    if is_dropdown && dropdown_items.is_empty() {
        return Err(AppError::BadRequest(
            "dropdown_items cannot be empty if is_dropdown is true".into(),
        ));
    }

    let link = MenuLinkActive {
        id: Set(Uuid::new_v4()),
        menu_name: Set(payload.menu_name),
        menu_url: Set(payload.menu_url),
        target_window: Set(payload
            .target_window
            .unwrap_or_else(|| "this_window".to_string())),
        menu_group: Set(payload.menu_group.unwrap_or_else(|| "navbar".to_string())),
        is_dropdown: Set(is_dropdown),
        dropdown_items: Set(serde_json::Value::from(dropdown_items)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Menu link created",
        menu_link_from_entity(link),
        None,
    ))
}

pub async fn list_menu_links(state: &AppState) -> AppResult<ApiResponse<Vec<MenuLink>>> {
    let links = MenuLinks::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(menu_link_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", links, Some(Meta::empty())))
}

pub async fn get_menu_link(state: &AppState, id: Uuid) -> AppResult<ApiResponse<MenuLink>> {
    let link = MenuLinks::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "OK",
        menu_link_from_entity(link),
        Some(Meta::empty()),
    ))
}

pub async fn update_menu_link(
    state: &AppState,
    id: Uuid,
    payload: MenuLinkPayload,
) -> AppResult<ApiResponse<MenuLink>> {
    let existing = MenuLinks::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: MenuLinkActive = existing.into();
    active.menu_name = Set(payload.menu_name);
    active.menu_url = Set(payload.menu_url);
    if let Some(v) = payload.target_window {
        active.target_window = Set(v);
    }
    if let Some(v) = payload.menu_group {
        active.menu_group = Set(v);
    }
    active.updated_at = Set(Utc::now().into());
    let link = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Menu link updated",
        menu_link_from_entity(link),
        Some(Meta::empty()),
    ))
}

pub async fn delete_menu_link(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    MenuLinks::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    MenuLinks::delete_by_id(id).exec(&state.orm).await?;

    Ok(ApiResponse::success(
        "Menu link deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub fn validate_media_query(query: &MediaQuery) -> AppResult<()> {
    if query.model_type != "blog" && query.model_type != "content" {
        return Err(AppError::BadRequest(
            "Invalid model_type. Choose 'blog' or 'content'".into(),
        ));
    }
    if query.field_name != "main_photo" && query.field_name != "other_photos" {
        return Err(AppError::BadRequest(
            "Invalid field_name. Choose 'main_photo' or 'other_photos'".into(),
        ));
    }
    Ok(())
}

/// Attach freshly saved upload paths to a blog or content record. The first
/// file wins for `main_photo`; `other_photos` is extended.
pub async fn attach_media(
    state: &AppState,
    query: &MediaQuery,
    saved: &[String],
) -> AppResult<()> {
    match query.model_type.as_str() {
        "blog" => {
            let blog = Blogs::find_by_id(query.record_id)
                .one(&state.orm)
                .await?
                .ok_or(AppError::NotFound)?;

            let mut photos = json_paths(&blog.other_photos);
            let mut active: BlogActive = blog.into();
            if query.field_name == "main_photo" {
                active.main_photo = Set(saved.first().cloned());
            } else {
                photos.extend(saved.iter().cloned());
                active.other_photos = Set(serde_json::Value::from(photos));
            }
            active.update(&state.orm).await?;
        }
        _ => {
            let content = Contents::find_by_id(query.record_id)
                .one(&state.orm)
                .await?
                .ok_or(AppError::NotFound)?;

            let mut photos = json_paths(&content.other_photos);
            let mut active: ContentActive = content.into();
            if query.field_name == "main_photo" {
                active.main_photo = Set(saved.first().cloned());
            } else {
                photos.extend(saved.iter().cloned());
                active.other_photos = Set(serde_json::Value::from(photos));
            }
            active.update(&state.orm).await?;
        }
    }
    Ok(())
}

/// Detach the given paths from a content record. Only content records
/// support detaching media.
pub async fn remove_media(
    state: &AppState,
    query: &MediaQuery,
    paths: &[String],
) -> AppResult<()> {
    if query.model_type != "content" {
        return Err(AppError::BadRequest(
            "Invalid model_type. Choose 'content'".into(),
        ));
    }

    let content = Contents::find_by_id(query.record_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ContentActive = content.clone().into();
    if query.field_name == "main_photo" {
        if let Some(main) = content.main_photo.as_ref() {
            if paths.contains(main) {
                active.main_photo = Set(None);
            }
        }
    } else {
        let kept: Vec<String> = json_paths(&content.other_photos)
            .into_iter()
            .filter(|p| !paths.contains(p))
            .collect();
        active.other_photos = Set(serde_json::Value::from(kept));
    }
    active.update(&state.orm).await?;

    Ok(())
}

fn blog_from_entity(model: BlogModel) -> Blog {
    Blog {
        id: model.id,
        title: model.title,
        slug: model.slug,
        text: model.text,
        icon: model.icon,
        main_photo: model.main_photo,
        other_photos: json_paths(&model.other_photos),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn faq_from_entity(model: FaqModel) -> Faq {
    Faq {
        id: model.id,
        title: model.title,
        slug: model.slug,
        text: model.text,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn content_from_entity(model: ContentModel) -> Content {
    Content {
        id: model.id,
        title: model.title,
        slug: model.slug,
        text: model.text,
        main_photo: model.main_photo,
        other_photos: json_paths(&model.other_photos),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn menu_link_from_entity(model: MenuLinkModel) -> MenuLink {
    MenuLink {
        id: model.id,
        menu_name: model.menu_name,
        menu_url: model.menu_url,
        target_window: model.target_window,
        menu_group: model.menu_group,
        is_dropdown: model.is_dropdown,
        dropdown_items: json_paths(&model.dropdown_items),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_transliterates_and_hyphenates() {
        assert_eq!(slugify("Çağrı Öğüt"), "cagri-ogut");
        assert_eq!(slugify("Sıkça   Sorulan Sorular"), "sikca-sorulan-sorular");
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = slugify("Gönderim Şartları");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn slugify_plain_ascii_passthrough() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }
}
