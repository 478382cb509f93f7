use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{OrderList, OrderPayload, PendingStatusResponse},
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_customer},
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

/// Literal pending status stamped on new orders and compared verbatim by
/// reporting and comment eligibility.
pub const STATUS_PENDING: &str = "Sipariş Bekleniyor";

pub const DEFAULT_LETTER_TYPE: &str = "Cezaevine Mektup";

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: OrderPayload,
) -> AppResult<ApiResponse<Order>> {
    ensure_customer(user)?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        date: NotSet,
        // Customer identity always comes from the caller, never the payload.
        customer_name: Set(user.full_name()),
        customer_id: Set(user.user_id),
        sender_name: Set(payload.sender_name.unwrap_or_default()),
        sender_surname: Set(payload.sender_surname.unwrap_or_default()),
        sender_city: Set(payload.sender_city.unwrap_or_default()),
        sender_district: Set(payload.sender_district.unwrap_or_default()),
        sender_address: Set(payload.sender_address.unwrap_or_default()),
        receiver_name: Set(payload.receiver_name.unwrap_or_default()),
        receiver_surname: Set(payload.receiver_surname.unwrap_or_default()),
        receiver_city: Set(payload.receiver_city.unwrap_or_default()),
        receiver_phone: Set(payload.receiver_phone.unwrap_or_default()),
        jail_name: Set(payload.jail_name.unwrap_or_default()),
        jail_address: Set(payload.jail_address.unwrap_or_default()),
        father_name: Set(payload.father_name.unwrap_or_default()),
        ward_id: Set(payload.ward_id.unwrap_or_default()),
        letter_type: Set(payload
            .letter_type
            .unwrap_or_else(|| DEFAULT_LETTER_TYPE.to_string())),
        order_price: Set(payload.order_price.unwrap_or(0)),
        status: Set(payload.status.unwrap_or_else(|| STATUS_PENDING.to_string())),
        envelope_text: Set(payload.envelope_text.unwrap_or_default()),
        envelope_color: Set(payload.envelope_color.unwrap_or_default()),
        paper_color: Set(payload.paper_color.unwrap_or_default()),
        cardpostals: Set(serde_json::Value::from(
            payload.cardpostals.unwrap_or_default(),
        )),
        photos: Set(serde_json::json!([])),
        files: Set(serde_json::json!([])),
        smell: Set(payload.smell.unwrap_or_default()),
        shipment_type: Set(payload.shipment_type.unwrap_or_default()),
        tax: Set(payload.tax.unwrap_or(0)),
        discount: Set(payload.discount.unwrap_or(0)),
        shipment_date: Set(payload.shipment_date.unwrap_or_default()),
        add_date: Set(payload.add_date.unwrap_or(1)),
        track_id: Set(payload.track_id.unwrap_or_default()),
        track_link: Set(payload.track_link.unwrap_or_default()),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order created",
        order_from_entity(order),
        None,
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: OrderPayload,
) -> AppResult<ApiResponse<Order>> {
    ensure_customer(user)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // Strict ownership: no admin bypass on this path.
    if existing.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let mut active: OrderActive = existing.into();
    apply_payload(&mut active, payload);
    let order = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if existing.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    Orders::delete_by_id(id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if existing.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::success(
        "OK",
        order_from_entity(existing),
        Some(Meta::empty()),
    ))
}

/// True iff any order still carries the literal pending status.
pub async fn has_pending_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PendingStatusResponse>> {
    ensure_customer(user)?;

    let pending = Orders::find()
        .filter(OrderCol::Status.eq(STATUS_PENDING))
        .count(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "OK",
        PendingStatusResponse {
            not_send: pending > 0,
        },
        Some(Meta::empty()),
    ))
}

pub async fn orders_for_customer(state: &AppState, customer_id: Uuid) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .order_by_desc(OrderCol::Date)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();
    Ok(orders)
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let mut finder = Orders::find().filter(condition);

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::Date),
        SortOrder::Desc => finder.order_by_desc(OrderCol::Date),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn admin_get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Order found",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn admin_create_order(
    state: &AppState,
    user: &AuthUser,
    payload: OrderPayload,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    create_order(state, user, payload).await
}

pub async fn admin_update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: OrderPayload,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    apply_payload(&mut active, payload);
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "admin_order_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn admin_delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Orders::delete_by_id(id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "admin_order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn apply_payload(active: &mut OrderActive, payload: OrderPayload) {
    if let Some(v) = payload.sender_name {
        active.sender_name = Set(v);
    }
    if let Some(v) = payload.sender_surname {
        active.sender_surname = Set(v);
    }
    if let Some(v) = payload.sender_city {
        active.sender_city = Set(v);
    }
    if let Some(v) = payload.sender_district {
        active.sender_district = Set(v);
    }
    if let Some(v) = payload.sender_address {
        active.sender_address = Set(v);
    }
    if let Some(v) = payload.receiver_name {
        active.receiver_name = Set(v);
    }
    if let Some(v) = payload.receiver_surname {
        active.receiver_surname = Set(v);
    }
    if let Some(v) = payload.receiver_city {
        active.receiver_city = Set(v);
    }
    if let Some(v) = payload.receiver_phone {
        active.receiver_phone = Set(v);
    }
    if let Some(v) = payload.jail_name {
        active.jail_name = Set(v);
    }
    if let Some(v) = payload.jail_address {
        active.jail_address = Set(v);
    }
    if let Some(v) = payload.father_name {
        active.father_name = Set(v);
    }
    if let Some(v) = payload.ward_id {
        active.ward_id = Set(v);
    }
    if let Some(v) = payload.letter_type {
        active.letter_type = Set(v);
    }
    if let Some(v) = payload.order_price {
        active.order_price = Set(v);
    }
    if let Some(v) = payload.status {
        active.status = Set(v);
    }
    if let Some(v) = payload.envelope_text {
        active.envelope_text = Set(v);
    }
    if let Some(v) = payload.envelope_color {
        active.envelope_color = Set(v);
    }
    if let Some(v) = payload.paper_color {
        active.paper_color = Set(v);
    }
    if let Some(v) = payload.cardpostals {
        active.cardpostals = Set(serde_json::Value::from(v));
    }
    if let Some(v) = payload.smell {
        active.smell = Set(v);
    }
    if let Some(v) = payload.shipment_type {
        active.shipment_type = Set(v);
    }
    if let Some(v) = payload.tax {
        active.tax = Set(v);
    }
    if let Some(v) = payload.discount {
        active.discount = Set(v);
    }
    if let Some(v) = payload.shipment_date {
        active.shipment_date = Set(v);
    }
    if let Some(v) = payload.add_date {
        active.add_date = Set(v);
    }
    if let Some(v) = payload.track_id {
        active.track_id = Set(v);
    }
    if let Some(v) = payload.track_link {
        active.track_link = Set(v);
    }
}

pub fn json_paths(value: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

pub fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        date: model.date.with_timezone(&chrono::Utc),
        customer_name: model.customer_name,
        customer_id: model.customer_id,
        sender_name: model.sender_name,
        sender_surname: model.sender_surname,
        sender_city: model.sender_city,
        sender_district: model.sender_district,
        sender_address: model.sender_address,
        receiver_name: model.receiver_name,
        receiver_surname: model.receiver_surname,
        receiver_city: model.receiver_city,
        receiver_phone: model.receiver_phone,
        jail_name: model.jail_name,
        jail_address: model.jail_address,
        father_name: model.father_name,
        ward_id: model.ward_id,
        letter_type: model.letter_type,
        order_price: model.order_price,
        status: model.status,
        envelope_text: model.envelope_text,
        envelope_color: model.envelope_color,
        paper_color: model.paper_color,
        cardpostals: json_paths(&model.cardpostals),
        photos: json_paths(&model.photos),
        files: json_paths(&model.files),
        smell: model.smell,
        shipment_type: model.shipment_type,
        tax: model.tax,
        discount: model.discount,
        shipment_date: model.shipment_date,
        add_date: model.add_date,
        track_id: model.track_id,
        track_link: model.track_link,
    }
}
