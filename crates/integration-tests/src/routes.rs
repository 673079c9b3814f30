//! Request handlers for the fake admin API.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::state::{
    CustomerRow, SharedStore, Store, StoreFrontRow, id_from_value, value_as_query,
};
use crate::{ADMIN_EMAIL, ADMIN_PASSWORD};

/// Bearer token handed out on a successful login.
pub const ACCESS_TOKEN: &str = "fake-admin-token";

const DEFAULT_ORDER_LIMIT: usize = 20;

/// Most customers a search returns.
pub const SEARCH_LIMIT: usize = 10;

/// Build the router; everything lives under `/api`.
pub fn router(store: SharedStore) -> Router {
    let admin = Router::new()
        .route("/admin/login", post(login))
        .route("/admin/orders", get(list_orders))
        .route("/admin/storefronts", post(create_store_front))
        .route("/admin/customers", post(create_customer))
        .route("/admin/customers/search", get(search_customers));

    Router::new()
        .nest("/api", admin)
        .layer(middleware::from_fn_with_state(store.clone(), record_request))
        .with_state(store)
}

async fn record_request(State(store): State<SharedStore>, request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_owned(), ToString::to_string);
    store.lock().requests.push(target);
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        == Some(ACCESS_TOKEN)
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(Json(body): Json<LoginRequest>) -> Response {
    if body.email == ADMIN_EMAIL && body.password == ADMIN_PASSWORD {
        Json(json!({ "data": { "access_token": ACCESS_TOKEN, "token_type": "bearer" } }))
            .into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "invalid credentials")
    }
}

async fn list_orders(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthenticated");
    }
    let limit = match params.get("limit").map(|l| l.parse::<usize>()) {
        None => DEFAULT_ORDER_LIMIT,
        Some(Ok(limit)) => limit,
        Some(Err(_)) => return error(StatusCode::BAD_REQUEST, "invalid limit"),
    };

    let data = list_order_rows(&store.lock(), &params, limit);
    Json(json!({ "data": data })).into_response()
}

fn list_order_rows(store: &Store, params: &HashMap<String, String>, limit: usize) -> Vec<Value> {
    let ignore_filters = store.behavior.ignore_order_filters;
    let limit = if ignore_filters { usize::MAX } else { limit };
    let customer_filter = params.get("customer_id").filter(|_| !ignore_filters);

    let mut orders: Vec<_> = store
        .orders
        .iter()
        .filter(|order| {
            customer_filter.is_none_or(|wanted| {
                order.customer_id.as_ref().map(value_as_query).as_ref() == Some(wanted)
            })
        })
        .collect();
    orders.sort_by_key(|order| std::cmp::Reverse(order.id));
    if !ignore_filters && params.get("order").is_some_and(|o| o == "asc") {
        orders.reverse();
    }

    orders
        .into_iter()
        .take(limit)
        .map(|order| store.order_json(order))
        .collect()
}

fn required_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn created(result: Result<Value, Response>) -> Response {
    match result {
        Ok(data) => (StatusCode::CREATED, Json(json!({ "data": data }))).into_response(),
        Err(response) => response,
    }
}

async fn create_store_front(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthenticated");
    }
    let result = insert_store_front(&mut store.lock(), &body);
    created(result)
}

fn insert_store_front(store: &mut Store, body: &Value) -> Result<Value, Response> {
    if store.behavior.reject_creates {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "store-front creation disabled"));
    }
    let (Some(name), Some(slug), Some(currency)) = (
        required_str(body, "name"),
        required_str(body, "slug"),
        required_str(body, "currency"),
    ) else {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "name, slug and currency are required",
        ));
    };
    if store.store_fronts.iter().any(|s| s.slug == slug) {
        return Err(error(StatusCode::BAD_REQUEST, "slug has already been taken"));
    }

    let row = StoreFrontRow {
        id: store.next_id(),
        name: name.to_owned(),
        slug: slug.to_owned(),
        currency: currency.to_owned(),
    };
    let data = store.store_front_json(&row);
    store.store_fronts.push(row);
    Ok(data)
}

async fn create_customer(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthenticated");
    }
    let result = insert_customer(&mut store.lock(), &body);
    created(result)
}

fn insert_customer(store: &mut Store, body: &Value) -> Result<Value, Response> {
    if store.behavior.reject_creates {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "customer creation disabled"));
    }
    let (Some(first_name), Some(email), Some(phone), Some(store_front_id)) = (
        required_str(body, "first_name"),
        required_str(body, "email"),
        required_str(body, "phone"),
        body.get("store_front_id").and_then(id_from_value),
    ) else {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "first_name, email, phone and store_front_id are required",
        ));
    };
    if !store.store_fronts.iter().any(|s| s.id == store_front_id) {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "store-front does not exist"));
    }
    if store.customers.iter().any(|c| c.email == email) {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "email has already been taken"));
    }
    if store.customers.iter().any(|c| c.phone == phone) {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "phone has already been taken"));
    }

    let row = CustomerRow {
        id: store.next_id(),
        store_front_id,
        first_name: first_name.to_owned(),
        last_name: required_str(body, "last_name").unwrap_or_default().to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
    };
    let data = store.customer_json(&row);
    store.customers.push(row);
    Ok(data)
}

async fn search_customers(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthenticated");
    }
    let term = params.get("q").map_or("", String::as_str);
    let data = search_customer_rows(&store.lock(), term, params.get("store_front_id"));
    Json(json!({ "data": data })).into_response()
}

/// Case-insensitive substring match on first name, last name or phone,
/// newest first, capped like the real dropdown search.
fn search_customer_rows(store: &Store, term: &str, tenant: Option<&String>) -> Vec<Value> {
    let term = term.to_lowercase();
    let tenant = tenant.filter(|_| !store.behavior.ignore_tenant_filter);

    store
        .customers
        .iter()
        .rev()
        .filter(|c| c.matches(&term))
        .filter(|c| tenant.is_none_or(|t| c.store_front_id.to_string() == *t))
        .take(SEARCH_LIMIT)
        .map(|c| store.customer_json(c))
        .collect()
}
