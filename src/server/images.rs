//! Image-management routes.
//!
//! Every failure answers with `{ success: false, message }` so clients can
//! surface the message as is.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error, warn};

use super::metrics::{record_error, record_image_mutation, set_catalog_metrics};
use super::state::{GuardedPartStore, ServerState};
use crate::image_manager::api::{
    CreateImageRequest, CreateImageResponse, DeleteImageQuery, MutationResponse, PartSummary,
    UpdateImageRequest,
};
use crate::image_manager::validation::{validate_image_url, validate_new_image, validate_patch};
use crate::image_manager::ValidationError;
use crate::part_store::PartStoreError;

const IMAGES_ENDPOINT: &str = "/v1/images";

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MutationResponse::failed(message))).into_response()
}

fn validation_failure(operation: &str, err: ValidationError) -> Response {
    debug!("Rejected {} request: {}", operation, err);
    record_image_mutation(operation, "invalid");
    failure(StatusCode::BAD_REQUEST, err.to_string())
}

/// Classify a store error, log it and count it.
fn classify_store_error(operation: &str, err: &PartStoreError) -> StatusCode {
    let (status, outcome) = match err {
        PartStoreError::PartNotFound(_) | PartStoreError::ImageNotFound { .. } => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        PartStoreError::DuplicateUrl { .. } => (StatusCode::CONFLICT, "conflict"),
        PartStoreError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Image {} failed: {:#}", operation, err);
        record_error("storage", IMAGES_ENDPOINT);
    } else {
        warn!("Image {} rejected: {}", operation, err);
    }
    record_image_mutation(operation, outcome);
    status
}

fn store_failure(operation: &str, err: PartStoreError) -> Response {
    let status = classify_store_error(operation, &err);
    failure(status, err.to_string())
}

fn refresh_catalog_metrics(store: &GuardedPartStore) {
    set_catalog_metrics(store.get_parts_count(), store.get_images_count());
}

async fn create_image(
    State(store): State<GuardedPartStore>,
    payload: Result<Json<CreateImageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CreateImageResponse::failed(rejection.body_text())),
            )
                .into_response()
        }
    };
    if let Err(err) = validate_new_image(&request.image_data) {
        debug!("Rejected create request: {}", err);
        record_image_mutation("create", "invalid");
        return (
            StatusCode::BAD_REQUEST,
            Json(CreateImageResponse::failed(err.to_string())),
        )
            .into_response();
    }

    match store.add_image(&request.part_id, request.image_data) {
        Ok(image) => {
            record_image_mutation("create", "success");
            refresh_catalog_metrics(&store);
            (StatusCode::CREATED, Json(CreateImageResponse::created(image))).into_response()
        }
        Err(err) => {
            let status = classify_store_error("create", &err);
            (status, Json(CreateImageResponse::failed(err.to_string()))).into_response()
        }
    }
}

async fn update_image(
    State(store): State<GuardedPartStore>,
    payload: Result<Json<UpdateImageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    if let Err(err) =
        validate_image_url(&request.image_url).and_then(|_| validate_patch(&request.updates))
    {
        return validation_failure("update", err);
    }

    match store.update_image(&request.part_id, &request.image_url, &request.updates) {
        Ok(_) => {
            record_image_mutation("update", "success");
            Json(MutationResponse::ok()).into_response()
        }
        Err(err) => store_failure("update", err),
    }
}

async fn delete_image(
    State(store): State<GuardedPartStore>,
    query: Result<Query<DeleteImageQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    if let Err(err) = validate_image_url(&query.image_url) {
        return validation_failure("delete", err);
    }

    match store.delete_image(&query.part_id, &query.image_url) {
        Ok(true) => {
            record_image_mutation("delete", "success");
            refresh_catalog_metrics(&store);
            Json(MutationResponse::ok()).into_response()
        }
        Ok(false) => {
            record_image_mutation("delete", "noop");
            Json(MutationResponse::ok()).into_response()
        }
        Err(err) => store_failure("delete", err),
    }
}

async fn get_part_images(
    State(store): State<GuardedPartStore>,
    Path(id): Path<String>,
) -> Response {
    match store.get_part_images(&id) {
        Ok(images) => Json(images).into_response(),
        Err(PartStoreError::PartNotFound(id)) => {
            failure(StatusCode::NOT_FOUND, format!("Part not found: {}", id))
        }
        Err(err) => {
            error!("Failed to list images of part {}: {:#}", id, err);
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

async fn get_part(State(store): State<GuardedPartStore>, Path(id): Path<String>) -> Response {
    let part = match store.get_part(&id) {
        Ok(Some(part)) => part,
        Ok(None) => return failure(StatusCode::NOT_FOUND, format!("Part not found: {}", id)),
        Err(err) => {
            error!("Failed to get part {}: {:#}", id, err);
            return failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };
    match store.count_part_images(&id) {
        Ok(image_count) => Json(PartSummary {
            id: part.id,
            name: part.name,
            image_count,
        })
        .into_response(),
        Err(err) => {
            error!("Failed to count images of part {}: {:#}", id, err);
            failure(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

pub fn make_image_routes(state: ServerState) -> Router {
    Router::new()
        .route(
            "/images",
            post(create_image).put(update_image).delete(delete_image),
        )
        .route("/parts/{id}", get(get_part))
        .route("/parts/{id}/images", get(get_part_images))
        .with_state(state)
}
