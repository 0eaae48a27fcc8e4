#[macro_export]
macro_rules! crud_api {
    ($entity:ty, $path:literal) => {
        /// Path the resource is mounted on
        pub const PATH: &str = $path;
        type EntityRepository = ludo_dal::Repository<$entity>;
        $crate::repository_from_request!($entity);

        pub mod crud_api {
            use super::*;
            use $crate::error::{ApiError, ApiResult};
            use $crate::rest_api::ListParams;
            use $crate::state::AppState;
            use $crate::validate::Garde;
            use axum::{
                extract::{Path, Query, State},
                response::IntoResponse,
                Json,
            };
            use http::{header::LOCATION, HeaderValue, StatusCode};
            use ludo_dal::Entity as _;
            use tracing::debug;

            const ENTITY_NAME: &str = <$entity as ludo_dal::Entity>::NAME;

            #[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = stringify!($entity), operation_id = concat!("create", stringify!($entity)),
            request_body = $entity,
            responses((status = StatusCode::CREATED, description = concat!("Created ", stringify!($entity)), body = $entity),
                (status = StatusCode::BAD_REQUEST, description = "Record already has an id"))))]
            pub async fn create(
                repository: EntityRepository,
                State(state): State<AppState>,
                Garde(Json(payload)): Garde<Json<$entity>>,
            ) -> ApiResult<impl IntoResponse> {
                debug!("REST request to save {ENTITY_NAME}: {payload:?}");
                if payload.id().is_some() {
                    return Err(state.alerts().bad_request(
                        ENTITY_NAME,
                        "idexists",
                        format!("A new {ENTITY_NAME} cannot already have an ID"),
                    ));
                }
                let record = repository.save(payload).await?;
                let id = record.id().ok_or(ludo_dal::Error::MissingId)?;

                let mut headers = state.alerts().entity_creation(ENTITY_NAME, id);
                let location = HeaderValue::try_from(format!("{PATH}/{id}"))
                    .map_err(|e| ApiError::Internal(e.to_string()))?;
                headers.insert(LOCATION, location);
                Ok((StatusCode::CREATED, headers, Json(record)))
            }

            #[cfg_attr(feature = "openapi",  utoipa::path(put, path = "", tag = stringify!($entity), operation_id = concat!("update", stringify!($entity)),
            request_body = $entity,
            responses((status = StatusCode::OK, description = concat!("Updated ", stringify!($entity)), body = $entity),
                (status = StatusCode::BAD_REQUEST, description = "Record has no id"),
                (status = StatusCode::NOT_FOUND, description = "No record with given id"))))]
            pub async fn update(
                repository: EntityRepository,
                State(state): State<AppState>,
                Garde(Json(payload)): Garde<Json<$entity>>,
            ) -> ApiResult<impl IntoResponse> {
                debug!("REST request to update {ENTITY_NAME}: {payload:?}");
                let Some(id) = payload.id() else {
                    return Err(state.alerts().bad_request(ENTITY_NAME, "idnull", "Invalid id"));
                };
                let record = repository.update(payload).await?;

                Ok((
                    StatusCode::OK,
                    state.alerts().entity_update(ENTITY_NAME, id),
                    Json(record),
                ))
            }

            #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = stringify!($entity), operation_id = concat!("list", stringify!($entity)),
            params(ListParams),
            responses((status = StatusCode::OK, description = "List all", body = Vec<$entity>))))]
            pub async fn list(
                repository: EntityRepository,
                Query(params): Query<ListParams>,
            ) -> ApiResult<impl IntoResponse> {
                debug!("REST request to get all {ENTITY_NAME} records: {params:?}");
                let records = repository.find_all(params.into_find_options()?).await?;
                Ok((StatusCode::OK, Json(records)))
            }

            #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/count", tag = stringify!($entity), operation_id = concat!("count", stringify!($entity)),
            responses((status = StatusCode::OK, description = "Count", body = u64))))]
            pub async fn count(repository: EntityRepository) -> ApiResult<impl IntoResponse> {
                let count = repository.count().await?;
                Ok((StatusCode::OK, Json(count)))
            }

            #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = stringify!($entity), operation_id = concat!("get", stringify!($entity)),
            responses((status = StatusCode::OK, description = "Get one", body = $entity),
                (status = StatusCode::NOT_FOUND, description = "Not found"))))]
            pub async fn get(
                Path(id): Path<i64>,
                repository: EntityRepository,
            ) -> ApiResult<impl IntoResponse> {
                debug!("REST request to get {ENTITY_NAME}: {id}");
                let record = repository.find_one(id).await?.ok_or(ApiError::NotFound)?;

                Ok((StatusCode::OK, Json(record)))
            }

            #[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = stringify!($entity), operation_id = concat!("delete", stringify!($entity)),
            responses((status = StatusCode::NO_CONTENT, description = "Deleted"))))]
            pub async fn delete(
                Path(id): Path<i64>,
                repository: EntityRepository,
                State(state): State<AppState>,
            ) -> ApiResult<impl IntoResponse> {
                debug!("REST request to delete {ENTITY_NAME}: {id}");
                repository.delete_by_id(id).await?;

                Ok((
                    StatusCode::NO_CONTENT,
                    state.alerts().entity_deletion(ENTITY_NAME, id),
                ))
            }

            #[cfg(feature = "openapi")]
            #[cfg_attr(feature = "openapi", derive(utoipa::OpenApi))]
            #[openapi(paths(create, update, list, count, get, delete))]
            struct ApiDocs;

            #[cfg(feature = "openapi")]
            pub(super) fn api_docs() -> utoipa::openapi::OpenApi {
                use utoipa::OpenApi as _;
                ApiDocs::openapi()
            }
        }
    };
}

#[macro_export]
macro_rules! publish_api_docs {
    () => {
        #[cfg(feature = "openapi")]
        pub fn api_docs() -> utoipa::openapi::OpenApi {
            crud_api::api_docs()
        }
    };
}

#[macro_export]
macro_rules! entity_router {
    () => {
        pub fn router() -> axum::Router<$crate::state::AppState> {
            use axum::routing::get;
            axum::Router::new()
                .route(
                    "/",
                    get(crud_api::list)
                        .post(crud_api::create)
                        .put(crud_api::update),
                )
                .route("/count", get(crud_api::count))
                .route("/{id}", get(crud_api::get).delete(crud_api::delete))
        }
    };
}
