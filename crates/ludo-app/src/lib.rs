pub mod alert;
pub mod error;
pub mod rest_api;
pub mod state;
pub mod validate;

#[macro_export]
macro_rules! repository_from_request {
    ($entity:ty) => {
        impl axum::extract::FromRequestParts<$crate::state::AppState>
            for ludo_dal::Repository<$entity>
        {
            type Rejection = http::StatusCode;

            fn from_request_parts(
                _parts: &mut http::request::Parts,
                state: &$crate::state::AppState,
            ) -> impl std::future::Future<Output = std::result::Result<Self, Self::Rejection>>
                   + core::marker::Send {
                futures::future::ready(std::result::Result::Ok(
                    ludo_dal::Repository::<$entity>::new(state.pool().clone()),
                ))
            }
        }
    };
}
