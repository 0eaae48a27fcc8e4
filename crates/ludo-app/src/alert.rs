//! Notification headers for the client UI.
//!
//! Every mutation answers with `X-{app}-alert` (human readable message) and
//! `X-{app}-params` (affected id), a rejected request with `X-{app}-error`
//! and `X-{app}-params` (entity name).

use http::{
    header::{HeaderName, InvalidHeaderName},
    HeaderMap, HeaderValue,
};
use tracing::warn;

use crate::error::{ApiError, BadRequestAlert, Problem};

#[derive(Debug, Clone)]
pub struct Alerts {
    alert: HeaderName,
    error: HeaderName,
    params: HeaderName,
}

impl Alerts {
    pub fn new(app_name: &str) -> Result<Self, InvalidHeaderName> {
        let header = |kind: &str| HeaderName::from_bytes(format!("x-{app_name}-{kind}").as_bytes());
        Ok(Alerts {
            alert: header("alert")?,
            error: header("error")?,
            params: header("params")?,
        })
    }

    pub fn entity_creation(&self, entity_name: &str, id: i64) -> HeaderMap {
        self.alert(
            format!("A new {entity_name} is created with identifier {id}"),
            &id.to_string(),
        )
    }

    pub fn entity_update(&self, entity_name: &str, id: i64) -> HeaderMap {
        self.alert(
            format!("A {entity_name} is updated with identifier {id}"),
            &id.to_string(),
        )
    }

    pub fn entity_deletion(&self, entity_name: &str, id: i64) -> HeaderMap {
        self.alert(
            format!("A {entity_name} is deleted with identifier {id}"),
            &id.to_string(),
        )
    }

    /// 400 error with failure alert headers and problem body
    pub fn bad_request(
        &self,
        entity_name: &str,
        error_key: &str,
        message: impl Into<String>,
    ) -> ApiError {
        let message = message.into();
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.error, &message);
        insert(&mut headers, &self.params, &encode(entity_name));
        ApiError::BadRequestAlert(Box::new(BadRequestAlert {
            headers,
            problem: Problem {
                title: message,
                status: 400,
                message: format!("error.{error_key}"),
                params: entity_name.to_string(),
                entity_name: entity_name.to_string(),
                error_key: error_key.to_string(),
            },
        }))
    }

    fn alert(&self, message: String, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.alert, &message);
        insert(&mut headers, &self.params, &encode(param));
        headers
    }
}

fn encode(param: &str) -> String {
    url::form_urlencoded::byte_serialize(param.as_bytes()).collect()
}

fn insert(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name.clone(), value);
        }
        Err(e) => warn!("Cannot use {value:?} as {name} header: {e}"),
    }
}
