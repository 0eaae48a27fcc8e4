use crate::error::{ApiError, ApiResult};
use ludo_dal::{FindOptions, Order};
use serde::Deserialize;

const MAX_SORT_LEN: usize = 255;

/// Query of list endpoint, e.g. `?eagerload=true&sort=id,desc`
///
/// Without `eagerload=true` a plain `GET /api/{resource}` omits `games` from each record.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListParams {
    /// Load games linked to each record
    #[serde(default)]
    eagerload: bool,
    /// Field name optionally followed by `,asc` or `,desc`
    sort: Option<String>,
}

impl ListParams {
    pub fn into_find_options(self) -> ApiResult<FindOptions> {
        let options = FindOptions::default().with_fetch(self.eagerload.into());
        match self.sort {
            Some(sort) => Ok(options.with_order(vec![parse_sort(&sort)?])),
            None => Ok(options),
        }
    }
}

fn parse_sort(sort: &str) -> ApiResult<Order> {
    if sort.len() > MAX_SORT_LEN {
        return Err(ApiError::InvalidQuery("Sort too long".to_string()));
    }
    let mut parts = sort.split(',').map(str::trim);
    let field = match parts.next() {
        Some("") | None => return Err(ApiError::InvalidQuery("Empty sort field".to_string())),
        Some(field) => field.to_string(),
    };
    let order = match parts.next().map(|d| d.to_ascii_lowercase()).as_deref() {
        None | Some("asc") => Order::Asc(field),
        Some("desc") => Order::Desc(field),
        Some(other) => {
            return Err(ApiError::InvalidQuery(format!(
                "Invalid sort direction {other}"
            )))
        }
    };
    if parts.next().is_some() {
        return Err(ApiError::InvalidQuery(
            "Sort by single field only".to_string(),
        ));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_dal::Fetch;

    #[test]
    fn test_parse_sort() {
        assert_eq!(Order::Asc("id".into()), parse_sort("id").unwrap());
        assert_eq!(Order::Desc("id".into()), parse_sort("id,desc").unwrap());
        assert_eq!(Order::Asc("nome".into()), parse_sort("nome, ASC").unwrap());
        assert!(parse_sort("").is_err());
        assert!(parse_sort(",desc").is_err());
        assert!(parse_sort("id,down").is_err());
        assert!(parse_sort("id,desc,nome").is_err());
        assert!(parse_sort(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_into_find_options() {
        let options = ListParams::default().into_find_options().unwrap();
        assert_eq!(Fetch::Lazy, options.fetch);
        assert!(options.order.is_none());

        let params = ListParams {
            eagerload: true,
            sort: Some("id,desc".to_string()),
        };
        let options = params.into_find_options().unwrap();
        assert_eq!(Fetch::Eager, options.fetch);
        assert_eq!(Some(vec![Order::Desc("id".into())]), options.order);
    }
}
