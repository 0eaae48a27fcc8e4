use serde::{Deserialize, Serialize};

/// Game linked to a genre or platform, as returned by eager loading
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GameRef {
    pub id: i64,
    pub nome: Option<String>,
}
