use garde::Validate;
use ludo_macros::Entity;
use serde::{Deserialize, Serialize};

use crate::GameRef;

#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate, sqlx::FromRow, Entity)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Plataforma {
    #[spec(id)]
    #[garde(skip)]
    pub id: Option<i64>,
    #[garde(length(max = 255))]
    pub nome: Option<String>,
    #[spec(relation)]
    #[sqlx(skip)]
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub games: Option<Vec<GameRef>>,
}

impl Plataforma {
    pub fn new(nome: impl Into<String>) -> Self {
        Plataforma {
            nome: Some(nome.into()),
            ..Default::default()
        }
    }
}
