pub mod error;
pub mod game;
pub mod genero;
pub mod plataforma;
pub mod repository;

use std::{fmt::Display, str::FromStr as _};

pub use error::Error;
pub use game::GameRef;
pub use repository::Repository;
pub use sqlx::Error as SqlxError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type ChosenRow = sqlx::sqlite::SqliteRow;
pub type Pool = sqlx::Pool<ChosenDB>;
pub type EntityQuery<'q> =
    sqlx::query::Query<'q, ChosenDB, sqlx::sqlite::SqliteArguments<'q>>;

pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &Pool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Many-to-many link between an entity and the games referencing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub link_table: &'static str,
    pub link_column: &'static str,
}

/// Persisted record served by [`Repository`].
///
/// Implemented by `#[derive(ludo_macros::Entity)]`, which fills in the
/// table layout from the struct definition.
pub trait Entity: for<'r> sqlx::FromRow<'r, ChosenRow> + Send + Sync + Unpin + 'static {
    /// Entity name as used in messages and alerts
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Primary key column
    const ID: &'static str;
    /// Stored columns, without id
    const COLUMNS: &'static [&'static str];
    const VALID_ORDER_FIELDS: &'static [&'static str];
    const RELATION: Option<Relation>;

    fn id(&self) -> Option<i64>;

    /// Binds values of [`Entity::COLUMNS`] in declared order
    fn bind_columns<'q>(&'q self, query: EntityQuery<'q>) -> EntityQuery<'q>;

    fn set_relations(&mut self, related: Vec<GameRef>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fetch {
    #[default]
    Lazy,
    Eager,
}

impl From<bool> for Fetch {
    fn from(eager: bool) -> Self {
        if eager { Fetch::Eager } else { Fetch::Lazy }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    Asc(String),
    Desc(String),
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc(s) => write!(f, "{}", s),
            Order::Desc(s) => write!(f, "{} DESC", s),
        }
    }
}

impl AsRef<str> for Order {
    fn as_ref(&self) -> &str {
        match self {
            Order::Asc(s) => s.as_str(),
            Order::Desc(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub fetch: Fetch,
    pub order: Option<Vec<Order>>,
}

impl FindOptions {
    pub fn eager() -> Self {
        Self {
            fetch: Fetch::Eager,
            order: None,
        }
    }

    pub fn with_fetch(mut self, fetch: Fetch) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_order(mut self, order: Vec<Order>) -> Self {
        self.order = Some(order);
        self
    }

    /// Returns ORDER BY clause content, `default_field` is used if no order is given
    pub fn ordering(&self, valid_fields: &[&str], default_field: &str) -> Result<String> {
        let ordering = self
            .order
            .as_ref()
            .filter(|o| !o.is_empty())
            .map(|o| {
                o.iter()
                    .map(|o| {
                        if valid_fields.contains(&o.as_ref()) {
                            Ok(o.to_string())
                        } else {
                            Err(Error::InvalidOrderByField(o.as_ref().to_string()))
                        }
                    })
                    .collect::<Result<Vec<String>>>()
                    .map(|o| o.join(", "))
            })
            .transpose()?
            .unwrap_or_else(|| default_field.to_string());
        Ok(ordering)
    }
}
