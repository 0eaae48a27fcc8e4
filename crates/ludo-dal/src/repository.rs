use std::{collections::HashMap, marker::PhantomData};

use futures::TryStreamExt as _;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::{
    Entity, FindOptions, GameRef, Pool,
    error::{Error, Result},
};

type RelationRow = (i64, i64, Option<String>);

/// Store for one kind of [`Entity`]
pub struct Repository<T> {
    pool: Pool,
    entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            entity: PhantomData,
        }
    }

    /// Inserts new record if entity has no id, otherwise writes record with given id,
    /// inserting it if it does not exist yet.
    pub async fn save(&self, entity: T) -> Result<T> {
        let mut transaction = self.pool.begin().await?;
        let id = match entity.id() {
            None => {
                let sql = insert_cmd::<T>();
                let result = entity
                    .bind_columns(sqlx::query(&sql))
                    .execute(&mut *transaction)
                    .await?;
                result.last_insert_rowid()
            }
            Some(id) => {
                let sql = upsert_cmd::<T>();
                entity
                    .bind_columns(sqlx::query(&sql).bind(id))
                    .execute(&mut *transaction)
                    .await?;
                id
            }
        };

        let record = get(id, &mut transaction)
            .await?
            .ok_or_else(|| Error::RecordNotFound(format!("{} {}", T::NAME, id)))?;
        transaction.commit().await?;
        debug!("Saved {} {}", T::NAME, id);
        Ok(record)
    }

    /// Replaces existing record, fails if there is no record with entity's id
    pub async fn update(&self, entity: T) -> Result<T> {
        let id = entity.id().ok_or(Error::MissingId)?;
        let sql = update_cmd::<T>();
        let mut transaction = self.pool.begin().await?;
        let result = entity
            .bind_columns(sqlx::query(&sql))
            .bind(id)
            .execute(&mut *transaction)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordNotFound(format!("{} {}", T::NAME, id)));
        }

        let mut record = get(id, &mut transaction)
            .await?
            .ok_or_else(|| Error::RecordNotFound(format!("{} {}", T::NAME, id)))?;
        load_relations(std::slice::from_mut(&mut record), Some(id), &mut transaction).await?;
        transaction.commit().await?;
        Ok(record)
    }

    /// All records, without any row limit
    pub async fn find_all(&self, options: FindOptions) -> Result<Vec<T>> {
        let order = options.ordering(T::VALID_ORDER_FIELDS, T::ID)?;
        let sql = format!("SELECT * FROM {} ORDER BY {}", T::TABLE, order);
        let mut conn = self.pool.acquire().await?;
        let mut records = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&mut *conn)
            .await?;

        if options.fetch == crate::Fetch::Eager {
            load_relations(&mut records, None, &mut conn).await?;
        }
        Ok(records)
    }

    /// Record with its relations eager loaded
    pub async fn find_one(&self, id: i64) -> Result<Option<T>> {
        let mut conn = self.pool.acquire().await?;
        let mut record = get::<T>(id, &mut conn).await?;
        if let Some(record) = record.as_mut() {
            load_relations(std::slice::from_mut(record), Some(id), &mut conn).await?;
        }
        Ok(record)
    }

    /// Deleting non existent record is not an error
    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", T::TABLE, T::ID);
        let res = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if res.rows_affected() == 0 {
            debug!("No {} with id {} to delete", T::NAME, id);
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let sql = format!("SELECT count(*) FROM {}", T::TABLE);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count as u64)
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

fn insert_cmd<T: Entity>() -> String {
    format!(
        "INSERT INTO {}({}) VALUES ({})",
        T::TABLE,
        T::COLUMNS.join(","),
        placeholders(T::COLUMNS.len())
    )
}

fn upsert_cmd<T: Entity>() -> String {
    let updates = T::COLUMNS
        .iter()
        .map(|c| format!("{c} = excluded.{c}"))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "INSERT INTO {}({},{}) VALUES ({}) ON CONFLICT({}) DO UPDATE SET {}",
        T::TABLE,
        T::ID,
        T::COLUMNS.join(","),
        placeholders(T::COLUMNS.len() + 1),
        T::ID,
        updates
    )
}

fn update_cmd<T: Entity>() -> String {
    let updates = T::COLUMNS
        .iter()
        .map(|c| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(",");
    format!("UPDATE {} SET {} WHERE {} = ?", T::TABLE, updates, T::ID)
}

async fn get<T: Entity>(id: i64, conn: &mut SqliteConnection) -> Result<Option<T>> {
    let sql = format!("SELECT * FROM {} WHERE {} = ?", T::TABLE, T::ID);
    let record = sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(record)
}

/// Loads linked games for all `records` in one query, `only` restricts the query to single owner
async fn load_relations<T: Entity>(
    records: &mut [T],
    only: Option<i64>,
    conn: &mut SqliteConnection,
) -> Result<()> {
    let Some(relation) = T::RELATION else {
        return Ok(());
    };

    let filter = if only.is_some() {
        format!("WHERE l.{} = ?", relation.link_column)
    } else {
        String::new()
    };
    let sql = format!(
        "SELECT l.{col}, g.id, g.nome FROM {link} l JOIN game g ON g.id = l.game_id {filter} ORDER BY g.id",
        col = relation.link_column,
        link = relation.link_table,
    );
    let mut query = sqlx::query_as::<_, RelationRow>(&sql);
    if let Some(id) = only {
        query = query.bind(id);
    }

    let mut related: HashMap<i64, Vec<GameRef>> = HashMap::new();
    let mut rows = query.fetch(conn);
    while let Some((owner_id, id, nome)) = rows.try_next().await? {
        related.entry(owner_id).or_default().push(GameRef { id, nome });
    }

    for record in records.iter_mut() {
        if let Some(id) = record.id() {
            record.set_relations(related.remove(&id).unwrap_or_default());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genero::Genero;

    #[test]
    fn test_commands() {
        assert_eq!("INSERT INTO genero(nome) VALUES (?)", insert_cmd::<Genero>());
        assert_eq!(
            "INSERT INTO genero(id,nome) VALUES (?,?) ON CONFLICT(id) DO UPDATE SET nome = excluded.nome",
            upsert_cmd::<Genero>()
        );
        assert_eq!("UPDATE genero SET nome = ? WHERE id = ?", update_cmd::<Genero>());
    }
}
