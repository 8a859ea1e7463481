//! SeaORM repository implementations

use crate::contract::{Language, NewLanguage, OrdinalScope, TextEntry};
use crate::domain::ordinal::ordinal_after;
use crate::domain::repository::{LanguageRepository, OrdinalRepository, TextRepository};
use crate::domain::validation::validate_scope;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr,
    sea_query::{Alias, OnConflict, Query},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::entity::{language, text_entry};
use super::mapper::new_language_model;

// ===== Language Repository =====

pub struct SeaOrmLanguageRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLanguageRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LanguageRepository for SeaOrmLanguageRepository {
    async fn create(&self, new_language: &NewLanguage, sort_order: i32) -> Result<Option<Language>> {
        match new_language_model(new_language, sort_order)
            .insert(&*self.db)
            .await
        {
            Ok(model) => Ok(Some(model.into())),
            // uq_languages_active_code
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Language>> {
        let result = language::Entity::find()
            .filter(language::Column::Code.eq(code.to_ascii_lowercase()))
            .filter(language::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Language>> {
        let results = language::Entity::find()
            .order_by_asc(language::Column::SortOrder)
            .order_by_asc(language::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn deactivate(&self, id: i32) -> Result<bool> {
        let result = language::Entity::update_many()
            .col_expr(language::Column::IsActive, Expr::value(false))
            .filter(language::Column::Id.eq(id))
            .filter(language::Column::IsActive.eq(true))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Text Repository =====

/// Insert or overwrite the row at the entry's coordinate
async fn upsert_on<C>(conn: &C, entry: &TextEntry) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let active: text_entry::ActiveModel = entry.into();

    text_entry::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                text_entry::Column::EntityType,
                text_entry::Column::EntityId,
                text_entry::Column::FieldName,
                text_entry::Column::LanguageId,
            ])
            .update_columns([text_entry::Column::TextContent, text_entry::Column::UpdatedAt])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

pub struct SeaOrmTextRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTextRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TextRepository for SeaOrmTextRepository {
    async fn upsert(&self, entry: &TextEntry) -> Result<()> {
        upsert_on(&*self.db, entry).await?;
        Ok(())
    }

    async fn upsert_many(&self, entries: &[TextEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;
        for entry in entries {
            if let Err(err) = upsert_on(&txn, entry).await {
                txn.rollback().await?;
                return Err(err.into());
            }
        }
        txn.commit().await?;

        Ok(())
    }

    async fn find_one(
        &self,
        entity_type: &str,
        entity_id: i64,
        language_id: i32,
        field_name: Option<&str>,
    ) -> Result<Vec<TextEntry>> {
        let mut query = text_entry::Entity::find()
            .filter(text_entry::Column::EntityType.eq(entity_type))
            .filter(text_entry::Column::EntityId.eq(entity_id))
            .filter(text_entry::Column::LanguageId.eq(language_id));

        if let Some(field) = field_name {
            query = query.filter(text_entry::Column::FieldName.eq(field));
        }

        let results = query
            .order_by_asc(text_entry::Column::FieldName)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_many(
        &self,
        entity_type: &str,
        entity_ids: &[i64],
        language_id: i32,
    ) -> Result<Vec<TextEntry>> {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = text_entry::Entity::find()
            .filter(text_entry::Column::EntityType.eq(entity_type))
            .filter(text_entry::Column::EntityId.is_in(entity_ids.iter().copied()))
            .filter(text_entry::Column::LanguageId.eq(language_id))
            .order_by_asc(text_entry::Column::EntityId)
            .order_by_asc(text_entry::Column::FieldName)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_candidates(
        &self,
        entity_type: &str,
        entity_ids: &[i64],
        field_names: &[&str],
    ) -> Result<Vec<TextEntry>> {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = text_entry::Entity::find()
            .filter(text_entry::Column::EntityType.eq(entity_type))
            .filter(text_entry::Column::EntityId.is_in(entity_ids.iter().copied()));

        if !field_names.is_empty() {
            query = query.filter(text_entry::Column::FieldName.is_in(field_names.iter().copied()));
        }

        let results = query
            .order_by_asc(text_entry::Column::EntityId)
            .order_by_asc(text_entry::Column::FieldName)
            .order_by_asc(text_entry::Column::LanguageId)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete_for_entity(&self, entity_type: &str, entity_id: i64) -> Result<u64> {
        let result = text_entry::Entity::delete_many()
            .filter(text_entry::Column::EntityType.eq(entity_type))
            .filter(text_entry::Column::EntityId.eq(entity_id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_for_entities(&self, entity_type: &str, entity_ids: &[i64]) -> Result<u64> {
        if entity_ids.is_empty() {
            return Ok(0);
        }

        let result = text_entry::Entity::delete_many()
            .filter(text_entry::Column::EntityType.eq(entity_type))
            .filter(text_entry::Column::EntityId.is_in(entity_ids.iter().copied()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

// ===== Ordinal Repository =====

/// `MAX(sort_column)` over a scope on any connection or transaction
pub async fn max_ordinal_on<C>(conn: &C, scope: &OrdinalScope) -> Result<Option<i32>, DbErr>
where
    C: ConnectionTrait,
{
    let mut query = Query::select();
    query
        .expr_as(
            Expr::col(Alias::new(scope.sort_column.as_str())).max(),
            Alias::new("max_ordinal"),
        )
        .from(Alias::new(scope.table.as_str()));

    if let Some(partition) = &scope.partition {
        query.and_where(Expr::col(Alias::new(partition.column.as_str())).eq(partition.value));
    }

    let backend = conn.get_database_backend();
    match conn.query_one(backend.build(&query)).await? {
        Some(row) => row.try_get::<Option<i32>>("", "max_ordinal"),
        None => Ok(None),
    }
}

pub struct SeaOrmOrdinalRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrdinalRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Allocate an ordinal and insert a row in one serializable transaction
    ///
    /// A positive `requested` value is used as-is; otherwise the ordinal is
    /// `MAX + 1` read inside the same transaction as the insert. Returns the
    /// ordinal used together with the callback's result.
    pub async fn insert_ordered<T, F>(
        &self,
        scope: &OrdinalScope,
        requested: Option<i32>,
        insert: F,
    ) -> Result<(i32, T)>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
                i32,
            ) -> Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>
            + Send
            + 'static,
    {
        validate_scope(scope)?;
        let label = scope.to_string();
        let scope = scope.clone();

        let (ordinal, value) = self
            .db
            .transaction_with_config::<_, (i32, T), DbErr>(
                move |txn| {
                    Box::pin(async move {
                        let ordinal = match requested {
                            Some(value) if value > 0 => value,
                            _ => ordinal_after(max_ordinal_on(txn, &scope).await?),
                        };
                        let value = insert(txn, ordinal).await?;
                        Ok((ordinal, value))
                    })
                },
                Some(IsolationLevel::Serializable),
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("ordered insert into {label} failed: {e}"))?;

        tracing::debug!(scope = %label, ordinal, "ordered insert committed");
        Ok((ordinal, value))
    }
}

#[async_trait]
impl OrdinalRepository for SeaOrmOrdinalRepository {
    async fn max_ordinal(&self, scope: &OrdinalScope) -> Result<Option<i32>> {
        Ok(max_ordinal_on(&*self.db, scope).await?)
    }
}
