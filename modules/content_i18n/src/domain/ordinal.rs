//! Display-order allocation for orderable rows
//!
//! `next_ordinal` reads `MAX(sort_order)` and adds one. Read-then-write is not
//! atomic; callers inserting concurrently into one scope should go through
//! `SeaOrmOrdinalRepository::insert_ordered`, which runs allocation and insert
//! in one serializable transaction.

use super::repository::OrdinalRepository;
use super::validation::validate_scope;
use crate::contract::{ContentError, OrdinalScope};
use std::sync::Arc;

/// A row carrying a caller-supplied or allocated display position
pub trait Orderable {
    /// Current position; `None` or a non-positive value means unset
    fn sort_order(&self) -> Option<i32>;

    fn set_sort_order(&mut self, sort_order: i32);
}

/// Ordinal for the next row given the current maximum of a scope
pub fn ordinal_after(max: Option<i32>) -> i32 {
    max.unwrap_or(0).saturating_add(1)
}

#[derive(Clone)]
pub struct OrdinalAllocator {
    repo: Arc<dyn OrdinalRepository>,
}

impl OrdinalAllocator {
    pub fn new(repo: Arc<dyn OrdinalRepository>) -> Self {
        Self { repo }
    }

    /// `COALESCE(MAX(sort_order), 0) + 1` within the scope
    pub async fn next_ordinal(&self, scope: &OrdinalScope) -> Result<i32, ContentError> {
        validate_scope(scope)?;
        let max = self.repo.max_ordinal(scope).await?;
        let next = ordinal_after(max);
        tracing::debug!(%scope, next, "allocated ordinal");
        Ok(next)
    }

    /// Allocate only when the item has no usable position; returns the
    /// position the item ends up with.
    pub async fn assign_if_absent<T>(
        &self,
        item: &mut T,
        scope: &OrdinalScope,
    ) -> Result<i32, ContentError>
    where
        T: Orderable + Send,
    {
        match item.sort_order() {
            Some(current) if current > 0 => Ok(current),
            _ => {
                let next = self.next_ordinal(scope).await?;
                item.set_sort_order(next);
                Ok(next)
            }
        }
    }
}
