//! Process-lifetime in-memory collections.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Collection, Predicate, Record, RepositoryError};

/// A [`Collection`] backed by a `Vec` behind an async read/write lock.
///
/// Inserts take the write lock for the whole check-assign-push sequence, so
/// uniqueness rules and sequential ids hold under concurrent requests.
pub struct MemoryCollection<T> {
    records: RwLock<Vec<T>>,
}

impl<T> MemoryCollection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Collection<T> for MemoryCollection<T> {
    async fn insert(&self, draft: T::Draft) -> Result<T, RepositoryError> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.conflicts_with(&draft)) {
            return Err(RepositoryError::Conflict(format!(
                "{} already exists",
                T::KIND
            )));
        }

        let next = records
            .len()
            .checked_add(1)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(RepositoryError::Exhausted(T::KIND))?;

        let record = T::from_draft(T::Id::from(next), draft);
        records.push(record.clone());
        tracing::debug!(kind = T::KIND, id = %record.id(), "record inserted");
        Ok(record)
    }

    async fn get(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find(&self, predicate: Predicate<'_, T>) -> Result<Option<T>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|&r| predicate(r)).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Tag {
        id: i32,
        label: String,
    }

    impl Record for Tag {
        type Id = i32;
        type Draft = String;
        const KIND: &'static str = "tag";

        fn id(&self) -> i32 {
            self.id
        }

        fn from_draft(id: i32, label: String) -> Self {
            Self { id, label }
        }

        fn conflicts_with(&self, draft: &String) -> bool {
            self.label == *draft
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let tags = MemoryCollection::<Tag>::new();
        let first = tags.insert("red".to_owned()).await.unwrap();
        let second = tags.insert("blue".to_owned()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(tags.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_conflicting_insert_is_rejected_without_side_effects() {
        let tags = MemoryCollection::<Tag>::new();
        tags.insert("red".to_owned()).await.unwrap();

        let err = tags.insert("red".to_owned()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(tags.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_and_find() {
        let tags = MemoryCollection::<Tag>::new();
        tags.insert("red".to_owned()).await.unwrap();
        tags.insert("blue".to_owned()).await.unwrap();

        assert_eq!(tags.get(2).await.unwrap().unwrap().label, "blue");
        assert!(tags.get(3).await.unwrap().is_none());

        let found = tags.find(&|t: &Tag| t.label == "red").await.unwrap();
        assert_eq!(found.map(|t| t.id), Some(1));
        assert!(tags.find(&|t: &Tag| t.label == "green").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_same_key_admit_exactly_one() {
        let tags = Arc::new(MemoryCollection::<Tag>::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let tags = Arc::clone(&tags);
                tokio::spawn(async move { tags.insert("dup".to_owned()).await.is_ok() })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(tags.count().await.unwrap(), 1);
    }
}
