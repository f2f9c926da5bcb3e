use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::subscriber::Subscriber;

/// Subscriber profiles keyed by phone number
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn load_subscriber(&self, subscriber_id: &str) -> Result<Option<Subscriber>>;

    /// Fails if the subscriber already exists
    async fn insert_subscriber(&self, subscriber: &Subscriber) -> Result<()>;

    async fn save_subscriber(&self, subscriber: &Subscriber) -> Result<()>;
}

#[derive(Default)]
pub struct InMemorySubscriberStore {
    subscribers: RwLock<HashMap<String, Subscriber>>,
}

impl InMemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn load_subscriber(&self, subscriber_id: &str) -> Result<Option<Subscriber>> {
        Ok(self.subscribers.read().await.get(subscriber_id).cloned())
    }

    async fn insert_subscriber(&self, subscriber: &Subscriber) -> Result<()> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.contains_key(&subscriber.id) {
            bail!("Subscriber {} already exists", subscriber.id);
        }
        subscribers.insert(subscriber.id.clone(), subscriber.clone());
        Ok(())
    }

    async fn save_subscriber(&self, subscriber: &Subscriber) -> Result<()> {
        let mut subscribers = self.subscribers.write().await;
        if !subscribers.contains_key(&subscriber.id) {
            bail!("Subscriber {} not found", subscriber.id);
        }
        subscribers.insert(subscriber.id.clone(), subscriber.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_load() {
        let store = InMemorySubscriberStore::new();
        let subscriber = Subscriber::new("27820000000");
        store.insert_subscriber(&subscriber).await.unwrap();

        assert_eq!(store.load_subscriber("27820000000").await.unwrap(), Some(subscriber));
        assert_eq!(store.load_subscriber("27830000000").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = InMemorySubscriberStore::new();
        let subscriber = Subscriber::new("27820000000");
        store.insert_subscriber(&subscriber).await.unwrap();
        assert!(store.insert_subscriber(&subscriber).await.is_err());
    }

    #[tokio::test]
    async fn test_save_unknown_subscriber_fails() {
        let store = InMemorySubscriberStore::new();
        assert!(store.save_subscriber(&Subscriber::new("27820000000")).await.is_err());
    }
}
