use crate::store::Store;
use poise::serenity_prelude::{ChannelId, MessageId};
use std::collections::HashMap;

/// Where the poll panel was posted; votes are read back from its reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollMessage {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poll {
    pub title: String,
    pub options: Vec<String>,
    pub message: PollMessage,
}

#[derive(Default, Debug)]
pub struct PollDatabase {
    pub polls: HashMap<String, Poll>,
}

impl Store<PollDatabase> {
    /// Records a poll under its title. An open poll with the same title is
    /// replaced and handed back.
    pub async fn open_poll(&self, poll: Poll) -> Result<Option<Poll>, String> {
        self.transaction(|db| Ok(db.polls.insert(poll.title.clone(), poll)))
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn get_poll(&self, title: &str) -> Option<Poll> {
        self.read(|db| db.polls.get(title).cloned()).await
    }

    pub async fn close_poll(&self, title: &str) -> Result<Option<Poll>, String> {
        self.transaction(|db| Ok(db.polls.remove(title)))
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(title: &str, options: &[&str], message_id: u64) -> Poll {
        Poll {
            title: title.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            message: PollMessage {
                channel_id: ChannelId::new(1),
                message_id: MessageId::new(message_id),
            },
        }
    }

    #[tokio::test]
    async fn open_then_close() {
        let store: Store<PollDatabase> = Store::new();
        assert_eq!(store.open_poll(poll("Lunch", &["Pizza", "Sushi"], 10)).await, Ok(None));

        let stored = store.get_poll("Lunch").await.unwrap();
        assert_eq!(stored.options, vec!["Pizza", "Sushi"]);

        let closed = store.close_poll("Lunch").await.unwrap();
        assert_eq!(closed.map(|p| p.message.message_id), Some(MessageId::new(10)));
        assert!(store.get_poll("Lunch").await.is_none());
    }

    #[tokio::test]
    async fn same_title_overwrites() {
        let store: Store<PollDatabase> = Store::new();
        store.open_poll(poll("Lunch", &["Pizza", "Sushi"], 10)).await.unwrap();

        let replaced = store
            .open_poll(poll("Lunch", &["Tacos", "Ramen", "Salad"], 11))
            .await
            .unwrap();
        assert_eq!(replaced.map(|p| p.options.len()), Some(2));

        let stored = store.get_poll("Lunch").await.unwrap();
        assert_eq!(stored.options, vec!["Tacos", "Ramen", "Salad"]);
        assert_eq!(stored.message.message_id, MessageId::new(11));
        assert_eq!(store.read(|db| db.polls.len()).await, 1);
    }

    #[tokio::test]
    async fn lookup_is_exact() {
        let store: Store<PollDatabase> = Store::new();
        store.open_poll(poll("Lunch", &["Pizza", "Sushi"], 10)).await.unwrap();

        assert!(store.get_poll("lunch").await.is_none());
        assert!(store.get_poll("Lunch ").await.is_none());
        assert!(store.get_poll("Lun").await.is_none());
    }

    #[tokio::test]
    async fn closing_unknown_title_leaves_store_alone() {
        let store: Store<PollDatabase> = Store::new();
        store.open_poll(poll("Lunch", &["Pizza", "Sushi"], 10)).await.unwrap();

        assert_eq!(store.close_poll("Dinner").await, Ok(None));
        assert!(store.get_poll("Lunch").await.is_some());
    }
}
