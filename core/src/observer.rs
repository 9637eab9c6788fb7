//! Explicit observer registry.
//!
//! Model mutations return [`Notification`]s instead of firing callbacks. The
//! application context looks up who listens on the notification's [`Topic`]
//! and re-renders those views.

use crate::entity::{Cid, EntityKey};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Collection,
    Entity(EntityKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The collection was replaced wholesale.
    Reset,
    /// A vehicle was appended to the collection.
    Add(Cid),
    /// An entity's attributes changed in place.
    Change(EntityKey),
}

impl Notification {
    pub fn topic(&self) -> Topic {
        match self {
            Notification::Reset | Notification::Add(_) => Topic::Collection,
            Notification::Change(key) => Topic::Entity(*key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriberId {
    List,
    Item(Cid),
    Detail,
}

#[derive(Debug, Default)]
pub struct Subscriptions {
    topics: HashMap<Topic, Vec<SubscriberId>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subscriber` on `topic`; subscribing twice is a no-op.
    pub fn subscribe(&mut self, topic: Topic, subscriber: SubscriberId) {
        let listeners = self.topics.entry(topic).or_default();
        if !listeners.contains(&subscriber) {
            listeners.push(subscriber);
        }
    }

    pub fn unsubscribe(&mut self, topic: Topic, subscriber: SubscriberId) {
        if let Some(listeners) = self.topics.get_mut(&topic) {
            listeners.retain(|existing| *existing != subscriber);
            if listeners.is_empty() {
                self.topics.remove(&topic);
            }
        }
    }

    /// Drops every subscription held by subscribers matching `predicate`.
    pub fn unsubscribe_where(&mut self, predicate: impl Fn(&SubscriberId) -> bool) {
        self.topics.retain(|_, listeners| {
            listeners.retain(|subscriber| !predicate(subscriber));
            !listeners.is_empty()
        });
    }

    /// Listeners on `topic` in subscription order.
    pub fn subscribers(&self, topic: Topic) -> Vec<SubscriberId> {
        self.topics.get(&topic).cloned().unwrap_or_default()
    }

    pub fn is_subscribed(&self, topic: Topic, subscriber: SubscriberId) -> bool {
        self.topics
            .get(&topic)
            .map_or(false, |listeners| listeners.contains(&subscriber))
    }

    pub fn len(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_route_to_their_topic() {
        assert_eq!(Notification::Reset.topic(), Topic::Collection);
        assert_eq!(Notification::Add(Cid(1)).topic(), Topic::Collection);
        assert_eq!(
            Notification::Change(EntityKey::CommandCenter).topic(),
            Topic::Entity(EntityKey::CommandCenter)
        );
    }

    #[test]
    fn subscribe_is_idempotent_and_ordered() {
        let mut subscriptions = Subscriptions::new();
        subscriptions.subscribe(Topic::Collection, SubscriberId::List);
        subscriptions.subscribe(Topic::Collection, SubscriberId::Detail);
        subscriptions.subscribe(Topic::Collection, SubscriberId::List);
        assert_eq!(
            subscriptions.subscribers(Topic::Collection),
            vec![SubscriberId::List, SubscriberId::Detail]
        );
    }

    #[test]
    fn unsubscribe_where_clears_item_listeners_only() {
        let mut subscriptions = Subscriptions::new();
        let first = Topic::Entity(EntityKey::Vehicle(Cid(1)));
        subscriptions.subscribe(first, SubscriberId::Item(Cid(1)));
        subscriptions.subscribe(first, SubscriberId::Detail);
        subscriptions.subscribe(Topic::Collection, SubscriberId::List);

        subscriptions.unsubscribe_where(|id| matches!(id, SubscriberId::Item(_)));

        assert_eq!(subscriptions.subscribers(first), vec![SubscriberId::Detail]);
        assert_eq!(subscriptions.len(), 2);
    }

    #[test]
    fn unsubscribe_removes_empty_topics() {
        let mut subscriptions = Subscriptions::new();
        subscriptions.subscribe(Topic::Collection, SubscriberId::List);
        subscriptions.unsubscribe(Topic::Collection, SubscriberId::List);
        assert!(subscriptions.is_empty());
        assert!(!subscriptions.is_subscribed(Topic::Collection, SubscriberId::List));
    }
}
