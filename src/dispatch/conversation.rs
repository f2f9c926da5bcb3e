use crate::domain::order::Order;
use crate::domain::subscriber::Subscriber;

/// State one inbound message is processed against. Owned by that message's
/// processing; callers serialize messages per subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    pub subscriber: Subscriber,
    /// False only for the message that created the subscriber
    pub subscriber_existed: bool,
    pub current_order: Option<Order>,
}

impl ConversationState {
    pub fn new(subscriber: Subscriber, subscriber_existed: bool, current_order: Option<Order>) -> Self {
        Self {
            subscriber,
            subscriber_existed,
            current_order,
        }
    }

    pub fn subscriber_id(&self) -> &str {
        &self.subscriber.id
    }
}
