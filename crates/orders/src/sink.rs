//! Broadcast sink seam and the in-process channel hub.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use acp_types::OrderChannelMessage;

/// Maximum number of undelivered messages buffered per channel.
const CHANNEL_BUFFER_SIZE: usize = 100;

/// Destination for routed order messages.
///
/// Delivery guarantees live behind this seam: the router hands a message
/// over and moves on. Subscriber membership is the sink's to track.
pub trait BroadcastSink: Send + Sync {
    fn broadcast(&self, channel: &str, message: OrderChannelMessage);
}

/// In-process [`BroadcastSink`] with one lazily-created broadcast channel
/// per checkout session.
///
/// Connected subscribers each get a copy of every message sent while they
/// are subscribed (at-least-once for the connected); messages on channels
/// with no subscribers are dropped.
pub struct ChannelHub {
    channels: RwLock<HashMap<String, broadcast::Sender<OrderChannelMessage>>>,
}

impl ChannelHub {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to a channel, creating it if it does not exist yet.
    pub fn subscribe(&self, channel: &str) -> broadcast::Receiver<OrderChannelMessage> {
        self.sender(channel).subscribe()
    }

    /// Number of live subscribers on a channel.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .read()
            .get(channel)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    fn sender(&self, channel: &str) -> broadcast::Sender<OrderChannelMessage> {
        if let Some(sender) = self.channels.read().get(channel) {
            return sender.clone();
        }
        let mut channels = self.channels.write();
        channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_BUFFER_SIZE).0)
            .clone()
    }
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastSink for ChannelHub {
    fn broadcast(&self, channel: &str, message: OrderChannelMessage) {
        let sender = match self.channels.read().get(channel) {
            Some(sender) => sender.clone(),
            None => {
                debug!(%channel, "dropping message for channel with no subscribers");
                return;
            }
        };
        match sender.send(message) {
            Ok(delivered) => debug!(%channel, delivered, "order message broadcast"),
            Err(_) => debug!(%channel, "all subscribers disconnected, message dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use acp_types::{EventData, EventDataOrder, OrderMessageType, OrderStatus};

    use super::*;

    fn message(status: OrderStatus) -> OrderChannelMessage {
        OrderChannelMessage {
            message_type: OrderMessageType::OrderCreated,
            data: EventData::Order(EventDataOrder {
                checkout_session_id: "checkout_session_123".to_string(),
                permalink_url: "https://merchant.example/orders/1".to_string(),
                status,
                refunds: vec![],
            }),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_broadcast() {
        let hub = ChannelHub::new();
        let mut rx = hub.subscribe("checkout_session:abc");

        hub.broadcast("checkout_session:abc", message(OrderStatus::Created));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.message_type, OrderMessageType::OrderCreated);
    }

    #[tokio::test]
    async fn test_channels_are_isolated_per_session() {
        let hub = ChannelHub::new();
        let mut rx_a = hub.subscribe("checkout_session:a");
        let mut rx_b = hub.subscribe("checkout_session:b");

        hub.broadcast("checkout_session:a", message(OrderStatus::Confirmed));
        assert!(rx_a.recv().await.is_ok());
        assert!(matches!(
            rx_b.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_broadcast_without_subscribers_is_dropped_silently() {
        let hub = ChannelHub::new();
        // No channel exists yet
        hub.broadcast("checkout_session:nobody", message(OrderStatus::Created));

        // Channel exists but the only receiver is gone
        drop(hub.subscribe("checkout_session:gone"));
        hub.broadcast("checkout_session:gone", message(OrderStatus::Created));
        assert_eq!(hub.subscriber_count("checkout_session:gone"), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_get_a_copy() {
        let hub = ChannelHub::new();
        let mut rx1 = hub.subscribe("checkout_session:abc");
        let mut rx2 = hub.subscribe("checkout_session:abc");
        assert_eq!(hub.subscriber_count("checkout_session:abc"), 2);

        hub.broadcast("checkout_session:abc", message(OrderStatus::Shipped));
        let EventData::Order(order1) = rx1.recv().await.unwrap().data;
        let EventData::Order(order2) = rx2.recv().await.unwrap().data;
        assert_eq!(order1.status, OrderStatus::Shipped);
        assert_eq!(order2.status, OrderStatus::Shipped);
    }
}
