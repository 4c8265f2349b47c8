use crate::error::CenterError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

/// Buffer size used when an observer does not ask for a specific one.
/// Status notifications are rare; 64 leaves room for bursts at startup.
pub const DEFAULT_CAPACITY: usize = 64;
const MIN_CAPACITY: usize = 1;

/// Marker trait for payloads that can be posted on a [`NotificationCenter`].
///
/// Implemented for every `Send + Sync + 'static` type.
pub trait Notification: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Notification for T {}

#[derive(Debug)]
struct Channel {
    capacity: usize,
    sender: Box<dyn Any + Send + Sync>,
}

impl Channel {
    fn open<T: Notification>(capacity: usize) -> Self {
        trace!(notification = type_name::<T>(), capacity, "Opening notification channel");
        let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
        Self { capacity, sender: Box::new(tx) }
    }

    fn sender<T: Notification>(&self) -> Result<broadcast::Sender<Arc<T>>, CenterError> {
        self.sender.downcast_ref::<broadcast::Sender<Arc<T>>>().cloned().ok_or_else(|| {
            CenterError::TypeMismatch {
                message: type_name::<T>().into(),
                context: Some("Registered channel carries another notification type".into()),
            }
        })
    }
}

/// An in-process notification center.
///
/// Notifications are routed by their Rust type: every payload type gets its own
/// broadcast channel, opened lazily by the first observer. Cloning the center
/// yields another handle to the same set of channels.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    channels: Arc<RwLock<FxHashMap<TypeId, Channel>>>,
}

impl NotificationCenter {
    /// Creates an empty center.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing notifications of type `T` with [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    /// Returns [`CenterError::TypeMismatch`] if the registry is corrupted for `T`.
    ///
    /// # Examples
    /// ```rust
    /// use capable_center::{NotificationCenter, NotificationReceiverExt};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Ping(u8);
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), capable_center::CenterError> {
    /// let center = NotificationCenter::new();
    /// let mut rx = center.subscribe::<Ping>()?;
    /// center.post(Ping(1))?;
    /// assert_eq!(rx.next_notification().await.map(|p| p.0), Some(1));
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T: Notification>(
        &self,
    ) -> Result<broadcast::Receiver<Arc<T>>, CenterError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Starts observing notifications of type `T` with a specific buffer capacity.
    ///
    /// The first observer of `T` decides the capacity; later requests for a
    /// different capacity reuse the existing channel.
    ///
    /// # Errors
    /// Returns [`CenterError::InvalidCapacity`] if `capacity` is zero.
    pub fn subscribe_with_capacity<T: Notification>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, CenterError> {
        if capacity < MIN_CAPACITY {
            return Err(CenterError::InvalidCapacity {
                message: format!("capacity must be >= {MIN_CAPACITY}").into(),
                context: Some(type_name::<T>().into()),
            });
        }

        let id = TypeId::of::<T>();

        if let Some(channel) = self.channels.read().get(&id) {
            warn_on_capacity_mismatch::<T>(channel.capacity, capacity);
            return channel.sender::<T>().map(|tx| tx.subscribe());
        }

        let mut channels = self.channels.write();
        let channel = channels.entry(id).or_insert_with(|| Channel::open::<T>(capacity));
        warn_on_capacity_mismatch::<T>(channel.capacity, capacity);
        let tx = channel.sender::<T>()?;
        drop(channels);

        Ok(tx.subscribe())
    }

    /// Posts a notification to every current observer of `T`.
    ///
    /// Returns how many observers received it. Posting without observers is
    /// not an error and returns `Ok(0)`.
    ///
    /// # Errors
    /// Returns [`CenterError::TypeMismatch`] if the registry is corrupted for `T`.
    pub fn post<T: Notification>(&self, notification: T) -> Result<usize, CenterError> {
        self.post_arc(Arc::new(notification))
    }

    /// Posts an already shared notification without re-wrapping it.
    ///
    /// # Errors
    /// Returns [`CenterError::TypeMismatch`] if the registry is corrupted for `T`.
    pub fn post_arc<T: Notification>(&self, notification: Arc<T>) -> Result<usize, CenterError> {
        let sender = {
            let channels = self.channels.read();
            match channels.get(&TypeId::of::<T>()) {
                Some(channel) => channel.sender::<T>()?,
                None => {
                    trace!(notification = type_name::<T>(), "Notification dropped: no channel");
                    return Ok(0);
                },
            }
        };

        Ok(sender.send(notification).map_or_else(
            |_| {
                trace!(notification = type_name::<T>(), "Notification dropped: no observers");
                0
            },
            |count| {
                trace!(notification = type_name::<T>(), count, "Notification posted");
                count
            },
        ))
    }

    /// Number of live observers of `T`.
    #[must_use]
    pub fn observer_count<T: Notification>(&self) -> usize {
        self.channels
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|channel| channel.sender::<T>().ok())
            .map_or(0, |tx| tx.receiver_count())
    }

    /// Drops the channel of `T`. Its observers drain what is buffered, then see the close.
    ///
    /// Returns `false` when no channel was open for `T`.
    pub fn close<T: Notification>(&self) -> bool {
        let closed = self.channels.write().remove(&TypeId::of::<T>()).is_some();
        trace!(notification = type_name::<T>(), closed, "Notification channel closed");
        closed
    }

    /// Drops every channel. Observers see their receivers close.
    ///
    /// Returns the number of channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        drop(channels);

        trace!(count, "Notification center shut down");
        count
    }
}

fn warn_on_capacity_mismatch<T: Notification>(existing: usize, requested: usize) {
    if existing != requested {
        warn!(
            notification = type_name::<T>(),
            existing_capacity = existing,
            requested_capacity = requested,
            "Notification channel already opened with a different capacity"
        );
    }
}
