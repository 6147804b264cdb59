use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::watch;

/// Change notifications for one [`Property`].
///
/// Each subscriber tracks what it has seen independently; several quick updates
/// collapse into a single wake-up carrying the latest value.
pub struct PropertySubscriber<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> PropertySubscriber<T> {
    /// Wait for the next change. Returns false once the property is dropped.
    pub async fn wait_for_change(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Whether a change arrived since the last look, without waiting.
    pub fn try_recv(&mut self) -> bool {
        match self.receiver.has_changed() {
            Ok(true) => {
                self.receiver.borrow_and_update();
                true
            }
            _ => false,
        }
    }

    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }
}

/// Observable value owned by a view model.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync> {
    sender: Arc<watch::Sender<T>>,
    name: String,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (sender, _) = watch::channel(initial_value);
        Self {
            sender: Arc::new(sender),
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Read through a closure without cloning the whole value.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.sender.borrow())
    }

    pub fn set(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
    }

    pub fn subscribe(&self) -> PropertySubscriber<T> {
        PropertySubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({}: {:?})", self.name, *self.sender.borrow())
    }
}
