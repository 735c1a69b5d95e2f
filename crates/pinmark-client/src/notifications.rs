use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use pinmark_types::Notification;

/// In-process notification list behind the bell icon. Newest last.
///
/// A panic while the list was locked leaves it usable.
#[derive(Default)]
pub struct NotificationFeed {
    items: RwLock<Vec<Notification>>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, text: impl Into<String>) -> Notification {
        let notification = Notification::new(text);
        self.write().push(notification.clone());
        notification
    }

    pub fn list(&self) -> Vec<Notification> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unread_count(&self) -> usize {
        self.read().iter().filter(|n| !n.read).count()
    }

    /// Returns `false` if no notification has this id.
    pub fn mark_read(&self, id: Uuid) -> bool {
        match self.write().iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&self) {
        self.write().iter_mut().for_each(|n| n.read = true);
    }

    pub fn remove(&self, id: Uuid) -> bool {
        let mut items = self.write();
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Notification>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Notification>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}
