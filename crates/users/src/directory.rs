use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use splitledger_core::UserId;

use crate::user::User;

/// Read-only user lookup consumed by the expense engine.
pub trait UserDirectory: Send + Sync {
    fn get_user(&self, id: &UserId) -> Option<User>;

    fn contains(&self, id: &UserId) -> bool {
        self.get_user(id).is_some()
    }
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn get_user(&self, id: &UserId) -> Option<User> {
        (**self).get_user(id)
    }

    fn contains(&self, id: &UserId) -> bool {
        (**self).contains(id)
    }
}

/// In-memory user registry for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, returning its id. Re-registering an id replaces it.
    pub fn register(&self, user: User) -> UserId {
        let id = user.id_typed();
        if let Ok(mut map) = self.inner.write() {
            map.insert(id, user);
        }
        id
    }

    pub fn list(&self) -> Vec<User> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_user(&self, id: &UserId) -> Option<User> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::ContactInfo;

    #[test]
    fn registered_users_can_be_looked_up() {
        let dir = InMemoryUserDirectory::new();
        let alice = User::new("Alice").with_contact(ContactInfo {
            email: Some("alice@example.com".to_string()),
            phone: None,
        });
        let id = dir.register(alice.clone());

        assert_eq!(dir.get_user(&id), Some(alice));
        assert!(dir.contains(&id));
        assert!(!dir.contains(&UserId::new()));
    }

    #[test]
    fn shared_directory_delegates_lookups() {
        let dir = Arc::new(InMemoryUserDirectory::new());
        let id = dir.register(User::new("Bob"));

        let shared: Arc<InMemoryUserDirectory> = Arc::clone(&dir);
        assert_eq!(shared.get_user(&id).map(|u| u.name().to_string()), Some("Bob".to_string()));
        assert_eq!(dir.list().len(), 1);
    }
}
