use serde::{Deserialize, Serialize};

use splitledger_core::{Entity, UserId};

/// Contact information for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A user: identity only. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    contact: ContactInfo,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(UserId::new(), name)
    }

    pub fn with_id(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            contact: ContactInfo::default(),
        }
    }

    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact = contact;
        self
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
