//! Session lookup: which profile is acting for a session key.

use std::collections::HashMap;

use uuid::Uuid;
use wild_records::ProfileId;

pub trait SessionStore {
    fn profile_for(&self, key: Uuid) -> Option<ProfileId>;
}

#[derive(Debug, Default)]
pub struct MemorySessions {
    sessions: HashMap<Uuid, ProfileId>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session for a profile and return its key
    pub fn open(&mut self, profile: ProfileId) -> Uuid {
        let key = Uuid::new_v4();
        self.sessions.insert(key, profile);
        key
    }
}

impl SessionStore for MemorySessions {
    fn profile_for(&self, key: Uuid) -> Option<ProfileId> {
        self.sessions.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_session() {
        let mut sessions = MemorySessions::new();
        let key = sessions.open(ProfileId(8));
        let other = sessions.open(ProfileId(9));
        assert_ne!(key, other);
        assert_eq!(sessions.profile_for(key), Some(ProfileId(8)));
        assert_eq!(sessions.profile_for(other), Some(ProfileId(9)));
        assert_eq!(sessions.profile_for(Uuid::new_v4()), None);
    }
}
