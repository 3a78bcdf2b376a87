use indexmap::map::Entry;
use indexmap::IndexMap;

use super::Error;
use crate::ids;
use crate::models::{self, Entity, Replace};

/// All live entities of one kind, keyed by identifier, in creation order.
#[derive(Debug)]
pub struct Collection<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Stores a new entity under a freshly generated identifier and returns it.
    pub fn create(&mut self, payload: T::Payload) -> Result<String, Error> {
        self.insert(ids::generate(), payload)
    }

    fn insert(&mut self, id: String, payload: T::Payload) -> Result<String, Error> {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => Err(Error::DuplicateIdentifier {
                collection: T::COLLECTION,
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                entry.insert(T::create(id.clone(), payload, models::now()));
                Ok(id)
            },
        }
    }

    pub fn list(&self) -> Vec<T> {
        self.entries.values().cloned().collect()
    }

    /// Entities accepted by `predicate`, in creation order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.entries
            .values()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.entries.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Replace> Collection<T> {
    /// Returns `false` when there is nothing stored under `id`.
    pub fn replace(&mut self, id: &str, payload: T::Payload) -> bool {
        match self.entries.get_mut(id) {
            Some(entity) => {
                entity.replace(payload, models::now());
                true
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use phototrack_api_structs::{PhotoPayload, UserPayload};

    use super::*;
    use crate::models::photos::Photo;
    use crate::models::users::User;

    fn user(name: &str) -> UserPayload {
        UserPayload {
            user_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_collection_lists_nothing() {
        let users = Collection::<User>::default();
        assert!(users.is_empty());
        assert!(users.list().is_empty());
        assert!(users.ids().is_empty());
    }

    #[test]
    fn create_assigns_identifier_and_keeps_creation_order() {
        let mut users = Collection::<User>::default();
        let first = users.create(user("first")).unwrap();
        let second = users.create(user("second")).unwrap();

        assert!(ids::is_canonical(&first));
        assert_ne!(first, second);
        assert_eq!(users.ids(), [first.clone(), second]);

        let stored = users.get(&first).unwrap();
        assert_eq!(stored.uuid, first);
        assert_eq!(stored.user_name, "first");
    }

    #[test]
    fn insert_refuses_taken_identifier() {
        let mut photos = Collection::<Photo>::default();
        photos
            .insert("taken".to_string(), PhotoPayload::default())
            .unwrap();

        let err = photos
            .insert("taken".to_string(), PhotoPayload::default())
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier { collection: "photos", .. }));
        assert_eq!(photos.len(), 1);
    }

    #[test]
    fn filter_keeps_creation_order() {
        let mut users = Collection::<User>::default();
        users.create(user("ann")).unwrap();
        users.create(user("bob")).unwrap();
        users.create(user("abe")).unwrap();

        let names: Vec<_> = users
            .filter(|u| u.user_name.starts_with('a'))
            .into_iter()
            .map(|u| u.user_name)
            .collect();
        assert_eq!(names, ["ann", "abe"]);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut users = Collection::<User>::default();
        let first = users.create(user("first")).unwrap();
        let second = users.create(user("second")).unwrap();
        let third = users.create(user("third")).unwrap();

        assert_eq!(users.remove(&second).map(|u| u.user_name), Some("second".to_string()));
        assert_eq!(users.remove(&second), None);
        assert_eq!(users.ids(), [first, third]);
    }

    #[test]
    fn replace_requires_an_existing_entity() {
        let mut users = Collection::<User>::default();
        let id = users.create(user("usr")).unwrap();

        assert!(users.replace(&id, user("jack")));
        assert_eq!(users.get(&id).unwrap().user_name, "jack");
        assert!(!users.replace("12345678-90ab-cdef-1234-567890abcdef", user("nobody")));
        assert_eq!(users.len(), 1);
    }
}
