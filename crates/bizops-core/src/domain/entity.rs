//! Domain Layer - Core Entity Trait
//!
//! Every record the API hands out carries a string identifier.

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Replace the entity with the same id, or append it when absent
pub fn upsert_by_id<T: Entity>(entities: &mut Vec<T>, entity: T) {
    match entities.iter_mut().find(|e| e.id() == entity.id()) {
        Some(existing) => *existing = entity,
        None => entities.push(entity),
    }
}

/// Remove the entity with the given id. Returns true when something was removed.
pub fn remove_by_id<T: Entity>(entities: &mut Vec<T>, id: &str) -> bool {
    let before = entities.len();
    entities.retain(|e| e.id() != id);
    entities.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(String, u32);

    impl Entity for Row {
        fn id(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut rows = vec![Row("a".into(), 1), Row("b".into(), 2)];
        upsert_by_id(&mut rows, Row("b".into(), 20));
        assert_eq!(rows, vec![Row("a".into(), 1), Row("b".into(), 20)]);
    }

    #[test]
    fn test_upsert_appends_missing() {
        let mut rows = vec![Row("a".into(), 1)];
        upsert_by_id(&mut rows, Row("c".into(), 3));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].1, 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut rows = vec![Row("a".into(), 1), Row("b".into(), 2)];
        assert!(remove_by_id(&mut rows, "a"));
        assert!(!remove_by_id(&mut rows, "zzz"));
        assert_eq!(rows, vec![Row("b".into(), 2)]);
    }
}
