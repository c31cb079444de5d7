use uuid::Uuid;

/// Source of unique record identifiers
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random (v4) UUIDs in lowercase hyphenated form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_uuid_generator_format() {
        let id = UuidGenerator.next_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id, id.to_lowercase());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_uuid_generator_unique() {
        assert_ne!(UuidGenerator.next_id(), UuidGenerator.next_id());
    }

    #[test]
    fn test_closure_generator() {
        let counter = AtomicU32::new(0);
        let ids = move || format!("id-{}", counter.fetch_add(1, Ordering::Relaxed));

        assert_eq!(ids.next_id(), "id-0");
        assert_eq!(ids.next_id(), "id-1");
    }
}
