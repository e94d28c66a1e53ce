use uuid::Uuid;

/// Source of ids for checklist items, reminders and organizer entries.
///
/// Injected into the submission service so tests can use predictable ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random v4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counts up from 1: `00000000-0000-0000-0000-000000000001`, ...
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl SequentialIds {
    pub fn id(n: u64) -> Uuid {
        Uuid::from_u128(n as u128)
    }
}

#[cfg(test)]
impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let n = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;
        Self::id(n)
    }
}
