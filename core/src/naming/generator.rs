use super::EntityId;
use uuid::Uuid;

/// A deterministic ID generator that produces a sequence of EntityIds
/// based on a seed namespace and a counter.
///
/// Replaying the same session against a generator with the same seed hands
/// out the same ids in the same order.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    namespace: Uuid,
    counter: u64,
}

impl IdGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()),
            counter: 0,
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        let count = self.counter;
        self.counter += 1;
        EntityId::from_uuid(Uuid::new_v5(&self.namespace, &count.to_be_bytes()))
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}
