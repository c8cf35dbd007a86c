use serde::{Deserialize, Serialize};

/// How many samples a tracked entity keeps per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Retention {
    /// Keep every sample for the lifetime of the entity.
    #[default]
    Unbounded,
    /// Keep only the newest `samples` entries (ring buffer). Never less than one.
    Window { samples: usize },
}

impl Retention {
    /// Keep the last `samples` entries
    pub fn window(samples: usize) -> Self {
        Retention::Window { samples }
    }

    /// Maximum channel length, or `None` when unbounded
    pub fn capacity(&self) -> Option<usize> {
        match *self {
            Retention::Unbounded => None,
            Retention::Window { samples } => Some(samples.max(1)),
        }
    }
}
