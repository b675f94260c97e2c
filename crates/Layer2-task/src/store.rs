//! Task result store
//!
//! Tasks hand their outputs to each other through a store keyed by result
//! kind rather than by producer. A packaging step asks for "the compiled
//! classes" without knowing which task compiled them, so tasks compose into
//! any graph that agrees on kinds.
//!
//! Invariants:
//! - one kind name maps to exactly one Rust type
//! - values of a kind keep their publication order; index 0 is the primary
//! - nothing is ever removed or replaced

use sashimono_foundation::{Error, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// A value one task publishes for others to consume
pub trait TaskResult: Any + Send + Sync + fmt::Debug {
    /// Explicit kind identifier, e.g. `CompileResult`
    const KIND: &'static str;
}

/// Values of one kind, type-erased as `Vec<T>`
struct KindSlot {
    type_id: TypeId,
    len: usize,
    values: Box<dyn Any + Send + Sync>,
}

/// Heterogeneous, append-only mapping of result kind to ordered values
#[derive(Default)]
pub struct TaskResultStore {
    slots: HashMap<&'static str, KindSlot>,
    /// Kinds in order of first publication
    order: Vec<&'static str>,
}

impl TaskResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the list of its kind, returning its index
    pub fn put<T: TaskResult>(&mut self, value: T) -> Result<usize> {
        match self.slots.get_mut(T::KIND) {
            Some(slot) => {
                if slot.type_id != TypeId::of::<T>() {
                    return Err(Error::InvalidInput(format!(
                        "result kind `{}` is already bound to another type",
                        T::KIND
                    )));
                }
                let values = slot.values.downcast_mut::<Vec<T>>().ok_or_else(|| {
                    Error::InvalidInput(format!("result kind `{}` has a corrupt slot", T::KIND))
                })?;
                warn!(
                    "Result kind {} published again ({} existing)",
                    T::KIND,
                    values.len()
                );
                values.push(value);
                slot.len = values.len();
                Ok(slot.len - 1)
            }
            None => {
                debug!("Publishing first {} result", T::KIND);
                self.slots.insert(
                    T::KIND,
                    KindSlot {
                        type_id: TypeId::of::<T>(),
                        len: 1,
                        values: Box::new(vec![value]),
                    },
                );
                self.order.push(T::KIND);
                Ok(0)
            }
        }
    }

    /// All values of kind `T`, in publication order. Empty when nothing
    /// published it.
    pub fn get<T: TaskResult>(&self) -> &[T] {
        self.slots
            .get(T::KIND)
            .and_then(|slot| slot.values.downcast_ref::<Vec<T>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The primary (first published) value of kind `T`
    pub fn first<T: TaskResult>(&self) -> Result<&T> {
        self.get::<T>()
            .first()
            .ok_or_else(|| Error::missing_result(T::KIND))
    }

    /// The most recently published value of kind `T`
    pub fn last<T: TaskResult>(&self) -> Result<&T> {
        self.get::<T>()
            .last()
            .ok_or_else(|| Error::missing_result(T::KIND))
    }

    pub fn contains_kind(&self, kind: &str) -> bool {
        self.slots.contains_key(kind)
    }

    /// Number of values published under `kind` (0 for unknown kinds)
    pub fn count(&self, kind: &str) -> usize {
        self.slots.get(kind).map(|s| s.len).unwrap_or(0)
    }

    /// Published kinds in order of first publication
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for TaskResultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.order.iter().map(|k| (k, self.count(k))))
            .finish()
    }
}
