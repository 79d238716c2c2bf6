//! # Live interest entries owned by the registry.
//!
//! One slot type per delivery category. Handler and callback slots carry an
//! action to schedule; await and gather slots carry a buffer to push into.
//! All four collections live inside [`Registry`], the single piece of shared
//! mutable state in the dispatch core.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use crate::dispatch::id::{GatherId, HandlerId, IdAllocator};
use crate::events::{Event, Kind};
use crate::handlers::HandlerRef;

/// Boxed event predicate attached to await/gather entries.
pub(crate) type FilterFn = Box<dyn Fn(&Event) -> bool + Send + Sync>;

/// Persistent handler: fires on every match until cancelled.
pub(crate) struct HandlerSlot {
    pub(crate) id: HandlerId,
    pub(crate) kind: Kind,
    pub(crate) action: HandlerRef,
}

/// One-shot callback: fires on the first match, then the slot is removed.
pub(crate) struct CallbackSlot {
    pub(crate) kind: Kind,
    pub(crate) action: HandlerRef,
}

/// Open await request: the sender half of a channel bounded to exactly the
/// requested amount. The receiver half lives in the suspended caller.
pub(crate) struct AwaitSlot {
    pub(crate) id: u64,
    pub(crate) kind: Kind,
    pub(crate) filter: FilterFn,
    pub(crate) tx: mpsc::Sender<Event>,
}

/// Open gather session: a passively filled buffer, drained on `end_gather`.
///
/// `capacity == 0` means unbounded.
pub(crate) struct GatherSlot {
    pub(crate) id: GatherId,
    pub(crate) kind: Kind,
    pub(crate) filter: FilterFn,
    pub(crate) capacity: usize,
    pub(crate) buffer: VecDeque<Event>,
}

impl GatherSlot {
    /// True when one more event would exceed the declared capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.capacity != 0 && self.buffer.len() >= self.capacity
    }
}

/// All live interest entries plus the id source, one instance per dispatcher.
pub(crate) struct Registry {
    pub(crate) ids: IdAllocator,
    pub(crate) handlers: Vec<HandlerSlot>,
    pub(crate) callbacks: Vec<CallbackSlot>,
    pub(crate) awaits: Vec<AwaitSlot>,
    pub(crate) gathers: Vec<GatherSlot>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            handlers: Vec::new(),
            callbacks: Vec::new(),
            awaits: Vec::new(),
            gathers: Vec::new(),
        }
    }
}
