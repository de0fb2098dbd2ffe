//! Copy-on-write state store with synchronous subscriptions.
//!
//! `Store<S>` owns one immutable `Arc<S>`. An update clones it into a draft,
//! runs the transform on the draft and, only if the transform succeeds, swaps
//! the draft in and notifies listeners in registration order. Readers always
//! see a complete state; the value they hold is never written again.
//!
//! Writers are serialized by a mutex held across compute, swap and notify.
//! An update issued by a listener of the same store on the notifying thread is
//! rejected with [`StoreError::ReentrantUpdate`] instead of deadlocking.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::thread::{self, ThreadId};

/// Callback invoked with every newly installed state.
pub type Listener<S> = dyn Fn(&S) + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `update` was called from inside a listener while that same store was notifying.
    ReentrantUpdate,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReentrantUpdate => write!(f, "update issued from inside a store listener"),
        }
    }
}

impl std::error::Error for StoreError {}

struct Subscriber<S> {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Arc<Listener<S>>,
}

impl<S> Clone for Subscriber<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            listener: Arc::clone(&self.listener),
        }
    }
}

type Registry<S> = Mutex<Vec<Subscriber<S>>>;

pub struct Store<S> {
    current: RwLock<Arc<S>>,
    subscribers: Arc<Registry<S>>,
    writer: Mutex<()>,
    writer_thread: Mutex<Option<ThreadId>>,
    next_subscriber_id: AtomicU64,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records which thread is inside `update`; cleared on drop so a panicking
/// transform does not leave the store marked as busy.
struct WriterThread<'a>(&'a Mutex<Option<ThreadId>>);

impl<'a> WriterThread<'a> {
    fn claim(slot: &'a Mutex<Option<ThreadId>>, id: ThreadId) -> Self {
        *lock(slot) = Some(id);
        Self(slot)
    }
}

impl Drop for WriterThread<'_> {
    fn drop(&mut self) {
        *lock(self.0) = None;
    }
}

impl<S: Clone> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            writer: Mutex::new(()),
            writer_thread: Mutex::new(None),
            next_subscriber_id: AtomicU64::new(0),
        }
    }

    /// The current state. The returned value is immutable and is never
    /// changed by later updates.
    pub fn get(&self) -> Arc<S> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// An owned copy of the current state, free for the caller to mutate.
    pub fn snapshot(&self) -> S {
        S::clone(&self.get())
    }

    /// Run `transform` on a draft of the current state. On `Ok` the draft
    /// becomes the current state and every subscriber is notified; on `Err`
    /// the draft is dropped and nothing is notified.
    pub fn update<T, E, F>(&self, transform: F) -> Result<T, E>
    where
        F: FnOnce(&mut S) -> Result<T, E>,
        E: From<StoreError>,
    {
        let me = thread::current().id();
        if *lock(&self.writer_thread) == Some(me) {
            log::warn!(target: "store", "rejected re-entrant update from a listener");
            return Err(StoreError::ReentrantUpdate.into());
        }

        let _writer = lock(&self.writer);
        let _owner = WriterThread::claim(&self.writer_thread, me);
        self.apply(transform)
    }

    /// Install `next` as the current state and notify subscribers.
    pub fn replace(&self, next: S) -> Result<(), StoreError> {
        self.update(|draft| {
            *draft = next;
            Ok(())
        })
    }

    fn apply<T, E, F>(&self, transform: F) -> Result<T, E>
    where
        F: FnOnce(&mut S) -> Result<T, E>,
    {
        let mut draft = self.snapshot();
        let value = transform(&mut draft)?;

        let next = Arc::new(draft);
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = Arc::clone(&next);
        }
        self.notify(&next);
        Ok(value)
    }

    fn notify(&self, state: &S) {
        // Listeners registered from here on wait for the next update.
        let subscribers: Vec<Subscriber<S>> = lock(&*self.subscribers).clone();
        for subscriber in subscribers {
            if !subscriber.active.load(Ordering::Acquire) {
                continue;
            }
            let listener: &Listener<S> = &*subscriber.listener;
            if catch_unwind(AssertUnwindSafe(|| listener(state))).is_err() {
                log::error!(target: "store", "listener {} panicked during notification", subscriber.id);
            }
        }
    }

    /// Register `listener` for every subsequent update.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<S>
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        lock(&*self.subscribers).push(Subscriber {
            id,
            active: Arc::clone(&active),
            listener: Arc::new(listener),
        });
        Subscription {
            id,
            active,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&*self.subscribers).len()
    }
}

impl<S: Clone + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Handle returned by [`Store::subscribe`]. Dropping it keeps the listener
/// registered; call [`Subscription::unsubscribe`] to remove it.
#[must_use = "dropping a Subscription leaves the listener registered forever"]
pub struct Subscription<S> {
    id: u64,
    active: Arc<AtomicBool>,
    registry: Weak<Registry<S>>,
}

impl<S> Subscription<S> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deregister the listener. Takes effect immediately, including for the
    /// rest of a notification pass that is already running.
    pub fn unsubscribe(self) {
        self.active.store(false, Ordering::Release);
        if let Some(registry) = self.registry.upgrade() {
            lock(&*registry).retain(|s| s.id != self.id);
        }
    }
}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
