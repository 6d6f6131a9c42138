//! Collections that defer mutation while locked.
//!
//! Systems that iterate a collection while callbacks add and remove entries
//! (damage ticks spawning new colliders, listeners unsubscribing mid-event)
//! lock the collection for the duration of the pass. Mutations made while
//! locked land in a pending buffer keyed by element, recording only the
//! intended final state, and are replayed in one transactional step on
//! unlock.
//!
//! # Example
//!
//! ```
//! use colmat::LockableSet;
//!
//! let mut handlers = LockableSet::new();
//! handlers.insert("explode");
//! handlers.insert("burn");
//!
//! handlers.lock();
//! handlers.remove(&"burn");
//! handlers.insert("freeze");
//!
//! // The container is untouched while locked...
//! assert!(handlers.contains(&"burn"));
//! // ...but iteration already skips entries marked for removal.
//! assert!(!handlers.iter().any(|&h| h == "burn"));
//!
//! // Unlocking replays the buffer.
//! assert!(handlers.unlock());
//! assert!(handlers.contains(&"freeze"));
//! assert!(!handlers.contains(&"burn"));
//! ```

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Mutation mode of a lockable collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockState {
    /// Mutations apply to the container immediately.
    #[default]
    Unlocked,
    /// Mutations are buffered until unlock.
    Locked,
}

/// Buffered intent for one key of a [`LockableMap`].
#[derive(Clone, Debug)]
enum Pending<V> {
    Insert(V),
    Remove,
}

/// A hash set whose mutations are buffered while locked.
#[derive(Clone, Debug, Default)]
pub struct LockableSet<T> {
    container: HashSet<T>,
    buffer: HashMap<T, bool>,
    state: LockState,
}

impl<T: Eq + Hash + Clone> LockableSet<T> {
    /// Create an empty, unlocked set.
    pub fn new() -> Self {
        Self {
            container: HashSet::new(),
            buffer: HashMap::new(),
            state: LockState::Unlocked,
        }
    }

    /// Whether mutations are currently buffered.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// Start buffering mutations.
    pub fn lock(&mut self) {
        self.set_locked(true);
    }

    /// Stop buffering and replay pending mutations.
    ///
    /// Returns whether any buffered change was applied.
    pub fn unlock(&mut self) -> bool {
        self.set_locked(false)
    }

    /// Set the lock state. Unlocking replays the buffer; the return value
    /// reports whether that applied any change. Setting the current state
    /// is a no-op.
    pub fn set_locked(&mut self, locked: bool) -> bool {
        if locked == self.is_locked() {
            return false;
        }

        if locked {
            self.state = LockState::Locked;
            return false;
        }

        self.state = LockState::Unlocked;
        self.apply_buffer()
    }

    fn apply_buffer(&mut self) -> bool {
        if self.buffer.is_empty() {
            return false;
        }

        for (value, keep) in self.buffer.drain() {
            if keep {
                self.container.insert(value);
            } else {
                self.container.remove(&value);
            }
        }
        true
    }

    /// Add `value`, or record the intent to add it while locked.
    pub fn insert(&mut self, value: T) {
        if self.is_locked() {
            self.buffer.insert(value, true);
        } else {
            self.container.insert(value);
        }
    }

    /// Remove `value`, or record the intent to remove it while locked.
    pub fn remove(&mut self, value: &T) {
        if self.is_locked() {
            self.buffer.insert(value.clone(), false);
        } else {
            self.container.remove(value);
        }
    }

    /// Whether the container holds `value`. Buffered intents do not count
    /// until replayed.
    pub fn contains(&self, value: &T) -> bool {
        self.container.contains(value)
    }

    /// Whether `value` is buffered for removal at the next unlock.
    pub fn is_pending_removal(&self, value: &T) -> bool {
        matches!(self.buffer.get(value), Some(false))
    }

    /// Number of elements in the container.
    #[inline]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Whether the container is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Clear pending mutations while locked, or the container itself while
    /// unlocked.
    pub fn clear(&mut self) {
        if self.is_locked() {
            self.buffer.clear();
        } else {
            self.container.clear();
        }
    }

    /// The underlying container.
    pub fn container(&self) -> &HashSet<T> {
        &self.container
    }

    /// Iterate container elements, skipping those buffered for removal.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.container
            .iter()
            .filter(|value| !self.is_pending_removal(value))
    }
}

impl<T: Eq + Hash + Clone> From<HashSet<T>> for LockableSet<T> {
    fn from(container: HashSet<T>) -> Self {
        Self {
            container,
            buffer: HashMap::new(),
            state: LockState::Unlocked,
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for LockableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashSet<T>>())
    }
}

/// A hash map whose mutations are buffered while locked.
///
/// Same state machine as [`LockableSet`], with the buffer carrying the
/// value to insert.
#[derive(Clone, Debug, Default)]
pub struct LockableMap<K, V> {
    container: HashMap<K, V>,
    buffer: HashMap<K, Pending<V>>,
    state: LockState,
}

impl<K: Eq + Hash + Clone, V> LockableMap<K, V> {
    /// Create an empty, unlocked map.
    pub fn new() -> Self {
        Self {
            container: HashMap::new(),
            buffer: HashMap::new(),
            state: LockState::Unlocked,
        }
    }

    /// Whether mutations are currently buffered.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// Start buffering mutations.
    pub fn lock(&mut self) {
        self.set_locked(true);
    }

    /// Stop buffering and replay pending mutations.
    ///
    /// Returns whether any buffered change was applied.
    pub fn unlock(&mut self) -> bool {
        self.set_locked(false)
    }

    /// Set the lock state. Unlocking replays the buffer; setting the
    /// current state is a no-op.
    pub fn set_locked(&mut self, locked: bool) -> bool {
        if locked == self.is_locked() {
            return false;
        }

        if locked {
            self.state = LockState::Locked;
            return false;
        }

        self.state = LockState::Unlocked;
        self.apply_buffer()
    }

    fn apply_buffer(&mut self) -> bool {
        if self.buffer.is_empty() {
            return false;
        }

        for (key, pending) in self.buffer.drain() {
            match pending {
                Pending::Insert(value) => {
                    self.container.insert(key, value);
                }
                Pending::Remove => {
                    self.container.remove(&key);
                }
            }
        }
        true
    }

    /// Insert `key -> value`, or record the intent while locked. A later
    /// intent for the same key wins.
    pub fn insert(&mut self, key: K, value: V) {
        if self.is_locked() {
            self.buffer.insert(key, Pending::Insert(value));
        } else {
            self.container.insert(key, value);
        }
    }

    /// Remove `key`, or record the intent while locked.
    pub fn remove(&mut self, key: &K) {
        if self.is_locked() {
            self.buffer.insert(key.clone(), Pending::Remove);
        } else {
            self.container.remove(key);
        }
    }

    /// Value stored for `key` in the container.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.container.get(key)
    }

    /// Whether the container holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.container.contains_key(key)
    }

    /// Whether `key` is buffered for removal at the next unlock.
    pub fn is_pending_removal(&self, key: &K) -> bool {
        matches!(self.buffer.get(key), Some(Pending::Remove))
    }

    /// Number of entries in the container.
    #[inline]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Whether the container is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Clear pending mutations while locked, or the container itself while
    /// unlocked.
    pub fn clear(&mut self) {
        if self.is_locked() {
            self.buffer.clear();
        } else {
            self.container.clear();
        }
    }

    /// The underlying container.
    pub fn container(&self) -> &HashMap<K, V> {
        &self.container
    }

    /// Iterate container entries, skipping keys buffered for removal.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.container
            .iter()
            .filter(|(key, _)| !self.is_pending_removal(key))
    }
}

impl<K: Eq + Hash + Clone, V> From<HashMap<K, V>> for LockableMap<K, V> {
    fn from(container: HashMap<K, V>) -> Self {
        Self {
            container,
            buffer: HashMap::new(),
            state: LockState::Unlocked,
        }
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for LockableMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<K, V>>())
    }
}
