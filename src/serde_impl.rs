//! Serde implementations for the toolkit collections.
//!
//! The matrix serializes as its packed parts, `{ self_intersect, storage }`;
//! the key count is recomputed from the storage length on load, so a
//! hand-edited or corrupted document surfaces as a deserialization error
//! instead of a panic later. Collections with auxiliary structures (the
//! hash list's set, the cross map's reverse side) serialize only their
//! primary data and rebuild the rest; lockable collections serialize their
//! container and always come back unlocked with an empty buffer.

use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::cross_map::{CrossMap, MultiMap};
use crate::hash_list::HashList;
use crate::lockable::{LockableMap, LockableSet};
use crate::matrix::CollisionMatrix;

impl<T: Serialize> Serialize for CollisionMatrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CollisionMatrix", 2)?;
        state.serialize_field("self_intersect", &self.self_intersect())?;
        state.serialize_field("storage", self.storage())?;
        state.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CollisionMatrix<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename = "CollisionMatrix")]
        struct Raw<T> {
            self_intersect: bool,
            storage: Vec<T>,
        }

        let raw = Raw::deserialize(deserializer)?;
        CollisionMatrix::from_parts(raw.storage, raw.self_intersect).map_err(D::Error::custom)
    }
}

impl<T: Serialize> Serialize for HashList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for HashList<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        let mut list = HashList::with_capacity(items.len());
        for item in items {
            if !list.push(item) {
                return Err(D::Error::custom("duplicate element in hash list"));
            }
        }
        Ok(list)
    }
}

impl<L: Serialize, R: Serialize> Serialize for CrossMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Pairs instead of a map shape: json maps would demand string keys.
        serializer.collect_seq(self.iter())
    }
}

impl<'de, L, R> Deserialize<'de> for CrossMap<L, R>
where
    L: Deserialize<'de> + Eq + Hash + Clone,
    R: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(L, R)>::deserialize(deserializer)?;
        let mut map = CrossMap::with_capacity(pairs.len());
        for (left, right) in pairs {
            if map.contains_left(&left) || map.contains_right(&right) {
                return Err(D::Error::custom("conflicting pair in cross map"));
            }
            map.insert(left, right);
        }
        Ok(map)
    }
}

impl<K, V> Serialize for MultiMap<K, V>
where
    K: Serialize + Eq + Hash,
    V: Serialize + PartialEq,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, K, V> Deserialize<'de> for MultiMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de> + PartialEq,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let buckets = Vec::<(K, Vec<V>)>::deserialize(deserializer)?;
        Ok(buckets.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for LockableSet<T>
where
    T: Eq + Hash + Clone,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.container().iter())
    }
}

impl<'de, T> Deserialize<'de> for LockableSet<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let container = HashSet::<T>::deserialize(deserializer)?;
        Ok(Self::from(container))
    }
}

impl<K, V> Serialize for LockableMap<K, V>
where
    K: Serialize + Eq + Hash + Clone,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.container().iter())
    }
}

impl<'de, K, V> Deserialize<'de> for LockableMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
        Ok(Self::from(pairs.into_iter().collect::<HashMap<K, V>>()))
    }
}
