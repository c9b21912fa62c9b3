use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a list item.
///
/// Assigned from a monotonically increasing counter and never reused while
/// the registry is alive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The id after this one, or `None` once the counter is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(ItemId)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ItemId)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
}

impl Item {
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// An id as found in a persisted order array.
///
/// Older data stored ids as strings (read back from DOM attributes), so both
/// shapes are accepted. Anything else is kept as `Invalid` and dropped.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientId {
    Number(u64),
    Text(String),
    Invalid(IgnoredAny),
}

impl LenientId {
    fn into_id(self) -> Option<ItemId> {
        match self {
            LenientId::Number(n) => Some(ItemId(n)),
            LenientId::Text(s) => s.parse().ok(),
            LenientId::Invalid(IgnoredAny) => None,
        }
    }
}

/// Last committed visual order, as a sequence of item ids.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderRecord(Vec<ItemId>);

impl<'de> Deserialize<'de> for OrderRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<LenientId>::deserialize(deserializer)?;
        Ok(raw.into_iter().filter_map(LenientId::into_id).collect())
    }
}

impl From<Vec<ItemId>> for OrderRecord {
    fn from(ids: Vec<ItemId>) -> Self {
        OrderRecord(ids)
    }
}

impl FromIterator<ItemId> for OrderRecord {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        OrderRecord(iter.into_iter().collect())
    }
}

impl OrderRecord {
    pub fn ids(&self) -> &[ItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.0.contains(&id)
    }

    pub fn push(&mut self, id: ItemId) {
        if !self.contains(id) {
            self.0.push(id);
        }
    }

    /// Returns true when the id was present.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.0.len();
        self.0.retain(|x| *x != id);
        self.0.len() != before
    }
}
