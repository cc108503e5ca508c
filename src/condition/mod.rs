#[allow(non_upper_case_globals)]
pub mod op;
mod values;

pub use {
    op::{ConditionOp, Operator},
    values::ConditionValues,
};

use {
    crate::{display_json, from_str_json, serutil::StringList, StatementError},
    indexmap::{map::Entry, IndexMap, IndexSet},
    log::{debug, trace, warn},
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
};

/// Default operator used when a condition is added without one.
pub const DEFAULT_OPERATOR: Operator = op::StringLike;

/// The keys and values under one operator of a `Condition` block. A parsed value may be a single string; rendered
/// values are always lists.
pub type ConditionMap = IndexMap<String, StringList>;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Condition {
    map: IndexMap<Operator, ConditionMap>,
}

display_json!(Condition);
from_str_json!(Condition);

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, operator: &Operator) -> Option<&ConditionMap> {
        self.map.get(operator)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, Operator, ConditionMap> {
        self.map.iter()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = IndexMap::deserialize(deserializer)?;

        Ok(Self {
            map,
        })
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct ConditionEntry {
    operator: Operator,
    values: IndexSet<String>,
}

/// The conditions accumulated by a statement, keyed by condition key.
///
/// Each key carries exactly one operator. Adding values for a key with the same operator unions them; adding with a
/// different operator replaces the entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionSet {
    entries: IndexMap<String, ConditionEntry>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `values` for `key` under `operator`.
    ///
    /// # Errors
    ///
    /// * [StatementError::InvalidConditionKey] if the key is empty, contains whitespace, or has an empty segment
    ///   around a `:`.
    /// * [StatementError::EmptyConditionValues] if no values are given.
    pub fn add<K, V>(&mut self, key: K, operator: Operator, values: V) -> Result<(), StatementError>
    where
        K: Into<String>,
        V: Into<ConditionValues>,
    {
        let key = key.into();
        validate_key(&key)?;

        let values = values.into();
        if values.is_empty() {
            debug!("Condition key {} was given no values", key);
            return Err(StatementError::EmptyConditionValues(key));
        }

        match self.entries.entry(key) {
            Entry::Vacant(entry) => {
                trace!("Adding condition {} {}", operator, entry.key());
                entry.insert(ConditionEntry {
                    operator,
                    values: values.into_iter().collect(),
                });
            }
            Entry::Occupied(mut entry) => {
                if entry.get().operator == operator {
                    entry.get_mut().values.extend(values);
                } else {
                    warn!(
                        "Condition key {} changed operator from {} to {}; the earlier values {:?} are discarded",
                        entry.key(),
                        entry.get().operator,
                        operator,
                        entry.get().values
                    );
                    entry.insert(ConditionEntry {
                        operator,
                        values: values.into_iter().collect(),
                    });
                }
            }
        }

        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The operator and values currently recorded for `key`.
    pub fn get(&self, key: &str) -> Option<(Operator, Vec<&str>)> {
        self.entries.get(key).map(|e| (e.operator, e.values.iter().map(String::as_str).collect()))
    }

    /// Group the entries by operator, in first-seen order. Returns `None` when there are no conditions.
    pub fn render(&self) -> Option<Condition> {
        if self.entries.is_empty() {
            return None;
        }

        let mut map: IndexMap<Operator, ConditionMap> = IndexMap::new();
        for (key, entry) in &self.entries {
            let values = StringList::List(entry.values.iter().cloned().collect());
            map.entry(entry.operator).or_default().insert(key.clone(), values);
        }

        Some(Condition {
            map,
        })
    }
}

fn validate_key(key: &str) -> Result<(), StatementError> {
    let valid = !key.is_empty()
        && !key.chars().any(char::is_whitespace)
        && match key.split_once(':') {
            Some((prefix, name)) => !prefix.is_empty() && !name.is_empty(),
            None => true,
        };

    if valid {
        Ok(())
    } else {
        debug!("Invalid condition key: {:?}", key);
        Err(StatementError::InvalidConditionKey(key.to_string()))
    }
}
