//! Route descriptors and guard-list normalization

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;
use waypost_guards::GuardCondition;

/// A route's `only_if` field as written: one condition or an ordered list.
///
/// Only exists at the configuration boundary. Convert it into a
/// [`GuardList`] before evaluating anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OnlyIf {
    /// Ordered list, possibly empty
    Many(Vec<GuardCondition>),
    /// A single condition
    One(GuardCondition),
}

// Dispatches on list vs table so a bad condition reports its own error
// (e.g. an unknown `kind`) instead of a generic untagged mismatch.
impl<'de> Deserialize<'de> for OnlyIf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OnlyIfVisitor;

        impl<'de> Visitor<'de> for OnlyIfVisitor {
            type Value = OnlyIf;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a guard condition or a list of guard conditions")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OnlyIf, A::Error> {
                let mut conditions = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(condition) = seq.next_element::<GuardCondition>()? {
                    conditions.push(condition);
                }
                Ok(OnlyIf::Many(conditions))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<OnlyIf, A::Error> {
                GuardCondition::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(OnlyIf::One)
            }
        }

        deserializer.deserialize_any(OnlyIfVisitor)
    }
}

impl Default for OnlyIf {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl OnlyIf {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Many(conditions) if conditions.is_empty())
    }
}

impl From<GuardCondition> for OnlyIf {
    fn from(condition: GuardCondition) -> Self {
        Self::One(condition)
    }
}

impl From<Vec<GuardCondition>> for OnlyIf {
    fn from(conditions: Vec<GuardCondition>) -> Self {
        Self::Many(conditions)
    }
}

/// Canonical ordered guard sequence. Position is priority.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardList(Arc<[GuardCondition]>);

impl Default for GuardList {
    fn default() -> Self {
        Self(Vec::<GuardCondition>::new().into())
    }
}

impl GuardList {
    /// Number of conditions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no conditions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Conditions in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, GuardCondition> {
        self.0.iter()
    }

    /// Conditions as a slice
    pub fn as_slice(&self) -> &[GuardCondition] {
        &self.0
    }
}

impl From<OnlyIf> for GuardList {
    fn from(only_if: OnlyIf) -> Self {
        match only_if {
            OnlyIf::Many(conditions) => Self(conditions.into()),
            OnlyIf::One(condition) => Self(vec![condition].into()),
        }
    }
}

impl From<&OnlyIf> for GuardList {
    fn from(only_if: &OnlyIf) -> Self {
        Self::from(only_if.clone())
    }
}

impl From<Vec<GuardCondition>> for GuardList {
    fn from(conditions: Vec<GuardCondition>) -> Self {
        Self(conditions.into())
    }
}

impl<'a> IntoIterator for &'a GuardList {
    type Item = &'a GuardCondition;
    type IntoIter = std::slice::Iter<'a, GuardCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Configuration for one navigable route: its guards and an optional
/// fallback destination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDescriptor {
    #[serde(default, skip_serializing_if = "OnlyIf::is_empty")]
    only_if: OnlyIf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect_to: Option<String>,
}

impl RouteDescriptor {
    /// Create a descriptor with the given guards and no fallback
    pub fn new(only_if: impl Into<OnlyIf>) -> Self {
        Self {
            only_if: only_if.into(),
            redirect_to: None,
        }
    }

    /// Set the fallback destination
    pub fn with_redirect_to(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    /// Guards as written
    pub fn only_if(&self) -> &OnlyIf {
        &self.only_if
    }

    /// Fallback destination as written, possibly empty
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    /// Fallback destination if present and non-empty
    pub fn fallback(&self) -> Option<&str> {
        self.redirect_to().filter(|target| !target.is_empty())
    }

    /// Normalized guard sequence
    pub fn guards(&self) -> GuardList {
        GuardList::from(&self.only_if)
    }
}
