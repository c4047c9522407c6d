//! Predicate - boolean gate over the active roll options

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// The set of option tags active for one roll (traits, `proficiency:<rank>` markers, toggles)
///
/// Ordered so anything derived from it iterates deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeSet<String>);

impl OptionSet {
    pub fn new() -> Self {
        OptionSet(BTreeSet::new())
    }

    pub fn insert(&mut self, option: impl Into<String>) -> bool {
        self.0.insert(option.into())
    }

    pub fn contains(&self, option: &str) -> bool {
        self.0.contains(option)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// Union of these options with a trait list, as used for damage predicates
    pub fn with_traits<S: AsRef<str>>(&self, traits: &[S]) -> OptionSet {
        let mut union = self.clone();
        for t in traits {
            union.insert(t.as_ref());
        }
        union
    }
}

impl<S: Into<String>> FromIterator<S> for OptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        OptionSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for OptionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// `all` / `any` / `not` test over an [`OptionSet`]
///
/// An empty `all` or `any` clause is satisfied by anything, so the default
/// predicate passes every option set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Predicate {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not: Vec<String>,
}

impl Predicate {
    pub fn all_of<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Predicate {
            all: tags.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn any_of<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Predicate {
            any: tags.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn none_of<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Predicate {
            not: tags.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Conjunction of two predicates
    ///
    /// Exact for `all` and `not`. Two non-empty `any` clauses cannot be
    /// expressed as a single clause, so the other side's `any` is folded into
    /// `all` only when this side has none.
    pub fn and(mut self, other: Predicate) -> Self {
        self.all.extend(other.all);
        self.not.extend(other.not);
        if self.any.is_empty() {
            self.any = other.any;
        } else if !other.any.is_empty() {
            tracing::warn!(
                "Combining two `any` clauses; keeping {:?} and dropping {:?}",
                self.any,
                other.any
            );
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty() && self.not.is_empty()
    }

    /// Evaluate against the active options
    pub fn test(&self, options: &OptionSet) -> bool {
        let all = self.all.iter().all(|tag| options.contains(tag));
        let any = self.any.is_empty() || self.any.iter().any(|tag| options.contains(tag));
        let not = !self.not.iter().any(|tag| options.contains(tag));
        all && any && not
    }

    /// Parse an authored predicate, failing open
    ///
    /// A value that does not have the `{all, any, not}` shape yields the
    /// empty predicate (which always passes) and a warning, so one authoring
    /// mistake cannot block an otherwise valid roll.
    pub fn from_value_lenient(value: &toml::Value) -> Predicate {
        match value.clone().try_into::<Predicate>() {
            Ok(predicate) => predicate,
            Err(error) => {
                tracing::warn!(
                    "Malformed predicate {}, treating as always true: {}",
                    value,
                    error
                );
                Predicate::default()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientPredicate {
    Valid(Predicate),
    Malformed(serde::de::IgnoredAny),
}

/// `deserialize_with` for optional predicate fields, failing open like
/// [`Predicate::from_value_lenient`]
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Predicate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LenientPredicate>::deserialize(deserializer)? {
        Some(LenientPredicate::Valid(predicate)) => Some(predicate),
        Some(LenientPredicate::Malformed(_)) => {
            tracing::warn!("Malformed predicate, treating as always true");
            Some(Predicate::default())
        }
        None => None,
    })
}
