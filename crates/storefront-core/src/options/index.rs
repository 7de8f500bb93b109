//! Pairwise compatibility index over option values.

use crate::catalog::{ConfigurableOption, Variant};
use crate::ids::ValueIndex;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Compatible values per other axis, for one `(axis, value)`.
pub type CompatSets = HashMap<String, BTreeSet<ValueIndex>>;

/// For every declared `(axis, value)`, the values of every other axis that
/// co-occur with it in at least one variant.
///
/// Every declared value has an entry, and every entry has a (possibly empty)
/// set for every other declared axis. A missing value in a set means the pair
/// is never realized; a missing entry means the value is not declared at all.
/// The index is never mutated after [`CompatibilityIndex::build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityIndex {
    table: HashMap<String, HashMap<ValueIndex, CompatSets>>,
    backed: HashMap<String, HashSet<ValueIndex>>,
}

impl CompatibilityIndex {
    /// Build the index from the product's axes and variants.
    ///
    /// Variant attributes that reference an undeclared axis or value are
    /// left out of the compatibility sets, but still count as backed.
    pub fn build(options: &[ConfigurableOption], variants: &[Variant]) -> Self {
        let mut table: HashMap<String, HashMap<ValueIndex, CompatSets>> = HashMap::new();
        let mut declared: HashSet<(&str, ValueIndex)> = HashSet::new();

        for option in options {
            let axis = table.entry(option.attribute_code.clone()).or_default();
            for value in &option.values {
                declared.insert((option.attribute_code.as_str(), value.value_index));

                let sets = axis.entry(value.value_index).or_default();
                for other in options {
                    if other.attribute_code != option.attribute_code {
                        sets.entry(other.attribute_code.clone()).or_default();
                    }
                }
            }
        }

        let mut backed: HashMap<String, HashSet<ValueIndex>> = HashMap::new();

        for variant in variants {
            for attr in &variant.attributes {
                backed
                    .entry(attr.code.clone())
                    .or_default()
                    .insert(attr.value_index);
                if !declared.contains(&(attr.code.as_str(), attr.value_index)) {
                    continue;
                }

                let Some(sets) = table
                    .get_mut(&attr.code)
                    .and_then(|axis| axis.get_mut(&attr.value_index))
                else {
                    continue;
                };

                // Visiting every ordered pair yields the symmetric relation.
                for other in &variant.attributes {
                    if other.code == attr.code
                        || !declared.contains(&(other.code.as_str(), other.value_index))
                    {
                        continue;
                    }
                    if let Some(set) = sets.get_mut(&other.code) {
                        set.insert(other.value_index);
                    }
                }
            }
        }

        Self { table, backed }
    }

    /// Values of `other_axis` compatible with `(axis, value)`.
    ///
    /// `None` when `(axis, value)` is undeclared or `other_axis` is unknown.
    pub fn compatible(
        &self,
        axis: &str,
        value: ValueIndex,
        other_axis: &str,
    ) -> Option<&BTreeSet<ValueIndex>> {
        self.sets(axis, value)?.get(other_axis)
    }

    /// All compatibility sets of `(axis, value)`.
    pub fn sets(&self, axis: &str, value: ValueIndex) -> Option<&CompatSets> {
        self.table.get(axis)?.get(&value)
    }

    /// Whether `(axis, value)` is declared.
    pub fn contains(&self, axis: &str, value: ValueIndex) -> bool {
        self.sets(axis, value).is_some()
    }

    /// Whether at least one variant references `(axis, value)`, declared or not.
    pub fn is_backed(&self, axis: &str, value: ValueIndex) -> bool {
        self.backed
            .get(axis)
            .map(|values| values.contains(&value))
            .unwrap_or(false)
    }

    /// Declared axis codes, in no particular order.
    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
