//! Incremental option selection and variant resolution.

use super::index::CompatibilityIndex;
use crate::catalog::{ConfigurableOption, OptionValue, Product, Variant, VariantProduct};
use crate::ids::ValueIndex;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Chosen value per axis code. At most one entry per axis.
pub type Selection = BTreeMap<String, ValueIndex>;

/// Result of a [`VariantSelector::select`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectOutcome {
    /// The value is now selected for its axis.
    Selected,
    /// The value was selected and has been toggled off.
    Deselected,
    /// The value is disabled; nothing changed.
    Rejected,
}

impl SelectOutcome {
    /// Whether the selection changed.
    pub fn changed(self) -> bool {
        !matches!(self, SelectOutcome::Rejected)
    }
}

/// The variant matching a complete selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedVariant {
    #[serde(flatten)]
    pub product: VariantProduct,
    /// Selected value record per axis code, in axis declaration order.
    pub options: IndexMap<String, OptionValue>,
}

type Listener = Box<dyn FnMut(&Selection) + Send>;

/// Selection state for one product.
///
/// Owns the compatibility index, the value lookups and the current selection.
/// Only [`select`](Self::select) and [`clear`](Self::clear) mutate the
/// selection; subscribers are notified after each change. Simple products get
/// the same surface with every predicate returning `false` and no variant.
pub struct VariantSelector {
    configurable: bool,
    attributes: IndexMap<String, String>,
    options: IndexMap<String, IndexMap<ValueIndex, OptionValue>>,
    index: CompatibilityIndex,
    // Keyed by the variant's value on each declared axis, in declaration order.
    variants: HashMap<Vec<ValueIndex>, VariantProduct>,
    selection: Selection,
    listeners: Vec<Listener>,
}

impl VariantSelector {
    /// Selector for any product kind.
    pub fn for_product(product: &Product) -> Self {
        match product.as_configurable() {
            Some(configurable) => {
                Self::new(&configurable.configurable_options, &configurable.variants)
            }
            None => Self::simple(),
        }
    }

    /// Selector for a configurable product.
    pub fn new(options: &[ConfigurableOption], variants: &[Variant]) -> Self {
        let mut attributes = IndexMap::new();
        let mut values: IndexMap<String, IndexMap<ValueIndex, OptionValue>> = IndexMap::new();

        for option in options {
            attributes.insert(option.attribute_code.clone(), option.label.clone());
            let axis = values.entry(option.attribute_code.clone()).or_default();
            for value in &option.values {
                axis.insert(value.value_index, value.clone());
            }
        }

        let mut lookup = HashMap::new();
        for variant in variants {
            let key: Option<Vec<ValueIndex>> = attributes
                .keys()
                .map(|code| variant.value_for(code))
                .collect();
            match key {
                // Duplicates: the last variant wins.
                Some(key) => {
                    lookup.insert(key, variant.product.clone());
                }
                None => tracing::debug!(
                    sku = %variant.product.sku,
                    "variant does not cover every axis, it can never be resolved"
                ),
            }
        }

        Self {
            configurable: true,
            attributes,
            options: values,
            index: CompatibilityIndex::build(options, variants),
            variants: lookup,
            selection: Selection::new(),
            listeners: Vec::new(),
        }
    }

    /// Selector for a product without option axes.
    pub fn simple() -> Self {
        Self {
            configurable: false,
            attributes: IndexMap::new(),
            options: IndexMap::new(),
            index: CompatibilityIndex::default(),
            variants: HashMap::new(),
            selection: Selection::new(),
            listeners: Vec::new(),
        }
    }

    pub fn is_configurable(&self) -> bool {
        self.configurable
    }

    /// Axis code to axis label, in declaration order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Axis code to its values, in declaration order.
    pub fn options(&self) -> &IndexMap<String, IndexMap<ValueIndex, OptionValue>> {
        &self.options
    }

    pub fn index(&self) -> &CompatibilityIndex {
        &self.index
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Look up a value of `axis` by its label.
    pub fn value_by_label(&self, axis: &str, label: &str) -> Option<ValueIndex> {
        self.options
            .get(axis)?
            .values()
            .find(|v| v.label == label)
            .map(|v| v.value_index)
    }

    pub fn is_selected(&self, axis: &str, value: ValueIndex) -> bool {
        self.selection.get(axis) == Some(&value)
    }

    /// Whether `(axis, value)` cannot be selected right now.
    ///
    /// A selected value is never disabled. With an empty selection, a value
    /// is disabled iff no variant references it. Otherwise it must be
    /// compatible with every selected value, so while its axis holds another
    /// value it stays disabled until that one is deselected.
    pub fn is_disabled(&self, axis: &str, value: ValueIndex) -> bool {
        if !self.configurable || self.is_selected(axis, value) {
            return false;
        }

        if self.selection.is_empty() {
            return !self.index.is_backed(axis, value);
        }

        self.selection.iter().any(|(code, selected)| {
            !self
                .index
                .compatible(code, *selected, axis)
                .map(|set| set.contains(&value))
                .unwrap_or(false)
        })
    }

    /// Toggle `(axis, value)`.
    ///
    /// Selecting the current value deselects it. Disabled values, including
    /// a second value on an axis that already has one, are rejected without
    /// changing anything.
    pub fn select(&mut self, axis: &str, value: ValueIndex) -> SelectOutcome {
        if !self.configurable {
            return SelectOutcome::Rejected;
        }

        let outcome = if self.is_selected(axis, value) {
            self.selection.remove(axis);
            SelectOutcome::Deselected
        } else if self.is_disabled(axis, value) {
            tracing::debug!(axis, value = value.get(), "option disabled, selection rejected");
            return SelectOutcome::Rejected;
        } else {
            self.selection.insert(axis.to_string(), value);
            SelectOutcome::Selected
        };

        tracing::debug!(axis, value = value.get(), ?outcome, "selection changed");
        self.notify();
        outcome
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.notify();
    }

    /// The variant matching the selection, once every axis has a value.
    pub fn resolved_variant(&self) -> Option<ResolvedVariant> {
        if !self.configurable || self.selection.len() != self.attributes.len() {
            return None;
        }

        let key: Vec<ValueIndex> = self
            .attributes
            .keys()
            .map(|code| self.selection.get(code).copied())
            .collect::<Option<_>>()?;
        let product = self.variants.get(&key)?.clone();

        let options = self
            .attributes
            .keys()
            .filter_map(|code| {
                let selected = self.selection.get(code)?;
                let value = self.options.get(code)?.get(selected)?;
                Some((code.clone(), value.clone()))
            })
            .collect();

        Some(ResolvedVariant { product, options })
    }

    /// Register a callback run after every selection change.
    pub fn subscribe(&mut self, listener: impl FnMut(&Selection) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.selection);
        }
    }
}

impl fmt::Debug for VariantSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantSelector")
            .field("configurable", &self.configurable)
            .field("attributes", &self.attributes)
            .field("selection", &self.selection)
            .field("variants", &self.variants.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariantAttribute;
    use crate::options::fixtures::{tshirt_options, tshirt_variants, variant};
    use std::sync::{Arc, Mutex};

    const RED: ValueIndex = ValueIndex::new(0);
    const BLUE: ValueIndex = ValueIndex::new(1);
    const GREEN: ValueIndex = ValueIndex::new(2);
    const S: ValueIndex = ValueIndex::new(0);
    const M: ValueIndex = ValueIndex::new(1);

    fn selector() -> VariantSelector {
        VariantSelector::new(&tshirt_options(), &tshirt_variants())
    }

    #[test]
    fn test_empty_selection_disables_only_unbacked_values() {
        let s = selector();
        assert!(!s.is_disabled("color", RED));
        assert!(!s.is_disabled("color", BLUE));
        assert!(s.is_disabled("color", GREEN));
        assert!(!s.is_disabled("size", S));
        assert!(!s.is_disabled("size", M));
    }

    #[test]
    fn test_selecting_color_disables_incompatible_size() {
        let mut s = selector();
        assert_eq!(s.select("color", RED), SelectOutcome::Selected);

        assert!(s.is_selected("color", RED));
        assert!(!s.is_disabled("size", S));
        assert!(s.is_disabled("size", M));
    }

    #[test]
    fn test_full_selection_resolves_variant() {
        let mut s = selector();
        s.select("color", RED);
        s.select("size", S);

        let resolved = s.resolved_variant().unwrap();
        assert_eq!(resolved.product.sku, "TSHIRT-RED-S");
        assert_eq!(resolved.options["color"].label, "Red");
        assert_eq!(resolved.options["size"].label, "S");
        assert_eq!(
            resolved.options.keys().collect::<Vec<_>>(),
            vec!["color", "size"]
        );
    }

    #[test]
    fn test_deselect_keeps_other_axis_and_clears_variant() {
        let mut s = selector();
        s.select("color", RED);
        s.select("size", S);

        assert_eq!(s.select("color", RED), SelectOutcome::Deselected);
        assert!(s.is_selected("size", S));
        assert!(!s.is_selected("color", RED));
        assert!(s.resolved_variant().is_none());
    }

    #[test]
    fn test_toggle_returns_to_previous_state() {
        let mut s = selector();
        s.select("size", M);
        let before = s.selection().clone();

        s.select("color", BLUE);
        s.select("color", BLUE);
        assert_eq!(s.selection(), &before);
    }

    #[test]
    fn test_disabled_selection_is_rejected() {
        let mut s = selector();
        s.select("color", RED);

        assert_eq!(s.select("size", M), SelectOutcome::Rejected);
        assert!(!s.is_selected("size", M));
        assert_eq!(s.selection().len(), 1);
    }

    #[test]
    fn test_unused_value_stays_disabled() {
        let mut s = selector();
        assert!(s.is_disabled("color", GREEN));
        s.select("size", S);
        assert!(s.is_disabled("color", GREEN));
        s.select("size", S);
        s.select("size", M);
        assert!(s.is_disabled("color", GREEN));
        assert_eq!(s.select("color", GREEN), SelectOutcome::Rejected);
    }

    #[test]
    fn test_selected_value_is_never_disabled() {
        let mut s = selector();
        s.select("color", BLUE);
        s.select("size", M);
        assert!(!s.is_disabled("color", BLUE));
        assert!(!s.is_disabled("size", M));
    }

    #[test]
    fn test_same_axis_value_needs_deselect_first() {
        let mut s = selector();
        s.select("color", RED);

        assert!(s.is_disabled("color", BLUE));
        assert_eq!(s.select("color", BLUE), SelectOutcome::Rejected);
        assert!(s.is_selected("color", RED));

        assert_eq!(s.select("color", RED), SelectOutcome::Deselected);
        assert!(!s.is_disabled("color", BLUE));
        assert_eq!(s.select("color", BLUE), SelectOutcome::Selected);
        assert_eq!(s.selection().len(), 1);
    }

    #[test]
    fn test_referenced_undeclared_value_is_selectable_when_empty() {
        let mut variants = tshirt_variants();
        variants.push(variant(
            104,
            vec![VariantAttribute::new("color", 0), VariantAttribute::new("size", 7)],
        ));

        let mut s = VariantSelector::new(&tshirt_options(), &variants);
        assert!(!s.is_disabled("size", ValueIndex::new(7)));
        assert_eq!(s.select("size", ValueIndex::new(7)), SelectOutcome::Selected);

        // it never made it into the compatibility sets
        assert!(s.is_disabled("color", RED));
        assert!(s.resolved_variant().is_none());
    }

    #[test]
    fn test_constraints_are_conjunctive() {
        let mut variants = tshirt_variants();
        variants.push(variant(
            103,
            vec![
                VariantAttribute::new("color", 0),
                VariantAttribute::new("size", 1),
                VariantAttribute::new("fit", 0),
            ],
        ));
        let mut options = tshirt_options();
        options.push(crate::options::fixtures::axis("fit", 2));

        let mut s = VariantSelector::new(&options, &variants);
        s.select("color", RED);
        s.select("fit", ValueIndex::new(0));

        // red pairs with S and M, fit 0 pairs only with M
        assert!(s.is_disabled("size", S));
        assert!(!s.is_disabled("size", M));
    }

    #[test]
    fn test_partial_selection_has_no_variant() {
        let mut s = selector();
        assert!(s.resolved_variant().is_none());
        s.select("color", BLUE);
        assert!(s.resolved_variant().is_none());
        s.select("size", M);
        assert_eq!(s.resolved_variant().unwrap().product.sku, "TSHIRT-BLUE-M");
    }

    #[test]
    fn test_duplicate_variants_last_wins() {
        let mut variants = tshirt_variants();
        let mut duplicate = variants[0].clone();
        duplicate.product.sku = "TSHIRT-RED-S-V2".to_string();
        variants.push(duplicate);

        let mut s = VariantSelector::new(&tshirt_options(), &variants);
        s.select("color", RED);
        s.select("size", S);
        assert_eq!(s.resolved_variant().unwrap().product.sku, "TSHIRT-RED-S-V2");
    }

    #[test]
    fn test_unknown_axis_is_disabled() {
        let mut s = selector();
        assert!(s.is_disabled("material", ValueIndex::new(0)));
        assert_eq!(s.select("material", ValueIndex::new(0)), SelectOutcome::Rejected);

        s.select("color", RED);
        assert!(s.is_disabled("material", ValueIndex::new(0)));
        assert!(s.is_disabled("size", ValueIndex::new(9)));
    }

    #[test]
    fn test_simple_product_surface() {
        let mut s = VariantSelector::simple();
        assert!(!s.is_configurable());
        assert!(!s.is_selected("color", RED));
        assert!(!s.is_disabled("color", RED));
        assert_eq!(s.select("color", RED), SelectOutcome::Rejected);
        assert!(s.selection().is_empty());
        assert!(s.resolved_variant().is_none());
    }

    #[test]
    fn test_listeners_see_each_change() {
        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut s = selector();
        s.subscribe(move |selection| sink.lock().unwrap().push(selection.len()));

        s.select("color", RED);
        s.select("size", M); // rejected
        s.select("size", S);
        s.clear();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 0]);
    }

    #[test]
    fn test_value_by_label() {
        let s = selector();
        assert_eq!(s.value_by_label("size", "M"), Some(M));
        assert_eq!(s.value_by_label("size", "XL"), None);
        assert_eq!(s.value_by_label("material", "M"), None);
    }
}
