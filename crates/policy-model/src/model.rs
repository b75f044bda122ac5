use std::collections::BTreeMap;

/// A single policy rule: an ordered tuple of string fields.
///
/// Arity is not fixed here; it is set by the rule-line grammar and the
/// authorization model consuming the rules.
pub type Rule = Vec<String>;

/// In-memory store of authorization rules, grouped by section and rule type.
///
/// Two sections matter in practice: `"p"` holds permission rules and `"g"`
/// holds grouping (role inheritance) rules. Within a section, rules are
/// keyed by their type tag (`p`, `p2`, `g`, ...). Rules under one tag keep
/// insertion order, and tags enumerate in lexicographic order, so anything
/// serialized from this model is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyModel {
    sections: BTreeMap<String, BTreeMap<String, Vec<Rule>>>,
}

impl PolicyModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule under `section`/`ptype`, creating the section and tag
    /// entries on demand. Duplicates are kept.
    pub fn add_rule(&mut self, section: &str, ptype: &str, rule: Rule) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .entry(ptype.to_string())
            .or_default()
            .push(rule);
    }

    /// The rules stored under `section`/`ptype`, in insertion order. Empty
    /// slice if the tag is absent.
    pub fn rules(&self, section: &str, ptype: &str) -> &[Rule] {
        self.sections
            .get(section)
            .and_then(|tags| tags.get(ptype))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate one section's `(tag, rules)` pairs, tags in lexicographic
    /// order. Empty if the section is absent.
    pub fn section<'m>(&'m self, section: &str) -> impl Iterator<Item = (&'m str, &'m [Rule])> + 'm {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|tags| tags.iter().map(|(tag, rules)| (tag.as_str(), rules.as_slice())))
    }

    /// Iterate every `(section, tag, rules)` triple in the model, sections
    /// and tags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[Rule])> + '_ {
        self.sections.iter().flat_map(|(section, tags)| {
            tags.iter()
                .map(move |(tag, rules)| (section.as_str(), tag.as_str(), rules.as_slice()))
        })
    }

    /// Remove the first rule under `section`/`ptype` equal to `rule`.
    ///
    /// Returns whether a rule was removed.
    pub fn remove_rule(&mut self, section: &str, ptype: &str, rule: &[String]) -> bool {
        let rules = match self
            .sections
            .get_mut(section)
            .and_then(|tags| tags.get_mut(ptype))
        {
            Some(rules) => rules,
            None => return false,
        };

        match rules.iter().position(|r| r.as_slice() == rule) {
            Some(idx) => {
                rules.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every rule under `section`/`ptype` whose fields starting at
    /// `field_index` equal `field_values` positionally.
    ///
    /// An empty string in `field_values` matches any field value, and an
    /// empty `field_values` list matches every rule under the tag. A filter
    /// position beyond a rule's arity matches nothing. Returns whether any
    /// rule was removed.
    pub fn remove_filtered_rules(
        &mut self,
        section: &str,
        ptype: &str,
        field_index: usize,
        field_values: &[String],
    ) -> bool {
        let rules = match self
            .sections
            .get_mut(section)
            .and_then(|tags| tags.get_mut(ptype))
        {
            Some(rules) => rules,
            None => return false,
        };

        let before = rules.len();
        rules.retain(|rule| !filter_matches(rule, field_index, field_values));
        rules.len() != before
    }

    /// Drop every rule from every section.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Total number of rules across all sections and tags.
    pub fn rule_count(&self) -> usize {
        self.sections
            .values()
            .flat_map(|tags| tags.values())
            .map(Vec::len)
            .sum()
    }

    /// True when the model holds no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}

/// True when every filter value equals the rule field at the same offset
/// from `field_index`, treating the empty string as a wildcard.
fn filter_matches(rule: &[String], field_index: usize, field_values: &[String]) -> bool {
    field_values.iter().enumerate().all(|(i, value)| {
        value.is_empty() || rule.get(field_index + i).is_some_and(|field| field == value)
    })
}
