//! Rig Cost Model
//! Holds the rigs, their category/item hierarchy and the totals derived from them.
//!
//! Rigs and categories sit behind `Arc` so that edits are copy-on-write:
//! an edit clones only the rig and category on the path to the changed item,
//! everything else stays shared with earlier snapshots.

use super::taxonomy::initial_costs;
use std::sync::Arc;
use tracing::debug;

/// A single priced cost line.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub cost: f64,
}

/// A phase-of-work grouping of cost items.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
}

impl Category {
    /// Plain additive sum of all item costs.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.cost).sum()
    }

    /// Match by id, or by display name ignoring case and any leading icon.
    fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key.trim()) || normalize_name(&self.name) == normalize_name(key)
    }
}

impl Item {
    fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key.trim()) || normalize_name(&self.name) == normalize_name(key)
    }
}

/// An independent cost scenario with its own copy of the taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    pub id: String,
    pub name: String,
    pub costs: Vec<Arc<Category>>,
}

impl Rig {
    fn new(number: usize) -> Self {
        Self {
            id: format!("rig-{}", number),
            name: format!("Rig {}", number),
            costs: initial_costs(),
        }
    }

    /// Sum of all category totals.
    pub fn total(&self) -> f64 {
        self.costs.iter().map(|category| category.total()).sum()
    }
}

/// One row of the rig comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct RigSummary {
    pub id: String,
    pub name: String,
    pub total: f64,
    pub selected: bool,
}

/// A cost row coming from an imported sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    pub category: String,
    pub item: String,
    pub cost: f64,
}

/// Ordered rigs plus the current selection. Never empty.
#[derive(Debug, Clone)]
pub struct RigBook {
    rigs: Vec<Arc<Rig>>,
    selected: String,
}

impl Default for RigBook {
    fn default() -> Self {
        Self::new()
    }
}

impl RigBook {
    /// Start with a single rig, "Rig 1", selected.
    pub fn new() -> Self {
        let rig = Rig::new(1);
        let selected = rig.id.clone();
        Self {
            rigs: vec![Arc::new(rig)],
            selected,
        }
    }

    pub fn rigs(&self) -> &[Arc<Rig>] {
        &self.rigs
    }

    pub fn len(&self) -> usize {
        self.rigs.len()
    }

    pub fn selected_id(&self) -> &str {
        &self.selected
    }

    pub fn selected_rig(&self) -> Option<&Rig> {
        self.rigs
            .iter()
            .find(|rig| rig.id == self.selected)
            .map(|rig| rig.as_ref())
    }

    /// Select an existing rig. Unknown ids are ignored.
    pub fn select_rig(&mut self, rig_id: &str) -> bool {
        if self.rigs.iter().any(|rig| rig.id == rig_id) {
            self.selected = rig_id.to_string();
            true
        } else {
            false
        }
    }

    /// Append a rig with a zeroed taxonomy and select it.
    pub fn create_rig(&mut self) -> &Rig {
        let mut number = self.rigs.len() + 1;
        while self.rigs.iter().any(|rig| rig.id == format!("rig-{}", number)) {
            number += 1;
        }

        let rig = Rig::new(number);
        debug!(rig_id = %rig.id, "created rig");
        self.selected = rig.id.clone();
        self.rigs.push(Arc::new(rig));
        &self.rigs[self.rigs.len() - 1]
    }

    /// Remove a rig unless it is the last one.
    /// A removed selection falls back to the first remaining rig.
    pub fn remove_rig(&mut self, rig_id: &str) -> bool {
        if self.rigs.len() <= 1 {
            return false;
        }
        let Some(index) = self.rigs.iter().position(|rig| rig.id == rig_id) else {
            return false;
        };

        self.rigs.remove(index);
        if self.selected == rig_id {
            self.selected = self.rigs[0].id.clone();
        }
        debug!(rig_id, remaining = self.rigs.len(), "removed rig");
        true
    }

    /// Set one item's cost from raw user input. Non-numeric input becomes 0.
    pub fn set_item_cost(
        &mut self,
        rig_id: &str,
        category_id: &str,
        item_id: &str,
        raw_value: &str,
    ) -> bool {
        let Some((rig_idx, cat_idx, item_idx)) = self.locate(rig_id, |rigs, r| {
            let cat_idx = rigs[r].costs.iter().position(|c| c.id == category_id)?;
            let item_idx = rigs[r].costs[cat_idx]
                .items
                .iter()
                .position(|i| i.id == item_id)?;
            Some((cat_idx, item_idx))
        }) else {
            return false;
        };

        self.write_cost(rig_idx, cat_idx, item_idx, parse_cost(raw_value));
        true
    }

    /// Categories of the selected rig.
    pub fn selected_rig_costs(&self) -> &[Arc<Category>] {
        self.selected_rig()
            .map(|rig| rig.costs.as_slice())
            .unwrap_or(&[])
    }

    /// Total of the selected rig.
    pub fn grand_total(&self) -> f64 {
        self.selected_rig().map(Rig::total).unwrap_or(0.0)
    }

    pub fn comparison(&self) -> Vec<RigSummary> {
        self.rigs
            .iter()
            .map(|rig| RigSummary {
                id: rig.id.clone(),
                name: rig.name.clone(),
                total: rig.total(),
                selected: rig.id == self.selected,
            })
            .collect()
    }

    /// Cheap structural copy of the current rigs.
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Arc<Rig>> {
        self.rigs.clone()
    }

    /// Apply imported cost rows to a rig. Returns how many items were updated.
    pub fn apply_entries(&mut self, rig_id: &str, entries: &[CostEntry]) -> usize {
        let mut applied = 0;
        for entry in entries {
            let located = self.locate(rig_id, |rigs, r| {
                let cat_idx = rigs[r]
                    .costs
                    .iter()
                    .position(|c| c.matches(&entry.category))?;
                let item_idx = rigs[r].costs[cat_idx]
                    .items
                    .iter()
                    .position(|i| i.matches(&entry.item))?;
                Some((cat_idx, item_idx))
            });

            match located {
                Some((rig_idx, cat_idx, item_idx)) => {
                    let cost = if entry.cost.is_finite() { entry.cost } else { 0.0 };
                    self.write_cost(rig_idx, cat_idx, item_idx, cost);
                    applied += 1;
                }
                None => debug!(category = %entry.category, item = %entry.item, "no matching cost item"),
            }
        }
        applied
    }

    fn locate<F>(&self, rig_id: &str, find: F) -> Option<(usize, usize, usize)>
    where
        F: FnOnce(&[Arc<Rig>], usize) -> Option<(usize, usize)>,
    {
        let rig_idx = self.rigs.iter().position(|rig| rig.id == rig_id)?;
        let (cat_idx, item_idx) = find(&self.rigs, rig_idx)?;
        Some((rig_idx, cat_idx, item_idx))
    }

    fn write_cost(&mut self, rig_idx: usize, cat_idx: usize, item_idx: usize, cost: f64) {
        let rig = Arc::make_mut(&mut self.rigs[rig_idx]);
        let category = Arc::make_mut(&mut rig.costs[cat_idx]);
        category.items[item_idx].cost = cost;
    }
}

/// Parse like a browser number field: the longest numeric prefix wins,
/// anything unparseable or non-finite becomes 0.
pub fn parse_cost(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let value = (1..=trimmed.len())
        .rev()
        .filter(|&end| trimmed.is_char_boundary(end))
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .unwrap_or(0.0);

    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn normalize_name(name: &str) -> String {
    name.trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_input_becomes_zero() {
        let mut book = RigBook::new();
        book.set_item_cost("rig-1", "drilling", "mud", "1200");
        book.set_item_cost("rig-1", "drilling", "mud", "abc");

        let cost = book.selected_rig_costs()[1].items[3].cost;
        assert_eq!(cost, 0.0);
        assert!(!cost.is_nan());
    }

    #[test]
    fn parse_cost_follows_number_field_rules() {
        assert_eq!(parse_cost("50000"), 50000.0);
        assert_eq!(parse_cost("  12.5"), 12.5);
        assert_eq!(parse_cost("12abc"), 12.0);
        assert_eq!(parse_cost("1e3"), 1000.0);
        assert_eq!(parse_cost("1e"), 1.0);
        assert_eq!(parse_cost(""), 0.0);
        assert_eq!(parse_cost("-"), 0.0);
        assert_eq!(parse_cost("NaN"), 0.0);
        assert_eq!(parse_cost("inf"), 0.0);
    }

    #[test]
    fn scenario_add_and_remove_rigs() {
        let mut book = RigBook::new();
        assert_eq!(book.len(), 1);
        assert_eq!(book.rigs()[0].name, "Rig 1");

        book.set_item_cost("rig-1", "pre-drilling", "land", "50000");
        assert_eq!(book.selected_rig_costs()[0].total(), 50000.0);

        let new_id = book.create_rig().id.clone();
        assert_eq!(new_id, "rig-2");
        assert_eq!(book.selected_id(), "rig-2");
        assert_eq!(book.selected_rig().map(Rig::total), Some(0.0));

        assert!(book.remove_rig("rig-1"));
        assert_eq!(book.len(), 1);
        assert_eq!(book.rigs()[0].name, "Rig 2");
    }

    #[test]
    fn removing_last_rig_is_a_no_op() {
        let mut book = RigBook::new();
        let before = book.snapshot();

        assert!(!book.remove_rig("rig-1"));
        assert_eq!(book.len(), 1);
        assert!(Arc::ptr_eq(&before[0], &book.rigs()[0]));
        assert_eq!(book.selected_id(), "rig-1");
    }

    #[test]
    fn removing_selected_rig_moves_selection_to_first() {
        let mut book = RigBook::new();
        book.create_rig();
        book.create_rig();
        book.select_rig("rig-2");

        book.remove_rig("rig-2");
        assert_eq!(book.selected_id(), "rig-1");

        book.select_rig("rig-3");
        book.remove_rig("rig-1");
        assert_eq!(book.selected_id(), "rig-3");
    }

    #[test]
    fn new_rig_ids_never_collide() {
        let mut book = RigBook::new();
        book.create_rig();
        book.remove_rig("rig-1");

        let before = book.len();
        let id = book.create_rig().id.clone();
        assert_eq!(book.len(), before + 1);
        assert_eq!(id, "rig-3");

        let mut ids: Vec<&str> = book.rigs().iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), book.len());
    }

    #[test]
    fn new_rig_has_full_zeroed_taxonomy() {
        let mut book = RigBook::new();
        book.set_item_cost("rig-1", "logistics", "camp", "900");
        let rig = book.create_rig();

        assert_eq!(rig.costs.len(), 5);
        assert!(rig.costs.iter().flat_map(|c| &c.items).all(|i| i.cost == 0.0));
    }

    #[test]
    fn totals_track_every_edit() {
        let mut book = RigBook::new();
        let edits = [
            ("drilling", "rig", "15000"),
            ("drilling", "fuel", "2500.5"),
            ("completion", "packer", "780"),
            ("drilling", "rig", "16000"),
            ("completion", "ssd", "oops"),
            ("logistics", "security", "1200.25"),
        ];

        for (category, item, value) in edits {
            book.set_item_cost("rig-1", category, item, value);

            let rig = book.selected_rig().unwrap();
            for category in &rig.costs {
                let sum: f64 = category.items.iter().map(|i| i.cost).sum();
                assert_eq!(category.total(), sum);
            }
            let by_category: f64 = rig.costs.iter().map(|c| c.total()).sum();
            assert_eq!(rig.total(), by_category);
        }

        assert_eq!(book.grand_total(), 16000.0 + 2500.5 + 780.0 + 1200.25);
    }

    #[test]
    fn edits_only_copy_the_edited_path() {
        let mut book = RigBook::new();
        book.create_rig();
        let before = book.snapshot();

        assert!(book.set_item_cost("rig-1", "completion", "packer", "10"));

        let after = book.rigs();
        assert!(Arc::ptr_eq(&before[1], &after[1]));
        assert!(!Arc::ptr_eq(&before[0], &after[0]));
        for (i, (old, new)) in before[0].costs.iter().zip(after[0].costs.iter()).enumerate() {
            assert_eq!(Arc::ptr_eq(old, new), i != 2);
        }
        assert_eq!(before[0].total(), 0.0);
    }

    #[test]
    fn edits_to_unknown_targets_change_nothing() {
        let mut book = RigBook::new();
        let before = book.snapshot();

        assert!(!book.set_item_cost("rig-9", "drilling", "mud", "5"));
        assert!(!book.set_item_cost("rig-1", "nope", "mud", "5"));
        assert!(!book.set_item_cost("rig-1", "drilling", "nope", "5"));
        assert!(Arc::ptr_eq(&before[0], &book.rigs()[0]));
    }

    #[test]
    fn comparison_lists_every_rig() {
        let mut book = RigBook::new();
        book.set_item_cost("rig-1", "drilling", "bits", "300");
        book.create_rig();

        let rows = book.comparison();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total, 300.0);
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn imported_entries_match_ids_and_names() {
        let mut book = RigBook::new();
        let entries = vec![
            CostEntry {
                category: "pre-drilling".into(),
                item: "land".into(),
                cost: 100.0,
            },
            CostEntry {
                category: "Drilling".into(),
                item: "mud & chemicals".into(),
                cost: 50.0,
            },
            CostEntry {
                category: "Unknown".into(),
                item: "land".into(),
                cost: 1.0,
            },
        ];

        assert_eq!(book.apply_entries("rig-1", &entries), 2);
        assert_eq!(book.grand_total(), 150.0);
    }
}
