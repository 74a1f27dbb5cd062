use std::collections::BTreeSet;
use std::fmt;

/// Normalized identity key for a project name: surrounding whitespace
/// trimmed and lower-cased. Used only for comparison, never for display.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Removed,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Added => write!(f, "Added"),
            ChangeStatus::Removed => write!(f, "Removed"),
        }
    }
}

/// A single changed project name, carrying the original-casing display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub name: String,
    pub status: ChangeStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub added: Vec<Change>,
    pub removed: Vec<Change>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Compares today's project names against yesterday's on normalized keys.
///
/// Added names are present today and absent yesterday; removed names the
/// reverse. Each key is mapped back to an original-casing representative
/// from its source set. When several raw names share one normalized key,
/// the representative is the first in ascending sort order of the raw
/// names, which keeps the output deterministic. An empty or missing
/// yesterday set degenerates to "everything added"; there is no failure
/// path.
pub fn diff(today: &[String], yesterday: &[String]) -> DiffResult {
    let today_keys: BTreeSet<String> = today.iter().map(|n| normalize(n)).collect();
    let yesterday_keys: BTreeSet<String> = yesterday.iter().map(|n| normalize(n)).collect();

    let added_keys: BTreeSet<&str> = today_keys
        .difference(&yesterday_keys)
        .map(String::as_str)
        .collect();
    let removed_keys: BTreeSet<&str> = yesterday_keys
        .difference(&today_keys)
        .map(String::as_str)
        .collect();

    DiffResult {
        added: representatives(today, &added_keys, ChangeStatus::Added),
        removed: representatives(yesterday, &removed_keys, ChangeStatus::Removed),
    }
}

// One display name per normalized key, chosen as the first raw name in
// ascending sort order whose key matches.
fn representatives(source: &[String], keys: &BTreeSet<&str>, status: ChangeStatus) -> Vec<Change> {
    let mut sorted: Vec<&String> = source.iter().collect();
    sorted.sort();

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut changes = Vec::new();
    for name in sorted {
        let key = normalize(name);
        if keys.contains(key.as_str()) && seen.insert(key) {
            changes.push(Change {
                name: name.clone(),
                status,
            });
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn added_names(result: &DiffResult) -> Vec<&str> {
        result.added.iter().map(|c| c.name.as_str()).collect()
    }

    fn removed_names(result: &DiffResult) -> Vec<&str> {
        result.removed.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn identical_sets_produce_empty_diff() {
        let set = names(&["Alpha", "Beta", "Gamma"]);
        let result = diff(&set, &set);
        assert!(result.is_empty());
        assert_eq!(result.change_count(), 0);
    }

    #[test]
    fn empty_yesterday_means_everything_added() {
        let today = names(&["Beta", "Alpha"]);
        let result = diff(&today, &[]);
        assert_eq!(added_names(&result), vec!["Alpha", "Beta"]);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn empty_today_means_everything_removed() {
        let yesterday = names(&["Alpha", "Beta"]);
        let result = diff(&[], &yesterday);
        assert!(result.added.is_empty());
        assert_eq!(removed_names(&result), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn normalization_is_case_and_whitespace_insensitive() {
        let today = names(&["Alpha "]);
        let yesterday = names(&["alpha"]);
        assert!(diff(&today, &yesterday).is_empty());
    }

    #[test]
    fn added_and_removed_are_disjoint_on_normalized_keys() {
        let today = names(&["Alpha", "Gamma", "delta"]);
        let yesterday = names(&["alpha", "Beta", "Delta "]);
        let result = diff(&today, &yesterday);

        let added_keys: BTreeSet<String> =
            result.added.iter().map(|c| normalize(&c.name)).collect();
        let removed_keys: BTreeSet<String> =
            result.removed.iter().map(|c| normalize(&c.name)).collect();
        assert!(added_keys.is_disjoint(&removed_keys));

        assert_eq!(added_names(&result), vec!["Gamma"]);
        assert_eq!(removed_names(&result), vec!["Beta"]);
    }

    #[test]
    fn set_identity_law_holds() {
        let today = names(&["A", "B", "D"]);
        let yesterday = names(&["B", "C", "D"]);
        let result = diff(&today, &yesterday);

        let mut reconstructed: BTreeSet<String> =
            yesterday.iter().map(|n| normalize(n)).collect();
        for change in &result.added {
            reconstructed.insert(normalize(&change.name));
        }
        for change in &result.removed {
            reconstructed.remove(&normalize(&change.name));
        }
        let today_keys: BTreeSet<String> = today.iter().map(|n| normalize(n)).collect();
        assert_eq!(reconstructed, today_keys);
    }

    #[test]
    fn colliding_raw_names_pick_first_in_sort_order() {
        // "PROJECT x" and "Project X" normalize to the same key; the
        // representative must be the sort-first raw name.
        let today = names(&["Project X", "PROJECT x"]);
        let result = diff(&today, &[]);
        assert_eq!(added_names(&result), vec!["PROJECT x"]);
    }

    #[test]
    fn display_form_preserves_original_casing() {
        let today = names(&["  Gamma Ray  "]);
        let result = diff(&today, &[]);
        assert_eq!(result.added[0].name, "  Gamma Ray  ");
        assert_eq!(result.added[0].status, ChangeStatus::Added);
    }
}
