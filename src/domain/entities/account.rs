use std::collections::{BTreeMap, BTreeSet};

pub const ROOT_PARENT: &str = "0";

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub head_code: String,
    pub head_name: String,
    pub parent_head: String,
    pub opening_balance: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountNode {
    pub head_code: String,
    pub head_name: String,
    pub parent_head: String,
    pub opening_balance: f64,
    pub balance: f64,
    pub children: Vec<AccountNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub head_code: String,
    pub head_name: String,
    pub opening_balance: f64,
    pub balance: f64,
    pub level: usize,
    pub has_children: bool,
}

/// Builds the aggregated tree in one pass. A row whose parent is `"0"`,
/// missing from the data set, or itself becomes a root. Children are ordered
/// ascending by `head_code`, and each parent's balances are its own stored
/// values plus the aggregated balances of all descendants.
pub fn build_account_tree(records: &[AccountRecord]) -> Vec<AccountNode> {
    let mut by_code: BTreeMap<String, &AccountRecord> = BTreeMap::new();
    for record in records {
        by_code.insert(record.head_code.clone(), record);
    }

    let mut children_of: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut roots: Vec<String> = Vec::new();
    for record in records {
        let is_root = record.parent_head == ROOT_PARENT
            || record.parent_head == record.head_code
            || !by_code.contains_key(&record.parent_head);
        if is_root {
            roots.push(record.head_code.clone());
        } else {
            children_of
                .entry(record.parent_head.clone())
                .or_default()
                .push(record.head_code.clone());
        }
    }

    roots.sort();
    roots.dedup();
    for list in children_of.values_mut() {
        list.sort();
        list.dedup();
    }

    roots
        .iter()
        .map(|code| build_node(code, &by_code, &children_of))
        .collect()
}

fn build_node(
    code: &str,
    by_code: &BTreeMap<String, &AccountRecord>,
    children_of: &BTreeMap<String, Vec<String>>,
) -> AccountNode {
    let record = by_code.get(code).copied();
    let child_codes = children_of
        .get(code)
        .map(|list| list.as_slice())
        .unwrap_or(&[]);
    let children: Vec<AccountNode> = child_codes
        .iter()
        .map(|child| build_node(child, by_code, children_of))
        .collect();

    let mut opening_balance = record.map(|r| r.opening_balance).unwrap_or(0.0);
    let mut balance = record.map(|r| r.balance).unwrap_or(0.0);
    for child in &children {
        opening_balance += child.opening_balance;
        balance += child.balance;
    }

    AccountNode {
        head_code: code.to_string(),
        head_name: record.map(|r| r.head_name.clone()).unwrap_or_default(),
        parent_head: record
            .map(|r| r.parent_head.clone())
            .unwrap_or_else(|| ROOT_PARENT.to_string()),
        opening_balance,
        balance,
        children,
    }
}

/// Pre-order flatten. A node's children are emitted only while its code is in
/// the expand set; collapsing never touches the aggregated balances.
pub fn flatten_account_tree(nodes: &[AccountNode], expanded: &BTreeSet<String>) -> Vec<AccountRow> {
    let mut rows = Vec::new();
    for node in nodes {
        push_rows(node, 0, expanded, &mut rows);
    }
    rows
}

fn push_rows(
    node: &AccountNode,
    level: usize,
    expanded: &BTreeSet<String>,
    rows: &mut Vec<AccountRow>,
) {
    rows.push(AccountRow {
        head_code: node.head_code.clone(),
        head_name: node.head_name.clone(),
        opening_balance: node.opening_balance,
        balance: node.balance,
        level,
        has_children: !node.children.is_empty(),
    });
    if expanded.contains(&node.head_code) {
        for child in &node.children {
            push_rows(child, level + 1, expanded, rows);
        }
    }
}

/// Search bypasses the hierarchy: a flat substring match on name or code over
/// the raw (pre-aggregation) records, with no indentation metadata.
pub fn filter_accounts(records: &[AccountRecord], term: &str) -> Vec<AccountRow> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.head_name.to_lowercase().contains(&needle)
                || record.head_code.to_lowercase().contains(&needle)
        })
        .map(|record| AccountRow {
            head_code: record.head_code.clone(),
            head_name: record.head_name.clone(),
            opening_balance: record.opening_balance,
            balance: record.balance,
            level: 0,
            has_children: false,
        })
        .collect()
}

// Pure display windowing over the in-memory rows; `page` is 1-based.
pub fn page_slice<T: Clone>(rows: &[T], page: i64, limit: i64) -> Vec<T> {
    if limit <= 0 {
        return rows.to_vec();
    }
    let start = (page.max(1) - 1).saturating_mul(limit) as usize;
    rows.iter().skip(start).take(limit as usize).cloned().collect()
}
