//! Tree materialization for hierarchical entities (menus, departments)
//!
//! One pass groups the live rows by `parent_id`; children attach recursively
//! from the roots. Sibling order is the entity's sort value, ties broken by
//! id ascending. Three output modes serve the three admin UIs:
//! display tree, parent-selector tree and association-selector tree.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::repository::{RepoError, RepoResult};

/// Row shape the tree builder understands
pub trait TreeRow {
    fn id(&self) -> i64;
    fn parent_id(&self) -> Option<i64>;
    fn sort(&self) -> i64;
    fn label(&self) -> &str;
}

/// Display tree node: full row metadata plus children
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub row: T,
    pub children: Vec<TreeNode<T>>,
}

/// Parent-selector node: id and label only
#[derive(Debug, Clone, Serialize)]
pub struct OptionNode {
    pub id: i64,
    pub label: String,
    pub children: Vec<OptionNode>,
}

/// Association-selector node: id/label annotated with the pre-checked flag
#[derive(Debug, Clone, Serialize)]
pub struct PickNode {
    pub id: i64,
    pub label: String,
    pub checked: bool,
    pub children: Vec<PickNode>,
}

/// id → ordered child ids, plus the ordered root list
struct Grouping {
    roots: Vec<i64>,
    children: HashMap<i64, Vec<i64>>,
}

fn group<T: TreeRow>(rows: &[T]) -> Grouping {
    let ids: HashSet<i64> = rows.iter().map(|r| r.id()).collect();

    let mut order: Vec<&T> = rows.iter().collect();
    order.sort_by_key(|r| (r.sort(), r.id()));

    let mut roots = Vec::new();
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in order {
        match row.parent_id() {
            // A dangling parent reference degrades to a root rather than
            // silently dropping the subtree
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(row.id());
            }
            _ => roots.push(row.id()),
        }
    }
    Grouping { roots, children }
}

/// Mode 1: full display tree for listing UIs
pub fn build_display_tree<T: TreeRow + Clone>(rows: &[T]) -> Vec<TreeNode<T>> {
    let grouping = group(rows);
    let by_id: HashMap<i64, &T> = rows.iter().map(|r| (r.id(), r)).collect();

    fn attach<T: TreeRow + Clone>(
        id: i64,
        by_id: &HashMap<i64, &T>,
        grouping: &Grouping,
    ) -> TreeNode<T> {
        let children = grouping
            .children
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .map(|child| attach(*child, by_id, grouping))
                    .collect()
            })
            .unwrap_or_default();
        TreeNode {
            row: (*by_id[&id]).clone(),
            children,
        }
    }

    grouping
        .roots
        .iter()
        .map(|id| attach(*id, &by_id, &grouping))
        .collect()
}

/// Mode 2: minimal id/label tree for "choose a parent" selectors
///
/// When editing node `exclude`, its entire subtree is omitted so the UI
/// cannot offer a parent choice that would create a cycle.
pub fn build_option_tree<T: TreeRow>(rows: &[T], exclude: Option<i64>) -> Vec<OptionNode> {
    let skip = match exclude {
        Some(id) => {
            let mut set = descendant_ids(rows, id);
            set.insert(id);
            set
        }
        None => HashSet::new(),
    };

    let grouping = group(rows);
    let by_id: HashMap<i64, &T> = rows.iter().map(|r| (r.id(), r)).collect();

    fn attach<T: TreeRow>(
        id: i64,
        by_id: &HashMap<i64, &T>,
        grouping: &Grouping,
        skip: &HashSet<i64>,
    ) -> Option<OptionNode> {
        if skip.contains(&id) {
            return None;
        }
        let children = grouping
            .children
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|child| attach(*child, by_id, grouping, skip))
                    .collect()
            })
            .unwrap_or_default();
        Some(OptionNode {
            id,
            label: by_id[&id].label().to_string(),
            children,
        })
    }

    grouping
        .roots
        .iter()
        .filter_map(|id| attach(*id, &by_id, &grouping, &skip))
        .collect()
}

/// Mode 3: selection tree annotated with already-associated nodes
pub fn build_pick_tree<T: TreeRow>(rows: &[T], selected: &HashSet<i64>) -> Vec<PickNode> {
    let grouping = group(rows);
    let by_id: HashMap<i64, &T> = rows.iter().map(|r| (r.id(), r)).collect();

    fn attach<T: TreeRow>(
        id: i64,
        by_id: &HashMap<i64, &T>,
        grouping: &Grouping,
        selected: &HashSet<i64>,
    ) -> PickNode {
        let children = grouping
            .children
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .map(|child| attach(*child, by_id, grouping, selected))
                    .collect()
            })
            .unwrap_or_default();
        PickNode {
            id,
            label: by_id[&id].label().to_string(),
            checked: selected.contains(&id),
            children,
        }
    }

    grouping
        .roots
        .iter()
        .map(|id| attach(*id, &by_id, &grouping, selected))
        .collect()
}

/// All ids below `root` (excluding `root` itself)
pub fn descendant_ids<T: TreeRow>(rows: &[T], root: i64) -> HashSet<i64> {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in rows {
        if let Some(parent) = row.parent_id() {
            children.entry(parent).or_default().push(row.id());
        }
    }

    let mut result = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if let Some(kids) = children.get(&id) {
            for kid in kids {
                if result.insert(*kid) {
                    stack.push(*kid);
                }
            }
        }
    }
    result
}

/// Reject a re-parenting that would introduce a cycle
///
/// A node may not become its own parent, nor move under any of its current
/// descendants.
pub fn check_no_cycle<T: TreeRow>(rows: &[T], id: i64, new_parent: Option<i64>) -> RepoResult<()> {
    let Some(parent) = new_parent else {
        return Ok(());
    };
    if parent == id || descendant_ids(rows, id).contains(&parent) {
        return Err(RepoError::Business(
            shared::ErrorCode::TreeCycle,
            format!("node {id} cannot be moved under its own subtree"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        id: i64,
        parent_id: Option<i64>,
        sort: i64,
        label: String,
    }

    impl TreeRow for Row {
        fn id(&self) -> i64 {
            self.id
        }
        fn parent_id(&self) -> Option<i64> {
            self.parent_id
        }
        fn sort(&self) -> i64 {
            self.sort
        }
        fn label(&self) -> &str {
            &self.label
        }
    }

    fn row(id: i64, parent_id: Option<i64>, sort: i64) -> Row {
        Row {
            id,
            parent_id,
            sort,
            label: format!("node-{id}"),
        }
    }

    /// 1 ─ 2 ─ 4
    ///   └ 3     5 (root)
    fn sample() -> Vec<Row> {
        vec![
            row(1, None, 1),
            row(2, Some(1), 1),
            row(3, Some(1), 2),
            row(4, Some(2), 1),
            row(5, None, 2),
        ]
    }

    fn flatten(nodes: &[OptionNode], depth: usize, out: &mut Vec<(i64, usize)>) {
        for node in nodes {
            out.push((node.id, depth));
            flatten(&node.children, depth + 1, out);
        }
    }

    #[test]
    fn test_flatten_preserves_node_set_and_depth() {
        let rows = sample();
        let tree = build_option_tree(&rows, None);

        let mut flat = Vec::new();
        flatten(&tree, 0, &mut flat);

        let ids: HashSet<i64> = flat.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, rows.iter().map(|r| r.id).collect());

        // depth equals the number of parent hops to a root
        let depths: HashMap<i64, usize> = flat.into_iter().collect();
        assert_eq!(depths[&1], 0);
        assert_eq!(depths[&2], 1);
        assert_eq!(depths[&3], 1);
        assert_eq!(depths[&4], 2);
        assert_eq!(depths[&5], 0);
    }

    #[test]
    fn test_sibling_order_sort_then_id() {
        let rows = vec![row(1, None, 5), row(2, None, 1), row(3, None, 1)];
        let tree = build_option_tree(&rows, None);
        let order: Vec<i64> = tree.iter().map(|n| n.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_display_tree_carries_row_metadata() {
        let rows = sample();
        let tree = build_display_tree(&rows);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].row.id, 1);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].children[0].row.id, 4);
    }

    #[test]
    fn test_option_tree_excludes_own_subtree_when_editing() {
        let rows = sample();
        let tree = build_option_tree(&rows, Some(2));

        let mut flat = Vec::new();
        flatten(&tree, 0, &mut flat);
        let ids: HashSet<i64> = flat.iter().map(|(id, _)| *id).collect();

        assert!(!ids.contains(&2));
        assert!(!ids.contains(&4));
        assert!(ids.contains(&1));
        assert!(ids.contains(&3));
        assert!(ids.contains(&5));
    }

    #[test]
    fn test_pick_tree_marks_associated_nodes() {
        let rows = sample();
        let selected: HashSet<i64> = [3, 5].into_iter().collect();
        let tree = build_pick_tree(&rows, &selected);

        fn find(nodes: &[PickNode], id: i64) -> Option<bool> {
            for node in nodes {
                if node.id == id {
                    return Some(node.checked);
                }
                if let Some(found) = find(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }

        assert_eq!(find(&tree, 3), Some(true));
        assert_eq!(find(&tree, 5), Some(true));
        assert_eq!(find(&tree, 2), Some(false));
    }

    #[test]
    fn test_dangling_parent_degrades_to_root() {
        let rows = vec![row(1, None, 1), row(2, Some(99), 1)];
        let tree = build_option_tree(&rows, None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_cycle_rejected() {
        let rows = sample();
        // own parent
        assert!(check_no_cycle(&rows, 2, Some(2)).is_err());
        // direct child
        assert!(check_no_cycle(&rows, 2, Some(4)).is_err());
        // descendant of descendant
        assert!(check_no_cycle(&rows, 1, Some(4)).is_err());
        // sibling and unrelated nodes stay legal
        assert!(check_no_cycle(&rows, 2, Some(5)).is_ok());
        assert!(check_no_cycle(&rows, 4, Some(3)).is_ok());
        // moving to root is always legal
        assert!(check_no_cycle(&rows, 4, None).is_ok());
    }
}
