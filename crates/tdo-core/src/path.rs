//! Breadcrumb paths over parent-linked records.
//!
//! Projects nest under projects and tasks nest under tasks; both are served as
//! flat lists where each record names its parent by id. [`PathIndex`] builds
//! the id lookup once so that rendering the path of every record in a
//! collection stays linear overall.
//!
//! The walk tolerates malformed data: a parent id that is not in the
//! collection ends the path, and a parent cycle stops at the first revisited
//! record instead of looping.

use std::collections::{HashMap, HashSet};

use crate::entities::{Project, Task};

/// Separator between path segments.
pub const PATH_DELIMITER: &str = " » ";

/// A record that participates in a parent-linked hierarchy.
pub trait Hierarchical {
    fn id(&self) -> &str;
    /// Text shown for this record inside a path.
    fn label(&self) -> &str;
    fn parent_id(&self) -> Option<&str>;
}

impl Hierarchical for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

impl Hierarchical for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.content
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

/// Id lookup over one collection, reused across many path builds.
#[derive(Debug)]
pub struct PathIndex<'a, T> {
    by_id: HashMap<&'a str, &'a T>,
}

impl<'a, T: Hierarchical> PathIndex<'a, T> {
    /// Index `records` by id. On duplicate ids the first record wins.
    #[must_use]
    pub fn new(records: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            by_id.entry(record.id()).or_insert(record);
        }
        Self { by_id }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a T> {
        self.by_id.get(id).copied()
    }

    /// Ancestors of `record`, nearest parent first.
    ///
    /// Stops at a root, at a dangling parent id, or when a parent id repeats.
    #[must_use]
    pub fn ancestors(&self, record: &'a T) -> Vec<&'a T> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(record.id());

        let mut chain = Vec::new();
        let mut current = record;
        while let Some(parent_id) = current.parent_id() {
            if !visited.insert(parent_id) {
                break;
            }
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Labels from the root down to `record`.
    #[must_use]
    pub fn segments(&self, record: &'a T) -> Vec<&'a str> {
        let mut segments: Vec<&'a str> = self
            .ancestors(record)
            .into_iter()
            .map(Hierarchical::label)
            .collect();
        segments.reverse();
        segments.push(record.label());
        segments
    }

    /// Joined breadcrumb, e.g. `Work » Sprint`.
    #[must_use]
    pub fn path(&self, record: &'a T) -> String {
        self.segments(record).join(PATH_DELIMITER)
    }

    /// Breadcrumb for the record with `id`, if it is in the collection.
    #[must_use]
    pub fn path_of(&self, id: &str) -> Option<String> {
        self.get(id).map(|record| self.path(record))
    }

    /// Whether `id` is `ancestor_id` itself or sits anywhere below it.
    #[must_use]
    pub fn is_self_or_descendant(&self, id: &str, ancestor_id: &str) -> bool {
        if id == ancestor_id {
            return true;
        }
        self.get(id).is_some_and(|record| {
            self.ancestors(record)
                .iter()
                .any(|ancestor| ancestor.id() == ancestor_id)
        })
    }
}

/// One-shot path build for a single record.
///
/// Prefer [`PathIndex`] when rendering more than one path from the same
/// collection.
#[must_use]
pub fn build_path<T: Hierarchical>(record: &T, collection: &[T]) -> String {
    let index = PathIndex::new(collection);
    match index.get(record.id()) {
        Some(indexed) => index.path(indexed),
        None => {
            let parent_path = record.parent_id().and_then(|parent| index.path_of(parent));
            match parent_path {
                Some(parent_path) => format!("{parent_path}{PATH_DELIMITER}{}", record.label()),
                None => record.label().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn projects() -> Vec<Project> {
        vec![
            Project::new("1", "Work", None),
            Project::new("2", "Sprint", Some("1")),
            Project::new("3", "Backend", Some("2")),
            Project::new("4", "Home", None),
        ]
    }

    #[test]
    fn root_path_is_its_own_name() {
        let projects = projects();
        let index = PathIndex::new(&projects);
        assert_eq!(index.path_of("1").as_deref(), Some("Work"));
    }

    #[test]
    fn nested_path_lists_ancestors_root_first() {
        let projects = projects();
        let index = PathIndex::new(&projects);
        assert_eq!(index.path_of("3").as_deref(), Some("Work » Sprint » Backend"));
        assert_eq!(
            index.segments(index.get("3").unwrap()),
            vec!["Work", "Sprint", "Backend"]
        );
    }

    #[test]
    fn path_is_independent_of_collection_order() {
        let forward = projects();
        let mut reversed = projects();
        reversed.reverse();

        let a = PathIndex::new(&forward);
        let b = PathIndex::new(&reversed);
        for id in ["1", "2", "3", "4"] {
            assert_eq!(a.path_of(id), b.path_of(id));
        }
    }

    #[test]
    fn dangling_parent_ends_the_walk() {
        let projects = vec![
            Project::new("1", "Orphan", Some("missing")),
            Project::new("2", "Child", Some("1")),
        ];
        let index = PathIndex::new(&projects);
        assert_eq!(index.path_of("2").as_deref(), Some("Orphan » Child"));
    }

    #[test]
    fn two_node_cycle_terminates() {
        let projects = vec![
            Project::new("a", "A", Some("b")),
            Project::new("b", "B", Some("a")),
        ];
        let index = PathIndex::new(&projects);
        assert_eq!(index.path_of("a").as_deref(), Some("B » A"));
        assert_eq!(index.path_of("b").as_deref(), Some("A » B"));
    }

    #[test]
    fn self_parent_terminates() {
        let projects = vec![Project::new("a", "Loop", Some("a"))];
        let index = PathIndex::new(&projects);
        assert_eq!(index.path_of("a").as_deref(), Some("Loop"));
    }

    #[test]
    fn cycle_below_a_tail_terminates() {
        let projects = vec![
            Project::new("x", "X", Some("y")),
            Project::new("y", "Y", Some("z")),
            Project::new("z", "Z", Some("y")),
        ];
        let index = PathIndex::new(&projects);
        assert_eq!(index.path_of("x").as_deref(), Some("Z » Y » X"));
    }

    #[test]
    fn descendant_check_follows_the_chain() {
        let projects = projects();
        let index = PathIndex::new(&projects);
        assert!(index.is_self_or_descendant("3", "1"));
        assert!(index.is_self_or_descendant("1", "1"));
        assert!(!index.is_self_or_descendant("1", "3"));
        assert!(!index.is_self_or_descendant("4", "1"));
    }

    #[test]
    fn task_paths_use_content() {
        let tasks = vec![
            Task::new("10", "Plan trip"),
            Task::new("11", "Book flights").with_parent("10"),
        ];
        assert_eq!(build_path(&tasks[1], &tasks), "Plan trip » Book flights");
    }

    #[test]
    fn build_path_for_record_outside_collection() {
        let projects = projects();
        let detached = Project::new("99", "New", Some("2"));
        assert_eq!(build_path(&detached, &projects), "Work » Sprint » New");
    }
}
