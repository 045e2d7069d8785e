//! The clue notebook: an unbalanced binary search tree of clue texts
//!
//! Clues are compared byte by byte, so the in-order walk is plain
//! lexicographic order. Inserting a clue that is already filed is a no-op.
//! The tree is never rebalanced; clues discovered in sorted order degrade
//! it into a list, which is fine at mansion scale.

use super::owned_text;
use crate::Result;
use std::cmp::Ordering;
use std::fmt;

/// A filed clue
pub struct ClueEntry {
    content: String,
    left: Option<Box<ClueEntry>>,
    right: Option<Box<ClueEntry>>,
}

impl ClueEntry {
    fn new(content: String) -> Self {
        Self {
            content,
            left: None,
            right: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Traversal and teardown use explicit stacks, never recursion.
#[derive(Default)]
pub struct ClueIndex {
    root: Option<Box<ClueEntry>>,
}

impl ClueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a clue. Returns `false` when the clue was already there.
    pub fn insert(&mut self, content: &str) -> Result<bool> {
        let Some(slot) = self.vacant_slot(content) else {
            return Ok(false);
        };
        *slot = Some(Box::new(ClueEntry::new(owned_text(content, "clue index")?)));
        Ok(true)
    }

    /// Empty link where `content` belongs, or `None` if it is already filed
    fn vacant_slot(&mut self, content: &str) -> Option<&mut Option<Box<ClueEntry>>> {
        let mut slot = &mut self.root;
        while let Some(entry) = slot {
            slot = match content.cmp(entry.content.as_str()) {
                Ordering::Less => &mut entry.left,
                Ordering::Greater => &mut entry.right,
                Ordering::Equal => return None,
            };
        }
        Some(slot)
    }

    pub fn contains(&self, content: &str) -> bool {
        let mut node = self.root.as_deref();
        while let Some(entry) = node {
            node = match content.cmp(entry.content.as_str()) {
                Ordering::Less => entry.left.as_deref(),
                Ordering::Greater => entry.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Number of filed clues, counted by walking the tree
    pub fn count(&self) -> usize {
        self.pre_order().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clues in ascending order
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    pub fn iter(&self) -> InOrder<'_> {
        self.in_order()
    }

    /// Clues node-first, then the left subtree, then the right one
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }
}

impl Drop for ClueIndex {
    fn drop(&mut self) {
        let mut pending: Vec<Box<ClueEntry>> = self.root.take().into_iter().collect();
        while let Some(mut entry) = pending.pop() {
            pending.extend(entry.left.take());
            pending.extend(entry.right.take());
        }
    }
}

impl Clone for ClueIndex {
    /// Re-filing in pre-order rebuilds the same shape
    fn clone(&self) -> Self {
        let mut copy = ClueIndex::new();
        for clue in self.pre_order() {
            if let Some(slot) = copy.vacant_slot(clue) {
                *slot = Some(Box::new(ClueEntry::new(clue.to_string())));
            }
        }
        copy
    }
}

impl PartialEq for ClueIndex {
    fn eq(&self, other: &Self) -> bool {
        self.pre_order().eq(other.pre_order())
    }
}

impl Eq for ClueIndex {}

impl fmt::Debug for ClueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<'a> IntoIterator for &'a ClueIndex {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

/// Ascending walk over a [`ClueIndex`]
pub struct InOrder<'a> {
    stack: Vec<&'a ClueEntry>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a ClueEntry>) {
        while let Some(entry) = node {
            self.stack.push(entry);
            node = entry.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        self.push_left_spine(entry.right.as_deref());
        Some(entry.content.as_str())
    }
}

/// Root-first walk over a [`ClueIndex`]
pub struct PreOrder<'a> {
    stack: Vec<&'a ClueEntry>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        if let Some(right) = entry.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = entry.left.as_deref() {
            self.stack.push(left);
        }
        Some(entry.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(clues: &[&str]) -> ClueIndex {
        let mut index = ClueIndex::new();
        for clue in clues {
            index.insert(clue).unwrap();
        }
        index
    }

    #[test]
    fn empty_index() {
        let index = ClueIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.count(), 0);
        assert_eq!(index.in_order().next(), None);
        assert_eq!(index.pre_order().next(), None);
    }

    #[test]
    fn in_order_is_sorted_and_distinct() {
        let clues = ["pegadas", "mapa", "faca", "mapa", "zinco", "faca", "anel", "joia"];
        let index = index_of(&clues);

        let mut expected: Vec<&str> = clues.to_vec();
        expected.sort();
        expected.dedup();

        let walked: Vec<&str> = index.iter().collect();
        assert_eq!(walked, expected);
        assert!(walked.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(index.count(), expected.len());
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut index = index_of(&["Carta misteriosa na gaveta"]);
        assert_eq!(index.count(), 1);
        assert!(!index.insert("Carta misteriosa na gaveta").unwrap());
        assert_eq!(index.count(), 1);
        assert!(index.insert("carta misteriosa na gaveta").unwrap());
        assert_eq!(index.count(), 2);
    }

    #[test]
    fn comparison_is_bytewise() {
        // Uppercase sorts before lowercase, accented letters after ASCII.
        let index = index_of(&["b", "á", "B", "a"]);
        let walked: Vec<&str> = index.iter().collect();
        assert_eq!(walked, vec!["B", "a", "b", "á"]);
    }

    #[test]
    fn in_order_is_restartable() {
        let index = index_of(&["c", "a", "b"]);
        let first: Vec<&str> = index.in_order().collect();
        let second: Vec<&str> = (&index).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sorted_input_degrades_but_still_works() {
        let letters: Vec<String> = (b'a'..=b'z').map(|c| (c as char).to_string()).collect();
        let mut index = ClueIndex::new();
        for letter in &letters {
            index.insert(letter).unwrap();
        }
        assert_eq!(index.count(), 26);
        assert!(index.iter().eq(letters.iter().map(String::as_str)));
        assert!(index.pre_order().eq(letters.iter().map(String::as_str)));
    }

    #[test]
    fn pre_order_visits_node_before_subtrees() {
        let index = index_of(&["m", "f", "p", "g"]);
        let walked: Vec<&str> = index.pre_order().collect();
        assert_eq!(walked, vec!["m", "f", "g", "p"]);
    }

    #[test]
    fn contains_finds_only_filed_clues() {
        let index = index_of(&["Joia valiosa escondida", "Documento confidencial"]);
        assert!(index.contains("Joia valiosa escondida"));
        assert!(!index.contains("Joia"));
    }

    /// Runs `f` on a thread with a small stack so recursion would show
    fn on_small_stack(f: impl FnOnce() + Send + 'static) {
        std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(f)
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn long_sorted_run_is_walked_copied_and_dropped() {
        on_small_stack(|| {
            let mut index = ClueIndex::new();
            for i in 0..20_000 {
                assert!(index.insert(&format!("{i:08}")).unwrap());
            }
            assert!(!index.insert("00000000").unwrap());
            assert!(index.contains("00019999"));
            assert_eq!(index.count(), 20_000);
            assert_eq!(index.in_order().last(), Some("00019999"));

            let copy = index.clone();
            assert_eq!(copy, index);
            drop(copy);
            drop(index);
        });
    }

    #[test]
    fn clone_keeps_the_shape() {
        let index = index_of(&["m", "f", "p", "g"]);
        let copy = index.clone();
        assert!(copy.pre_order().eq(index.pre_order()));
        assert_ne!(copy, index_of(&["f", "m", "p", "g"]));
        assert_eq!(format!("{:?}", copy), r#"{"f", "g", "m", "p"}"#);
    }
}
