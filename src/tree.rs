//! A link-based, unbalanced BST. Each node owns its two children directly, so the shape of the
//! tree is decided entirely by insertion order until [`Tree::rebalance`] is called.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Adding an equal value keeps both of them.
//! tree.add(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing returns the value and fails loudly when there is nothing to remove.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Err(Error::NotFound));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::iter::{Inorder, IntoIter, Iter, Levelorder, Postorder};
use crate::stack::Stack;

/// A child position. Empty when there is no subtree hanging there.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree. Smaller values go to the left of a node and everything
/// else, including equal values, goes to the right.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    // Children are finished before their parent in a postorder walk, so the subtrees waiting on
    // the stack are exactly the children of the next node.
    fn clone(&self) -> Self {
        let mut walk = Postorder::new(self.root(), self.len);
        let mut built = Stack::new();
        while let Some(node) = walk.next_node() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(Node {
                value: node.value.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder()).finish()
    }
}

/// Draws the tree rotated a quarter turn counterclockwise: the right subtree above its parent,
/// the left subtree below, and one `"| "` of indentation per level.
///
/// ```
/// use linked_bst::Tree;
///
/// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = Stack::new();
        let mut current = self.root().map(|node| (node, 0));
        loop {
            while let Some((node, depth)) = current {
                pending.push((node, depth));
                current = node.right().map(|right| (right, depth + 1));
            }
            let Some((node, depth)) = pending.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(depth), node.value)?;
            current = node.left().map(|left| (left, depth + 1));
        }
    }
}

/// Two trees are equal when they hold the same values, regardless of shape.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.inorder().eq(other.inorder())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the tree, yielding its values in preorder.
    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), mem::take(&mut self.len))
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values stored in the tree. Equal values are counted separately.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Potentially finds the stored value equal to `item`. If no node holds such a value, `None`
    /// is returned. When several equal values are stored, the one closest to the root is found.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add("kiwi");
    ///
    /// assert_eq!(tree.find(&"kiwi"), Some(&"kiwi"));
    /// assert_eq!(tree.find(&"lime"), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match item.cmp(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether a value equal to `item` is stored in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. The tree is not rebalanced, and a value equal to one already
    /// stored is kept alongside it in the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(5);
    /// tree.add(3);
    /// tree.add(5);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&3, &5, &5]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if item < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::new_boxed(item));
        self.len += 1;
    }

    /// Removes a value equal to `item` from the tree and returns it.
    ///
    /// A node with two children keeps its place in the tree: its value is swapped for the largest
    /// value of its left subtree, and the node that held that value is spliced out instead.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no equal value is stored. The tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(Error::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        let removed = Self::slot_of(&mut self.root, item).and_then(Self::unlink);
        match removed {
            Some(value) => {
                self.len -= 1;
                Ok(value)
            }
            None => {
                trace!(len = self.len, "remove missed, item not in tree");
                Err(Error::NotFound)
            }
        }
    }

    /// Swaps the stored value equal to `item` for `new_item` and returns the old value, or `None`
    /// if there is no such value.
    ///
    /// When `new_item` orders the same as `item` it takes the old value's place in its node.
    /// Otherwise the old node is removed and `new_item` is added afresh, so it always lands where
    /// its own ordering puts it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&3, 9), Some(3));
    /// assert_eq!(tree.replace(&3, 1), None);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&5, &8, &9]);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let slot = Self::slot_of(&mut self.root, item)?;
        if new_item.cmp(item) == Ordering::Equal {
            let node = slot.as_mut()?;
            return Some(mem::replace(&mut node.value, new_item));
        }

        let old = Self::unlink(slot)?;
        self.len -= 1;
        self.add(new_item);
        Some(old)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!(len = self.len, "clearing tree");
        }
        // Dropping the iterator tears the nodes down one at a time.
        drop(IntoIter::new(self.root.take(), mem::take(&mut self.len)));
    }

    /// The number of edges on the longest path from the root down to a leaf. An empty tree has a
    /// height of `-1` and a lone root has a height of `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut level: Vec<&Node<T>> = self.root().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level.iter().flat_map(|node| node.children()).collect();
        }
        height
    }

    /// Number of edges from the root down to the closest node with an empty child link, `-1`
    /// when empty. An empty subtree counts as `-1`, so a node missing either child ends the walk.
    fn min_depth(&self) -> isize {
        let mut depth = -1;
        let mut level: Vec<&Node<T>> = self.root().into_iter().collect();
        while !level.is_empty() {
            depth += 1;
            if level.iter().any(|node| node.is_missing_child()) {
                break;
            }
            level = level.iter().flat_map(|node| node.children()).collect();
        }
        depth
    }

    /// Whether the height is at most one more than the depth of the closest node with an empty
    /// child link. A chain of three is therefore unbalanced even though it has a single leaf.
    ///
    /// This compares whole-tree extremes only, it is not a per-node (AVL style) check.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let chain: Tree<_> = [1, 2, 3].into_iter().collect();
    /// assert!(!chain.is_balanced());
    ///
    /// let bushy: Tree<_> = [2, 1, 3, 4].into_iter().collect();
    /// assert!(bushy.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.height() - self.min_depth() <= 1
    }

    /// All stored values `v` with `low <= v <= high`, in preorder. Every node is visited; a
    /// `low` greater than `high` simply matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&3, &8), [&5, &3, &4, &8, &7]);
    /// assert!(tree.range_find(&8, &3).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        self.iter()
            .filter(|value| low <= *value && *value <= high)
            .collect()
    }

    /// Rebuilds the tree with minimal height. All values are drained in sorted order and then
    /// re-added median first, so each half ends up on its own side of the new root.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 6);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 2);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn rebalance(&mut self)
    where
        T: Ord,
    {
        let previous_height = self.height();
        let mut sorted: Vec<Option<T>> = self.drain_sorted().into_iter().map(Some).collect();

        // Inclusive index ranges still waiting for their median to be added.
        let mut ranges = Stack::new();
        if !sorted.is_empty() {
            ranges.push((0, sorted.len() - 1));
        }
        while let Some((low, high)) = ranges.pop() {
            let mid = low + (high - low) / 2;
            if let Some(item) = sorted.get_mut(mid).and_then(Option::take) {
                self.add(item);
            }
            if mid < high {
                ranges.push((mid + 1, high));
            }
            if mid > low {
                ranges.push((low, mid - 1));
            }
        }

        debug!(
            len = self.len,
            previous_height,
            height = self.height(),
            "rebalanced tree"
        );
    }

    /// The smallest stored value strictly greater than `item`, if any.
    ///
    /// This scans every value rather than following the tree's structure, so it is `O(n)` but
    /// independent of the tree's shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&7));
    /// assert_eq!(tree.successor(&6), Some(&7));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().filter(|value| *value > item).min()
    }

    /// The largest stored value strictly less than `item`, if any. Like
    /// [`successor`][Self::successor], this is a full scan.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&5), Some(&4));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().filter(|value| *value < item).max()
    }

    /// Iterates over the values in preorder: each node before its left subtree, and the left
    /// subtree before the right one. This is the default iteration order of a `Tree`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root(), self.len)
    }

    /// Same as [`iter`][Self::iter].
    pub fn preorder(&self) -> Iter<'_, T> {
        self.iter()
    }

    /// Iterates over the values in ascending order.
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root(), self.len)
    }

    /// Iterates over the values with both subtrees of a node visited before the node itself.
    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder::new(self.root(), self.len)
    }

    /// Iterates over the values one depth at a time, left to right within a level.
    pub fn levelorder(&self) -> Levelorder<'_, T> {
        Levelorder::new(self.root(), self.len)
    }

    fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Finds the link holding a value equal to `item`. The tree's own root link is searched like
    /// any other child link, so removing the root needs no special handling.
    fn slot_of<'a>(mut slot: &'a mut Link<T>, item: &T) -> Option<&'a mut Link<T>>
    where
        T: Ord,
    {
        loop {
            let node = slot.as_deref()?;
            slot = match item.cmp(&node.value) {
                Ordering::Equal => return Some(slot),
                Ordering::Less => &mut slot.as_mut()?.left,
                Ordering::Greater => &mut slot.as_mut()?.right,
            };
        }
    }

    /// Removes the node in `slot` from the tree and returns its value.
    fn unlink(slot: &mut Link<T>) -> Option<T> {
        let mut node = slot.take()?;
        if node.left.is_some() && node.right.is_some() {
            let largest = Self::take_largest(&mut node.left)?;
            let removed = mem::replace(&mut node.value, largest);
            *slot = Some(node);
            return Some(removed);
        }

        // At most one child, which moves up to take the node's place.
        let Node { value, left, right } = *node;
        *slot = left.or(right);
        Some(value)
    }

    /// Removes the rightmost node below `slot` and returns its value. Its left child, if any,
    /// takes its place.
    fn take_largest(mut slot: &mut Link<T>) -> Option<T> {
        while slot.as_ref()?.right.is_some() {
            slot = &mut slot.as_mut()?.right;
        }
        let Node { value, left, .. } = *slot.take()?;
        *slot = left;
        Some(value)
    }

    /// Empties the tree, handing back its values in ascending order.
    fn drain_sorted(&mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        let mut pending = Stack::new();
        let mut current = self.root.take();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                pending.push(node);
            }
            let Some(node) = pending.pop() else {
                break;
            };
            let Node { value, right, .. } = *node;
            sorted.push(value);
            current = right;
        }
        self.len = 0;
        sorted
    }
}

/// A single value with its two (possibly empty) subtrees. Nodes hold no parent pointer; anything
/// that needs to go back up keeps track of where it came from.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The present children, left first.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Self> {
        self.left().into_iter().chain(self.right())
    }

    fn is_missing_child(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and to a sorted vector holding the same values.
    /// This way we can ensure that after a random smattering of adds, removes and rebalances the
    /// two agree on every answer.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, model: &mut Vec<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Add(x) => {
                    bst.add(x.clone());
                    let pos = model.partition_point(|y| y <= x);
                    model.insert(pos, x.clone());
                }
                Op::Remove(x) => match model.binary_search(x) {
                    Ok(pos) => assert_eq!(bst.remove(x), Ok(model.remove(pos))),
                    Err(_) => assert_eq!(bst.remove(x), Err(Error::NotFound)),
                },
                Op::Replace(x, y) => match model.binary_search(x) {
                    Ok(pos) => {
                        assert_eq!(bst.replace(x, y.clone()), Some(model.remove(pos)));
                        let pos = model.partition_point(|z| z <= y);
                        model.insert(pos, y.clone());
                    }
                    Err(_) => assert_eq!(bst.replace(x, y.clone()), None),
                },
                Op::Rebalance => bst.rebalance(),
                Op::Iter => assert!(bst.inorder().eq(model.iter())),
            }
            assert_eq!(bst.len(), model.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            tree.inorder().eq(model.iter()) && model.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            xs.iter().all(|x| tree.find(x) == Some(x))
        }
    }

    /// The textbook recursive definitions, with an empty subtree counting as `-1`.
    fn reference_depths(link: &Link<i8>) -> (isize, isize) {
        match link {
            None => (-1, -1),
            Some(node) => {
                let (left_height, left_min) = reference_depths(&node.left);
                let (right_height, right_min) = reference_depths(&node.right);
                (
                    1 + left_height.max(right_height),
                    1 + left_min.min(right_min),
                )
            }
        }
    }

    quickcheck::quickcheck! {
        fn balance_matches_recursive_definition(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();
            let (height, min_depth) = reference_depths(&tree.root);

            tree.height() == height
                && tree.min_depth() == min_depth
                && tree.is_balanced() == (height - min_depth <= 1)
        }
    }

    quickcheck::quickcheck! {
        fn iterators_visit_every_node(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            tree.iter().count() == xs.len()
                && tree.postorder().count() == xs.len()
                && tree.levelorder().count() == xs.len()
        }
    }
}
