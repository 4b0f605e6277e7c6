//! Iterators over a [`Tree`][crate::Tree]. All of them are lazy and keep their own explicit
//! stack or queue of pending nodes, so walking a badly skewed tree costs heap, not call stack.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::ptr;

use crate::stack::Stack;
use crate::tree::{Link, Node};

/// Preorder iterator over borrowed values, returned by [`Tree::iter`][crate::Tree::iter].
pub struct Iter<'a, T> {
    pending: Stack<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut pending = Stack::new();
        if let Some(root) = root {
            pending.push(root);
        }
        Self {
            pending,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        // Right goes on first so that the left subtree is popped next.
        if let Some(right) = node.right() {
            self.pending.push(right);
        }
        if let Some(left) = node.left() {
            self.pending.push(left);
        }
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Ascending iterator, returned by [`Tree::inorder`][crate::Tree::inorder].
pub struct Inorder<'a, T> {
    pending: Stack<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Inorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut inorder = Self {
            pending: Stack::new(),
            remaining: len,
        };
        inorder.push_left_spine(root);
        inorder
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.pending.push(node);
            current = node.left();
        }
    }
}

impl<'a, T> Iterator for Inorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Inorder<'_, T> {}
impl<T> FusedIterator for Inorder<'_, T> {}

/// Children-first iterator, returned by [`Tree::postorder`][crate::Tree::postorder].
pub struct Postorder<'a, T> {
    pending: Stack<&'a Node<T>>,
    /// The next subtree whose left spine still has to be pushed.
    current: Option<&'a Node<T>>,
    /// The node yielded last. When it is the right child of the node on top of the stack, that
    /// node's subtrees are both done.
    last: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Postorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            pending: Stack::new(),
            current: root,
            last: None,
            remaining: len,
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<T>> {
        loop {
            while let Some(node) = self.current {
                self.pending.push(node);
                self.current = node.left();
            }

            let top = *self.pending.peek()?;
            match top.right() {
                Some(right) if !self.last.is_some_and(|last| ptr::eq(last, right)) => {
                    self.current = Some(right);
                }
                _ => {
                    self.pending.pop();
                    self.last = Some(top);
                    self.remaining -= 1;
                    return Some(top);
                }
            }
        }
    }
}

impl<'a, T> Iterator for Postorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| &node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Postorder<'_, T> {}
impl<T> FusedIterator for Postorder<'_, T> {}

/// Breadth first iterator, returned by [`Tree::levelorder`][crate::Tree::levelorder].
pub struct Levelorder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Levelorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            queue: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Levelorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Levelorder<'_, T> {}
impl<T> FusedIterator for Levelorder<'_, T> {}

/// Owning preorder iterator, returned by `Tree::into_iter`. Values not consumed before the
/// iterator is dropped are dropped with it.
pub struct IntoIter<T> {
    pending: Stack<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut pending = Stack::new();
        if let Some(root) = root {
            pending.push(root);
        }
        Self {
            pending,
            remaining: len,
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Dropping a boxed node would recurse through its whole subtree. Detach nodes one by one
        // instead.
        while !self.pending.is_empty() {
            self.next();
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        let Node { value, left, right } = *node;
        if let Some(right) = right {
            self.pending.push(right);
        }
        if let Some(left) = left {
            self.pending.push(left);
        }
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
