use linked_bst::{Error, Tree};

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Builds a tree by adding `xs` in order.
fn tree_of(xs: &[i16]) -> Tree<i16> {
    xs.iter().copied().collect()
}

/// The smallest height any tree with `len` nodes can have: `ceil(log2(len + 1)) - 1`.
fn minimal_height(len: usize) -> isize {
    (usize::BITS - len.leading_zeros()) as isize - 1
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let mut sorted = xs;
    sorted.sort();

    tree.inorder().eq(sorted.iter())
}

#[quickcheck]
fn len_matches_traversal(xs: Vec<i16>, removes: Vec<i16>) -> bool {
    let mut tree = tree_of(&xs);
    for x in &removes {
        let _ = tree.remove(x);
    }

    tree.len() == tree.iter().count() && tree.len() == tree.inorder().count()
}

#[quickcheck]
fn add_then_remove_restores_len(xs: Vec<i16>, x: i16) -> bool {
    let mut tree = tree_of(&xs);
    let before = tree.len();

    tree.add(x);
    tree.remove(&x) == Ok(x) && tree.len() == before
}

#[quickcheck]
fn remove_missing_is_not_found(xs: Vec<i16>, x: i16) -> TestResult {
    if xs.contains(&x) {
        return TestResult::discard();
    }
    let mut tree = tree_of(&xs);
    let before: Vec<_> = tree.iter().copied().collect();

    TestResult::from_bool(
        tree.remove(&x) == Err(Error::NotFound) && tree.iter().copied().eq(before),
    )
}

#[quickcheck]
fn clear_empties(xs: Vec<i16>) -> bool {
    let mut tree = tree_of(&xs);
    tree.clear();
    let once = tree.is_empty() && tree.len() == 0 && tree.height() == -1;
    tree.clear();

    once && tree.is_empty()
}

#[quickcheck]
fn rebalance_keeps_values(xs: Vec<i16>) -> bool {
    let mut tree = tree_of(&xs);
    let before: Vec<_> = tree.inorder().copied().collect();
    tree.rebalance();

    tree.inorder().copied().eq(before) && tree.len() == xs.len()
}

#[quickcheck]
fn rebalance_minimizes_distinct_height(xs: Vec<i16>) -> bool {
    let mut distinct = xs;
    distinct.sort();
    distinct.dedup();
    let mut tree = tree_of(&distinct);
    tree.rebalance();

    tree.height() == minimal_height(tree.len()) && tree.is_balanced()
}

#[quickcheck]
fn successor_is_next_larger(xs: Vec<i16>, x: i16) -> bool {
    let tree = tree_of(&xs);
    let expected = xs.iter().filter(|y| **y > x).min();

    tree.successor(&x) == expected
}

#[quickcheck]
fn predecessor_is_next_smaller(xs: Vec<i16>, x: i16) -> bool {
    let tree = tree_of(&xs);
    let expected = xs.iter().filter(|y| **y < x).max();

    tree.predecessor(&x) == expected
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i16>, low: i16, high: i16) -> bool {
    let tree = tree_of(&xs);
    let mut found: Vec<_> = tree.range_find(&low, &high).into_iter().copied().collect();
    let mut expected: Vec<_> = xs.into_iter().filter(|x| low <= *x && *x <= high).collect();
    found.sort();
    expected.sort();

    found == expected
}

#[quickcheck]
fn replace_keeps_order(xs: Vec<i16>, old: i16, new: i16) -> TestResult {
    if !xs.contains(&old) {
        return TestResult::discard();
    }
    let mut tree = tree_of(&xs);
    let replaced = tree.replace(&old, new);

    let mut expected = xs;
    if let Some(pos) = expected.iter().position(|x| *x == old) {
        expected[pos] = new;
    }
    expected.sort();

    TestResult::from_bool(replaced == Some(old) && tree.inorder().eq(expected.iter()))
}

#[quickcheck]
fn clone_is_equal(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let copy = tree.clone();

    copy == tree && copy.iter().eq(tree.iter()) && copy.height() == tree.height()
}

#[quickcheck]
fn preorder_rebuilds_same_shape(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let rebuilt: Tree<_> = tree.iter().copied().collect();

    rebuilt.levelorder().eq(tree.levelorder())
}
