use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Clone, Debug)]
pub(crate) enum Op<T> {
    /// Add the T to the data structure
    Add(T),
    /// Remove a T equal to this one from the data structure
    Remove(T),
    /// Replace the first T with the second one
    Replace(T, T),
    /// Rebuild the tree with minimal height
    Rebalance,
    /// Compare iterators
    Iter,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3, 4]).unwrap() {
            0 => Op::Add(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Replace(T::arbitrary(g), T::arbitrary(g)),
            3 => Op::Rebalance,
            4 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
