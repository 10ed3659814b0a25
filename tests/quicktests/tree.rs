use collection_bst::compare::{natural, Compare};
use collection_bst::Tree;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::Op;

/// Orders `(key, value)` pairs by key only, so inserting an existing key overwrites its value.
fn by_key(a: &(i8, i8), b: &(i8, i8)) -> std::cmp::Ordering {
    a.0.cmp(&b.0)
}

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<C>(ops: &[Op<(i8, i8)>], bst: &mut Tree<(i8, i8), C>, map: &mut BTreeMap<i8, i8>)
where
    C: Compare<(i8, i8)>,
{
    for op in ops {
        match *op {
            Op::Insert((k, v)) => {
                let len = bst.len();
                bst.insert((k, v));
                let was_new = map.insert(k, v).is_none();
                assert_eq!(bst.len(), len + usize::from(was_new));
            }
            Op::Remove((k, v)) => {
                let len = bst.len();
                let removed = bst.remove(&(k, v));
                assert_eq!(removed, map.remove(&k).is_some());
                assert_eq!(bst.len(), len - usize::from(removed));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<(i8, i8)>>) -> bool {
    let mut tree = Tree::with_comparator(by_key);
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len()
        && tree
            .in_order()
            .copied()
            .eq(map.iter().map(|(k, v)| (*k, *v)))
}

#[quickcheck]
fn in_order_is_sorted_and_deduplicated(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let expected: BTreeSet<_> = xs.into_iter().collect();

    tree.len() == expected.len() && tree.in_order().eq(expected.iter())
}

#[quickcheck]
fn reversed_in_order_is_descending(xs: Vec<i8>) -> bool {
    let tree = Tree::from_iter_with(xs.iter().copied(), natural().rev());
    let expected: BTreeSet<_> = xs.into_iter().collect();

    tree.in_order().eq(expected.iter().rev())
}

#[quickcheck]
fn traversals_visit_every_element(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let in_order: HashSet<_> = tree.in_order().collect();
    let pre_order: HashSet<_> = tree.pre_order().collect();
    let post_order: HashSet<_> = tree.post_order().collect();

    tree.pre_order().len() == tree.len()
        && tree.post_order().count() == tree.len()
        && in_order == pre_order
        && pre_order == post_order
}

#[quickcheck]
fn pre_order_rebuilds_the_same_tree(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let rebuilt: Tree<_> = tree.pre_order().copied().collect();

    tree.pre_order().eq(rebuilt.pre_order()) && tree.post_order().eq(rebuilt.post_order())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x) && tree.get(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    let sorted: Vec<_> = tree.in_order().collect();
    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && sorted.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn removal_preserves_relative_order(xs: Vec<i8>, pick: usize) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let Some(&target) = xs.get(pick % xs.len().max(1)) else {
        return true;
    };
    let expected: Vec<_> = tree.in_order().copied().filter(|x| *x != target).collect();

    let len = tree.len();
    tree.remove(&target);
    let actual: Vec<_> = tree.in_order().copied().collect();

    tree.len() == len - 1 && actual == expected
}

#[quickcheck]
fn memberwise_clear_matches_clear(xs: Vec<i8>) -> bool {
    let mut cleared: Tree<_> = xs.iter().copied().collect();
    let mut memberwise = cleared.clone();

    cleared.clear();
    memberwise.memberwise_clear();

    cleared.is_empty()
        && memberwise.is_empty()
        && cleared.root().is_none()
        && memberwise.root().is_none()
}
