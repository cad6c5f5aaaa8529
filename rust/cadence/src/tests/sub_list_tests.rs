use cadence_common::error::ErrorKind;

use crate::{Features, List, Mutability, Sequence, linked_list, list, new_list};

#[test]
fn test_foreign_add_invalidates_view() {
    let b = new_list([0, 1, 2, 3, 4]);
    let v = b.sub_list(1, 3).unwrap();
    assert_eq!(v.to_vec().unwrap(), vec![1, 2]);
    b.add(99).unwrap();

    assert!(v.get(0).unwrap_err().is_concurrent_modification());
    assert!(v.set(0, 5).unwrap_err().is_concurrent_modification());
    assert!(v.add(5).unwrap_err().is_concurrent_modification());
    assert!(v.to_vec().unwrap_err().is_concurrent_modification());
    assert!(v.sub_list(0, 1).unwrap_err().is_concurrent_modification());
    assert!(v.generation().unwrap_err().is_concurrent_modification());
    assert!(v.first().unwrap_err().is_concurrent_modification());
    // Fail-fast is sticky: the store's later state does not revive the view.
    b.remove_at(5).unwrap();
    assert!(v.get(0).is_err());
}

#[test]
fn test_stale_view_rejects_no_op_shortcuts() {
    let b = new_list([0, 1, 2, 3, 4]);
    let v = b.sub_list(1, 3).unwrap();
    b.add(99).unwrap();

    let stale = |result: cadence_common::Result<List<i32>>| {
        assert!(result.unwrap_err().is_concurrent_modification());
    };
    stale(v.take(10));
    stale(v.take(-10));
    stale(v.drop(0));
    stale(v.concat(&List::empty()));
    stale(v.prepend_list(&List::empty()));
    stale(v.append_all(Vec::new()));
    stale(v.prepend_all(Vec::new()));
    stale(v.insert_all(0, Vec::new()));
    stale(v.insert(0, 7));
    stale(v.remove_index(0));
    stale(list([1]).concat(&v));
    stale(v.lazy().concat(&List::empty()));
    stale(List::empty().lazy().concat(&v));
}

#[test]
fn test_set_through_owner_keeps_view_valid() {
    let b = new_list([0, 1, 2, 3]);
    let v = b.sub_list(1, 3).unwrap();
    b.set(1, 10).unwrap();
    assert_eq!(v.to_vec().unwrap(), vec![10, 2]);
    v.set(1, 20).unwrap();
    assert_eq!(b.to_vec().unwrap(), vec![0, 10, 20, 3]);
}

#[test]
fn test_structural_change_through_view() {
    let b = new_list([0, 1, 2, 3, 4, 5]);
    let v = b.sub_list(1, 4).unwrap();
    let other = b.sub_list(4, 6).unwrap();

    v.add(7).unwrap();
    assert_eq!(v.to_vec().unwrap(), vec![1, 2, 3, 7]);
    assert_eq!(b.to_vec().unwrap(), vec![0, 1, 2, 3, 7, 4, 5]);

    let filtered = v.filter(|x| x % 2 == 1).unwrap();
    assert!(filtered.same_instance(&v));
    assert_eq!(v.to_vec().unwrap(), vec![1, 3, 7]);
    assert_eq!(b.to_vec().unwrap(), vec![0, 1, 3, 7, 4, 5]);
    assert_eq!(b.generation().unwrap(), v.generation().unwrap());

    assert!(other.get(0).unwrap_err().is_concurrent_modification());
}

#[test]
fn test_nested_views_share_the_chain() {
    let b = new_list((0..10).collect::<Vec<_>>());
    let outer = b.sub_list(2, 8).unwrap();
    let inner = outer.sub_list(1, 3).unwrap();
    assert_eq!(inner.to_vec().unwrap(), vec![3, 4]);

    inner.clear().unwrap();
    assert!(inner.is_empty());
    assert_eq!(outer.to_vec().unwrap(), vec![2, 5, 6, 7]);
    assert_eq!(b.len(), 8);

    inner.append_all([40, 41]).unwrap();
    assert_eq!(outer.to_vec().unwrap(), vec![2, 40, 41, 5, 6, 7]);
    assert_eq!(b.get(3).unwrap(), 40);
}

#[test]
fn test_view_ops_follow_mutability() {
    let b = new_list([4, 2, 3, 1]);
    let ro = b.read_only().sub_list(0, 3).unwrap();
    assert_eq!(ro.mutability(), Mutability::ReadOnlyMutable);
    let sorted = ro.sort().unwrap();
    assert_eq!(sorted.mutability(), Mutability::Mutable);
    assert_eq!(sorted.to_vec().unwrap(), vec![2, 3, 4]);
    assert_eq!(b.to_vec().unwrap(), vec![4, 2, 3, 1]);

    let shared = list([4, 2, 3, 1]);
    let slice = shared.sub_list(1, 3).unwrap();
    assert_eq!(slice.mutability(), Mutability::Immutable);
    assert!(slice.add(0).is_err());
}

#[test]
fn test_sorting_a_window_unsorts_the_store() {
    let b = new_list([1, 2, 3, 4]).sort().unwrap();
    assert!(b.is(Features::SORTED));
    let v = b.sub_list(0, 2).unwrap();
    assert!(v.is(Features::SORTED));
    v.append(0).unwrap();
    assert!(!v.is(Features::SORTED));
    assert!(!b.is(Features::SORTED));
}

#[test]
fn test_invalid_ranges() {
    let b = new_list([1, 2, 3]);
    assert!(matches!(
        b.sub_list(2, 1).unwrap_err().kind(),
        ErrorKind::InvalidArgument { .. }
    ));
    let v = b.sub_list(0, 2).unwrap();
    assert!(matches!(
        v.sub_list(0, 3).unwrap_err().kind(),
        ErrorKind::IndexOutOfRange { index: 3, len: 2 }
    ));
    assert!(v.add_at(3, 0).is_err());
    assert!(v.remove_at(2).is_err());
    assert_eq!(b.generation().unwrap(), Some(0));
}

#[test]
fn test_linked_window() {
    let b = linked_list(['a', 'b', 'c', 'd']);
    let v = b.sub_list(1, 3).unwrap();
    assert!(!v.is(Features::RANDOM_ACCESS));
    v.prepend('x').unwrap();
    assert_eq!(b.to_vec().unwrap(), vec!['a', 'x', 'b', 'c', 'd']);
    v.reverse().unwrap();
    assert_eq!(b.to_vec().unwrap(), vec!['a', 'c', 'b', 'x', 'd']);
}
