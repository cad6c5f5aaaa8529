use crate::{Features, List, Mutability, linked_list, list, new_list};

fn random_vec(len: usize) -> Vec<i32> {
    (0..len).map(|_| fastrand::i32(0..20)).collect()
}

#[test]
fn test_mutable_list_tracks_model() {
    fastrand::seed(83512094);
    for round in 0..20 {
        let mut model = random_vec(fastrand::usize(0..30));
        let l = if round % 2 == 0 {
            new_list(model.clone())
        } else {
            linked_list(model.clone())
        };
        for _ in 0..200 {
            match fastrand::u8(0..11) {
                0 => {
                    let x = fastrand::i32(0..20);
                    l.add(x).unwrap();
                    model.push(x);
                }
                1 => {
                    let i = fastrand::usize(0..=model.len());
                    let x = fastrand::i32(0..20);
                    l.add_at(i, x).unwrap();
                    model.insert(i, x);
                }
                2 if !model.is_empty() => {
                    let i = fastrand::usize(0..model.len());
                    assert_eq!(l.remove_at(i).unwrap(), model.remove(i));
                }
                3 if !model.is_empty() => {
                    let i = fastrand::usize(0..model.len());
                    let x = fastrand::i32(0..20);
                    assert_eq!(l.set(i, x).unwrap(), model[i]);
                    model[i] = x;
                }
                4 => {
                    let k = fastrand::i32(1..4);
                    l.filter(|x| x % k == 0).unwrap();
                    model.retain(|x| x % k == 0);
                }
                5 => {
                    l.sort().unwrap();
                    model.sort();
                    assert!(l.is(Features::SORTED));
                }
                6 => {
                    l.reverse().unwrap();
                    model.reverse();
                }
                7 => {
                    let n = fastrand::usize(0..=model.len() + 2);
                    l.take(n as isize).unwrap();
                    model.truncate(n);
                }
                8 => {
                    let n = fastrand::usize(0..=model.len() + 2).min(model.len());
                    l.drop(n as isize).unwrap();
                    model.drain(..n);
                }
                9 => {
                    let extra = random_vec(fastrand::usize(0..5));
                    l.prepend_all(extra.clone()).unwrap();
                    model.splice(0..0, extra);
                }
                _ => {
                    l.unique().unwrap();
                    let mut seen = std::collections::HashSet::new();
                    model.retain(|x| seen.insert(*x));
                }
            }
            assert_eq!(l.len(), model.len());
        }
        assert_eq!(l.to_vec().unwrap(), model);
        assert_eq!(l.mutability(), Mutability::Mutable);
    }
}

#[test]
fn test_immutable_slicing_matches_model() {
    fastrand::seed(1290457);
    for _ in 0..200 {
        let model = random_vec(fastrand::usize(0..25));
        let eager = list(model.clone());
        let split = fastrand::usize(0..=model.len());
        let lazy = list(model[..split].to_vec())
            .lazy()
            .concat(&list(model[split..].to_vec()).lazy())
            .unwrap();
        let len = model.len() as isize;
        let n = fastrand::isize(-len - 2..=len + 2);

        let expected_take: Vec<i32> = if n >= 0 {
            model.iter().take(n as usize).copied().collect()
        } else {
            let k = (n.unsigned_abs()).min(model.len());
            model[model.len() - k..].to_vec()
        };
        let expected_drop: Vec<i32> = if n >= 0 {
            model.iter().skip(n as usize).copied().collect()
        } else {
            let k = (n.unsigned_abs()).min(model.len());
            model[..model.len() - k].to_vec()
        };

        for l in [&eager, &lazy] {
            assert_eq!(l.take(n).unwrap().to_vec().unwrap(), expected_take);
            assert_eq!(l.drop(n).unwrap().to_vec().unwrap(), expected_drop);
            let mut reversed = model.clone();
            reversed.reverse();
            assert_eq!(l.reverse().unwrap().to_vec().unwrap(), reversed);
            assert_eq!(l.to_vec().unwrap(), model);
        }
    }
}

#[test]
fn test_random_windows_over_mutable_storage() {
    fastrand::seed(99120345);
    for _ in 0..50 {
        let mut model = random_vec(fastrand::usize(1..30));
        let b = new_list(model.clone());
        let from = fastrand::usize(0..model.len());
        let to = fastrand::usize(from..=model.len());
        let v = b.sub_list(from, to).unwrap();
        assert_eq!(v.to_vec().unwrap(), model[from..to]);

        let mut end = to;
        for _ in 0..20 {
            let width = end - from;
            match fastrand::u8(0..3) {
                0 => {
                    let i = fastrand::usize(0..=width);
                    let x = fastrand::i32(0..20);
                    v.add_at(i, x).unwrap();
                    model.insert(from + i, x);
                    end += 1;
                }
                1 if width > 0 => {
                    let i = fastrand::usize(0..width);
                    v.remove_at(i).unwrap();
                    model.remove(from + i);
                    end -= 1;
                }
                _ => {
                    v.sort().unwrap();
                    model[from..end].sort();
                }
            }
            assert_eq!(v.to_vec().unwrap(), model[from..end]);
            assert_eq!(b.to_vec().unwrap(), model);
        }
        assert_eq!(b.generation().unwrap(), v.generation().unwrap());
    }
}

#[test]
fn test_lazy_views_agree_with_eager_results() {
    fastrand::seed(4401);
    for _ in 0..100 {
        let a = random_vec(fastrand::usize(0..15));
        let b = random_vec(fastrand::usize(0..15));
        let lazy_a = list(a.clone()).lazy();
        let eager_a = list(a.clone());
        let other = list(b.clone());

        let lazy_zip = lazy_a.zip(&other).unwrap();
        let eager_zip = eager_a.zip(&other).unwrap();
        assert_eq!(lazy_zip.to_vec().unwrap(), eager_zip.to_vec().unwrap());

        let lazy_map: List<i64> = lazy_a.map(|x| x as i64 * 3).unwrap();
        let eager_map: List<i64> = eager_a.map(|x| x as i64 * 3).unwrap();
        assert_eq!(lazy_map, eager_map);

        let lazy_cat = lazy_a.concat(&other).unwrap();
        let eager_cat = eager_a.concat(&other).unwrap();
        assert_eq!(lazy_cat, eager_cat);
        assert_eq!(lazy_cat.len(), a.len() + b.len());
        assert_eq!(
            lazy_cat.filter(|x| x % 2 == 0).unwrap().to_vec().unwrap(),
            eager_cat.filter(|x| x % 2 == 0).unwrap().to_vec().unwrap()
        );
    }
}
