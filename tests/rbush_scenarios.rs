//! Concrete RBush scenarios from the design notes, run as integration tests
//! against the public crate API.

use rbush::{Envelope, RBush};

fn grid_48() -> Vec<(Envelope, (i32, i32))> {
    let mut items = Vec::with_capacity(48);
    for xi in 0..6 {
        for yi in 0..8 {
            let x = (xi * 10) as f64;
            let y = (yi * 10) as f64;
            items.push((Envelope::new(x, y, x, y), (xi, yi)));
        }
    }
    items
}

#[test]
fn default_constructor_height_grows_at_ten_items() {
    let mut tree: RBush<i32> = RBush::new();
    for i in 0..9 {
        tree.insert(Envelope::new(i as f64, i as f64, i as f64, i as f64), i);
    }
    assert_eq!(tree.height(), 1);
    tree.insert(Envelope::new(9.0, 9.0, 9.0, 9.0), 9);
    assert_eq!(tree.height(), 2);
}

#[test]
fn point_query_on_48_entry_grid_finds_exactly_one() {
    let mut tree: RBush<(i32, i32)> = RBush::new();
    for (bounds, item) in grid_48() {
        tree.insert(bounds, item);
    }
    let hits = tree.query(&Envelope::new(12.0, 22.0, 12.0, 22.0));
    assert_eq!(hits, vec![&(2, 2)]);
}

#[test]
fn remove_scenario_drops_exactly_one_entry() {
    let mut tree: RBush<(i32, i32)> = RBush::new();
    for (bounds, item) in grid_48() {
        tree.insert(bounds, item);
    }
    assert!(tree.remove(&Envelope::new(20.0, 20.0, 20.0, 20.0), &(2, 2)));
    assert_eq!(
        tree.query(&Envelope::new(0.0, 0.0, 100.0, 100.0)).len(),
        47
    );
    assert!(tree
        .query(&Envelope::new(20.0, 20.0, 20.0, 20.0))
        .is_empty());
}

#[test]
fn quickselect_concrete_k_equals_five() {
    use rbush::quickselect::quickselect;
    use std::cmp::Ordering;

    let mut arr = vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
    let len = arr.len();
    quickselect(&mut arr, 5, 0, len - 1, &|a: &i32, b: &i32| a.cmp(b));
    assert_eq!(arr[5], 4);
}

#[test]
fn insert_then_remove_on_an_empty_tree_is_an_exact_inverse() {
    let mut tree: RBush<&str> = RBush::new();
    let e = Envelope::new(3.0, 3.0, 3.0, 3.0);
    tree.insert(e, "only");
    assert!(tree.remove(&e, &"only"));
    assert_eq!(tree.height(), 1);
    assert!(tree.is_empty());
}

#[test]
fn load_merges_into_existing_non_empty_tree() {
    let mut tree: RBush<i32> = RBush::new();
    tree.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), -1);

    let batch: Vec<(Envelope, i32)> = (0..500)
        .map(|i| {
            let x = (i % 25) as f64 * 4.0;
            let y = (i / 25) as f64 * 4.0;
            (Envelope::new(x, y, x + 1.0, y + 1.0), i)
        })
        .collect();
    tree.load(batch);

    assert_eq!(tree.count(), 501);
    assert!(tree.integrity_check().is_ok());
    assert!(tree.query(&Envelope::new(0.0, 0.0, 1.0, 1.0)).contains(&&-1));
}
