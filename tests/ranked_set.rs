use ranked_set::{Error, RankedSet};

fn sorted(mut members: Vec<&'static str>) -> Vec<&'static str> {
    members.sort();
    members
}

/// Keys listed on level 0 of the skiplist.
fn indexed_ranks<M: std::hash::Hash + Eq + Clone>(set: &RankedSet<M>) -> Vec<i64> {
    set.debug_levels()
        .first()
        .map(|row| {
            row.trim_start_matches("0:")
                .split(',')
                .filter(|key| !key.is_empty())
                .map(|key| key.parse().unwrap())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn empty_set_reads() {
    let set = RankedSet::<String>::new();
    assert!(set.get(5).unwrap().is_empty());
    assert!(set.get_range(5, 10).unwrap().is_empty());
    assert_eq!(set.get_rank("X"), -1);
    assert_eq!(set.get_rank("X"), RankedSet::<String>::NOT_FOUND);
    assert_eq!(set.rank("X"), None);
    assert!(!set.exists("X"));
    assert!(set.is_empty());
}

#[test]
fn add_groups_members_by_rank() {
    let set = RankedSet::new();
    assert!(set.add("Hello", 5).unwrap());
    assert!(set.add("World", 5).unwrap());
    assert!(set.add("World2", 6).unwrap());

    assert_eq!(sorted(set.get(5).unwrap()), vec!["Hello", "World"]);
    assert_eq!(sorted(set.get_range(4, 6).unwrap()), vec!["Hello", "World"]);
    assert_eq!(
        sorted(set.get_range(5, 7).unwrap()),
        vec!["Hello", "World", "World2"]
    );
    assert_eq!(set.len(), 3);
    assert_eq!(indexed_ranks(&set), vec![5, 6]);
    set.ensure_invariants();
}

#[test]
fn range_orders_ranks_ascending() {
    let set = RankedSet::new();
    set.add("c", 30).unwrap();
    set.add("a", 10).unwrap();
    set.add("b", 20).unwrap();
    set.add("d", 40).unwrap();
    assert_eq!(set.get_range(0, 100).unwrap(), vec!["a", "b", "c", "d"]);
    assert_eq!(set.get_range(20, 40).unwrap(), vec!["b", "c"]);
    assert_eq!(set.get_range(41, 100).unwrap(), Vec::<&str>::new());
}

#[test]
fn duplicate_add_keeps_first_rank() {
    let set = RankedSet::new();
    assert!(set.add("World2", 6).unwrap());
    assert!(!set.add("World2", 7).unwrap());
    assert_eq!(set.get_rank("World2"), 6);
    assert!(set.get(7).unwrap().is_empty());
    assert_eq!(indexed_ranks(&set), vec![6]);
}

#[test]
fn add_then_remove_leaves_no_node() {
    let set = RankedSet::new();
    set.add("A", 6).unwrap();
    assert!(set.remove("A"));
    assert!(!set.exists("A"));
    assert!(set.get(6).unwrap().is_empty());
    assert!(indexed_ranks(&set).is_empty());
    assert!(set.debug_levels().is_empty());
    set.ensure_invariants();
}

#[test]
fn remove_shrinks_shared_rank() {
    let set = RankedSet::new();
    assert!(!set.remove("Hello"));
    set.add("Hello", 5).unwrap();
    set.add("World", 5).unwrap();
    assert!(set.remove("Hello"));
    assert!(!set.remove("Hello"));
    assert_eq!(set.get(5).unwrap(), vec!["World"]);
    assert_eq!(indexed_ranks(&set), vec![5]);
    set.ensure_invariants();
}

#[test]
fn member_can_return_at_new_rank() {
    let set = RankedSet::new();
    set.add("m", 1).unwrap();
    set.remove("m");
    assert!(set.add("m", 9).unwrap());
    assert_eq!(set.get_rank("m"), 9);
    assert_eq!(indexed_ranks(&set), vec![9]);
}

#[test]
fn preconditions_are_errors() {
    let set = RankedSet::new();
    set.add("keep", 3).unwrap();

    assert_eq!(
        set.add("NegativeRank", -1),
        Err(Error::KeyBelowMinimum { key: -1, min: 0 })
    );
    assert_eq!(set.get(-1), Err(Error::KeyBelowMinimum { key: -1, min: 0 }));
    assert_eq!(
        set.get_range(-1, 5),
        Err(Error::KeyBelowMinimum { key: -1, min: 0 })
    );
    assert_eq!(
        set.get_range(1, -5),
        Err(Error::KeyBelowMinimum { key: -5, min: 0 })
    );
    assert_eq!(set.get_range(5, 5), Err(Error::InvalidRange { min: 5, max: 5 }));
    assert_eq!(set.get_range(5, 1), Err(Error::InvalidRange { min: 5, max: 1 }));

    assert!(!set.exists("NegativeRank"));
    assert_eq!(set.len(), 1);
    assert_eq!(indexed_ranks(&set), vec![3]);
}

#[test]
fn error_messages() {
    assert_eq!(
        Error::KeyBelowMinimum { key: -1, min: 0 }.to_string(),
        "key -1 is below the minimum key 0"
    );
    assert_eq!(
        Error::InvalidRange { min: 5, max: 5 }.to_string(),
        "range start 5 must be less than range end 5"
    );
}

#[test]
fn consistency_holds_across_many_members() {
    let set = RankedSet::new();
    for i in 0..1000i64 {
        set.add(format!("m{}", i), (i * 37) % 101).unwrap();
    }
    for i in (0..1000i64).filter(|i| i % 3 == 0) {
        assert!(set.remove(format!("m{}", i).as_str()));
    }
    set.ensure_invariants();
    for i in 0..1000i64 {
        let member = format!("m{}", i);
        let rank = set.get_rank(member.as_str());
        assert_eq!(set.exists(member.as_str()), rank != -1);
        if rank != -1 {
            assert!(set.get(rank).unwrap().contains(&member));
        }
    }
    let total: usize = (0..101).map(|r| set.get(r).unwrap().len()).sum();
    assert_eq!(total, set.len());
}
