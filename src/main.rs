use ranked_set::RankedSet;

fn main() {
    // Make a new ranked set
    let set = RankedSet::new();
    for (i, name) in ["ada", "grace", "linus", "ken"].iter().enumerate() {
        // Adds are O(log(n)) on average
        set.add(name.to_string(), i as i64 % 2).unwrap();
    }
    // You can print the skiplist levels!
    dbg!(set.debug_levels());
    // You can look members up by rank, O(log(n))
    assert_eq!(set.get(1).unwrap().len(), 2);
    assert_eq!(set.get_rank("ada"), 0);
    assert!(!set.exists("dennis"));
}
