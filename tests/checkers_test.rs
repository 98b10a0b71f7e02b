use ranked_set::{Options, RankedSet};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[global_allocator]
static ALLOCATOR: checkers::Allocator = checkers::Allocator::system();

#[checkers::test]
fn test_allocations() {
    let set = RankedSet::with_options_and_rng(Options::new(), StdRng::seed_from_u64(11)).unwrap();
    let _: Vec<String> = set.get(10).unwrap();
    let _: Vec<String> = set.get_range(10, 20).unwrap();

    for i in 0..50i64 {
        set.add(i.to_string(), i % 7).unwrap();
    }
    let _ = set.get_range(2, 5).unwrap();
    let _ = set.get(3).unwrap();
    let _ = set.get_rank("13");
    for i in (0..50i64).step_by(2) {
        set.remove(i.to_string().as_str());
    }
    let _ = set.debug_levels();
    for i in 0..50i64 {
        set.remove(i.to_string().as_str());
    }
    assert!(set.is_empty());
}
