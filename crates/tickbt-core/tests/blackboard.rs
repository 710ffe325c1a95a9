use tickbt_core::{BbKey, Blackboard};

const COUNT: BbKey<u32> = BbKey::new("count");
const LABEL: BbKey<String> = BbKey::new("label");
const STACK: BbKey<Vec<i32>> = BbKey::new("stack");

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains(COUNT));

    bb.set(COUNT, 123);
    bb.set(LABEL, "hello".to_string());

    assert_eq!(bb.get(COUNT).copied(), Some(123));
    assert_eq!(bb.get(LABEL).map(|s| s.as_str()), Some("hello"));
    assert_eq!(bb.len(), 2);

    assert_eq!(bb.remove(COUNT), Some(123));
    assert_eq!(bb.get(COUNT), None);
    assert!(!bb.contains(COUNT));
}

#[test]
fn keys_with_the_same_name_share_a_slot() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new("count"), 7);
    assert_eq!(bb.get(COUNT).copied(), Some(7));
}

#[test]
fn get_or_insert_with_initialises_only_once() {
    let mut bb = Blackboard::new();

    bb.get_or_insert_with(STACK, Vec::new).push(1);
    bb.get_or_insert_with(STACK, || vec![99]).push(2);

    assert_eq!(bb.get(STACK), Some(&vec![1, 2]));
}

#[test]
fn keys_are_listed_in_sorted_order() {
    let mut bb = Blackboard::new();
    bb.set(LABEL, String::new());
    bb.set(COUNT, 0);

    assert_eq!(bb.keys().collect::<Vec<_>>(), vec!["count", "label"]);

    bb.clear();
    assert!(bb.is_empty());
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new("n"), 1u32);
    let _ = bb.get(BbKey::<i32>::new("n"));
}
