use crate::error::RopeError;
use crate::rope::*;

fn hello_world() -> Rope {
    Rope::from_chunks(&["hello", " ", "world"])
}

fn text(rope: &Rope) -> String {
    rope.to_string()
}

#[test]
fn hello_world_scenario() {
    let rope = hello_world();

    assert_eq!(rope.len(), 11);
    assert_eq!(text(&rope), "hello world");
    assert_eq!(text(&rope.index(0..5).unwrap()), "hello");
    assert_eq!(text(&rope.slice(Slice::reversed()).unwrap()), "dlrow olleh");
    assert_eq!(rope.chunks().collect::<Vec<_>>(), vec!["hello", " ", "world"]);
}

#[test]
fn slice_across_concatenation() {
    let rope = Rope::new("foo") + Rope::new("bar");
    assert_eq!(text(&rope.index(2..5).unwrap()), "oba");
}

#[test]
fn empty_text_round_trips() {
    let rope = Rope::new("");

    assert!(rope.is_empty());
    assert!(rope.is_leaf());
    assert_eq!(text(&rope), "");
    assert_eq!(Rope::from_chunks::<&str>(&[]), rope);
}

#[test]
fn single_chunk_is_a_leaf() {
    assert_eq!(Rope::from_chunks(&["abc"]), Rope::new("abc"));
}

#[test]
fn chunks_split_round_up_half() {
    let rope = Rope::from_chunks(&["a", "b", "c"]);

    assert_eq!(rope.left(), Some(&(Rope::new("a") + Rope::new("b"))));
    assert_eq!(rope.right(), Some(&Rope::new("c")));
    assert_eq!(format!("{:?}", rope), r#"((Rope("a") + Rope("b")) + Rope("c"))"#);
}

#[test]
fn balance_counts_chunks_not_chars() {
    let rope = Rope::from_chunks(&["a very long first chunk", "b", "c", "d"]);

    assert_eq!(rope.depth(), 2);
    assert_eq!(rope.left().map(Rope::len), Some(24));
    assert_eq!(rope.right().map(Rope::len), Some(2));
}

#[test]
fn equality_is_shape_sensitive() {
    // Intentional: a leaf and an internal node spelling the same text are different ropes.
    assert_ne!(Rope::new("ab"), Rope::from_chunks(&["a", "b"]));
    assert_eq!(Rope::from_chunks(&["a", "b"]), Rope::from_chunks(&["a", "b"]));
    assert_ne!(Rope::from_chunks(&["a", "b", "c"]), Rope::from_chunks(&["ab", "c"]));
}

#[test]
fn internal_length_is_sum_of_children() {
    let rope = hello_world() + Rope::new("!");

    assert_eq!(rope.len(), 12);
    assert_eq!(rope.left().map(Rope::len), Some(11));
    assert_eq!(rope.right().map(Rope::len), Some(1));
}

#[test]
fn concatenation_shares_operands() {
    let left = Rope::new("foo");
    let right = Rope::new("bar");
    let joined = &left + &right;

    assert!(joined.left().is_some_and(|l| l.ptr_eq(&left)));
    assert!(joined.right().is_some_and(|r| r.ptr_eq(&right)));
    assert_eq!(left.chunks().collect::<Vec<_>>(), vec!["foo"]);
    assert_eq!(text(&joined), "foobar");
}

#[test]
fn integer_index_returns_single_char_leaf() {
    let rope = hello_world();

    assert_eq!(rope.get(0).unwrap(), Rope::new("h"));
    assert_eq!(rope.get(6).unwrap(), Rope::new("w"));
    assert_eq!(rope.get(-1).unwrap(), Rope::new("d"));
    assert_eq!(rope.get(-11).unwrap(), Rope::new("h"));
    assert_eq!(rope.char_at(5).unwrap(), ' ');
}

#[test]
fn integer_index_out_of_range() {
    let rope = hello_world();

    assert_eq!(rope.get(11), Err(RopeError::IndexOutOfRange { index: 11, len: 11 }));
    assert_eq!(rope.get(-12), Err(RopeError::IndexOutOfRange { index: -12, len: 11 }));
    assert!(Rope::new("").get(0).is_err());
}

#[test]
fn zero_step_is_rejected() {
    let rope = hello_world();
    assert_eq!(rope.slice(Slice::default().with_step(0)), Err(RopeError::InvalidSliceStep));
}

#[test]
fn stepped_slices_keep_stride_across_children() {
    let rope = hello_world();

    assert_eq!(text(&rope.slice(Slice::default().with_step(2)).unwrap()), "hlowrd");
    assert_eq!(text(&rope.slice(Slice::new(Some(1), None, Some(3))).unwrap()), "eood");
    assert_eq!(text(&rope.slice(Slice::new(Some(-2), None, Some(-2))).unwrap()), "lo le");
    assert_eq!(text(&rope.slice(Slice::new(Some(8), Some(2), Some(-3))).unwrap()), "r ");
}

#[test]
fn slice_bounds_clamp() {
    let rope = hello_world();

    assert_eq!(text(&rope.index(-100..100).unwrap()), "hello world");
    assert_eq!(text(&rope.index(6..).unwrap()), "world");
    assert_eq!(text(&rope.index(..-6).unwrap()), "hello");
    assert_eq!(text(&rope.index(7..3).unwrap()), "");
    assert_eq!(text(&rope.slice(Slice::new(Some(100), Some(-100), Some(-1))).unwrap()), "dlrow olleh");
    assert_eq!(text(&rope.slice(Slice::new(None, Some(-100), Some(-4))).unwrap()), "dwl");
}

#[test]
fn full_slice_reuses_nodes() {
    let rope = hello_world();
    let same = rope.index(..).unwrap();

    assert!(same.ptr_eq(&rope));

    let world = rope.index(6..).unwrap();
    assert_eq!(world, Rope::new("world"));
}

#[test]
fn slice_result_keeps_split_shape() {
    let rope = Rope::new("foo") + Rope::new("bar");
    assert_eq!(rope.index(2..5).unwrap(), Rope::new("o") + Rope::new("ba"));
}

#[test]
fn multibyte_chars_index_by_char() {
    let rope = Rope::from_chunks(&["héllo", "wörld"]);

    assert_eq!(rope.len(), 10);
    assert_eq!(rope.char_at(1).unwrap(), 'é');
    assert_eq!(rope.char_at(6).unwrap(), 'ö');
    assert_eq!(text(&rope.slice(Slice::reversed()).unwrap()), "dlröwolléh");
}

#[test]
fn index_expressions_parse() {
    assert_eq!("3".parse::<Index>(), Ok(Index::At(3)));
    assert_eq!("-1".parse::<Index>(), Ok(Index::At(-1)));
    assert_eq!("::-1".parse::<Index>(), Ok(Index::Slice(Slice::reversed())));
    assert_eq!("1:4".parse::<Index>(), Ok(Index::Slice(Slice::new(Some(1), Some(4), None))));
    assert_eq!(" 2 : : 3 ".parse::<Index>(), Ok(Index::Slice(Slice::new(Some(2), None, Some(3)))));
}

#[test]
fn unsupported_index_expressions() {
    assert_eq!(
        "1.5".parse::<Index>(),
        Err(RopeError::UnsupportedIndexType { found: "float".to_string() })
    );
    assert_eq!(
        "abc".parse::<Index>(),
        Err(RopeError::UnsupportedIndexType { found: "str".to_string() })
    );
    assert!("1:2:3:4".parse::<Index>().is_err());
    assert_eq!(
        RopeError::UnsupportedIndexType { found: "float".to_string() }.to_string(),
        "rope indices must be integers or slices, not float"
    );
}

#[test]
fn invalid_utf8_is_rejected() {
    assert_eq!(Rope::from_utf8(vec![0xff, 0xfe]), Err(RopeError::InvalidConstructionInput));
    assert_eq!(
        Rope::from_utf8_chunks(vec![b"ok".to_vec(), vec![0xc3]]),
        Err(RopeError::InvalidConstructionInput)
    );
    assert_eq!(
        Rope::from_utf8_chunks(vec![b"a".to_vec(), b"b".to_vec()]).unwrap(),
        Rope::from_chunks(&["a", "b"])
    );
}

#[test]
fn chunks_restart() {
    let rope = hello_world();

    assert_eq!(rope.chunks().count(), 3);
    assert_eq!(rope.chunks().collect::<String>(), "hello world");
}

#[test]
fn owned_iteration_is_single_pass() {
    let mut chunks = hello_world().into_iter();

    assert_eq!(chunks.by_ref().collect::<Vec<_>>(), vec!["hello", " ", "world"]);
    assert_eq!(chunks.next(), None);
    assert_eq!(chunks.count(), 0);
}

#[test]
fn owned_iteration_leaves_shared_nodes_intact() {
    let shared = hello_world();
    let chunks = (shared.clone() + Rope::new("!")).into_iter().collect::<Vec<_>>();

    assert_eq!(chunks, vec!["hello", " ", "world", "!"]);
    assert_eq!(text(&shared), "hello world");
}

#[test]
fn empty_leaf_yields_one_empty_chunk() {
    assert_eq!(Rope::new("").chunks().collect::<Vec<_>>(), vec![""]);
}

#[test]
fn insert_splits_a_leaf() {
    let mut rope = Rope::new("helloworld");
    rope.insert(5, " ").unwrap();

    assert_eq!(text(&rope), "hello world");
    assert_eq!(rope, (Rope::new("hello") + Rope::new(" ")) + Rope::new("world"));
}

#[test]
fn insert_at_ends() {
    let mut rope = hello_world();
    rope.insert(0, ">> ").unwrap();
    rope.insert(rope.len(), "!").unwrap();

    assert_eq!(text(&rope), ">> hello world!");
}

#[test]
fn insert_on_child_boundary_adds_sibling() {
    let mut rope = Rope::new("foo") + Rope::new("bar");
    rope.insert(3, "-").unwrap();

    assert_eq!(rope, Rope::new("foo") + (Rope::new("-") + Rope::new("bar")));
}

#[test]
fn insert_shares_untouched_subtrees() {
    let original = hello_world();
    let mut edited = original.clone();
    edited.insert(10, "L").unwrap();

    assert_eq!(text(&original), "hello world");
    assert_eq!(text(&edited), "hello worlLd");
    assert!(edited.left().zip(original.left()).is_some_and(|(a, b)| a.ptr_eq(b)));
}

#[test]
fn insert_past_end_fails() {
    let mut rope = hello_world();

    assert_eq!(rope.insert(12, "x"), Err(RopeError::IndexOutOfRange { index: 12, len: 11 }));
    assert_eq!(text(&rope), "hello world");
}

#[test]
fn insert_empty_text_is_a_no_op() {
    let original = hello_world();
    let mut rope = original.clone();
    rope.insert(3, "").unwrap();

    assert!(rope.ptr_eq(&original));
}

#[test]
fn reduce_drops_empty_leaves() {
    let rope = (Rope::new("") + Rope::new("abc")) + (Rope::new("def") + Rope::new(""));
    let reduced = rope.reduce_with_limit(0);

    assert_eq!(reduced, Rope::new("abc") + Rope::new("def"));
    assert_eq!(reduced.len(), rope.len());
}

#[test]
fn reduce_merges_small_leaf_pairs() {
    let rope = hello_world();
    let reduced = rope.reduce();

    assert_eq!(reduced, Rope::new("hello world"));
    assert_eq!(text(&reduced), text(&rope));
}

#[test]
fn reduce_respects_merge_limit() {
    let rope = Rope::from_chunks(&["ab", "cd", "ef", "gh"]);
    let reduced = rope.reduce_with_limit(4);

    assert_eq!(reduced, Rope::new("abcd") + Rope::new("efgh"));
}

#[test]
fn reduce_is_idempotent() {
    let rope = Rope::from_chunks(&["ab", "", "cd", "ef", "", "gh", "ij"]);
    let once = rope.reduce_with_limit(4);
    let twice = once.reduce_with_limit(4);

    assert_eq!(once, twice);
    assert!(once.ptr_eq(&twice));
    assert_eq!(text(&once), "abcdefghij");
}

#[test]
fn rebalance_flattens_a_spine() {
    let mut rope = Rope::new("");
    for chunk in ["a", "b", "c", "d", "e", "f", "g", "h"] {
        rope = rope + Rope::new(chunk);
    }

    let balanced = rope.rebalance();
    assert_eq!(rope.depth(), 8);
    assert_eq!(balanced.depth(), 4);
    assert_eq!(text(&balanced), text(&rope));
}

fn spine(links: usize) -> Rope {
    let mut rope = Rope::new("");
    for _ in 0..links {
        rope = rope + Rope::new("x");
    }
    rope
}

#[test]
fn deep_spine_does_not_overflow() {
    let rope = spine(200_000);

    assert_eq!(rope.len(), 200_000);
    assert_eq!(rope.char_at(-1).unwrap(), 'x');
    assert_eq!(rope.index(199_990..).unwrap().len(), 10);
    assert_eq!(spine(200_000), rope);
    assert_eq!(rope.chunks().count(), 200_001);
    assert_eq!(rope.reduce_with_limit(0).len(), 200_000);
    assert!(format!("{:?}", rope).starts_with("(((("));
    drop(rope);
}
