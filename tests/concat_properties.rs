// tests/concat_properties.rs

use proptest::prelude::*;

use stylepipe::exec::concat::concat_bytes;
use stylepipe::exec::minify::minify_css;

fn rule_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,8}",
        prop::sample::select(vec!["color", "margin", "padding", "width"]),
        0u32..500,
    )
        .prop_map(|(class, prop, n)| format!(".{class} {{\n  {prop}: {n}px;\n}}\n"))
}

proptest! {
    #[test]
    fn concat_length_is_sum_of_parts(parts in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..6)) {
        let joined = concat_bytes(&parts);
        let total: usize = parts.iter().map(|p| p.len()).sum();
        prop_assert_eq!(joined.len(), total);
    }

    #[test]
    fn concat_preserves_order_and_bytes(a in prop::collection::vec(any::<u8>(), 0..64),
                                        b in prop::collection::vec(any::<u8>(), 0..64),
                                        c in prop::collection::vec(any::<u8>(), 0..64)) {
        let joined = concat_bytes([&a, &b, &c]);
        prop_assert_eq!(&joined[..a.len()], &a[..]);
        prop_assert_eq!(&joined[a.len()..a.len() + b.len()], &b[..]);
        prop_assert_eq!(&joined[a.len() + b.len()..], &c[..]);
    }

    #[test]
    fn minify_is_deterministic_and_single_line(rules in prop::collection::vec(rule_strategy(), 1..8)) {
        let source = rules.concat();
        let first = minify_css(&source, "gen.css").unwrap();
        let second = minify_css(&source, "gen.css").unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.contains('\n'));
        prop_assert!(first.len() < source.len());
    }
}
