use std::collections::BTreeSet;

use proptest::prelude::*;
use sunduk::AvlTree;

proptest! {
    /// Дерево ведёт себя как упорядоченное множество: после любой
    /// последовательности вставок и удалений состав и порядок совпадают
    /// с эталонным BTreeSet.
    #[test]
    fn behaves_like_ordered_set(ops in prop::collection::vec((any::<bool>(), "[a-f]{1,4}"), 0..300)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for (is_insert, value) in ops {
            if is_insert {
                tree.insert(&value);
                model.insert(value);
            } else {
                tree.remove(&value);
                model.remove(&value);
            }
        }

        prop_assert_eq!(tree.len(), model.len());
        let inorder: Vec<String> = tree.iter().map(str::to_owned).collect();
        let expected: Vec<String> = model.iter().cloned().collect();
        prop_assert_eq!(inorder, expected);

        for probe in ["", "a", "zz", "ffff"] {
            prop_assert_eq!(tree.contains(probe), model.contains(probe));
        }
    }

    /// Высота не выходит за границу АВЛ: 1.44 * log2(n + 2).
    #[test]
    fn height_stays_within_avl_bound(values in prop::collection::vec("[a-z]{1,6}", 1..200)) {
        let mut tree = AvlTree::new();
        for v in &values {
            tree.insert(v);
        }
        let n = tree.len() as f64;
        let bound = (1.45 * (n + 2.0).log2()).ceil() as i32;
        prop_assert!(tree.height() <= bound, "height {} > bound {}", tree.height(), bound);
    }

    /// Текстовый и бинарный форматы дают эквивалентное дерево.
    #[test]
    fn serialization_roundtrips(values in prop::collection::vec("[a-z0-9]{0,8}", 0..60)) {
        let mut tree = AvlTree::new();
        for v in &values {
            tree.insert(v);
        }

        let mut from_text = AvlTree::new();
        from_text.deserialize_text(&tree.serialize_text());
        prop_assert_eq!(from_text.len(), tree.len());

        let mut buf = Vec::new();
        tree.write_binary(&mut buf).unwrap();
        let mut from_binary = AvlTree::new();
        from_binary.read_binary(&mut buf.as_slice()).unwrap();

        let original: Vec<String> = tree.iter().map(str::to_owned).collect();
        let text_side: Vec<String> = from_text.iter().map(str::to_owned).collect();
        let binary_side: Vec<String> = from_binary.iter().map(str::to_owned).collect();
        prop_assert_eq!(&text_side, &original);
        prop_assert_eq!(&binary_side, &original);
    }
}
