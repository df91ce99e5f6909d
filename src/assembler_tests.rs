#[cfg(test)]
mod tests {
    use crate::assembler::merge_rings;
    use crate::element::{Fragment, Tags};
    use crate::ring::Ring;
    use geo_types::Coord;

    fn fragment(id: i64, refs: Vec<i64>) -> Fragment {
        let coords = refs
            .iter()
            .map(|&r| Coord {
                x: r as f64,
                y: 0.0,
            })
            .collect();
        Fragment::new(id, Tags::new(), refs, coords)
    }

    fn tagged_fragment(id: i64, key: &str, value: &str, refs: Vec<i64>) -> Fragment {
        let mut fragment = fragment(id, refs);
        fragment.tags.insert(key.to_string(), value.to_string());
        fragment
    }

    fn permutations(n: usize) -> Vec<Vec<usize>> {
        // Heap's algorithm
        let mut items: Vec<usize> = (0..n).collect();
        let mut out = vec![items.clone()];
        let mut counts = vec![0usize; n];
        let mut i = 0;
        while i < n {
            if counts[i] < i {
                if i % 2 == 0 {
                    items.swap(0, i);
                } else {
                    items.swap(counts[i], i);
                }
                out.push(items.clone());
                counts[i] += 1;
                i = 0;
            } else {
                counts[i] = 0;
                i += 1;
            }
        }
        out
    }

    #[test]
    fn test_merge_two_halves() {
        let r1 = Ring::new(fragment(1, vec![1, 2, 3]));
        let r2 = Ring::new(fragment(2, vec![3, 4, 1]));

        let rings = merge_rings(vec![r1, r2]);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].is_closed());
        assert_eq!(rings[0].fragments.len(), 2);
    }

    #[test]
    fn test_merge_reverse_endpoint() {
        let r1 = Ring::new(tagged_fragment(1, "name", "foo", vec![1, 2, 3, 4]));
        let r2 = Ring::new(tagged_fragment(2, "building", "true", vec![6, 5, 4]));
        let r3 = Ring::new(fragment(3, vec![1, 7, 6]));

        let rings = merge_rings(vec![r1, r2, r3]);
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert!(ring.is_closed());
        assert_eq!(ring.tags.get("name"), Some(&"foo".to_string()));
        assert_eq!(ring.tags.get("building"), Some(&"true".to_string()));
    }

    /// Every permutation and direction of four segments forming one loop
    /// must merge to a single closed ring with refs in rotational order.
    #[test]
    fn test_merge_permutations() {
        for mask in 0..16u32 {
            let segments = [
                (1i64, vec![1i64, 2, 3, 4]),
                (2, vec![4, 5, 6, 7]),
                (3, vec![7, 8, 9, 10]),
                (4, vec![10, 11, 12, 1]),
            ];
            let oriented: Vec<Fragment> = segments
                .iter()
                .enumerate()
                .map(|(i, (id, refs))| {
                    let mut refs = refs.clone();
                    if mask & (1 << i) != 0 {
                        refs.reverse();
                    }
                    fragment(*id, refs)
                })
                .collect();

            for order in permutations(4) {
                let rings: Vec<Ring> = order
                    .iter()
                    .map(|&i| Ring::new(oriented[i].clone()))
                    .collect();
                let merged = merge_rings(rings);
                assert_eq!(merged.len(), 1, "mask {mask} order {order:?}");
                let ring = &merged[0];
                assert!(ring.is_closed(), "mask {mask} order {order:?}");
                assert_eq!(ring.refs.len(), 13);

                // consecutive refs differ by 1, wrapping between 1 and 12
                let mut prev = ring.refs[0];
                for &next in &ring.refs[1..] {
                    let adjacent = (prev - next).abs() == 1
                        || (prev == 1 && next == 12)
                        || (prev == 12 && next == 1);
                    assert!(adjacent, "refs out of order: {:?}", ring.refs);
                    prev = next;
                }
            }
        }
    }

    #[test]
    fn test_closed_input_passes_through() {
        let r1 = Ring::new(fragment(1, vec![1, 2, 3, 1]));
        let r2 = Ring::new(fragment(2, vec![4, 5, 6, 4]));
        let rings = merge_rings(vec![r1, r2]);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(Ring::is_closed));
    }

    #[test]
    fn test_disjoint_loops() {
        let rings = merge_rings(vec![
            Ring::new(fragment(1, vec![1, 2, 3])),
            Ring::new(fragment(2, vec![3, 4, 1])),
            Ring::new(fragment(3, vec![10, 11, 12])),
            Ring::new(fragment(4, vec![12, 13, 10])),
        ]);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(Ring::is_closed));
    }

    #[test]
    fn test_dangling_ring_stays_open() {
        let rings = merge_rings(vec![
            Ring::new(fragment(1, vec![1, 2, 3])),
            Ring::new(fragment(2, vec![3, 4, 5])),
        ]);
        assert_eq!(rings.len(), 1);
        assert!(!rings[0].is_closed());
        assert_eq!(rings[0].refs, vec![1, 2, 3, 4, 5]);
    }
}
