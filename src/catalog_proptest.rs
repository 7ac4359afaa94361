//! Property-based tests for catalog normalization and merging.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::catalog::{normalize_public_id, CatalogRecord, IdentifierMapping, ResolvedCatalog};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn records(sizes: &[usize]) -> Vec<CatalogRecord> {
        sizes
            .iter()
            .enumerate()
            .map(|(file, size)| CatalogRecord {
                path: PathBuf::from(format!("/schemas/{}/catalog.xml", file)),
                prefer: None,
                mappings: (0..*size)
                    .map(|entry| IdentifierMapping {
                        public_id: format!("-//F{}//E{}//EN", file, entry),
                        uri: format!("e{}.dtd", entry),
                        location: format!("/schemas/{}/e{}.dtd", file, entry),
                    })
                    .collect(),
            })
            .collect()
    }

    // ============================================================================
    // normalize_public_id property tests
    // ============================================================================

    proptest! {
        /// Property: normalizing twice gives the same result as normalizing once
        #[test]
        fn normalize_is_idempotent(input in "[ \\t\\r\\na-zA-Z/-]*") {
            let once = normalize_public_id(&input);
            let twice = normalize_public_id(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized ids never start or end with a space, and never
        /// contain two spaces in a row
        #[test]
        fn normalize_has_no_stray_spaces(input in "[ \\t\\r\\na-zA-Z/-]*") {
            let result = normalize_public_id(&input);
            prop_assert!(!result.starts_with(' '));
            prop_assert!(!result.ends_with(' '));
            prop_assert!(!result.contains("  "));
            prop_assert!(!result.contains(['\t', '\r', '\n']));
        }

        /// Property: ids without whitespace are unchanged
        #[test]
        fn normalize_preserves_compact_ids(input in "[a-zA-Z0-9/-]+") {
            prop_assert_eq!(normalize_public_id(&input), input);
        }
    }

    // ============================================================================
    // ResolvedCatalog::merge property tests
    // ============================================================================

    proptest! {
        /// Property: the merged length is the sum of the record lengths, and
        /// the merge is absent exactly when that sum is zero
        #[test]
        fn merge_length_is_sum(sizes in prop::collection::vec(0usize..5, 0..6)) {
            let total: usize = sizes.iter().sum();
            match ResolvedCatalog::merge(records(&sizes)) {
                Some(merged) => prop_assert_eq!(merged.len(), total),
                None => prop_assert_eq!(total, 0),
            }
        }

        /// Property: mappings keep file order, then document order
        #[test]
        fn merge_is_order_stable(sizes in prop::collection::vec(1usize..5, 1..6)) {
            let expected: Vec<IdentifierMapping> = records(&sizes)
                .into_iter()
                .flat_map(|r| r.mappings)
                .collect();
            let merged = ResolvedCatalog::merge(records(&sizes)).unwrap();
            prop_assert_eq!(merged.mappings(), expected.as_slice());
            prop_assert_eq!(merged.sources().len(), sizes.len());
        }
    }
}
