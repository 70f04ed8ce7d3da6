use chainsensor_types::size::parse_size_gb;
use chainsensor_types::slug::slugify;
use proptest::prelude::*;

// ── Slug properties ───────────────────────────────────────────────

proptest! {
    #[test]
    fn slug_is_lowercase_alphanumeric_or_hyphen(name in ".{0,64}") {
        let slug = slugify(&name);
        prop_assert!(slug.chars().all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase())));
    }

    #[test]
    fn slug_never_has_adjacent_or_edge_hyphens(name in ".{0,64}") {
        let slug = slugify(&name);
        prop_assert!(!slug.contains("--"));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
    }

    #[test]
    fn slug_is_idempotent(name in "[a-zA-Z0-9 ]{0,64}") {
        let once = slugify(&name);
        prop_assert_eq!(slugify(&once), once);
    }
}

// ── Size parsing properties ───────────────────────────────────────

proptest! {
    #[test]
    fn size_parse_is_unit_consistent(mb in 0.0f64..10_000.0) {
        // n MB and n/1000 GB must agree.
        let from_mb = parse_size_gb(&format!("{mb} MB")).unwrap();
        let from_gb = parse_size_gb(&format!("{} GB", mb / 1000.0)).unwrap();
        prop_assert!((from_mb - from_gb).abs() < 1e-9);
    }

    #[test]
    fn size_parse_never_negative(s in ".{0,32}") {
        if let Some(gb) = parse_size_gb(&s) {
            prop_assert!(gb >= 0.0);
        }
    }
}
