// ABOUTME: Property tests for the token filter: concatenation, idempotency, set algebra and subsequence laws.
// ABOUTME: Also checks the filter differentially against a naive per-token reference.

mod common;

use common::*;
use jqx_markup::{filter_tokens, FilterSet};
use proptest::prelude::*;

fn filter(document: &str, spec: &str) -> String {
    filter_tokens(document, &FilterSet::parse(spec)).unwrap()
}

proptest! {
    #[test]
    fn concatenation(a in doc_indices(), b in doc_indices(), f in spec_indices(3)) {
        let (a, b, spec) = (alphabet_doc(&a), alphabet_doc(&b), alphabet_spec(&f));
        let joined = format!("{a}{b}");
        prop_assert_eq!(filter(&joined, &spec), filter(&a, &spec) + &filter(&b, &spec));
    }

    #[test]
    fn idempotency(d in doc_indices(), f in spec_indices(3)) {
        let (doc, spec) = (alphabet_doc(&d), alphabet_spec(&f));
        let once = filter(&doc, &spec);
        prop_assert_eq!(filter(&once, &spec), once);
    }

    #[test]
    fn neighbouring_keywords_never_overlap(d in doc_indices(), f in spec_indices(9)) {
        let doc = alphabet_doc(&d);
        for &i in &f {
            let a = filter(&doc, &alphabet_spec(&[i]));
            let b = filter(&doc, &alphabet_spec(&[i + 1]));
            if !a.is_empty() {
                prop_assert_ne!(&a, &b);
                prop_assert!(!b.contains(&a));
            }
            if !b.is_empty() {
                prop_assert!(!a.contains(&b));
            }
        }
    }

    #[test]
    fn set_algebra(d in doc_indices(), f1 in spec_indices(5), f2 in spec_indices(5)) {
        let doc = alphabet_doc(&d);
        let (s1, s2) = (alphabet_spec(&f1), alphabet_spec(&f2));
        let union_spec = format!("{s1}{s2}");

        let out1 = filter(&doc, &s1);
        let out2 = filter(&doc, &s2);
        let intersect = filter(&out1, &s2);
        let union = filter(&doc, &union_spec);

        prop_assert_eq!(&filter(&out2, &s1), &intersect);
        prop_assert_eq!(&filter(&union, &s1), &out1);
        prop_assert_eq!(&filter(&union, &s2), &out2);
        prop_assert_eq!(&filter(&intersect, &s1), &intersect);
        prop_assert_eq!(&filter(&intersect, &s2), &intersect);
        prop_assert_eq!(&filter(&intersect, &union_spec), &intersect);

        let (set1, set2) = (FilterSet::parse(&s1), FilterSet::parse(&s2));
        let union_set = set1.union(&set2);
        prop_assert_eq!(&union_set, &FilterSet::parse(&union_spec));
        prop_assert!(set1.is_subset(&union_set) && set2.is_subset(&union_set));
        prop_assert_eq!(&filter(&doc, &union_set.to_string()), &union);
    }

    #[test]
    fn outputs_are_subsequences(
        d in doc_indices(),
        f1 in spec_indices(2),
        f2 in spec_indices(3),
        f3 in spec_indices(2),
    ) {
        let doc = alphabet_doc(&d);
        let narrow = filter(&doc, &alphabet_spec(&f2));
        let wide_spec = [alphabet_spec(&f1), alphabet_spec(&f2), alphabet_spec(&f3)].concat();
        let wide = filter(&doc, &wide_spec);
        prop_assert!(FilterSet::parse(&alphabet_spec(&f2)).is_subset(&FilterSet::parse(&wide_spec)));

        prop_assert!(is_subsequence(&narrow, &wide));
        prop_assert!(is_subsequence(&narrow, &doc));
        prop_assert!(is_subsequence(&wide, &doc));
        prop_assert!(narrow.len() <= wide.len());
    }

    #[test]
    fn catch_all_filter_is_identity(d in doc_indices(), f in spec_indices(4)) {
        prop_assume!(!f.is_empty());
        let restricted: Vec<usize> = d.iter().map(|&i| f[i % f.len()]).collect();
        let doc = alphabet_doc(&restricted);
        prop_assert_eq!(filter(&doc, &alphabet_spec(&f)), doc);
    }

    #[test]
    fn degenerate_cases(d in doc_indices(), f in spec_indices(3)) {
        let (doc, spec) = (alphabet_doc(&d), alphabet_spec(&f));
        prop_assert!(filter(&doc, &spec).len() <= doc.len());
        prop_assert_eq!(filter(&doc, " "), "");
        prop_assert_eq!(filter("", &spec), "");
    }

    #[test]
    fn matches_naive_reference(d in vec_of_tokens(), keep in vec_of_tokens()) {
        let got = filter(&alphabet_doc(&d), &alphabet_spec(&keep));
        prop_assert_eq!(&got, &reference_filter(&d, &keep));

        let repeated = d.repeat(4);
        prop_assert_eq!(
            filter(&alphabet_doc(&repeated), &alphabet_spec(&keep)),
            got.repeat(4)
        );
    }
}

fn vec_of_tokens() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..HTML_TOKENS.len(), 0..30)
}
