//! Minimum edit-distance alignment of two phone sequences.
//!
//! Costs are the plain Levenshtein ones: 0 for an exact match, 1 for each
//! insertion, deletion or substitution. The full `(m + 1) × (n + 1)` table is
//! kept so the operation sequence can be recovered by backtracing.
//!
//! Tie-break when several predecessors reach the same minimum:
//!
//! 1. diagonal (match / substitution)
//! 2. deletion (reference symbol with no hypothesis counterpart)
//! 3. insertion (hypothesis symbol with no reference counterpart)
//!
//! The order decides whether a difference is reported as one substitution or as
//! an insertion + deletion pair, so it is part of the observable output.

use crate::domain::{AlignmentResult, EditOp, Symbol};

/// Align `reference` against `hypothesis`.
///
/// The returned operations are in left-to-right order.
pub fn align(reference: &[Symbol], hypothesis: &[Symbol]) -> AlignmentResult {
    let m = reference.len();
    let n = hypothesis.len();
    let width = n + 1;
    let at = |i: usize, j: usize| i * width + j;

    let mut d = vec![0usize; (m + 1) * width];
    for i in 0..=m {
        d[at(i, 0)] = i;
    }
    for j in 0..=n {
        d[at(0, j)] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let diag = d[at(i - 1, j - 1)] + usize::from(reference[i - 1] != hypothesis[j - 1]);
            let del = d[at(i - 1, j)] + 1;
            let ins = d[at(i, j - 1)] + 1;
            d[at(i, j)] = diag.min(del).min(ins);
        }
    }

    let mut ops = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        let here = d[at(i, j)];

        if i > 0 && j > 0 {
            let r = &reference[i - 1];
            let h = &hypothesis[j - 1];
            if d[at(i - 1, j - 1)] + usize::from(r != h) == here {
                ops.push(if r == h {
                    EditOp::Match(r.clone())
                } else {
                    EditOp::Substitution(r.clone(), h.clone())
                });
                i -= 1;
                j -= 1;
                continue;
            }
        }

        if i > 0 && d[at(i - 1, j)] + 1 == here {
            ops.push(EditOp::Deletion(reference[i - 1].clone()));
            i -= 1;
            continue;
        }

        // Column 0 always resolves through the deletion branch, so j > 0 here.
        ops.push(EditOp::Insertion(hypothesis[j - 1].clone()));
        j -= 1;
    }

    ops.reverse();
    AlignmentResult { ops }
}

/// Edit distance only, using two rolling rows over the shorter sequence.
pub fn edit_distance(a: &[Symbol], b: &[Symbol]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, x) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, y) in short.iter().enumerate() {
            let cost = usize::from(x != y);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seq(s: &str) -> Vec<Symbol> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn substitution_in_the_middle() {
        let result = align(&seq("A B C"), &seq("A X C"));
        assert_eq!(
            result.ops,
            vec![
                EditOp::Match("A".into()),
                EditOp::Substitution("B".into(), "X".into()),
                EditOp::Match("C".into()),
            ]
        );
        assert_eq!(result.reference_length(), 3);
        assert_eq!(result.edits(), 1);
        assert!((result.error_rate().unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn trailing_deletion() {
        let result = align(&seq("A B"), &seq("A"));
        assert_eq!(result.ops, vec![EditOp::Match("A".into()), EditOp::Deletion("B".into())]);
    }

    #[test]
    fn trailing_insertion() {
        let result = align(&seq("A"), &seq("A B"));
        assert_eq!(result.ops, vec![EditOp::Match("A".into()), EditOp::Insertion("B".into())]);
    }

    #[test]
    fn empty_sides() {
        let result = align(&[], &seq("A B"));
        assert_eq!(result.ops, vec![EditOp::Insertion("A".into()), EditOp::Insertion("B".into())]);
        assert_eq!(result.reference_length(), 0);

        let result = align(&seq("A B"), &[]);
        assert_eq!(result.ops, vec![EditOp::Deletion("A".into()), EditOp::Deletion("B".into())]);

        let result = align(&[], &[]);
        assert!(result.ops.is_empty());
        assert_eq!(result.reference_length(), 0);
    }

    #[test]
    fn swapped_pair_prefers_substitutions() {
        // Two substitutions and delete+match+insert both cost 2; diagonal wins.
        let result = align(&seq("A B"), &seq("B A"));
        assert_eq!(
            result.ops,
            vec![
                EditOp::Substitution("A".into(), "B".into()),
                EditOp::Substitution("B".into(), "A".into()),
            ]
        );
    }

    #[test]
    fn deletion_preferred_over_insertion() {
        // "K A S A" vs "K A S A S": the extra S is the only possible edit.
        let result = align(&seq("K A S A"), &seq("K A S A S"));
        assert_eq!(result.counts().insertions, 1);
        assert_eq!(result.ops.last(), Some(&EditOp::Insertion("S".into())));

        // Longer reference with a dropped middle symbol.
        let result = align(&seq("P E RR O"), &seq("P E O"));
        assert_eq!(
            result.ops,
            vec![
                EditOp::Match("P".into()),
                EditOp::Match("E".into()),
                EditOp::Deletion("RR".into()),
                EditOp::Match("O".into()),
            ]
        );
    }

    #[test]
    fn deletion_wins_tie_with_insertion() {
        // Diagonal costs 3; shifting by one costs 2 either way.
        let result = align(&seq("A B A"), &seq("B A B"));
        assert_eq!(
            result.ops,
            vec![
                EditOp::Insertion("B".into()),
                EditOp::Match("A".into()),
                EditOp::Match("B".into()),
                EditOp::Deletion("A".into()),
            ]
        );
    }

    #[test]
    fn multi_character_symbols_compare_whole() {
        let result = align(&seq("T CH E"), &seq("T C H E"));
        assert_eq!(result.edits(), 2);
        assert_eq!(edit_distance(&seq("T CH E"), &seq("T C H E")), 2);
    }

    fn phones() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[ABCD]", 0..10)
    }

    proptest! {
        #[test]
        fn self_alignment_is_all_matches(a in phones()) {
            let result = align(&a, &a);
            prop_assert!(result.ops.iter().all(|op| matches!(op, EditOp::Match(_))));
            prop_assert_eq!(result.reference_length(), a.len());
        }

        #[test]
        fn edit_count_is_symmetric(a in phones(), b in phones()) {
            let ab = align(&a, &b).counts();
            let ba = align(&b, &a).counts();
            prop_assert_eq!(ab.edits(), ba.edits());
            prop_assert_eq!(
                ab.insertions as i64 - ab.deletions as i64,
                ba.deletions as i64 - ba.insertions as i64
            );
        }

        #[test]
        fn empty_reference_or_hypothesis(a in phones()) {
            let ins = align(&[], &a).counts();
            prop_assert_eq!(ins.insertions, a.len());
            prop_assert_eq!(ins.edits(), a.len());

            let del = align(&a, &[]).counts();
            prop_assert_eq!(del.deletions, a.len());
            prop_assert_eq!(del.edits(), a.len());
        }

        #[test]
        fn triangle_inequality(a in phones(), b in phones(), c in phones()) {
            let ac = align(&a, &c).edits();
            let ab = align(&a, &b).edits();
            let bc = align(&b, &c).edits();
            prop_assert!(ac <= ab + bc);
        }

        #[test]
        fn backtrace_matches_table_and_reconstructs_inputs(a in phones(), b in phones()) {
            let result = align(&a, &b);
            prop_assert_eq!(result.edits(), edit_distance(&a, &b));

            let mut r = Vec::new();
            let mut h = Vec::new();
            for op in &result.ops {
                match op {
                    EditOp::Match(s) => { r.push(s.clone()); h.push(s.clone()); }
                    EditOp::Insertion(s) => h.push(s.clone()),
                    EditOp::Deletion(s) => r.push(s.clone()),
                    EditOp::Substitution(x, y) => { r.push(x.clone()); h.push(y.clone()); }
                }
            }
            prop_assert_eq!(r, a);
            prop_assert_eq!(h, b);
        }
    }
}
