//! Per-position labels for the diff visualization.

use crate::domain::{AlignmentResult, DiffCell, DiffLabel, EditOp};

/// Label every aligned position of `result`, left to right.
pub fn classify(result: &AlignmentResult) -> Vec<DiffCell> {
    result.ops.iter().map(classify_op).collect()
}

fn classify_op(op: &EditOp) -> DiffCell {
    match op {
        EditOp::Match(s) => DiffCell {
            label: DiffLabel::Match,
            reference: Some(s.clone()),
            hypothesis: Some(s.clone()),
        },
        EditOp::Insertion(h) => DiffCell {
            label: DiffLabel::Insert,
            reference: None,
            hypothesis: Some(h.clone()),
        },
        EditOp::Deletion(r) => DiffCell {
            label: DiffLabel::Delete,
            reference: Some(r.clone()),
            hypothesis: None,
        },
        EditOp::Substitution(r, h) => DiffCell {
            label: DiffLabel::Substitute,
            reference: Some(r.clone()),
            hypothesis: Some(h.clone()),
        },
    }
}
