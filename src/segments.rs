/*
Segbar - by David Petnick
*/
use serde::{Deserialize, Serialize};

/// Positional Visual Variant of a Segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    First,
    Middle,
    Last,
    Single,
}

/// Uniform: Every Segment Uses One Homogeneous Template
/// Edged: Segments Use First / Middle / Last / Single Templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentMode {
    Uniform,
    #[default]
    Edged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentShape {
    Uniform,
    Edged(EdgeType),
}

/// One Structural Step, Always Applied at the Tail of the Sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEdit {
    PopTail,
    Push(SegmentShape),
}

/// Number of Segments Needed to Show `max_amount` in Chunks of `unit`
/// Caller Guarantees `unit > 0`; Negative Capacity Counts as Zero
pub fn segment_count(max_amount: f32, unit: f32) -> usize {
    (max_amount / unit).ceil().max(0.0) as usize
}

pub fn classify(index: usize, count: usize) -> EdgeType {
    if count == 1 {
        EdgeType::Single
    } else if index == 0 {
        EdgeType::First
    } else if index + 1 == count {
        EdgeType::Last
    } else {
        EdgeType::Middle
    }
}

/// Edits That Take a Bar From `current` Segments to `target` Segments
///
/// Growing re-creates the old tail (it stops being Last) before appending.
/// Shrinking pops one extra segment so the new tail is re-created as Last.
/// A target of zero leaves the bar empty.
pub fn reconcile(current: usize, target: usize, mode: SegmentMode) -> Vec<SegmentEdit> {
    use SegmentEdit::*;

    if target == current {
        return Vec::new();
    }

    let mut edits = Vec::new();

    if mode == SegmentMode::Uniform {
        if target > current {
            edits.extend((current..target).map(|_| Push(SegmentShape::Uniform)));
        } else {
            edits.extend((target..current).map(|_| PopTail));
        }
        return edits;
    }

    if target > current {
        if current > 0 {
            let tail = current - 1;
            edits.push(PopTail);
            edits.push(Push(SegmentShape::Edged(if tail == 0 {
                EdgeType::First
            } else {
                EdgeType::Middle
            })));
        }

        for index in current..target {
            edits.push(Push(SegmentShape::Edged(classify(index, target))));
        }
    } else {
        // One Extra So New Tail Gets Rebuilt With Correct Edge
        let pops = (current - target + 1).min(current);
        edits.extend((0..pops).map(|_| PopTail));

        if target > 0 {
            edits.push(Push(SegmentShape::Edged(classify(target - 1, target))));
        }
    }

    edits
}

/// Replays `edits` Onto a Plain Shape List
/// Mirrors What Owners of Real Segments do With Their Own Storage
pub fn apply_edits(shapes: &mut Vec<SegmentShape>, edits: &[SegmentEdit]) {
    for edit in edits {
        match *edit {
            SegmentEdit::PopTail => {
                shapes.pop();
            }
            SegmentEdit::Push(shape) => shapes.push(shape),
        }
    }
}
