use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::str::FromStr;

use crate::error::{Result, RopeError};

use super::node::{Node, Rope};

/// A stepped slice with the usual optional bounds. Negative bounds count from the end; a
/// negative step walks backwards and defaults to the whole rope reversed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    pub fn reversed() -> Self {
        Self::default().with_step(-1)
    }

    pub fn with_step(self, step: isize) -> Self {
        Self { step: Some(step), ..self }
    }

    /// Resolves the bounds against `len`, clamping the same way native sequence slicing
    /// does. A negative step stops at `-1`, the position before the first `char`.
    fn resolve(&self, len: usize) -> Result<Span> {
        let step = match self.step {
            None => 1,
            Some(0) => return Err(RopeError::InvalidSliceStep),
            Some(step) => step.max(-isize::MAX),
        };

        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(index) if index < 0 => (index + len).max(lower),
            Some(index) => index.min(upper),
        };

        let (start, stop) = if step < 0 {
            (clamp(self.start, len - 1), clamp(self.stop, -1))
        } else {
            (clamp(self.start, 0), clamp(self.stop, len))
        };

        let count = if step < 0 && stop < start {
            (start - stop - 1) / -step + 1
        } else if step > 0 && start < stop {
            (stop - start - 1) / step + 1
        } else {
            0
        };

        Ok(Span { start, step, count: count as usize })
    }
}

impl From<Range<isize>> for Slice {
    fn from(range: Range<isize>) -> Self {
        Self::new(Some(range.start), Some(range.end), None)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::new(Some(range.start), None, None)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(range: RangeTo<isize>) -> Self {
        Self::new(None, Some(range.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::default()
    }
}

/// Either a single position or a slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Index {
    At(isize),
    Slice(Slice),
}

impl From<isize> for Index {
    fn from(index: isize) -> Self {
        Index::At(index)
    }
}

impl From<Slice> for Index {
    fn from(slice: Slice) -> Self {
        Index::Slice(slice)
    }
}

impl From<Range<isize>> for Index {
    fn from(range: Range<isize>) -> Self {
        Index::Slice(range.into())
    }
}

impl From<RangeFrom<isize>> for Index {
    fn from(range: RangeFrom<isize>) -> Self {
        Index::Slice(range.into())
    }
}

impl From<RangeTo<isize>> for Index {
    fn from(range: RangeTo<isize>) -> Self {
        Index::Slice(range.into())
    }
}

impl From<RangeFull> for Index {
    fn from(range: RangeFull) -> Self {
        Index::Slice(range.into())
    }
}

/// Parses `i`, `start:stop` or `start:stop:step`, where any slice part may be left empty.
impl FromStr for Index {
    type Err = RopeError;

    fn from_str(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        if !expr.contains(':') {
            return parse_bound(expr).map(Index::At);
        }

        let parts = expr.split(':').collect::<Vec<_>>();
        if parts.len() > 3 {
            return Err(RopeError::UnsupportedIndexType { found: "str".to_string() });
        }

        let mut bounds = [None; 3];
        for (bound, part) in bounds.iter_mut().zip(&parts) {
            let part = part.trim();
            if !part.is_empty() {
                *bound = Some(parse_bound(part)?);
            }
        }

        let [start, stop, step] = bounds;
        Ok(Index::Slice(Slice::new(start, stop, step)))
    }
}

fn parse_bound(token: &str) -> Result<isize> {
    token.parse::<isize>().map_err(|_| {
        let found = if token.parse::<f64>().is_ok() { "float" } else { "str" };
        RopeError::UnsupportedIndexType { found: found.to_string() }
    })
}

/// `count` positions `start, start + step, ...`, all inside the node being sliced.
#[derive(Clone, Copy, Debug)]
struct Span {
    start: isize,
    step: isize,
    count: usize,
}

impl Span {
    fn last(&self) -> isize {
        self.start + (self.count as isize - 1) * self.step
    }

    fn split(self, head: usize) -> (Span, Span) {
        let tail_start = self.start + head as isize * self.step;
        (
            Span { count: head, ..self },
            Span { start: tail_start, count: self.count - head, ..self },
        )
    }

    fn shift(self, offset: isize) -> Span {
        Span { start: self.start - offset, ..self }
    }

    fn covers(&self, len: usize) -> bool {
        self.step == 1 && self.start == 0 && self.count == len
    }
}

enum Task {
    Slice(Rope, Span),
    Join,
}

impl Rope {
    /// Indexes by position or by slice.
    pub fn index(&self, index: impl Into<Index>) -> Result<Rope> {
        match index.into() {
            Index::At(index) => self.get(index),
            Index::Slice(slice) => self.slice(slice),
        }
    }

    /// The `char` at `index` as a new single-`char` leaf. Negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<Rope> {
        self.char_at(index).map(|c| Rope::from(c.to_string()))
    }

    pub fn char_at(&self, index: isize) -> Result<char> {
        let len = self.len();
        let out_of_range = RopeError::IndexOutOfRange { index, len };

        let normalized = if index < 0 { index + len as isize } else { index };
        if normalized < 0 || normalized >= len as isize {
            return Err(out_of_range);
        }

        let mut offset = normalized as usize;
        let mut rope = self;
        loop {
            match rope.node.as_ref() {
                Node::Internal { left, right, .. } => {
                    if offset < left.len() {
                        rope = left;
                    } else {
                        offset -= left.len();
                        rope = right;
                    }
                }
                Node::Leaf { text, .. } => return text.chars().nth(offset).ok_or(out_of_range),
            }
        }
    }

    /// Slices the rope. A slice that spans a whole node with step 1 reuses that node; a
    /// slice that crosses an internal node's split becomes the concatenation of the two
    /// halves' slices, with the stride carried across the boundary.
    pub fn slice(&self, slice: Slice) -> Result<Rope> {
        let span = slice.resolve(self.len())?;
        if span.count == 0 {
            return Ok(Rope::new(""));
        }

        let mut tasks = vec![Task::Slice(self.clone(), span)];
        let mut done: Vec<Rope> = Vec::new();

        while let Some(task) = tasks.pop() {
            let (rope, span) = match task {
                Task::Slice(rope, span) => (rope, span),
                Task::Join => {
                    let (Some(right), Some(left)) = (done.pop(), done.pop()) else {
                        unreachable!("a join always follows both of its operands");
                    };
                    done.push(left + right);
                    continue;
                }
            };

            if span.covers(rope.len()) {
                done.push(rope);
                continue;
            }

            match rope.node.as_ref() {
                Node::Leaf { text, len } => done.push(Rope::from(pick(text, *len, span))),
                Node::Internal { left, right, .. } => {
                    let split = left.len() as isize;
                    let (first, last) = (span.start, span.last());

                    if span.step > 0 {
                        if last < split {
                            tasks.push(Task::Slice(left.clone(), span));
                        } else if first >= split {
                            tasks.push(Task::Slice(right.clone(), span.shift(split)));
                        } else {
                            let head = ((split - 1 - first) / span.step + 1) as usize;
                            let (head, tail) = span.split(head);
                            tasks.push(Task::Join);
                            tasks.push(Task::Slice(right.clone(), tail.shift(split)));
                            tasks.push(Task::Slice(left.clone(), head));
                        }
                    } else if last >= split {
                        tasks.push(Task::Slice(right.clone(), span.shift(split)));
                    } else if first < split {
                        tasks.push(Task::Slice(left.clone(), span));
                    } else {
                        let head = ((first - split) / -span.step + 1) as usize;
                        let (head, tail) = span.split(head);
                        tasks.push(Task::Join);
                        tasks.push(Task::Slice(left.clone(), tail));
                        tasks.push(Task::Slice(right.clone(), head.shift(split)));
                    }
                }
            }
        }

        Ok(done.pop().unwrap_or_default())
    }
}

fn pick(text: &str, len: usize, span: Span) -> String {
    let stride = span.step.unsigned_abs();
    if span.step > 0 {
        text.chars().skip(span.start as usize).step_by(stride).take(span.count).collect()
    } else {
        text.chars()
            .rev()
            .skip(len - 1 - span.start as usize)
            .step_by(stride)
            .take(span.count)
            .collect()
    }
}
