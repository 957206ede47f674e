use crate::collection::Collection;
use crate::common::Value;
use crate::errors::{fail, CollectionResult, ErrorKind};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A simple index expression.
///
/// Resolution against a [Collection] yields zero or more slots:
///
/// * [Index::Position] - exactly one slot, negative positions count from the end
/// * [Index::Key] - the slot with that key, or nothing if the key is absent
/// * [Index::Many] - the concatenation of every sub-expression, in order
/// * [Index::Range] - every slot inside a start/stop/step window
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Index {
    Position(isize),
    Key(String),
    Many(Vec<Index>),
    Range(Span),
}

/// A start/stop/step window over slot positions with sequence-slice semantics.
///
/// Missing bounds default to the ends of the collection, negative bounds count
/// from the end, and out of range bounds are clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

/// An index expression accepted by [Collection::get] and [Collection::set].
///
/// A [Query::Path] walks nested collections one level per element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Simple(Index),
    Path(Vec<Index>),
}

/// One resolved slot: its position, key and value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved<'a> {
    pub position: usize,
    pub key: Option<&'a str>,
    pub value: &'a Value,
}

/// The ordered result of [Collection::resolve_indices].
pub type Resolution<'a> = SmallVec<[Resolved<'a>; 4]>;

impl Span {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Span { start, stop, step }
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Computes the positions this span selects from a sequence of `len` items.
    pub fn positions(&self, len: usize) -> CollectionResult<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return fail("Slice step cannot be zero".to_string(), ErrorKind::MalformedArguments);
        }

        let len = isize::try_from(len)?;
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };

        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = match self.start {
            Some(start) => clamp(start),
            None if step > 0 => lower,
            None => upper,
        };
        let stop = match self.stop {
            Some(stop) => clamp(stop),
            None if step > 0 => upper,
            None => lower,
        };

        let mut positions = Vec::new();
        let mut current = start;
        while (step > 0 && current < stop) || (step < 0 && current > stop) {
            positions.push(current as usize);
            match current.checked_add(step) {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(positions)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bound = |b: Option<isize>| b.map(|v| v.to_string()).unwrap_or_default();
        write!(f, "{}:{}", bound(self.start), bound(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{}", step)?;
        }
        Ok(())
    }
}

impl Index {
    /// Converts a [Value] into an index, coercing anything integer-like to a
    /// position.
    ///
    /// Integers become positions, strings and chars become keys, arrays become
    /// [Index::Many], booleans become position 0 or 1 and finite floats are
    /// truncated. Every other value is rejected.
    pub fn coerce(value: &Value) -> CollectionResult<Index> {
        match value {
            Value::I32(v) => Ok(Index::Position(*v as isize)),
            Value::I64(v) => Ok(Index::Position(isize::try_from(*v)?)),
            Value::U64(v) => Ok(Index::Position(isize::try_from(*v)?)),
            Value::Bool(v) => Ok(Index::Position(*v as isize)),
            Value::F64(v) if v.is_finite() => Ok(Index::Position(v.trunc() as isize)),
            Value::String(v) => Ok(Index::Key(v.clone())),
            Value::Char(v) => Ok(Index::Key(v.to_string())),
            Value::Array(items) => items
                .iter()
                .map(Index::coerce)
                .collect::<CollectionResult<Vec<_>>>()
                .map(Index::Many),
            other => fail(
                format!("Unsupported index type: {}", other.type_name()),
                ErrorKind::UnsupportedIndexType,
            ),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Index::Position(_) => "position",
            Index::Key(_) => "key",
            Index::Many(_) => "list",
            Index::Range(_) => "range",
        }
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Index::Position(position) => write!(f, "{}", position),
            Index::Key(key) => write!(f, "\"{}\"", key),
            Index::Many(items) => write!(f, "[{}]", items.iter().join(", ")),
            Index::Range(span) => write!(f, "{}", span),
        }
    }
}

impl Query {
    /// Creates a path query from its levels.
    pub fn path<I, T>(levels: I) -> Query
    where
        I: IntoIterator<Item = T>,
        T: Into<Index>,
    {
        Query::Path(levels.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<&Value> for Index {
    type Error = crate::errors::CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Index::coerce(value)
    }
}

impl TryFrom<Value> for Index {
    type Error = crate::errors::CollectionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Index::coerce(&value)
    }
}

impl From<isize> for Index {
    fn from(value: isize) -> Self {
        Index::Position(value)
    }
}

impl From<i32> for Index {
    fn from(value: i32) -> Self {
        Index::Position(value as isize)
    }
}

impl From<usize> for Index {
    fn from(value: usize) -> Self {
        Index::Position(value as isize)
    }
}

impl From<&str> for Index {
    fn from(value: &str) -> Self {
        Index::Key(value.to_string())
    }
}

impl From<String> for Index {
    fn from(value: String) -> Self {
        Index::Key(value)
    }
}

impl From<&String> for Index {
    fn from(value: &String) -> Self {
        Index::Key(value.clone())
    }
}

impl From<Span> for Index {
    fn from(value: Span) -> Self {
        Index::Range(value)
    }
}

impl From<Range<isize>> for Index {
    fn from(value: Range<isize>) -> Self {
        Index::Range(Span::new(Some(value.start), Some(value.end), None))
    }
}

impl From<RangeFrom<isize>> for Index {
    fn from(value: RangeFrom<isize>) -> Self {
        Index::Range(Span::new(Some(value.start), None, None))
    }
}

impl From<RangeTo<isize>> for Index {
    fn from(value: RangeTo<isize>) -> Self {
        Index::Range(Span::new(None, Some(value.end), None))
    }
}

impl From<RangeFull> for Index {
    fn from(_: RangeFull) -> Self {
        Index::Range(Span::default())
    }
}

impl<T: Into<Index>> From<Vec<T>> for Index {
    fn from(value: Vec<T>) -> Self {
        Index::Many(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Index>, const N: usize> From<[T; N]> for Index {
    fn from(value: [T; N]) -> Self {
        Index::Many(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! simple_query_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Query {
                fn from(value: $t) -> Self {
                    Query::Simple(Index::from(value))
                }
            }
        )*
    };
}

simple_query_from!(
    isize,
    i32,
    usize,
    &str,
    String,
    &String,
    Span,
    Range<isize>,
    RangeFrom<isize>,
    RangeTo<isize>,
    RangeFull,
);

impl From<Index> for Query {
    fn from(value: Index) -> Self {
        Query::Simple(value)
    }
}

impl<T: Into<Index>> From<Vec<T>> for Query {
    fn from(value: Vec<T>) -> Self {
        Query::Simple(Index::from(value))
    }
}

impl<T: Into<Index>, const N: usize> From<[T; N]> for Query {
    fn from(value: [T; N]) -> Self {
        Query::Simple(Index::from(value))
    }
}

macro_rules! path_query_from_tuple {
    ($($name:ident : $level:ident),+) => {
        impl<$($name: Into<Index>),+> From<($($name,)+)> for Query {
            fn from(($($level,)+): ($($name,)+)) -> Self {
                Query::Path(vec![$($level.into()),+])
            }
        }
    };
}

path_query_from_tuple!(A: a);
path_query_from_tuple!(A: a, B: b);
path_query_from_tuple!(A: a, B: b, C: c);
path_query_from_tuple!(A: a, B: b, C: c, D: d);
path_query_from_tuple!(A: a, B: b, C: c, D: d, E: e);

/// Creates a [Query::Path] from a list of index expressions.
///
/// ```rust
/// use named_collection::{collection, path};
///
/// let tree = collection!["a" => collection!["b" => 1, "c" => 2]];
/// let picked = tree.get(path!["a", "b"]).unwrap();
/// assert_eq!(picked.to_string(), "{a: {b: 1}}");
/// ```
#[macro_export]
macro_rules! path {
    ($($level:expr),* $(,)?) => {
        $crate::collection::Query::Path(::std::vec![$($crate::collection::Index::from($level)),*])
    };
}

impl Collection {
    /// Returns the ordered (position, key, value) triples denoted by `index`.
    ///
    /// Key lookups are a search: a missing key resolves to nothing. Positions
    /// are a dereference: a position outside the collection is an
    /// [ErrorKind::OutOfBounds] error.
    pub fn resolve_indices(&self, index: &Index) -> CollectionResult<Resolution<'_>> {
        let mut resolved = Resolution::new();
        self.collect_indices(index, &mut resolved)?;
        log::trace!("Index {} resolved to {} slot(s)", index, resolved.len());
        Ok(resolved)
    }

    fn collect_indices<'a>(&'a self, index: &Index, out: &mut Resolution<'a>) -> CollectionResult<()> {
        match index {
            Index::Position(position) => {
                let position = self.normalize_position(*position)?;
                out.push(self.resolved_at(position));
            }
            Index::Key(key) => {
                if let Some(position) = self.position_of(key) {
                    out.push(self.resolved_at(position));
                }
            }
            Index::Many(indices) => {
                for index in indices {
                    self.collect_indices(index, out)?;
                }
            }
            Index::Range(span) => {
                for position in span.positions(self.len())? {
                    out.push(self.resolved_at(position));
                }
            }
        }
        Ok(())
    }

    fn resolved_at(&self, position: usize) -> Resolved<'_> {
        let slot = &self.slots[position];
        Resolved {
            position,
            key: slot.key(),
            value: slot.value(),
        }
    }

    /// Maps a possibly negative position onto an existing slot.
    pub(crate) fn normalize_position(&self, position: isize) -> CollectionResult<usize> {
        let len = isize::try_from(self.len())?;
        let normalized = if position < 0 { position + len } else { position };
        if normalized < 0 || normalized >= len {
            return fail(
                format!("Index out of bounds: {}", position),
                ErrorKind::OutOfBounds,
            );
        }
        Ok(normalized as usize)
    }
}
