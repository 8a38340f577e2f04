use crate::filter::{Filter, FilterSet, ParseError};
use crate::project::FieldSelector;
use crate::types::Record;

/// Counters describing one engine run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Records consumed from the input.
    pub input_count: usize,
    /// Records that passed the filter set.
    pub matched_count: usize,
}

/// A compiled filter set plus a field selector, ready to be applied to any
/// number of record streams.
pub struct Engine {
    filter: Filter,
    selector: FieldSelector,
}

impl Engine {
    pub fn new(filters: FilterSet, selector: FieldSelector) -> Self {
        Engine {
            filter: filters.compile(),
            selector,
        }
    }

    /// Builds an engine straight from command-line style arguments:
    /// repeated include/exclude expressions and comma-separated field
    /// lists.
    pub fn from_args<A, B>(
        include: A,
        exclude: B,
        fields: Option<&str>,
        exclude_fields: Option<&str>,
    ) -> Result<Self, ParseError>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Ok(Engine::new(
            FilterSet::parse(include, exclude)?,
            FieldSelector::parse(fields, exclude_fields)?,
        ))
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filter.matches(record)
    }

    /// Lazily filters and projects a stream of records.
    pub fn run<I>(&self, records: I) -> Filtered<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Record>,
    {
        Filtered {
            engine: self,
            records: records.into_iter(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Filters and projects a whole collection, returning the survivors
    /// together with run counters.
    pub fn apply(&self, records: Vec<Record>) -> (Vec<Record>, Diagnostics) {
        let mut filtered = self.run(records);
        let result = filtered.by_ref().collect();
        (result, filtered.diagnostics())
    }
}

/// Iterator returned by [`Engine::run`].
pub struct Filtered<'e, I> {
    engine: &'e Engine,
    records: I,
    diagnostics: Diagnostics,
}

impl<I> Filtered<'_, I> {
    /// Counters for the records consumed so far.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }
}

impl<I: Iterator<Item = Record>> Iterator for Filtered<'_, I> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let record = self.records.next()?;
            self.diagnostics.input_count += 1;
            if self.engine.filter.matches(&record) {
                self.diagnostics.matched_count += 1;
                return Some(self.engine.selector.project(&record));
            }
        }
    }
}
