//! Integer code assignment.
//!
//! Codes are assigned sequentially from 1 over the code-bearing categories in
//! [`AttrCategory::CODE_BEARING`] order, and over the definitions of each
//! category in declaration order. Code 0 is reserved for "no attribute".
//!
//! Each category gets a [`CodeRange`] so that the consumer can test category
//! membership with two integer comparisons. An empty category still gets a
//! range: `first` is the next free code and `last == first - 1`.
use log::debug;

use crate::{category::AttrCategory, database::AttrDatabase};

/// First code handed out. Zero means "no attribute".
pub const FIRST_CODE: u32 = 1;

/// Inclusive range of codes owned by a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeRange {
    pub first: u32,
    pub last: u32,
}

impl CodeRange {
    /// Returns true if the category has no definitions (`last == first - 1`).
    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Number of codes in the range.
    pub fn len(&self) -> usize {
        (self.last + 1 - self.first) as usize
    }

    pub fn contains(&self, code: u32) -> bool {
        self.first <= code && code <= self.last
    }
}

/// A definition together with its assigned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrCode {
    pub name: String,
    pub category: AttrCategory,
    pub code: u32,
}

/// Code assignment for every code-bearing definition of a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLayout {
    ranges: Vec<(AttrCategory, CodeRange)>,
    codes: Vec<AttrCode>,
}

impl CodeLayout {
    /// Assign codes to every code-bearing definition of `db`.
    pub fn assign<D: AttrDatabase>(db: &D) -> Self {
        let mut ranges = Vec::with_capacity(AttrCategory::CODE_BEARING.len());
        let mut codes = Vec::new();
        let mut next = FIRST_CODE;

        for category in AttrCategory::CODE_BEARING {
            let first = next;
            for def in db.definitions(category) {
                codes.push(AttrCode {
                    name: def.name.clone(),
                    category,
                    code: next,
                });
                next += 1;
            }
            let range = CodeRange {
                first,
                last: next - 1,
            };
            debug!(
                "Category {} assigned codes [{}, {}]",
                category, range.first, range.last
            );
            ranges.push((category, range));
        }

        CodeLayout { ranges, codes }
    }

    /// Code range of a code-bearing category, `None` for string categories.
    pub fn range(&self, category: AttrCategory) -> Option<CodeRange> {
        self.ranges
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, range)| *range)
    }

    /// Iterate over the category ranges in code order.
    pub fn ranges(&self) -> impl Iterator<Item = (AttrCategory, CodeRange)> + '_ {
        self.ranges.iter().copied()
    }

    /// Iterate over all assigned codes in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = &AttrCode> {
        self.codes.iter()
    }

    /// Code assigned to the definition `name`.
    pub fn code_of(&self, name: &str) -> Option<u32> {
        self.codes.iter().find(|c| c.name == name).map(|c| c.code)
    }

    /// Category owning `code`.
    pub fn category_of(&self, code: u32) -> Option<AttrCategory> {
        self.ranges
            .iter()
            .find(|(_, range)| range.contains(code))
            .map(|(category, _)| *category)
    }

    /// Number of assigned codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
