use std::{cmp::Ordering, collections::HashMap};

use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

use crate::{prelude::*, quantity::Kilowatts};

impl<T> Aggregate for T where T: ?Sized {}

/// Descriptive statistics over plain `f64` iterators.
///
/// Every method consumes the iterator and returns `None` on empty input.
pub trait Aggregate {
    #[expect(clippy::cast_precision_loss)]
    fn mean(self) -> Option<f64>
    where
        Self: Sized + Iterator<Item = f64>,
    {
        let (sum, count) = self.fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
        (count != 0).then(|| sum / count as f64)
    }

    fn median(self) -> Option<f64>
    where
        Self: Sized + Iterator<Item = f64>,
    {
        let mut values = self.collect_vec();
        if values.is_empty() {
            return None;
        }
        values.sort_unstable_by(compare);
        let index = values.len() / 2;
        if values.len() % 2 == 1 {
            Some(values[index])
        } else {
            Some((values[index - 1] + values[index]) / 2.0)
        }
    }

    /// The most frequent exact value. Ties are broken deterministically:
    /// among the largest groups, the value whose first occurrence comes
    /// earliest in the input wins.
    fn mode(self) -> Option<f64>
    where
        Self: Sized + Iterator<Item = f64>,
    {
        let mut groups: HashMap<OrderedFloat<f64>, (usize, usize)> = HashMap::new();
        for (index, value) in self.enumerate() {
            let (count, _) = groups.entry(OrderedFloat(value)).or_insert((0, index));
            *count += 1;
        }
        groups
            .into_iter()
            .max_by_key(|(_, (count, first_index))| (*count, std::cmp::Reverse(*first_index)))
            .map(|(value, _)| value.0)
    }

    fn range(self) -> Option<f64>
    where
        Self: Sized + Iterator<Item = f64>,
    {
        minmax(self).map(|(min, max)| max - min)
    }

    fn midrange(self) -> Option<f64>
    where
        Self: Sized + Iterator<Item = f64>,
    {
        minmax(self).map(|(min, max)| (max + min) / 2.0)
    }
}

fn minmax(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.minmax_by(compare) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(value) => Some((value, value)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

// Total order so that a NaN reading cannot panic the sort; NaN sorts last.
fn compare(lhs: &f64, rhs: &f64) -> Ordering {
    lhs.total_cmp(rhs)
}

/// Round half-up to two decimals for display.
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The five statistics of one filtered window, rounded for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub mean: Kilowatts,
    pub median: Kilowatts,
    pub mode: Kilowatts,
    pub range: Kilowatts,
    pub midrange: Kilowatts,
}

impl Summary {
    /// Fails on an empty window: there is no meaningful mean or range of
    /// nothing, and the caller is expected to check first.
    pub fn try_new(values: &[f64]) -> Result<Self> {
        ensure!(!values.is_empty(), "cannot compute statistics over an empty window");
        let rounded = |value: Option<f64>| {
            value.map(|value| Kilowatts(round_half_up(value))).context("empty window")
        };
        Ok(Self {
            mean: rounded(values.iter().copied().mean())?,
            median: rounded(values.iter().copied().median())?,
            mode: rounded(values.iter().copied().mode())?,
            range: rounded(values.iter().copied().range())?,
            midrange: rounded(values.iter().copied().midrange())?,
        })
    }
}
