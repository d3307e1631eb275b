//! Sort order derivation and row comparison.
//!
//! Clicking a sortable header cycles its direction none -> ascending ->
//! descending -> none; `derive` turns the cycle position into a comparator.
//! Ascending means the comparator returns `Less` when the left value is
//! smaller. Mixed-type values compare by a total rank order (empty <
//! boolean < number < text) so sorting never panics on heterogeneous rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::model::AttributeStore;
use crate::value::RawValue;

/// Position in the header click cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Natural (insertion) order.
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// The next position in the click cycle.
    pub fn next(self) -> SortDirection {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }
}

/// How to order rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowComparator {
    /// Insertion order, with the stable row id as tie-breaker.
    Natural,
    /// Order by one column's attribute values.
    ByColumn { column: String, ascending: bool },
}

/// Comparator and direction for the next state of a header's sort cycle.
///
/// `current` is the direction the header shows now; the result is what a
/// click produces. A full cycle back to `None` yields the natural
/// comparator.
pub fn derive(current: SortDirection, column: &Column) -> (RowComparator, SortDirection) {
    let next = current.next();
    let comparator = match next {
        SortDirection::None => RowComparator::Natural,
        SortDirection::Ascending => RowComparator::ByColumn {
            column: column.name.clone(),
            ascending: true,
        },
        SortDirection::Descending => RowComparator::ByColumn {
            column: column.name.clone(),
            ascending: false,
        },
    };
    (comparator, next)
}

impl RowComparator {
    /// Compare two rows. `a_index` / `b_index` are the rows' insertion
    /// positions, used by the natural order and as the final tie-breaker.
    pub fn compare(
        &self,
        a: &dyn AttributeStore,
        b: &dyn AttributeStore,
        a_index: usize,
        b_index: usize,
    ) -> Ordering {
        match self {
            RowComparator::Natural => a_index
                .cmp(&b_index)
                .then_with(|| a.row_id().cmp(&b.row_id())),
            RowComparator::ByColumn { column, ascending } => {
                let va = a.get(column).unwrap_or_default();
                let vb = b.get(column).unwrap_or_default();
                let ordering = if *ascending {
                    compare_raw(&va, &vb)
                } else {
                    compare_raw(&vb, &va)
                };
                ordering.then_with(|| a_index.cmp(&b_index))
            }
        }
    }
}

/// Total order over raw values: empty < boolean < number < text, with
/// `total_cmp` on numbers so NaN cannot poison the sort.
pub fn compare_raw(a: &RawValue, b: &RawValue) -> Ordering {
    fn rank(v: &RawValue) -> u8 {
        match v {
            RawValue::Empty => 0,
            RawValue::Boolean(_) => 1,
            RawValue::Number(_) => 2,
            RawValue::Text(_) => 3,
        }
    }

    match (a, b) {
        (RawValue::Boolean(x), RawValue::Boolean(y)) => x.cmp(y),
        (RawValue::Number(x), RawValue::Number(y)) => x.total_cmp(y),
        (RawValue::Text(x), RawValue::Text(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Stable-sort rows by the comparator, preserving insertion order for ties.
pub fn sort_rows<S: AttributeStore>(rows: Vec<S>, comparator: &RowComparator) -> Vec<S> {
    let mut decorated: Vec<(usize, S)> = rows.into_iter().enumerate().collect();
    decorated.sort_by(|(ia, a), (ib, b)| comparator.compare(a, b, *ia, *ib));
    decorated.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::model::MemoryModel;

    fn rows(ages: &[RawValue]) -> Vec<MemoryModel> {
        ages.iter()
            .map(|v| MemoryModel::from_pairs([("age", v.clone())]))
            .collect()
    }

    fn ages(rows: &[MemoryModel]) -> Vec<RawValue> {
        rows.iter().map(|r| r.get("age").unwrap_or_default()).collect()
    }

    #[test]
    fn test_direction_cycle() {
        let mut direction = SortDirection::None;
        direction = direction.next();
        assert_eq!(direction, SortDirection::Ascending);
        direction = direction.next();
        assert_eq!(direction, SortDirection::Descending);
        direction = direction.next();
        assert_eq!(direction, SortDirection::None);
    }

    #[test]
    fn test_derive_follows_cycle() {
        let column = Column::builder("age").build().unwrap();

        let (cmp, dir) = derive(SortDirection::None, &column);
        assert_eq!(dir, SortDirection::Ascending);
        assert_eq!(
            cmp,
            RowComparator::ByColumn {
                column: "age".into(),
                ascending: true
            }
        );

        let (cmp, dir) = derive(SortDirection::Ascending, &column);
        assert_eq!(dir, SortDirection::Descending);
        assert_eq!(
            cmp,
            RowComparator::ByColumn {
                column: "age".into(),
                ascending: false
            }
        );

        let (cmp, dir) = derive(SortDirection::Descending, &column);
        assert_eq!(dir, SortDirection::None);
        assert_eq!(cmp, RowComparator::Natural);
    }

    #[test]
    fn test_ascending_returns_less_when_left_is_smaller() {
        let cmp = RowComparator::ByColumn {
            column: "age".into(),
            ascending: true,
        };
        let a = MemoryModel::from_pairs([("age", RawValue::Number(1.0))]);
        let b = MemoryModel::from_pairs([("age", RawValue::Number(2.0))]);
        assert_eq!(cmp.compare(&a, &b, 0, 1), Ordering::Less);
        assert_eq!(cmp.compare(&b, &a, 1, 0), Ordering::Greater);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let input = [
            RawValue::Number(3.0),
            RawValue::Number(1.0),
            RawValue::Number(2.0),
        ];

        let sorted = sort_rows(
            rows(&input),
            &RowComparator::ByColumn {
                column: "age".into(),
                ascending: true,
            },
        );
        assert_eq!(
            ages(&sorted),
            vec![
                RawValue::Number(1.0),
                RawValue::Number(2.0),
                RawValue::Number(3.0)
            ]
        );

        let sorted = sort_rows(
            rows(&input),
            &RowComparator::ByColumn {
                column: "age".into(),
                ascending: false,
            },
        );
        assert_eq!(
            ages(&sorted),
            vec![
                RawValue::Number(3.0),
                RawValue::Number(2.0),
                RawValue::Number(1.0)
            ]
        );
    }

    #[test]
    fn test_mixed_types_use_rank_order() {
        let input = [
            RawValue::Text("zebra".into()),
            RawValue::Number(5.0),
            RawValue::Empty,
            RawValue::Boolean(true),
        ];
        let sorted = sort_rows(
            rows(&input),
            &RowComparator::ByColumn {
                column: "age".into(),
                ascending: true,
            },
        );
        assert_eq!(
            ages(&sorted),
            vec![
                RawValue::Empty,
                RawValue::Boolean(true),
                RawValue::Number(5.0),
                RawValue::Text("zebra".into())
            ]
        );
    }

    #[test]
    fn test_nan_does_not_poison_order() {
        let input = [
            RawValue::Number(f64::NAN),
            RawValue::Number(1.0),
            RawValue::Number(-1.0),
        ];
        let sorted = sort_rows(
            rows(&input),
            &RowComparator::ByColumn {
                column: "age".into(),
                ascending: true,
            },
        );
        // total_cmp puts NaN above every finite value.
        assert_eq!(ages(&sorted)[0], RawValue::Number(-1.0));
        assert_eq!(ages(&sorted)[1], RawValue::Number(1.0));
    }

    #[test]
    fn test_equal_values_keep_insertion_order() {
        let first = MemoryModel::from_pairs([("age", RawValue::Number(1.0))]).with_id("first");
        let second = MemoryModel::from_pairs([("age", RawValue::Number(1.0))]).with_id("second");
        let sorted = sort_rows(
            vec![first, second],
            &RowComparator::ByColumn {
                column: "age".into(),
                ascending: true,
            },
        );
        assert_eq!(sorted[0].row_id(), Some("first"));
        assert_eq!(sorted[1].row_id(), Some("second"));
    }

    #[test]
    fn test_natural_order_restores_insertion() {
        let input = [
            RawValue::Number(3.0),
            RawValue::Number(1.0),
            RawValue::Number(2.0),
        ];
        let sorted = sort_rows(rows(&input), &RowComparator::Natural);
        assert_eq!(ages(&sorted), input.to_vec());
    }
}
