//! Pending-request window planning.
//!
//! Pending requests are exposed as one logical sequence: each object-type
//! group ordered newest first, groups concatenated in `ObjectType::REVIEW_ORDER`.
//! Given the per-group pending counts, `plan_window` works out which range of
//! each group a page covers, so the store only has to run one bounded range
//! query per contributing group.

use serde::{Deserialize, Serialize};

use crate::enums::ObjectType;

/// Page size used when the caller gives no limit and no configuration overrides it.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Parameters of a pending-request query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuery {
    /// Restrict the sequence to one group.
    pub object_type: Option<ObjectType>,
    /// Maximum number of requests to return; the configured default when `None`.
    pub limit: Option<u32>,
    /// Position in the logical sequence to start from.
    pub offset: u32,
    /// Ignore `limit`/`offset` and return the whole sequence.
    pub return_all: bool,
}

impl PendingQuery {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            object_type: None,
            limit: None,
            offset: 0,
            return_all: true,
        }
    }

    #[must_use]
    pub const fn page(limit: u32, offset: u32) -> Self {
        Self {
            object_type: None,
            limit: Some(limit),
            offset,
            return_all: false,
        }
    }

    #[must_use]
    pub const fn of_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = Some(object_type);
        self
    }

    /// Groups consulted, in sequence order.
    #[must_use]
    pub fn groups(&self) -> Vec<ObjectType> {
        self.object_type
            .map_or_else(|| ObjectType::REVIEW_ORDER.to_vec(), |t| vec![t])
    }

    /// Resolve the requested slice of the logical sequence.
    #[must_use]
    pub fn window(&self, default_limit: u32) -> PageWindow {
        if self.return_all {
            return PageWindow {
                offset: 0,
                limit: None,
            };
        }
        PageWindow {
            offset: u64::from(self.offset),
            limit: Some(u64::from(self.limit.unwrap_or(default_limit))),
        }
    }
}

/// A slice of the logical sequence. `limit: None` means "to the end".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: Option<u64>,
}

/// The range one group contributes to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSlice {
    pub object_type: ObjectType,
    pub offset: u64,
    pub limit: u64,
}

/// Split `window` across groups of the given sizes, in order.
///
/// Groups that lie entirely before the offset are skipped, a window that
/// straddles a boundary yields the tail of one group followed by the head of
/// the next, and an offset at or past the total length yields no slices.
#[must_use]
pub fn plan_window(groups: &[(ObjectType, u64)], window: PageWindow) -> Vec<GroupSlice> {
    let mut slices = Vec::new();
    let mut skip = window.offset;
    let mut remaining = window.limit;

    for &(object_type, count) in groups {
        if remaining == Some(0) {
            break;
        }
        if skip >= count {
            skip -= count;
            continue;
        }

        let available = count - skip;
        let take = remaining.map_or(available, |r| r.min(available));
        slices.push(GroupSlice {
            object_type,
            offset: skip,
            limit: take,
        });

        skip = 0;
        remaining = remaining.map(|r| r - take);
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const GROUPS: [(ObjectType, u64); 2] = [(ObjectType::Schema, 10), (ObjectType::Entity, 10)];

    fn slice(object_type: ObjectType, offset: u64, limit: u64) -> GroupSlice {
        GroupSlice {
            object_type,
            offset,
            limit,
        }
    }

    #[test]
    fn default_query_uses_default_limit() {
        let window = PendingQuery::default().window(DEFAULT_PAGE_LIMIT);
        assert_eq!(
            window,
            PageWindow {
                offset: 0,
                limit: Some(10)
            }
        );
    }

    #[test]
    fn return_all_ignores_limit_and_offset() {
        let query = PendingQuery {
            limit: Some(1),
            offset: 5,
            return_all: true,
            ..PendingQuery::default()
        };
        assert_eq!(
            query.window(DEFAULT_PAGE_LIMIT),
            PageWindow {
                offset: 0,
                limit: None
            }
        );
    }

    #[test]
    fn groups_follow_review_order_or_filter() {
        assert_eq!(
            PendingQuery::default().groups(),
            vec![ObjectType::Schema, ObjectType::Entity]
        );
        assert_eq!(
            PendingQuery::default().of_type(ObjectType::Entity).groups(),
            vec![ObjectType::Entity]
        );
    }

    #[rstest]
    #[case::first_page(0, Some(10), vec![slice(ObjectType::Schema, 0, 10)])]
    #[case::second_page(10, Some(10), vec![slice(ObjectType::Entity, 0, 10)])]
    #[case::last_item(19, Some(1), vec![slice(ObjectType::Entity, 9, 1)])]
    #[case::straddles_boundary(8, Some(4), vec![
        slice(ObjectType::Schema, 8, 2),
        slice(ObjectType::Entity, 0, 2),
    ])]
    #[case::everything(0, Some(20), vec![
        slice(ObjectType::Schema, 0, 10),
        slice(ObjectType::Entity, 0, 10),
    ])]
    #[case::unbounded(0, None, vec![
        slice(ObjectType::Schema, 0, 10),
        slice(ObjectType::Entity, 0, 10),
    ])]
    #[case::unbounded_from_middle(15, None, vec![slice(ObjectType::Entity, 5, 5)])]
    #[case::past_the_end(20, Some(20), vec![])]
    #[case::zero_limit(0, Some(0), vec![])]
    fn plans_windows_across_groups(
        #[case] offset: u64,
        #[case] limit: Option<u64>,
        #[case] expected: Vec<GroupSlice>,
    ) {
        let plan = plan_window(&GROUPS, PageWindow { offset, limit });
        assert_eq!(plan, expected);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let groups = [(ObjectType::Schema, 0), (ObjectType::Entity, 3)];
        let plan = plan_window(
            &groups,
            PageWindow {
                offset: 0,
                limit: Some(10),
            },
        );
        assert_eq!(plan, vec![slice(ObjectType::Entity, 0, 3)]);
    }

    #[test]
    fn planned_length_matches_window() {
        let groups = [(ObjectType::Schema, 7), (ObjectType::Entity, 5)];
        for offset in 0..14 {
            for limit in 0..14 {
                let plan = plan_window(
                    &groups,
                    PageWindow {
                        offset,
                        limit: Some(limit),
                    },
                );
                let planned: u64 = plan.iter().map(|s| s.limit).sum();
                let expected = limit.min(12_u64.saturating_sub(offset));
                assert_eq!(planned, expected, "offset={offset} limit={limit}");
            }
        }
    }
}
