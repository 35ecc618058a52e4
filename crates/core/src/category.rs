//! Category hierarchy resolution.
//!
//! Categories form a flat table with an optional self-referencing parent and
//! at most one level of nesting: a category's parent must itself be
//! top-level. The functions here turn that flat set into navigable
//! groupings, resolve an id-or-slug reference into the set of category ids
//! a project listing should filter on, and pick "related" categories for a
//! detail view.
//!
//! All functions are total over in-memory data: an unknown reference or a
//! violated nesting invariant produces an empty or degraded result, never
//! an error, and none of them perform I/O.

use std::collections::{HashMap, HashSet};

use crate::types::DbId;

/// Default number of sibling categories collected for a related view.
pub const DEFAULT_SIBLING_LIMIT: usize = 3;

/// Default total size of a related-categories list, padding included.
pub const DEFAULT_TOTAL_LIMIT: usize = 4;

/// Access to the category fields the resolver needs.
///
/// Implemented by the persistence layer's category model so this crate does
/// not depend on the database representation.
pub trait CategoryRecord {
    fn id(&self) -> DbId;
    fn slug(&self) -> &str;
    fn parent_id(&self) -> Option<DbId>;
    fn display_order(&self) -> i32;
}

/// A top-level category paired with its ordered direct children.
#[derive(Debug)]
pub struct CategoryGroup<'a, C> {
    pub parent: &'a C,
    pub children: Vec<&'a C>,
}

/// Partition a flat category set into top-level groups with their children.
///
/// Groups and children are ordered by display order (id as tiebreaker). A
/// category whose parent id does not refer to a top-level category in the
/// input is treated as top-level itself, so a violated depth-1 invariant
/// degrades to a flat listing instead of dropping records or looping.
pub fn group_by_parent<C: CategoryRecord>(categories: &[C]) -> Vec<CategoryGroup<'_, C>> {
    let top_ids: HashSet<DbId> = categories
        .iter()
        .filter(|c| c.parent_id().is_none())
        .map(|c| c.id())
        .collect();

    let mut parents: Vec<&C> = Vec::new();
    let mut children_by_parent: HashMap<DbId, Vec<&C>> = HashMap::new();

    for category in categories {
        match category.parent_id() {
            Some(parent_id) if top_ids.contains(&parent_id) => {
                children_by_parent.entry(parent_id).or_default().push(category);
            }
            // No parent, or a dangling/nested parent reference: top-level.
            _ => parents.push(category),
        }
    }

    parents.sort_by_key(|c| (c.display_order(), c.id()));

    parents
        .into_iter()
        .map(|parent| {
            let mut children = children_by_parent.remove(&parent.id()).unwrap_or_default();
            children.sort_by_key(|c| (c.display_order(), c.id()));
            CategoryGroup { parent, children }
        })
        .collect()
}

/// Resolve an id-or-slug category reference to the set of category ids a
/// project listing should match.
///
/// A reference that parses as an id token is matched by id, anything else by
/// slug. An unknown reference yields an empty set (no results, not an
/// error). A top-level match expands to itself plus its direct children; a
/// child match is just itself.
pub fn resolve_filter_category_ids<C: CategoryRecord>(
    categories: &[C],
    reference: &str,
) -> Vec<DbId> {
    let found = match reference.parse::<DbId>() {
        Ok(id) => categories.iter().find(|c| c.id() == id),
        Err(_) => categories.iter().find(|c| c.slug() == reference),
    };

    let Some(category) = found else {
        return Vec::new();
    };

    if category.parent_id().is_some() {
        return vec![category.id()];
    }

    let mut ids = vec![category.id()];
    ids.extend(
        categories
            .iter()
            .filter(|c| c.parent_id() == Some(category.id()))
            .map(|c| c.id()),
    );
    ids
}

/// Pick categories related to `current_id` for a detail view.
///
/// Siblings under the current category's effective parent (itself when
/// top-level, its parent otherwise) come first, up to `sibling_limit`. When
/// that falls short of `total_limit`, other top-level categories (excluding
/// the effective parent) pad the list. Both partitions are ordered by
/// display order, the current category is never included, and an unknown
/// `current_id` yields an empty list.
pub fn related_categories<C: CategoryRecord>(
    categories: &[C],
    current_id: DbId,
    sibling_limit: usize,
    total_limit: usize,
) -> Vec<&C> {
    let Some(current) = categories.iter().find(|c| c.id() == current_id) else {
        return Vec::new();
    };

    let effective_parent_id = current.parent_id().unwrap_or(current.id());

    let mut siblings: Vec<&C> = categories
        .iter()
        .filter(|c| c.parent_id() == Some(effective_parent_id) && c.id() != current_id)
        .collect();
    siblings.sort_by_key(|c| (c.display_order(), c.id()));
    siblings.truncate(sibling_limit);

    let mut related = siblings;
    if related.len() < total_limit {
        let mut padding: Vec<&C> = categories
            .iter()
            .filter(|c| c.parent_id().is_none() && c.id() != effective_parent_id)
            .collect();
        padding.sort_by_key(|c| (c.display_order(), c.id()));
        padding.truncate(total_limit - related.len());
        related.extend(padding);
    }

    related
}

/// Aggregate a category's project count from a precomputed per-category map.
///
/// A top-level category rolls up its own count plus its direct children's;
/// a child category reports only its own. Missing map entries count as zero.
pub fn project_count_for_category<C: CategoryRecord>(
    category: &C,
    categories: &[C],
    counts_by_category_id: &HashMap<DbId, i64>,
) -> i64 {
    let own = counts_by_category_id.get(&category.id()).copied().unwrap_or(0);

    if category.parent_id().is_some() {
        return own;
    }

    own + categories
        .iter()
        .filter(|c| c.parent_id() == Some(category.id()))
        .map(|c| counts_by_category_id.get(&c.id()).copied().unwrap_or(0))
        .sum::<i64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCategory {
        id: DbId,
        slug: &'static str,
        parent_id: Option<DbId>,
        display_order: i32,
    }

    impl CategoryRecord for TestCategory {
        fn id(&self) -> DbId {
            self.id
        }
        fn slug(&self) -> &str {
            self.slug
        }
        fn parent_id(&self) -> Option<DbId> {
            self.parent_id
        }
        fn display_order(&self) -> i32 {
            self.display_order
        }
    }

    fn cat(id: DbId, slug: &'static str, parent_id: Option<DbId>, order: i32) -> TestCategory {
        TestCategory {
            id,
            slug,
            parent_id,
            display_order: order,
        }
    }

    /// Signage-flavoured fixture: two parents with children, one childless.
    fn fixture() -> Vec<TestCategory> {
        vec![
            cat(1, "signage", None, 0),
            cat(2, "illuminated-letters", Some(1), 0),
            cat(3, "flat-letters", Some(1), 1),
            cat(4, "printing", None, 1),
            cat(5, "vinyl-wrap", Some(4), 0),
            cat(6, "logo-design", None, 2),
        ]
    }

    #[test]
    fn group_by_parent_partitions_every_category_exactly_once() {
        let categories = fixture();
        let groups = group_by_parent(&categories);

        let mut seen: Vec<DbId> = groups
            .iter()
            .flat_map(|g| {
                std::iter::once(g.parent.id()).chain(g.children.iter().map(|c| c.id()))
            })
            .collect();
        seen.sort_unstable();

        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn group_by_parent_orders_parents_and_children_by_display_order() {
        let categories = fixture();
        let groups = group_by_parent(&categories);

        let parent_ids: Vec<DbId> = groups.iter().map(|g| g.parent.id()).collect();
        assert_eq!(parent_ids, vec![1, 4, 6]);

        let signage_children: Vec<DbId> = groups[0].children.iter().map(|c| c.id()).collect();
        assert_eq!(signage_children, vec![2, 3]);
        assert!(groups[2].children.is_empty());
    }

    #[test]
    fn group_by_parent_treats_dangling_parent_as_top_level() {
        // Category 9 points at a parent that is not in the set at all, and
        // category 8 points at a child (depth-2 violation). Neither may be
        // dropped or looped over.
        let categories = vec![
            cat(1, "signage", None, 0),
            cat(2, "illuminated-letters", Some(1), 0),
            cat(8, "depth-two", Some(2), 0),
            cat(9, "orphan", Some(404), 1),
        ];
        let groups = group_by_parent(&categories);

        let parent_ids: Vec<DbId> = groups.iter().map(|g| g.parent.id()).collect();
        assert_eq!(parent_ids, vec![1, 8, 9]);
    }

    #[test]
    fn resolve_filter_expands_top_level_to_children() {
        let categories = fixture();
        let ids = resolve_filter_category_ids(&categories, "1");
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn resolve_filter_by_slug() {
        let categories = fixture();
        let ids = resolve_filter_category_ids(&categories, "printing");
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn resolve_filter_childless_top_level_is_just_itself() {
        let categories = fixture();
        assert_eq!(resolve_filter_category_ids(&categories, "logo-design"), vec![6]);
    }

    #[test]
    fn resolve_filter_child_is_just_itself() {
        let categories = fixture();
        assert_eq!(resolve_filter_category_ids(&categories, "vinyl-wrap"), vec![5]);
        assert_eq!(resolve_filter_category_ids(&categories, "3"), vec![3]);
    }

    #[test]
    fn resolve_filter_unknown_reference_is_empty() {
        let categories = fixture();
        assert!(resolve_filter_category_ids(&categories, "no-such-slug").is_empty());
        assert!(resolve_filter_category_ids(&categories, "999").is_empty());
    }

    #[test]
    fn related_for_child_lists_siblings_then_padding() {
        let categories = fixture();
        // Current: illuminated-letters (child of signage). Sibling:
        // flat-letters. Padding: top-level categories except signage.
        let related = related_categories(&categories, 2, DEFAULT_SIBLING_LIMIT, DEFAULT_TOTAL_LIMIT);
        let ids: Vec<DbId> = related.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![3, 4, 6]);
    }

    #[test]
    fn related_for_top_level_uses_its_children_as_siblings() {
        let categories = fixture();
        let related = related_categories(&categories, 1, DEFAULT_SIBLING_LIMIT, DEFAULT_TOTAL_LIMIT);
        let ids: Vec<DbId> = related.iter().map(|c| c.id()).collect();
        // Children of signage first, then other top-level categories.
        assert_eq!(ids, vec![2, 3, 4, 6]);
    }

    #[test]
    fn related_never_includes_current_and_never_exceeds_total_limit() {
        let categories = fixture();
        for current in [1, 2, 3, 4, 5, 6] {
            let related =
                related_categories(&categories, current, DEFAULT_SIBLING_LIMIT, DEFAULT_TOTAL_LIMIT);
            assert!(related.len() <= DEFAULT_TOTAL_LIMIT);
            assert!(related.iter().all(|c| c.id() != current));
        }
    }

    #[test]
    fn related_unknown_current_is_empty() {
        let categories = fixture();
        assert!(related_categories(&categories, 404, 3, 4).is_empty());
    }

    #[test]
    fn related_respects_sibling_limit() {
        let mut categories = fixture();
        categories.push(cat(7, "neon-letters", Some(1), 2));
        categories.push(cat(10, "channel-letters", Some(1), 3));

        // Current is a child of signage with four siblings; only the first
        // two (by display order) may appear before padding.
        let related = related_categories(&categories, 2, 2, 4);
        let ids: Vec<DbId> = related.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![3, 7, 4, 6]);
    }

    #[test]
    fn project_count_rolls_up_children_for_top_level() {
        let categories = fixture();
        let counts = HashMap::from([(1, 2), (2, 5), (3, 1), (5, 7)]);

        let signage = &categories[0];
        assert_eq!(project_count_for_category(signage, &categories, &counts), 8);

        // Child category: own count only.
        let illuminated = &categories[1];
        assert_eq!(project_count_for_category(illuminated, &categories, &counts), 5);

        // No entries anywhere: zero.
        let logo = &categories[5];
        assert_eq!(project_count_for_category(logo, &categories, &counts), 0);
    }
}
