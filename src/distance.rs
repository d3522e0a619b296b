use {
    crate::group::Group,
    rayon::prelude::*,
    rustc_hash::FxHashMap,
    std::collections::BTreeMap,
};

/// Returned when no match is found within the flip depth. Not a real distance,
/// just "far enough, stop counting".
pub const FAR_APART: u32 = 1337;

/// The fewest flips (up to `flip_depth`) that turn `a`'s representative into
/// some member of `b`. Only `a`'s first member is tried, so the result can
/// differ from `inter_group_distance(b, a, ..)`.
pub fn inter_group_distance(a: &Group, b: &Group, flip_depth: usize) -> u32 {
    let from = a.representative();

    (1..=flip_depth)
        .find(|&k| from.flipped(k).any(|flipped| b.contains(&flipped)))
        .map_or(FAR_APART, |k| k as u32)
}

/// Cached distances keyed by unordered pair of group indices.
#[derive(Clone, Debug, Default)]
pub struct DistanceTable {
    group_count: usize,
    map: FxHashMap<(usize, usize), u32>,
}

impl DistanceTable {
    /// Each pair `i < j` is measured from `groups[i]` to `groups[j]`.
    pub fn build(groups: &[Group], flip_depth: usize) -> Self {
        Self::from_fn(groups.len(), |i, j| {
            inter_group_distance(&groups[i], &groups[j], flip_depth)
        })
    }

    pub fn from_fn(group_count: usize, f: impl Fn(usize, usize) -> u32 + Sync) -> Self {
        let map = (0..group_count)
            .into_par_iter()
            .flat_map_iter(|i| ((i + 1)..group_count).map(move |j| (i, j)))
            .map(|(i, j)| ((i, j), f(i, j)))
            .collect();

        Self { group_count, map }
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn get(&self, a: usize, b: usize) -> Option<u32> {
        if a == b {
            return (a < self.group_count).then_some(0);
        }
        self.map.get(&(a.min(b), a.max(b))).copied()
    }

    pub fn separated(&self, a: usize, b: usize, threshold: u32) -> bool {
        self.get(a, b).is_some_and(|d| d >= threshold)
    }

    pub fn histogram(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for &d in self.map.values() {
            *counts.entry(d).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
fn reduced_groups() -> Vec<Group> {
    crate::group::group(crate::marker::generate(&crate::marker::REDUCED))
}

#[test]
fn test_distance_values() {
    let groups = reduced_groups();

    for a in &groups {
        for b in &groups {
            if a == b {
                continue;
            }
            let d = inter_group_distance(a, b, 2);
            assert!([1, 2, FAR_APART].contains(&d));

            let literal_one = a
                .representative()
                .one_flipped()
                .any(|f| b.members().contains(&f));
            assert_eq!(d == 1, literal_one);
        }
    }
}

#[test]
fn test_reduced_histogram() {
    let table = DistanceTable::build(&reduced_groups(), 2);
    assert_eq!(table.group_count(), 44);

    let histogram = table.histogram();
    assert_eq!(histogram.get(&1), Some(&110));
    assert_eq!(histogram.get(&2), Some(&247));
    assert_eq!(histogram.get(&FAR_APART), Some(&589));
    assert_eq!(histogram.values().sum::<usize>(), 44 * 43 / 2);
}

#[test]
fn test_lookup_is_unordered() {
    let table = DistanceTable::from_fn(4, |i, j| (10 * i + j) as u32);
    assert_eq!(table.get(1, 3), Some(13));
    assert_eq!(table.get(3, 1), Some(13));
    assert_eq!(table.get(2, 2), Some(0));
    assert_eq!(table.get(0, 4), None);
    assert_eq!(table.get(4, 4), None);
    assert!(table.separated(3, 1, 13));
    assert!(!table.separated(3, 1, 14));
}

#[test]
fn test_empty_and_full_are_far_apart() {
    use crate::marker::Marker;

    let groups = crate::group::group([Marker::from_code(0), Marker::from_code(0b111_111_111)]);
    assert_eq!(inter_group_distance(&groups[0], &groups[1], 2), FAR_APART);
    assert_eq!(inter_group_distance(&groups[1], &groups[0], 2), FAR_APART);

    // nine flips apart
    assert_eq!(inter_group_distance(&groups[0], &groups[1], 9), 9);
}

#[test]
fn test_only_representative_is_flipped() {
    use crate::marker::Marker;

    let a = Group::from_members(vec![Marker::from_code(0), Marker::from_code(0b111_111_110)])
        .unwrap();
    let b = Group::from_members(vec![Marker::from_code(0b111_111_111)]).unwrap();

    assert_eq!(inter_group_distance(&a, &b, 2), FAR_APART);
    assert_eq!(inter_group_distance(&b, &a, 2), 1);
}

#[test]
fn test_depth_zero_never_matches() {
    let groups = reduced_groups();
    assert_eq!(inter_group_distance(&groups[0], &groups[1], 0), FAR_APART);
}
