use {
    crate::{
        config::SearchConfig,
        distance::DistanceTable,
        error::*,
        group::{group, Group},
        marker::{generate, Marker},
    },
    itertools::Itertools,
    rayon::prelude::*,
    std::ops::Range,
    tracing::{debug, info},
};

/// Groups picked from the top half followed by those from the bottom half.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub top: Vec<usize>,
    pub bottom: Vec<usize>,
}

impl Solution {
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.top.iter().chain(&self.bottom).copied()
    }

    pub fn representatives(&self, groups: &[Group]) -> Vec<Marker> {
        self.indices()
            .filter_map(|i| groups.get(i))
            .map(|g| g.representative().clone())
            .collect()
    }
}

/// Top half is `0..n / 2`, bottom half is `n / 2..n`.
pub fn split_halves(group_count: usize) -> (Range<usize>, Range<usize>) {
    let mid = group_count / 2;
    (0..mid, mid..group_count)
}

fn pairwise_separated(subset: &[usize], table: &DistanceTable, threshold: u32) -> bool {
    subset
        .iter()
        .tuple_combinations()
        .all(|(&a, &b)| table.separated(a, b, threshold))
}

fn cross_separated(top: &[usize], bottom: &[usize], table: &DistanceTable, threshold: u32) -> bool {
    top.iter()
        .cartesian_product(bottom)
        .all(|(&a, &b)| table.separated(a, b, threshold))
}

/// Every `required_count`-sized subset of `half` whose members are pairwise
/// separated, in lexicographic order.
pub fn valid_subsets(
    half: Range<usize>,
    table: &DistanceTable,
    required_count: usize,
    threshold: u32,
) -> Vec<Vec<usize>> {
    let mut subsets: Vec<Vec<usize>> = half
        .combinations(required_count)
        .par_bridge()
        .filter(|subset| pairwise_separated(subset, table, threshold))
        .collect();

    subsets.sort_unstable();
    subsets
}

/// Valid subsets of each half, kept apart until they are combined.
#[derive(Clone, Debug, Default)]
pub struct Halves {
    pub top: Vec<Vec<usize>>,
    pub bottom: Vec<Vec<usize>>,
}

impl Halves {
    pub fn find(table: &DistanceTable, required_count: usize, threshold: u32) -> Self {
        if required_count == 0 {
            return Self::default();
        }

        let (top, bottom) = split_halves(table.group_count());
        Self {
            top: valid_subsets(top, table, required_count, threshold),
            bottom: valid_subsets(bottom, table, required_count, threshold),
        }
    }

    /// The first (top, bottom) pair, in order, with every cross pair separated.
    pub fn combine(&self, table: &DistanceTable, threshold: u32) -> Option<Solution> {
        self.top.par_iter().find_map_first(|top| {
            self.bottom
                .iter()
                .find(|bottom| cross_separated(top, bottom, table, threshold))
                .map(|bottom| Solution {
                    top: top.clone(),
                    bottom: bottom.clone(),
                })
        })
    }
}

/// Meet-in-the-middle search over `groups`. A valid set of groups that does
/// not split evenly across the two halves is never found.
///
/// `table` must have been built from `groups`.
pub fn search(
    groups: &[Group],
    table: &DistanceTable,
    required_count: usize,
    threshold: u32,
) -> Result<Option<Solution>> {
    if groups.len() != table.group_count() {
        return Err(Error::InvalidConfig(format!(
            "distance table covers {} groups, but {} were given",
            table.group_count(),
            groups.len()
        )));
    }

    let halves = Halves::find(table, required_count, threshold);
    info!("found {} top half sets", halves.top.len());
    info!("found {} bottom half sets", halves.bottom.len());

    let solution = halves.combine(table, threshold);
    if let Some(solution) = &solution {
        debug!(top = ?solution.top, bottom = ?solution.bottom, "combined halves");
    }
    Ok(solution)
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub markers: usize,
    pub groups: Vec<Group>,
    pub solution: Option<Solution>,
}

impl SearchReport {
    /// Representatives of the chosen groups, or [`Error::NoSolution`].
    pub fn solution_markers(&self, config: &SearchConfig) -> Result<Vec<Marker>> {
        self.solution
            .as_ref()
            .map(|s| s.representatives(&self.groups))
            .ok_or(Error::NoSolution {
                required: config.required_count,
                threshold: config.threshold,
            })
    }
}

pub fn run(config: &SearchConfig) -> Result<SearchReport> {
    config.validate()?;

    let markers = generate(&config.fixed_cells);
    info!("generated {} markers", markers.len());
    let marker_count = markers.len();

    let groups = group(markers);
    info!("found {} groups", groups.len());

    let table = DistanceTable::build(&groups, config.flip_depth);
    for (distance, count) in table.histogram() {
        debug!(distance, count, "group pairs");
    }

    let solution = search(&groups, &table, config.required_count, config.threshold)?;

    Ok(SearchReport {
        markers: marker_count,
        groups,
        solution,
    })
}

#[test]
fn test_reduced_run() {
    let config = SearchConfig::default();
    let report = run(&config).unwrap();

    assert_eq!(report.markers, 64);
    assert_eq!(report.groups.len(), 44);

    let solution = report.solution.clone().unwrap();
    assert_eq!(solution.top, [0, 3, 5, 8, 9, 11, 13, 15, 16, 19, 20]);
    assert_eq!(solution.bottom, [23, 24, 27, 28, 30, 33, 34, 37, 40, 41, 43]);

    let markers = report.solution_markers(&config).unwrap();
    assert_eq!(markers.len(), 22);
    assert_eq!(markers[0].to_string(), "X_X\n_X_\nXXX");
    assert_eq!(markers[21].to_string(), "___\n___\n___");
}

#[test]
fn test_solution_is_pairwise_separated() {
    let groups = group(generate(&crate::marker::REDUCED));
    let table = DistanceTable::build(&groups, 2);
    let halves = Halves::find(&table, 11, 2);
    assert_eq!(halves.top.len(), 2);
    assert_eq!(halves.bottom.len(), 2);

    let solution = search(&groups, &table, 11, 2).unwrap().unwrap();

    let ixs: Vec<_> = solution.indices().collect();
    assert_eq!(ixs.len(), 22);
    for (a, b) in ixs.iter().tuple_combinations() {
        assert!(table.get(*a, *b).unwrap() >= 2);
    }
}

#[test]
fn test_too_few_groups() {
    let table = DistanceTable::from_fn(6, |_, _| 5);

    // three groups per half but four wanted
    let groups: Vec<_> = (0..6)
        .map(|i| Group::from_members(vec![Marker::from_code(i)]).unwrap())
        .collect();
    assert!(search(&groups, &table, 4, 2).unwrap().is_none());
    assert!(Halves::find(&table, 4, 2).top.is_empty());

    let solution = search(&groups, &table, 3, 2).unwrap().unwrap();
    assert_eq!(solution.top, [0, 1, 2]);
    assert_eq!(solution.bottom, [3, 4, 5]);
}

#[test]
fn test_table_must_match_groups() {
    let table = DistanceTable::from_fn(6, |_, _| 5);
    let groups: Vec<_> = (0..4)
        .map(|i| Group::from_members(vec![Marker::from_code(i)]).unwrap())
        .collect();

    assert!(matches!(
        search(&groups, &table, 2, 2),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        search(&groups[..0], &table, 2, 2),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_split_misses_uneven_solutions() {
    // {0, 1} is a valid pair, but every top group clashes with every bottom one
    let table = DistanceTable::from_fn(6, |i, j| if i < 3 && j >= 3 { 1 } else { 2 });
    let halves = Halves::find(&table, 1, 2);
    assert_eq!(halves.top, [vec![0], vec![1], vec![2]]);
    assert_eq!(halves.bottom, [vec![3], vec![4], vec![5]]);
    assert!(halves.combine(&table, 2).is_none());

    let table = DistanceTable::from_fn(4, |i, j| if (i, j) == (0, 1) { 1 } else { 2 });
    let halves = Halves::find(&table, 2, 2);
    assert!(halves.top.is_empty());
    assert_eq!(halves.bottom, [vec![2, 3]]);
}

#[test]
fn test_first_compatible_pair_wins() {
    // 0 clashes with 4, so every bottom set holding 4 is skipped for top [0, 1]
    let table = DistanceTable::from_fn(8, |i, j| if (i, j) == (0, 4) { 1 } else { 2 });
    let halves = Halves::find(&table, 2, 2);
    assert_eq!(halves.top.len(), 6);
    assert_eq!(halves.bottom.len(), 6);

    let solution = halves.combine(&table, 2).unwrap();
    assert_eq!(solution.top, [0, 1]);
    assert_eq!(solution.bottom, [5, 6]);
}

#[test]
fn test_no_solution_reported() {
    let config = SearchConfig {
        required_count: 12,
        ..Default::default()
    };
    let report = run(&config).unwrap();
    assert!(report.solution.is_none());
    assert!(matches!(
        report.solution_markers(&config),
        Err(Error::NoSolution {
            required: 12,
            threshold: 2
        })
    ));
}
