use crate::marker::Marker;

/// Markers that are rotations of one another. The first member is the group's
/// representative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    members: Vec<Marker>,
}

impl Group {
    fn new(first: Marker) -> Self {
        Self {
            members: vec![first],
        }
    }

    /// Only for building groups by hand; the members are not checked to be
    /// rotations of each other.
    pub fn from_members(members: Vec<Marker>) -> Option<Self> {
        if members.is_empty() {
            None
        } else {
            Some(Self { members })
        }
    }

    pub fn representative(&self) -> &Marker {
        &self.members[0]
    }

    pub fn members(&self) -> &[Marker] {
        &self.members
    }

    pub fn contains(&self, marker: &Marker) -> bool {
        self.members.contains(marker)
    }
}

/// Partitions `markers` by rotation. A marker joins the first group whose
/// representative is one of its rotations, so the result depends on the input
/// order.
pub fn group(markers: impl IntoIterator<Item = Marker>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for marker in markers {
        let rotations = marker.rotations();

        match groups
            .iter_mut()
            .find(|g| rotations.contains(g.representative()))
        {
            Some(group) => group.members.push(marker),
            None => groups.push(Group::new(marker)),
        }
    }

    groups
}

#[test]
fn test_full_space_has_140_classes() {
    // Burnside: (512 + 2^3 + 2^5 + 2^3) / 4
    let groups = group(crate::marker::all_markers());
    assert_eq!(groups.len(), 140);
}

#[test]
fn test_partition() {
    use std::collections::{HashMap, HashSet};

    let markers = crate::marker::all_markers();
    let groups = group(markers.clone());

    let total: usize = groups.iter().map(|g| g.members().len()).sum();
    assert_eq!(total, markers.len());

    for m in &markers {
        let owners: Vec<_> = groups.iter().filter(|g| g.contains(m)).collect();
        assert_eq!(owners.len(), 1);
        assert!(m.rotations().contains(owners[0].representative()));
    }

    // agrees with the order-independent key
    let mut by_canon: HashMap<_, HashSet<_>> = HashMap::new();
    for (i, g) in groups.iter().enumerate() {
        for m in g.members() {
            by_canon.entry(m.canonical()).or_default().insert(i);
        }
    }
    assert_eq!(by_canon.len(), groups.len());
    assert!(by_canon.values().all(|ixs| ixs.len() == 1));
}

#[test]
fn test_reduced_space_groups() {
    let groups = group(crate::marker::generate(&crate::marker::REDUCED));
    assert_eq!(groups.len(), 44);
    assert_eq!(groups[0].representative().to_string(), "X_X\n_X_\nXXX");
}

#[test]
fn test_empty_and_full_are_separate() {
    let empty = Marker::from_code(0);
    let full = Marker::from_code(0b111_111_111);
    let groups = group([empty.clone(), full.clone()]);
    assert_eq!(groups.len(), 2);
    assert!(groups[0].contains(&empty));
    assert!(groups[1].contains(&full));
}

#[test]
fn test_first_match_wins() {
    let m = Marker::from_code(0b100_000_000);
    let groups = group([m.clone(), m.rotate(), m.rotate().rotate()]);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].representative(), &m);
    assert_eq!(groups[0].members().len(), 3);
}
