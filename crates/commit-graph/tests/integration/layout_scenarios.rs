use commit_graph::{compute_layout, CommitInfo, LaneAllocator, LaneEnd, NodeStore};
use pretty_assertions::assert_eq;

fn commit(id: &str, parents: &[&str]) -> CommitInfo {
    CommitInfo::new(id, parents.iter().map(|p| p.to_string()).collect())
}

#[test]
fn test_linear_chain_all_lane_zero() {
    let commits = vec![
        commit("c3", &["c2"]),
        commit("c2", &["c1"]),
        commit("c1", &[]),
    ];
    let table = compute_layout(&commits).unwrap();

    assert_eq!(table.tag("c3"), Some(0));
    assert_eq!(table.tag("c2"), Some(0));
    assert_eq!(table.tag("c1"), Some(0));
    assert_eq!(table.highest_tag(), 0);
}

#[test]
fn test_merge_scenario() {
    // M merges A (primary) and B; both branch off Root.
    let commits = vec![
        commit("m", &["a", "b"]),
        commit("a", &["root"]),
        commit("b", &["root"]),
        commit("root", &[]),
    ];
    let table = compute_layout(&commits).unwrap();

    assert_eq!(table.tag("m"), Some(0));
    assert_eq!(table.tag("a"), Some(0));
    // Lane 0 is still owned by the A chain at B's row.
    assert_eq!(table.tag("b"), Some(1));
    // A's lane closes into Root; B's never owns it.
    assert_eq!(table.tag("root"), Some(0));
    assert_eq!(table.highest_tag(), 1);
}

#[test]
fn test_window_growth_resolves_indeterminate_lane() {
    // First page: C1 is not loaded, C2's lane has no known close point.
    let partial = vec![commit("c2", &["c1"])];
    let store = NodeStore::build(&partial).unwrap();
    let assignment = LaneAllocator::assign(&partial, &store);
    assert_eq!(assignment.lanes[0].end, LaneEnd::Indeterminate);

    let table = compute_layout(&partial).unwrap();
    assert_eq!(table.tag("c2"), Some(0));
    assert_eq!(table.tag("c1"), None);

    // Larger window: a fresh pass, not a patch, resolves both commits onto
    // the same lane with a concrete close point.
    let full = vec![commit("c2", &["c1"]), commit("c1", &[])];
    let store = NodeStore::build(&full).unwrap();
    let assignment = LaneAllocator::assign(&full, &store);
    assert_eq!(assignment.lanes[0].end, LaneEnd::Closed(1));

    let table = compute_layout(&full).unwrap();
    assert_eq!(table.tag("c2"), Some(0));
    assert_eq!(table.tag("c1"), Some(0));
}

#[test]
fn test_linear_chain_stable_across_window_sizes() {
    let ids = ["c5", "c4", "c3", "c2", "c1"];
    let full: Vec<CommitInfo> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let parents = ids.get(i + 1).map(|p| vec![p.to_string()]).unwrap_or_default();
            CommitInfo::new(*id, parents)
        })
        .collect();

    // Every prefix of a strictly linear history keeps everything on lane 0.
    for window_size in 1..=full.len() {
        let table = compute_layout(&full[..window_size]).unwrap();
        for commit in &full[..window_size] {
            assert_eq!(
                table.tag(&commit.id),
                Some(0),
                "window of {window_size}: {} left lane 0",
                commit.id
            );
        }
        assert_eq!(table.highest_tag(), 0);
    }
}

#[test]
fn test_unknown_lookup_is_safe() {
    let table = compute_layout(&[commit("c1", &[])]).unwrap();
    assert_eq!(table.tag("nonexistent-id"), None);

    let empty = compute_layout(&[]).unwrap();
    assert_eq!(empty.tag("nonexistent-id"), None);
    assert!(empty.is_empty());
}

#[test]
fn test_rerun_on_unchanged_window_is_value_equal() {
    let commits = vec![
        commit("m", &["a", "b"]),
        commit("a", &["root"]),
        commit("b", &["root"]),
        commit("root", &[]),
    ];
    let first = compute_layout(&commits).unwrap();
    let second = compute_layout(&commits).unwrap();
    assert_eq!(first, second);
}

/// A busier history: two long-lived branches, a merge, and a chain whose
/// parent is beyond the window edge.
fn busy_history() -> Vec<CommitInfo> {
    vec![
        commit("m2", &["m1", "f2"]),
        commit("f2", &["f1"]),
        commit("m1", &["base", "g1"]),
        commit("f1", &["base"]),
        commit("g1", &["outside-window"]),
        commit("base", &[]),
    ]
}

#[test]
fn test_lane_uniqueness_at_every_row() {
    let commits = busy_history();
    let store = NodeStore::build(&commits).unwrap();
    let assignment = LaneAllocator::assign(&commits, &store);

    for index in 0..commits.len() {
        let mut numbers: Vec<u32> = assignment
            .lanes
            .iter()
            .filter(|lane| lane.is_active_at(index))
            .map(|lane| lane.number)
            .collect();
        numbers.sort_unstable();
        let total = numbers.len();
        numbers.dedup();
        assert_eq!(total, numbers.len(), "duplicate active lane number at row {index}");
    }
}

#[test]
fn test_new_lanes_take_the_smallest_free_number() {
    let commits = busy_history();
    let store = NodeStore::build(&commits).unwrap();
    let assignment = LaneAllocator::assign(&commits, &store);

    // Lanes are recorded in creation order, so the lanes before slot i are
    // exactly the ones that existed when lane i opened.
    for (slot, lane) in assignment.lanes.iter().enumerate() {
        let taken: Vec<u32> = assignment.lanes[..slot]
            .iter()
            .filter(|other| other.is_active_at(lane.open_from))
            .map(|other| other.number)
            .collect();
        let mut expected = 0u32;
        while taken.contains(&expected) {
            expected += 1;
        }
        assert_eq!(
            lane.number, expected,
            "lane opened at row {} skipped free number {expected}",
            lane.open_from
        );
    }
}

#[test]
fn test_every_commit_gets_exactly_one_lane() {
    let commits = busy_history();
    let table = compute_layout(&commits).unwrap();

    assert_eq!(table.len(), commits.len());
    for commit in &commits {
        assert!(table.tag(&commit.id).is_some(), "{} has no lane", commit.id);
    }
}

#[test]
fn test_window_parsed_from_json_fixture() {
    let fixture = r#"[
        {
            "id": "b7e23ec29af22b0b4e41da31e868d57226121c84",
            "short_id": "b7e23ec",
            "message": "Merge branch 'feature'",
            "author": "Dev One",
            "email": "dev1@example.com",
            "timestamp": "2024-03-02T10:15:00Z",
            "parents": [
                "2c624232cdd221771294dfbb310aca000a0df6ac",
                "4e07408562bedb8b60ce05c1decfe3ad16b72230"
            ],
            "branch_refs": ["main"]
        },
        {
            "id": "2c624232cdd221771294dfbb310aca000a0df6ac",
            "short_id": "2c62423",
            "message": "Fix lookup",
            "author": "Dev One",
            "email": "dev1@example.com",
            "timestamp": "2024-03-01T16:40:00Z",
            "parents": ["d4735e3a265e16eee03f59718b9b5d03019c07d8"],
            "branch_refs": []
        },
        {
            "id": "4e07408562bedb8b60ce05c1decfe3ad16b72230",
            "short_id": "4e07408",
            "message": "Add feature",
            "author": "Dev Two",
            "email": "dev2@example.com",
            "timestamp": "2024-03-01T12:00:00Z",
            "parents": ["d4735e3a265e16eee03f59718b9b5d03019c07d8"],
            "branch_refs": ["feature"]
        },
        {
            "id": "d4735e3a265e16eee03f59718b9b5d03019c07d8",
            "short_id": "d4735e3",
            "message": "Initial commit",
            "author": "Dev One",
            "email": "dev1@example.com",
            "timestamp": "2024-02-28T09:00:00Z",
            "parents": [],
            "branch_refs": []
        }
    ]"#;

    let commits: Vec<CommitInfo> = serde_json::from_str(fixture).unwrap();
    let table = compute_layout(&commits).unwrap();

    assert_eq!(table.tag("b7e23ec29af22b0b4e41da31e868d57226121c84"), Some(0));
    assert_eq!(table.tag("2c624232cdd221771294dfbb310aca000a0df6ac"), Some(0));
    assert_eq!(table.tag("4e07408562bedb8b60ce05c1decfe3ad16b72230"), Some(1));
    assert_eq!(table.tag("d4735e3a265e16eee03f59718b9b5d03019c07d8"), Some(0));
    assert_eq!(table.highest_tag(), 1);
}
