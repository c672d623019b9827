//! Vote recording and tally rules
//!
//! Exercises selection deduplication and tally ranking through the public
//! API without a database.

use std::collections::HashMap;
use chrono::Utc;
use RunwayVote::models::designer::Designer;
use RunwayVote::services::voting::{dedup_selection, rank_tally};

fn designer(id: i64, name: &str) -> Designer {
    Designer {
        id,
        name: name.to_string(),
        category: "Evening Wear".to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn duplicate_selections_collapse_to_one() {
    // Submitting [2, 2, 3] must produce exactly one vote per designer
    assert_eq!(dedup_selection(&[2, 2, 3]), vec![2, 3]);
}

#[test]
fn selection_order_is_preserved() {
    assert_eq!(dedup_selection(&[9, 4, 9, 1, 4]), vec![9, 4, 1]);
}

#[test]
fn tally_lists_zero_vote_designers_last() {
    let assigned = vec![designer(1, "Ella Mia"), designer(2, "Obum Ife")];
    let counts = HashMap::from([(1, 3)]);

    let tallies = rank_tally(&assigned, &counts);
    assert_eq!(tallies.len(), 2);
    assert_eq!((tallies[0].designer_id, tallies[0].vote_count), (1, 3));
    assert_eq!((tallies[1].designer_id, tallies[1].vote_count), (2, 0));
}

#[test]
fn tally_orders_by_descending_count() {
    let assigned = vec![designer(1, "A"), designer(2, "B"), designer(3, "C")];
    let counts = HashMap::from([(1, 1), (2, 5), (3, 2)]);

    let ids: Vec<i64> = rank_tally(&assigned, &counts)
        .into_iter()
        .map(|t| t.designer_id)
        .collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn tally_ties_keep_assignment_order() {
    let assigned = vec![designer(5, "First"), designer(2, "Second"), designer(8, "Third")];
    let counts = HashMap::from([(5, 1), (2, 1), (8, 1)]);

    let ids: Vec<i64> = rank_tally(&assigned, &counts)
        .into_iter()
        .map(|t| t.designer_id)
        .collect();
    assert_eq!(ids, vec![5, 2, 8]);
}

#[test]
fn tally_counts_ignore_unassigned_designers() {
    // A vote count for a designer no longer assigned must not invent a row
    let assigned = vec![designer(1, "Only Assigned")];
    let counts = HashMap::from([(1, 2), (99, 7)]);

    let tallies = rank_tally(&assigned, &counts);
    assert_eq!(tallies.len(), 1);
    assert_eq!(tallies[0].designer_id, 1);
}
