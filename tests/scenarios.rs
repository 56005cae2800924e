use ranked_stv::formats::{read_election, ReaderOptions};
use ranked_stv::tabulator::{RoundOutcome, RoundTally};
use ranked_stv::{
    Ballot, Election, RosterOrderTieBreak, ScriptedTieBreak, TabulationError, TabulationOptions,
    Tabulator, TieBreakProvider, TieContext,
};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

fn election(candidates: &[&str], rankings: &[&[&str]]) -> Election {
    Election::new(
        candidates.iter().map(|c| c.to_string()).collect(),
        rankings
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// Records every tie it is asked about, answering from a script.
struct RecordingTieBreak {
    answers: ScriptedTieBreak,
    asked: Rc<RefCell<Vec<(TieContext, Vec<String>)>>>,
}

impl TieBreakProvider for RecordingTieBreak {
    fn choose(
        &mut self,
        context: TieContext,
        tied: &[String],
    ) -> ranked_stv::tabulator::TabulationResult<String> {
        self.asked.borrow_mut().push((context, tied.to_vec()));
        self.answers.choose(context, tied)
    }
}

#[test]
fn test_unanimous_first_round_winner() {
    let ballots: Vec<&[&str]> = vec![&["A", "B", "C"]; 5];
    let election = election(&["A", "B", "C"], &ballots);

    let result = Tabulator::new(TabulationOptions::with_seats(1), ScriptedTieBreak::default())
        .tabulate(&election)
        .unwrap();

    assert_eq!(result.quota, 2.5);
    assert_eq!(result.elected, vec!["A"]);
    assert!(result.eliminated.is_empty());
    assert_eq!(result.rounds.len(), 1);
}

#[test]
fn test_quota_reached_exactly() {
    let election = election(&["A", "B", "C"], &[&["A"], &["A"], &["B"], &["C"]]);

    let result = Tabulator::new(TabulationOptions::with_seats(1), ScriptedTieBreak::default())
        .tabulate(&election)
        .unwrap();

    assert_eq!(result.quota, 2.0);
    assert_eq!(result.elected, vec!["A"]);
    assert_eq!(result.rounds.len(), 1);
    match &result.rounds[0].outcome {
        RoundOutcome::Elected {
            vote_sum,
            surplus_fraction,
            ..
        } => {
            assert_eq!(*vote_sum, 2.0);
            assert_eq!(*surplus_fraction, 0.0);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_three_way_loser_tie_then_transfer() {
    let election = election(&["A", "B", "C"], &[&["A", "C"], &["B", "C"], &["C"]]);
    let asked = Rc::new(RefCell::new(Vec::new()));
    let provider = RecordingTieBreak {
        answers: ScriptedTieBreak::new(vec!["B"]),
        asked: Rc::clone(&asked),
    };

    let result = Tabulator::new(TabulationOptions::with_seats(1), provider)
        .tabulate(&election)
        .unwrap();

    assert_eq!(result.quota, 1.5);
    assert_eq!(result.eliminated, vec!["B"]);
    assert_eq!(result.elected, vec!["C"]);

    let asked = asked.borrow();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].0, TieContext::Eliminate);
    assert_eq!(asked[0].1, vec!["A", "B", "C"]);

    let round_two = &result.rounds[1];
    assert_eq!(round_two.round, 2);
    let c = round_two.tally.iter().find(|v| v.candidate == "C").unwrap();
    assert_eq!(c.votes, 2.0);
}

#[test]
fn test_unresolvable_tie_stops_the_count() {
    let election = election(&["A", "B", "C"], &[&["A", "C"], &["B", "C"], &["C"]]);
    let options = TabulationOptions {
        max_tie_break_attempts: 2,
        ..TabulationOptions::with_seats(1)
    };

    let err = Tabulator::new(options, ScriptedTieBreak::new(vec!["D", "nobody"]))
        .tabulate(&election)
        .unwrap_err();

    match err {
        TabulationError::InvalidSelection { selected, tied } => {
            assert_eq!(selected, "nobody");
            assert_eq!(tied, vec!["A", "B", "C"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_elected_count_never_exceeds_seats() {
    let rankings: Vec<&[&str]> = vec![
        &["A", "B", "C"],
        &["A", "C"],
        &["B", "A"],
        &["C", "D", "E"],
        &["D", "E"],
        &["E", "D"],
        &["A"],
        &["B", "C", "D"],
        &["D"],
        &["E", "A", "B"],
        &[],
    ];
    let election = election(&["A", "B", "C", "D", "E"], &rankings);

    for seats in 1..=4 {
        let result = Tabulator::new(
            TabulationOptions::with_seats(seats),
            RosterOrderTieBreak::new(election.candidates.clone()),
        )
        .tabulate(&election);

        match result {
            Ok(result) => {
                assert_eq!(result.elected.len(), seats);
                for candidate in &result.elected {
                    assert!(!result.eliminated.contains(candidate));
                }
                for (idx, record) in result.rounds.iter().enumerate() {
                    assert_eq!(record.round as usize, idx + 1);
                }
            }
            Err(TabulationError::ElectionDeadlock { passed, seats: s, .. }) => {
                assert!(passed < s);
            }
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn test_tally_order_is_stable_for_equal_sums() {
    let ballots: Vec<Ballot> = [["B"], ["A"], ["C"]]
        .iter()
        .map(|r| Ballot::new(r.iter().map(|c| c.to_string()).collect()))
        .collect();
    let tally = RoundTally::count(&ballots);

    let order: Vec<&str> = tally.ordered().iter().map(|t| t.candidate.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);
}

#[test]
fn test_form_export_to_result() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(
        b"Timestamp,Who should join the board? [Ana],Who should join the board? [Ben],Who should join the board? [Cleo],Who should join the board? [Dev]\n\
          2024/05/01 10:00:00,1,2,,\n\
          2024/05/01 10:01:00,1,2,,\n\
          2024/05/01 10:02:00,1,,2,\n\
          2024/05/01 10:03:00,2,1,,\n\
          2024/05/01 10:04:00,,1,,2\n\
          2024/05/01 10:05:00,,,1,\n\
          \n\
          2024/05/01 10:06:00,1,,3,\n",
    )
    .unwrap();

    let election = read_election(file.path(), &ReaderOptions::default()).unwrap();
    assert_eq!(election.candidates, vec!["Ana", "Ben", "Cleo", "Dev"]);
    assert_eq!(election.ballot_count(), 7);
    assert_eq!(election.ballots[6], vec!["Ana"]);

    let result = Tabulator::new(
        TabulationOptions::with_seats(2),
        RosterOrderTieBreak::new(election.candidates.clone()),
    )
    .tabulate(&election)
    .unwrap();

    assert_eq!(result.quota, 2.33);
    assert_eq!(result.elected, vec!["Ana", "Ben"]);
    assert!(result.eliminated.is_empty());
    assert_eq!(result.rounds.len(), 2);
}
