//! End-to-end tests for the five concrete scenarios in spec §8, driven
//! through the real `sync.modgraph` / `*.modgraph` file format and the
//! public [`run_network`] entry point rather than the internal BDD API.

use std::io::Write;
use std::path::PathBuf;

use dd_net_reach::{run_network, RunOptions};
use num_bigint::BigInt;

fn model_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn paths(files: &[&tempfile::NamedTempFile]) -> Vec<PathBuf> {
    files.iter().map(|f| f.path().to_path_buf()).collect()
}

// S1: one automaton, no synchronizing actions, a straight chain a->b->c.
// Both labels rewrite to tau; expected reachable count is 3.
#[test]
fn s1_single_automaton_no_actions() {
    let sync = model_file("");
    let c1 = model_file("states\na\nb\nc\ntransitions\n(a,x,b)\n(b,x,c)\n");

    let report = run_network(sync.path(), &paths(&[&c1]), &RunOptions::default());
    // An empty sync file yields an empty alphabet, which spec §7's
    // EmptyAlphabet policy says is allowed: every label becomes tau.
    let report = report.unwrap();
    assert_eq!(report.reachable_states, BigInt::from(3));
}

// S2: two automata synchronizing on `c`; only the diagonal is reachable.
#[test]
fn s2_two_automata_sync_on_c() {
    let sync = model_file("c\n");
    let c1 = model_file("states\np\nq\ntransitions\n(p,c,q)\n");
    let c2 = model_file("states\nr\ns\ntransitions\n(r,c,s)\n");

    let report = run_network(sync.path(), &paths(&[&c1, &c2]), &RunOptions::default()).unwrap();
    assert_eq!(report.reachable_states, BigInt::from(2));
}

// S3: C2 never mentions `c`, so it is not a participant and is held by
// identity while C1 fires `c` alone. Reachable = {(p,r), (q,r)}.
#[test]
fn s3_sync_not_blocked_when_partner_never_mentions_the_action() {
    let sync = model_file("c\n");
    let c1 = model_file("states\np\nq\ntransitions\n(p,c,q)\n");
    let c2 = model_file("states\nr\ntransitions\n");

    let report = run_network(sync.path(), &paths(&[&c1, &c2]), &RunOptions::default()).unwrap();
    assert_eq!(report.reachable_states, BigInt::from(2));
}

// S3 variant: C2 declares `c` (it knows the label) but has no transition
// firing it from its reachable states, so `c` is globally disabled.
#[test]
fn s3_sync_blocked_when_partner_knows_the_action_but_cannot_fire_it() {
    let sync = model_file("c\n");
    let c1 = model_file("states\np\nq\ntransitions\n(p,c,q)\n");
    let c2 = model_file("states\nr\ndead\ntransitions\n(dead,c,dead)\n");

    let report = run_network(sync.path(), &paths(&[&c1, &c2]), &RunOptions::default()).unwrap();
    assert_eq!(report.reachable_states, BigInt::from(1));
}

// S4: two fully independent automata interleaving on tau reach the full
// cross product: {(a,c), (a,d), (b,c), (b,d)}.
#[test]
fn s4_independent_tau_interleaving() {
    let sync = model_file("");
    let c1 = model_file("states\na\nb\ntransitions\n(a,t1,b)\n");
    let c2 = model_file("states\nc\nd\ntransitions\n(c,t2,d)\n");

    let report = run_network(sync.path(), &paths(&[&c1, &c2]), &RunOptions::default()).unwrap();
    assert_eq!(report.reachable_states, BigInt::from(4));
}

// S5: a three-way sync chain, each automaton with states [0,1,2] and
// transitions (0,a,1),(1,b,2), synchronizing on [a,b]. Only the diagonal
// (0,0,0) -> (1,1,1) -> (2,2,2) is reachable.
#[test]
fn s5_three_way_sync_chain() {
    let sync = model_file("a\nb\n");
    let model = || model_file("states\n0\n1\n2\ntransitions\n(0,a,1)\n(1,b,2)\n");
    let (c1, c2, c3) = (model(), model(), model());

    let report = run_network(sync.path(), &paths(&[&c1, &c2, &c3]), &RunOptions::default()).unwrap();
    assert_eq!(report.reachable_states, BigInt::from(3));
}

#[test]
fn malformed_model_file_surfaces_as_parse_error() {
    let sync = model_file("c\n");
    let c1 = model_file("not a valid model file\n");

    let err = run_network(sync.path(), &paths(&[&c1]), &RunOptions::default()).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn strict_refs_rejects_a_dangling_transition_endpoint() {
    let sync = model_file("c\n");
    let c1 = model_file("states\np\ntransitions\n(p,c,ghost)\n");

    let options = RunOptions {
        strict_refs: true,
        ..RunOptions::default()
    };
    let err = run_network(sync.path(), &paths(&[&c1]), &options).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn node_limit_surfaces_as_bdd_limit_exceeded() {
    let sync = model_file("");
    let c1 = model_file("states\na\nb\nc\ntransitions\n(a,x,b)\n(b,x,c)\n");

    let options = RunOptions {
        node_limit: Some(0),
        ..RunOptions::default()
    };
    let err = run_network(sync.path(), &paths(&[&c1]), &options).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    // Spec §7: reachability errors are reported with the iteration count.
    assert!(err.to_string().contains("iteration"));
}
