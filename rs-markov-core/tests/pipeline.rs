use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::{MarkovError, MarkovTable, Order, Request, WindowPolicy, Workspace};
use tempfile::TempDir;

const CORPUS: &str = "the cat sat on the mat and the cat ran to the mat and the cat sat on the hat";

fn timestamp() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2025, 1, 31).unwrap().and_hms_opt(23, 59, 58).unwrap()
}

fn workspace() -> (TempDir, Workspace) {
	let root = tempfile::tempdir().unwrap();
	let ws = Workspace::under(root.path());
	fs::create_dir(&ws.source_dir).unwrap();
	fs::create_dir(&ws.table_dir).unwrap();
	fs::create_dir(&ws.output_dir).unwrap();
	fs::write(ws.source_path("cats.txt"), CORPUS).unwrap();
	(root, ws)
}

fn request(order: usize, n_words: i64) -> Request {
	Request {
		file: "cats.txt".to_owned(),
		order: Order::new(order).unwrap(),
		n_words,
		window: WindowPolicy::Pair,
	}
}

#[test]
fn builds_table_then_writes_output() {
	let (_root, ws) = workspace();
	let mut rng = StdRng::seed_from_u64(5);

	let report = ws.run(&request(2, 0), &mut rng, timestamp()).unwrap();

	assert!(!report.table_cached);
	assert_eq!(report.table_path, ws.table_dir.join("2_cats.txt"));
	assert_eq!(report.output_path, ws.output_dir.join("31_01_2025_23_59_58_Order_2_cats.txt"));
	assert_eq!(fs::read_to_string(&report.output_path).unwrap(), report.seed);

	let table = MarkovTable::load(&report.table_path).unwrap();
	let tokens = CORPUS.split(' ').count();
	assert_eq!(table.successor_count(), tokens - 2 - 1);
	assert_eq!(table.keys().next(), Some("the cat"));
	assert_eq!(table.get("the cat").unwrap(), &["sat", "ran", "sat"]);
}

#[test]
fn reuses_existing_table_without_checking_it() {
	let (_root, ws) = workspace();
	let stale = r#"{"foo bar":["baz"],"bar baz":["foo"],"baz foo":["bar"]}"#;
	fs::write(ws.table_dir.join("2_cats.txt"), stale).unwrap();

	let mut rng = StdRng::seed_from_u64(1);
	let report = ws.run(&request(2, 6), &mut rng, timestamp()).unwrap();

	assert!(report.table_cached);
	assert_eq!(report.chain.len(), 7);
	let text = fs::read_to_string(&report.output_path).unwrap();
	assert!(text.split(' ').all(|w| ["foo", "bar", "baz"].contains(&w)));
	assert_eq!(fs::read_to_string(ws.table_dir.join("2_cats.txt")).unwrap(), stale);
}

#[test]
fn missing_source_stops_before_writing_anything() {
	let (_root, ws) = workspace();
	let mut req = request(2, 3);
	req.file = "absent.txt".to_owned();

	let err = ws.run(&req, &mut StdRng::seed_from_u64(0), timestamp()).unwrap_err();

	assert!(matches!(err, MarkovError::SourceNotFound(p) if p == ws.source_path("absent.txt")));
	assert_eq!(fs::read_dir(&ws.table_dir).unwrap().count(), 0);
	assert_eq!(fs::read_dir(&ws.output_dir).unwrap().count(), 0);
}

#[test]
fn missing_directory_is_reported() {
	let (_root, ws) = workspace();
	fs::remove_dir(&ws.output_dir).unwrap();

	let err = ws.run(&request(2, 3), &mut StdRng::seed_from_u64(0), timestamp()).unwrap_err();
	assert!(matches!(err, MarkovError::MissingDirectory { role: "output", .. }));
}

#[test]
fn pair_window_on_order_one_table_fails_without_output() {
	let (_root, ws) = workspace();

	let err = ws.run(&request(1, 3), &mut StdRng::seed_from_u64(0), timestamp()).unwrap_err();

	assert!(matches!(err, MarkovError::InvalidSeed { expected: 2, .. }));
	assert!(ws.table_dir.join("1_cats.txt").is_file());
	assert_eq!(fs::read_dir(&ws.output_dir).unwrap().count(), 0);
}

#[test]
fn order_window_generates_from_order_three_table() {
	let (_root, ws) = workspace();
	let req = Request { window: WindowPolicy::Order, ..request(3, 0) };

	let report = ws.run(&req, &mut StdRng::seed_from_u64(4), timestamp()).unwrap();

	assert_eq!(report.seed.split(' ').count(), 3);
	assert_eq!(report.output_path, ws.output_dir.join("31_01_2025_23_59_58_Order_3_cats.txt"));
}

#[test]
fn same_seed_same_output() {
	let (_root, ws) = workspace();
	fs::write(ws.source_path("loop.txt"), "a b c a b d a b c a b d a b c a b d a b").unwrap();
	let req = Request { file: "loop.txt".to_owned(), ..request(2, 25) };

	let first = ws.run(&req, &mut StdRng::seed_from_u64(77), timestamp()).unwrap();
	let second = ws.run(&req, &mut StdRng::seed_from_u64(77), timestamp()).unwrap();

	assert!(second.table_cached);
	assert_eq!(first.chain, second.chain);
	assert_eq!(first.chain.len(), 26);
}
