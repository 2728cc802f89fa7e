//! Integration tests for the lexistream pipeline
//!
//! Runs the full lexicon -> builder -> evaluator chain over fixture files.

use clap::Parser;
use lexistream_cli::{load_lexicon, run, Cli, RunConfig};
use lexistream_core::CorpusReader;
use lexistream_telemetry::CSV_HEADER;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LEXICON: &str = "\
good\t3
bad\t-3
happy\t2
sad\t-2
love\t3
hate\t-3
great\t3
awful\t-3
";

const CORPUS: &str = "\
Good morning, what a happy day
I hate this awful weather
love the great food here
such a sad and bad ending
happy to see you, good friend
awful service, I hate waiting
great game, love it
bad news makes me sad today
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lexicon.tsv"), LEXICON).unwrap();
        fs::write(dir.path().join("corpus.txt"), CORPUS.repeat(4)).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cli(&self, extra: &[&str]) -> Cli {
        let corpus = self.path("corpus.txt");
        let lexicon = self.path("lexicon.tsv");
        let mut args = vec![
            "lexistream".to_string(),
            "--corpus".to_string(),
            corpus.display().to_string(),
            "--lexicon".to_string(),
            lexicon.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(args).unwrap()
    }
}

fn execute(cli: &Cli) -> (lexistream_cli::RunSummary, String) {
    let config = RunConfig::load(cli.config.as_deref(), cli).unwrap();
    let lexicon = load_lexicon(cli, &config).unwrap();
    let corpus = CorpusReader::open(&cli.corpus).unwrap();
    let mut out = Vec::new();
    let summary = run(&config, corpus, &lexicon, &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_csv_reports_to_output() {
    let fixture = Fixture::new();
    let cli = fixture.cli(&["--report-interval", "5", "--context-size", "64"]);
    let (summary, output) = execute(&cli);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    // periodic reports plus the final one
    assert_eq!(lines.len() as u64, 1 + summary.evaluation.stats.reports);
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), CSV_HEADER.split(',').count());
    }

    assert_eq!(summary.builder.lines, 32);
    assert!(summary.evaluation.stats.trained > 0);
    assert!(summary.evaluation.stats.tested > 0);
    assert!(summary.context_len <= 64);
    assert_eq!(summary.fingerprint.len(), 64);
}

#[test]
fn test_json_reports_with_hashing_and_ppmi() {
    let fixture = Fixture::new();
    let (summary, output) = execute(&fixture.cli(&[
        "--format",
        "json",
        "--sketching",
        "hashing",
        "--weighting",
        "ppmi",
        "--context-size",
        "32",
        "--report-interval",
        "10",
    ]));

    assert_eq!(summary.context_len, 32);
    for line in output.lines() {
        assert!(line.starts_with('{'));
        assert!(line.contains("\"held_out\""));
    }
}

#[test]
fn test_identical_runs_are_deterministic() {
    let fixture = Fixture::new();
    let cli = fixture.cli(&["--vocab-size", "10", "--context-size", "8", "--window", "2"]);

    let (first, _) = execute(&cli);
    let (second, _) = execute(&cli);

    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.evaluation.counts, second.evaluation.counts);
    assert_eq!(first.builder, second.builder);
}

#[test]
fn test_config_file_with_cli_override() {
    let fixture = Fixture::new();
    let config = fixture.write(
        "run.yaml",
        "context_size: 16\nwindow_size: 1\nreport_interval: 3\n\
         projection:\n  percent: 50\n  seed: 5\n",
    );
    let cli = fixture.cli(&["-c", &config.display().to_string(), "--context-size", "20"]);

    let loaded = RunConfig::load(cli.config.as_deref(), &cli).unwrap();
    assert_eq!(loaded.matrix.context_size, 20);
    assert_eq!(loaded.matrix.window_size, 1);
    assert_eq!(loaded.report_interval, 3);

    let (summary, _) = execute(&cli);
    assert!(summary.context_len <= 20);
}

#[test]
fn test_two_lexicon_sources() {
    let fixture = Fixture::new();
    let test = fixture.write("held_out.tsv", "great\t3\nawful\t-3\n");
    let train = fixture.write("train.tsv", "good\t3\nbad\t-3\nlove\t3\nhate\t-3\n");
    let cli = Cli::try_parse_from([
        "lexistream".to_string(),
        "--corpus".to_string(),
        fixture.path("corpus.txt").display().to_string(),
        "--lexicon".to_string(),
        train.display().to_string(),
        "--test-lexicon".to_string(),
        test.display().to_string(),
    ])
    .unwrap();

    let (summary, _) = execute(&cli);
    let counts = summary.evaluation.counts;
    assert_eq!(counts.total(), summary.evaluation.stats.tested);
    assert!(summary.evaluation.stats.tested > 0);
}

#[test]
fn test_malformed_lexicon_is_fatal_unless_lenient() {
    let fixture = Fixture::new();
    fixture.write("lexicon.tsv", "good\t3\nbroken line\nbad\t-3\n");

    let cli = fixture.cli(&[]);
    let config = RunConfig::load(None, &cli).unwrap();
    let err = load_lexicon(&cli, &config).unwrap_err();
    assert!(err.to_string().contains("line 2"));

    let cli = fixture.cli(&["--lenient-lexicon"]);
    let config = RunConfig::load(None, &cli).unwrap();
    let lexicon = load_lexicon(&cli, &config).unwrap();
    assert_eq!(lexicon.len(), 2);
}

#[test]
fn test_invalid_configuration_is_rejected_before_processing() {
    let fixture = Fixture::new();
    let cli = fixture.cli(&["--context-size", "0"]);
    assert!(RunConfig::load(None, &cli).is_err());

    let cli = fixture.cli(&["--report-interval", "0"]);
    assert!(RunConfig::load(None, &cli).is_err());
}

#[test]
fn test_missing_corpus_is_an_io_error() {
    let fixture = Fixture::new();
    let missing: &Path = &fixture.path("nope.txt");
    assert!(CorpusReader::open(missing).is_err());
}
