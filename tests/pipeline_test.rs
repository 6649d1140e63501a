use apriori_rules::config::PipelineConfig;
use apriori_rules::pipeline;
use apriori_rules::{MiningConfig, MiningError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BASKET_CSV: &str = "\
items
\"A,B\"
\"A,B,C\"
A
\"B,C\"
\"A,C\"
";

fn config_in(dir: &TempDir, input: &str) -> PipelineConfig {
    let root = dir.path();
    PipelineConfig {
        input: root.join("processed").join(input),
        itemsets_output: root.join("results").join("frequent_itemsets.csv"),
        rules_output: root.join("results").join("association_rules.csv"),
        mining: MiningConfig::new(0.4, 0.3, 1.1),
        ..PipelineConfig::default()
    }
}

fn write_input(config: &PipelineConfig, contents: &str) {
    fs::create_dir_all(config.input.parent().unwrap()).unwrap();
    fs::write(&config.input, contents).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn basket_run_writes_both_tables() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "cleaned_transactions.csv");
    write_input(&config, BASKET_CSV);

    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.transactions, 5);
    assert_eq!(summary.skipped_rows, 0);
    assert_eq!(summary.itemsets_per_level, vec![3, 3]);
    assert_eq!(summary.itemsets, 6);
    assert_eq!(summary.rules, 2);
    assert!(summary.empty_reason().is_none());

    let itemsets = read_lines(&config.itemsets_output);
    assert_eq!(
        itemsets,
        vec![
            "itemset,support",
            "A,0.8",
            "B,0.6",
            "C,0.6",
            "\"A, B\",0.4",
            "\"A, C\",0.4",
            "\"B, C\",0.4",
        ]
    );

    let rules = read_lines(&config.rules_output);
    assert_eq!(
        rules,
        vec![
            "antecedent,consequent,support,confidence,lift",
            "B,C,0.4,0.6667,1.1111",
            "C,B,0.4,0.6667,1.1111",
        ]
    );
}

#[test]
fn missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "absent.csv");

    let err = pipeline::run(&config).unwrap_err();

    assert!(matches!(err, MiningError::MissingInput { .. }));
    assert!(!config.itemsets_output.exists());
    assert!(!config.rules_output.exists());
}

#[test]
fn header_only_input_aborts_before_mining() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "empty.csv");
    write_input(&config, "items\n\"\"\n");

    let err = pipeline::run(&config).unwrap_err();

    assert!(matches!(err, MiningError::EmptyTransactionSet));
    assert!(!config.itemsets_output.exists());
    assert!(!config.rules_output.exists());
}

#[test]
fn malformed_rows_are_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "noisy.csv");
    write_input(&config, &format!("{BASKET_CSV}\" , \"\n\"\"\n"));

    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.transactions, 5);
    assert_eq!(summary.skipped_rows, 2);
    assert_eq!(summary.rules, 2);
}

#[test]
fn high_threshold_reports_reason_and_writes_headers() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir, "cleaned_transactions.csv");
    config.mining.min_support = 0.95;
    write_input(&config, BASKET_CSV);

    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.itemsets, 0);
    assert!(summary.empty_reason().unwrap().contains("min_support"));
    assert_eq!(read_lines(&config.itemsets_output), vec!["itemset,support"]);
    assert_eq!(
        read_lines(&config.rules_output),
        vec!["antecedent,consequent,support,confidence,lift"]
    );
}

#[test]
fn failed_rules_write_leaves_no_itemsets_table() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "cleaned_transactions.csv");
    write_input(&config, BASKET_CSV);
    // A directory where the rules table should go makes the final rename fail.
    fs::create_dir_all(&config.rules_output).unwrap();

    let err = pipeline::run(&config).unwrap_err();

    assert!(matches!(err, MiningError::Io(_)));
    assert!(!config.itemsets_output.exists());
    assert!(config.rules_output.is_dir());
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir, "cleaned_transactions.csv");
    config.mining.min_confidence = 1.5;
    write_input(&config, BASKET_CSV);

    let err = pipeline::run(&config).unwrap_err();

    assert!(matches!(err, MiningError::InvalidConfig { .. }));
    assert!(!config.itemsets_output.exists());
}

#[test]
fn custom_delimiters_round_through() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir, "piped.csv");
    config.item_delimiter = "|".to_string();
    config.output_delimiter = " + ".to_string();
    write_input(&config, "items\nA|B\nA|B|C\nA\nB|C\nA|C\n");

    let summary = pipeline::run(&config).unwrap();

    assert_eq!(summary.itemsets, 6);
    let itemsets = read_lines(&config.itemsets_output);
    assert!(itemsets.contains(&"A + B,0.4".to_string()));
}
