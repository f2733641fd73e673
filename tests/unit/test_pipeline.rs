//! Integration tests for batch data preparation

#[path = "../common/mod.rs"]
mod common;

use common::pieces;
use polyner::core::kb::LinkedEntity;
use polyner::models::TokenizerRegistry;
use polyner::pipeline::{
    load_jsonl, save_jsonl, AlignedExample, AlignmentEngine, AttentionInput, BatchConfig, EngineConfig,
    EntityRecord, TranslationExample,
};
use std::io::Write;

fn example(id: &str, target: &str, spans: Vec<usize>) -> TranslationExample {
    let source = pieces("play the beat +les");
    let target = pieces(target);
    // two identical heads: every source piece attends to the same-index target piece
    let head: Vec<Vec<f32>> = (0..target.len())
        .map(|t| (0..source.len()).map(|s| if s == t { 1.0 } else { 0.0 }).collect())
        .collect();
    TranslationExample {
        id: id.to_string(),
        source_tokens: source,
        target_tokens: target,
        attention: AttentionInput::Heads(vec![head.clone(), head]),
        source_spans: spans,
    }
}

#[test]
fn test_batch_from_jsonl_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("translated.jsonl");
    let output = dir.path().join("out").join("aligned.jsonl");

    save_jsonl(
        &input,
        &[
            example("literal", "spiele die beat +les", vec![2, 2]),
            example("attention", "spiele die kaef +er", vec![1, 2]),
            example("corrupt", "spiele die beat +les", vec![1, 2, 3]),
        ],
    )
    .unwrap();

    let family = TokenizerRegistry::new().resolve("m2m100").unwrap().convention_tokenizer();
    let config = EngineConfig::new().with_batch(BatchConfig::new(2).with_parallel());
    let engine = AlignmentEngine::new(family, config).unwrap();

    let examples: Vec<TranslationExample> = load_jsonl(&input).unwrap();
    let report = engine.align_batch(&examples);

    assert_eq!(report.total(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, "corrupt");

    assert_eq!(report.aligned[0].text, "spiele die beatles");
    assert_eq!(report.aligned[1].text, "spiele \" the beatles \"");

    save_jsonl(&output, &report.aligned).unwrap();
    let reloaded: Vec<AlignedExample> = load_jsonl(&output).unwrap();
    assert_eq!(reloaded, report.aligned);
}

#[test]
fn test_engine_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types.json");
    std::fs::write(&types, r#"{"spotify": {"MusicRecording": "Q7366", "Person": "Q5"}}"#).unwrap();

    let config_path = dir.path().join("engine.json");
    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"{{"active_domains": ["spotify"], "domain_types_path": {}, "aligner": {{"remove_quotes": true}}}}"#,
        serde_json::to_string(&types).unwrap()
    )
    .unwrap();
    drop(file);

    let config = EngineConfig::load(&config_path).unwrap();
    let family = TokenizerRegistry::new().resolve(&config.tokenizer_family).unwrap().convention_tokenizer();
    let engine = AlignmentEngine::new(family, config).unwrap();

    let record = EntityRecord::new(
        "ex-1",
        vec![
            LinkedEntity::new("Q1299", "Q215380", "rock band"),
            LinkedEntity::new("Q2", "Q3", "ballad"),
            LinkedEntity::new("Q4", "Q5", "video game"),
        ],
    );
    let reconciled = engine.reconcile_entities(&record);
    assert_eq!(
        reconciled.entities,
        vec![
            LinkedEntity::new("Q1299", "Q5", "rock band"),
            LinkedEntity::new("Q2", "Q7366", "ballad"),
        ]
    );

    let aligned = engine
        .align_example(&example("attention", "spiele die kaef +er", vec![1, 2]))
        .unwrap();
    assert_eq!(aligned.text, "spiele the beatles");
}
