use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use super::corpus_sentences;
use crate::analyzer::Analyzer;
use crate::engine::{Engine, OutputFormat};
use crate::errors::{KakariError, Result};

/// 事前に用意したラティスを返す解析器
struct StaticEngine {
    outputs: HashMap<String, String>,
}

impl StaticEngine {
    fn from_corpus() -> Self {
        let outputs = corpus_sentences()
            .into_iter()
            .map(|lattice| {
                let text: String = lattice
                    .lines()
                    .filter_map(|l| l.split('\t').next().filter(|_| l.contains('\t')))
                    .collect();
                (text, lattice.to_string())
            })
            .collect();
        Self { outputs }
    }
}

impl Engine for StaticEngine {
    fn format_parse(&self, text: &str, format: OutputFormat) -> Result<String> {
        if format != OutputFormat::Lattice {
            return Err(KakariError::invalid_argument("format", format.to_string()));
        }
        self.outputs
            .get(text)
            .cloned()
            .ok_or_else(|| KakariError::EngineFailed {
                status: "exit status: 1".to_string(),
                stderr: format!("unexpected input {text:?}"),
            })
    }
}

#[test]
fn test_parse_to_sentence() {
    let analyzer = Analyzer::new(StaticEngine::from_corpus());
    let decoded = analyzer.parse_to_sentence("夏目漱石は東京で生まれた。").unwrap();
    assert!(decoded.is_clean());
    let sentence = decoded.sentence;
    assert_eq!(sentence.chunks().len(), 3);
    let ne: Vec<_> = sentence.tokens().map(|t| t.ne()).collect();
    assert_eq!(
        ne,
        ["B-PERSON", "I-PERSON", "O", "B-LOCATION", "O", "O", "O", "O"]
    );
    let root = sentence.roots().next().unwrap();
    assert_eq!(root.id(), 2);
    assert_eq!(root.tokens()[0].lemma(), "生まれる");
}

#[test]
fn test_parse_to_lattice_string() {
    let engine = StaticEngine::from_corpus();
    let analyzer = Analyzer::new(&engine);
    let lattice = analyzer.parse_to_lattice_string("Rustで書く").unwrap();
    assert_eq!(lattice, corpus_sentences()[2]);
}

#[test]
fn test_parse_to_json() {
    let analyzer = Analyzer::new(StaticEngine::from_corpus());
    let json = analyzer.parse_to_json("吾輩は猫である。").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value[0]["link"], 1);
    assert_eq!(value[0]["tokens"][1]["aConType"], "動詞%F2@0,名詞%F1,形容詞%F2@-1");
    assert_eq!(value[1]["tokens"][3]["end"], 8);
}

#[test]
fn test_parse_to_xml() {
    let analyzer = Analyzer::new(StaticEngine::from_corpus());
    let xml = String::from_utf8(analyzer.parse_to_xml("Rustで書く").unwrap()).unwrap();
    assert!(
        xml.starts_with("<sentence>\n  <chunk id=\"0\" link=\"1\" rel=\"D\" score=\"0.512044\"")
    );
    assert!(xml.contains("ne=\"B-ARTIFACT\">Rust</tok>"));
}

#[test]
fn test_engine_failure() {
    let analyzer = Analyzer::new(StaticEngine::from_corpus());
    assert!(matches!(
        analyzer.parse_to_sentence("未登録の文"),
        Err(KakariError::EngineFailed { .. })
    ));
}

#[test]
fn test_shared_between_threads() {
    let analyzer = Arc::new(Analyzer::new(StaticEngine::from_corpus()));
    let texts = ["吾輩は猫である。", "夏目漱石は東京で生まれた。", "Rustで書く"];
    let handles: Vec<_> = texts
        .into_iter()
        .map(|text| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.parse_to_sentence(text).unwrap().sentence)
        })
        .collect();
    for (handle, text) in handles.into_iter().zip(texts) {
        assert_eq!(handle.join().unwrap().surface(), text);
    }
}
