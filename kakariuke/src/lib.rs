//! # kakariuke
//!
//! kakariukeは、係り受け解析器(CaboCha)のラティス形式出力を型付きの文構造へ
//! 変換し、JSONやXMLへエンコードするライブラリです。
//!
//! ## 概要
//!
//! 係り受け解析そのものは外部の解析器が行います。このライブラリは、解析器が
//! 出力した1文分のラティス形式テキストを [`Sentence`] (文節 [`Chunk`] の列、
//! 各文節はトークン [`Token`] の列) に組み立てます。
//!
//! ## 主な機能
//!
//! - **失敗しないデコード**: 不正な行や値は読み飛ばすか既定値で補い、
//!   回復可能な問題として [`Decoded`] に含めて返します
//! - **UniDic素性スキーマ**: 25項目の完全形と6項目の省略形を区別して扱います
//! - **エンコード**: 安定した整形済みJSONと、CaboCha互換のXML
//! - **解析器の注入**: [`Engine`] を実装した任意のハンドルを [`Analyzer`] に渡せます
//!
//! ## 使用例
//!
//! ```
//! use kakariuke::decode_sentence;
//!
//! let lattice = "\
//! * 0 1D 0/1 1.250000
//! 猫\t名詞,普通名詞,一般,*,*,*,ネコ,猫,猫,ネコ,ネコ,和,猫,ネコ,ネコ,ネコ,*,*,*,*,*,*,1,C4,*\tO
//! が\t助詞,格助詞,*,*,*,*,ガ,が,が,ガ,ガ,和,が,ガ,ガ,ガ,*,*,*,*,*,*,*,*,*\tO
//! * 1 -1D 0/0 0.000000
//! 鳴く\t動詞,一般,*,*,五段-カ行,終止形-一般,ナク,鳴く,鳴く,ナク,ナク,和,鳴く,ナク,ナク,ナク,*,*,*,*,*,*,0,C1,*\tO
//! EOS
//! ";
//!
//! let decoded = decode_sentence(lattice);
//! assert!(decoded.is_clean());
//!
//! let sentence = decoded.sentence;
//! assert_eq!(sentence.chunks().len(), 2);
//! assert_eq!(sentence.chunks()[0].link(), 1);
//!
//! let tokens: Vec<_> = sentence.tokens().collect();
//! assert_eq!(tokens[2].surface(), "鳴く");
//! assert_eq!(tokens[2].range_char(), 2..4);
//! assert_eq!(tokens[2].features().c_form, "終止形-一般");
//!
//! let json = kakariuke::encode_json(&sentence);
//! assert!(json.starts_with(b"[\n  {"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// 係り受け解析器のラッパー
pub mod analyzer;

/// 文節の定義
pub mod chunk;

/// ラティス形式のデコーダ
pub mod decoder;

/// JSONおよびXMLへのエンコード
pub mod encode;

/// 外部の係り受け解析器との境界
pub mod engine;

/// エラー型の定義
pub mod errors;

/// UniDic素性スキーマ
pub mod feature;

/// ラティス形式の行の分類
pub mod line;

/// 文の定義
pub mod sentence;

/// トークン型の定義
pub mod token;

/// 内部ユーティリティ関数
pub mod utils;


// Re-exports
pub use analyzer::Analyzer;
pub use chunk::Chunk;
pub use decoder::{Decoded, Issue, IssueKind, decode_sentence};
pub use encode::{encode_json, encode_xml};
pub use engine::{CommandEngine, Engine, OutputFormat};
pub use feature::{FeatureRecord, Features};
pub use sentence::Sentence;
pub use token::Token;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
