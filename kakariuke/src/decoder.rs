//! ラティス形式のデコーダ
//!
//! 構文解析器が出力した1文分のラティス形式テキストを行ごとに分類し、
//! 文節ヘッダとトークン行から [`Sentence`] を組み立てます。
//!
//! デコードは失敗しません。不正な行や値は可能な範囲で読み飛ばすか既定値で補い、
//! その内容を [`Issue`] として結果に含めます。各問題はログにも出力されます。
//!
//! # 例
//!
//! ```
//! use kakariuke::decoder::decode_sentence;
//!
//! let lattice = "* 0 -1D 0/0 0.000000\n語\t名詞,普通名詞,一般,*,*,*\tO\nEOS\n";
//! let decoded = decode_sentence(lattice);
//! assert!(decoded.issues.is_empty());
//!
//! let chunk = &decoded.sentence.chunks()[0];
//! assert_eq!(chunk.link(), -1);
//! assert_eq!(chunk.tokens()[0].range_char(), 0..1);
//! ```

use std::fmt;

use crate::chunk::Chunk;
use crate::line::Line;
use crate::sentence::Sentence;
use crate::token::Token;

/// デコード中に見つかった回復可能な問題の種類
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IssueKind {
    /// タブ区切りの列数が3でないトークン行。行は読み飛ばされます。
    #[error("malformed token line: {line:?}")]
    MalformedTokenLine {
        /// 行の内容
        line: String,
    },

    /// 素性CSVが不正なトークン。素性は空として扱われます。
    #[error("malformed feature csv for {surface:?}: {reason}")]
    MalformedFeatureCsv {
        /// トークンの表層形
        surface: String,
        /// 原因
        reason: String,
    },

    /// 文節ヘッダの値が不正。属性は0として扱われます。
    #[error("invalid chunk {field} {value:?}: {reason}")]
    InvalidChunkField {
        /// 属性の名前
        field: &'static str,
        /// 元の値
        value: String,
        /// 原因
        reason: String,
    },

    /// トークンを一つも持たない文節。文には追加されません。
    #[error("chunk {id} has no tokens")]
    EmptyChunk {
        /// ヘッダに書かれた文節ID
        id: i64,
    },
}

/// 行番号付きの問題
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// 1から始まる行番号
    pub line: usize,

    /// 問題の種類
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// デコード結果
///
/// 可能な範囲で組み立てた文と、その過程で見つかった問題の一覧を保持します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// 組み立てられた文
    pub sentence: Sentence,

    /// 回復可能な問題の一覧
    pub issues: Vec<Issue>,
}

impl Decoded {
    /// 問題が一つもなかったかどうかを返します。
    #[inline(always)]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// 問題を捨てて文だけを取り出します。
    #[inline(always)]
    pub fn into_sentence(self) -> Sentence {
        self.sentence
    }
}

/// 組み立ての状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// 最初の文節ヘッダをまだ見ていない
    AwaitingChunk,
    /// 文節ヘッダの後
    InChunk,
}

/// 行単位の状態機械
struct Assembler {
    state: State,
    chunks: Vec<Chunk>,
    // Line number of the header of each committed chunk.
    header_lines: Vec<usize>,
    current: Chunk,
    current_line: usize,
    cursor: usize,
    num_tokens: usize,
    issues: Vec<Issue>,
}

impl Assembler {
    fn new() -> Self {
        Self {
            state: State::AwaitingChunk,
            chunks: vec![],
            header_lines: vec![],
            current: Chunk::default(),
            current_line: 0,
            cursor: 0,
            num_tokens: 0,
            issues: vec![],
        }
    }

    fn report(&mut self, line: usize, kind: IssueKind) {
        let issue = Issue { line, kind };
        log::warn!("[kakariuke] {issue}");
        self.issues.push(issue);
    }

    /// 現在の文節を文に追加し、新しい文節に置き換えます。
    fn commit(&mut self, next: Chunk, next_line: usize) {
        let chunk = std::mem::replace(&mut self.current, next);
        let line = std::mem::replace(&mut self.current_line, next_line);
        if chunk.tokens.is_empty() {
            // The placeholder before the first header is not a declared chunk.
            if self.state == State::InChunk {
                self.report(line, IssueKind::EmptyChunk { id: chunk.id });
            }
            return;
        }
        let position = self.chunks.len() as i64;
        if self.state == State::InChunk && chunk.id != position {
            self.report(
                line,
                IssueKind::InvalidChunkField {
                    field: "id",
                    value: chunk.id.to_string(),
                    reason: format!("declared at position {position}"),
                },
            );
        }
        self.chunks.push(chunk);
        self.header_lines.push(line);
    }

    fn chunk_header(&mut self, lineno: usize, line: &str) {
        let (chunk, issues) = Chunk::from_header(line);
        for kind in issues {
            self.report(lineno, kind);
        }
        self.commit(chunk, lineno);
        self.state = State::InChunk;
    }

    fn token(&mut self, lineno: usize, surface: &str, feature: &str, ne: &str) {
        let (token, issue) = Token::decode(self.num_tokens, self.cursor, surface, feature, ne);
        if let Some(kind) = issue {
            self.report(lineno, kind);
        }
        self.cursor = token.end;
        self.num_tokens += 1;
        self.current.tokens.push(token);
    }

    fn finish(mut self) -> Decoded {
        self.commit(Chunk::default(), 0);

        let dangling: Vec<_> = self
            .chunks
            .iter()
            .zip(&self.header_lines)
            .filter(|(c, _)| c.link != crate::chunk::NO_LINK)
            .filter(|(c, _)| !self.chunks.iter().any(|o| o.id == c.link))
            .map(|(c, &line)| (line, c.link))
            .collect();
        for (line, link) in dangling {
            self.report(
                line,
                IssueKind::InvalidChunkField {
                    field: "link",
                    value: link.to_string(),
                    reason: "no chunk with this id".to_string(),
                },
            );
        }

        Decoded {
            sentence: Sentence {
                chunks: self.chunks,
            },
            issues: self.issues,
        }
    }
}

/// 1文分のラティス形式テキストをデコードします。
///
/// 入力は1文だけを含むことを前提とします。最初の `EOS` 行(または空行)より
/// 後の内容は無視されます。`EOS` がないまま入力が終わった場合は、
/// 入力の終わりを文末として扱います。
///
/// # 引数
///
/// * `lattice` - ラティス形式のテキスト
///
/// # 戻り値
///
/// 組み立てられた文と、見つかった問題の一覧
pub fn decode_sentence(lattice: &str) -> Decoded {
    let mut asm = Assembler::new();
    for (i, line) in lattice.split('\n').enumerate() {
        let lineno = i + 1;
        match Line::classify(line) {
            Line::ChunkHeader(header) => asm.chunk_header(lineno, header),
            Line::EndOfSentence => break,
            Line::Token {
                surface,
                feature,
                ne,
            } => asm.token(lineno, surface, feature, ne),
            Line::Malformed(line) => asm.report(
                lineno,
                IssueKind::MalformedTokenLine {
                    line: line.to_string(),
                },
            ),
        }
    }
    asm.finish()
}

impl Sentence {
    /// ラティス形式のテキストから文を組み立てます。
    ///
    /// 見つかった問題はログに出力されるだけで、結果には含まれません。
    /// 問題の一覧が必要な場合は [`decode_sentence`] を使用してください。
    pub fn from_lattice(lattice: &str) -> Self {
        decode_sentence(lattice).into_sentence()
    }
}
