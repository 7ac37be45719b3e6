//! ラティス形式の行の分類
//!
//! ラティス形式の出力は、文節ヘッダ行 (`* 0 -1D 3/3 0.000000`)、
//! トークン行 (`表層形\t素性\t固有表現タグ`)、そして文末を示す `EOS` 行
//! (または空行)から構成されます。ヘッダ行はタブを含まず、トークン行は
//! 常にタブで区切られた3つの列を持つことで区別されます。

use std::sync::LazyLock;

use regex::Regex;

static CHUNK_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*[^\t]+$").unwrap());

/// 文末を示す行
pub const EOS: &str = "EOS";

/// 分類された1行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// 文節ヘッダ行
    ChunkHeader(&'a str),

    /// 文末 (`EOS` または空行)
    EndOfSentence,

    /// トークン行の3つの列
    Token {
        /// 表層形
        surface: &'a str,
        /// 素性CSV
        feature: &'a str,
        /// 固有表現タグ
        ne: &'a str,
    },

    /// 列数が3でないトークン行
    Malformed(&'a str),
}

impl<'a> Line<'a> {
    /// 1行を分類します。
    ///
    /// 行末の `\r` は取り除かれます。
    ///
    /// ```
    /// # use kakariuke::line::Line;
    /// assert_eq!(Line::classify("EOS"), Line::EndOfSentence);
    /// assert!(matches!(Line::classify("* 0 -1D 0/0 0.000000"), Line::ChunkHeader(_)));
    /// assert_eq!(
    ///     Line::classify("語\t名詞\tO"),
    ///     Line::Token { surface: "語", feature: "名詞", ne: "O" },
    /// );
    /// ```
    pub fn classify(line: &'a str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if CHUNK_HEADER_RE.is_match(line) {
            return Self::ChunkHeader(line);
        }
        if line.is_empty() || line == EOS {
            return Self::EndOfSentence;
        }
        let mut spl = line.split('\t');
        match (spl.next(), spl.next(), spl.next(), spl.next()) {
            (Some(surface), Some(feature), Some(ne), None) => Self::Token {
                surface,
                feature,
                ne,
            },
            _ => Self::Malformed(line),
        }
    }
}
