//! 文節 (係り受けの単位)
//!
//! 文節ヘッダ行 `* <id> <link><rel> <head>/<tail> <score>` のデコードと、
//! 文節を表現する [`Chunk`] 型を提供します。

use std::str::FromStr;

use serde::Serialize;

use crate::decoder::IssueKind;
use crate::errors::{KakariError, Result};
use crate::token::Token;

/// 係り先を持たない(文の根である)ことを示すリンク値
pub const NO_LINK: i64 = -1;

/// 係り受け関係の既定の種類
pub const DEFAULT_REL: &str = "D";

/// 文節
///
/// 係り先の文節ID、主辞・機能語のトークン位置、係り受けスコアと、
/// 文節に含まれるトークン列を保持します。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    pub(crate) id: i64,
    pub(crate) link: i64,
    #[serde(skip)]
    pub(crate) rel: String,
    #[serde(rename = "prob")]
    pub(crate) score: f64,
    pub(crate) head: i64,
    pub(crate) tail: i64,
    pub(crate) tokens: Vec<Token>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self {
            id: 0,
            link: NO_LINK,
            rel: DEFAULT_REL.to_string(),
            score: 0.0,
            head: 0,
            tail: 0,
            tokens: vec![],
        }
    }
}

impl Chunk {
    /// 文節ヘッダ行をデコードし、トークンを持たない文節を作成します。
    ///
    /// 数値として解釈できないフィールドは0(リンクの場合は数値部分が0)となり、
    /// 作成自体は中断されません。そのようなフィールドは問題として返されます。
    ///
    /// # 引数
    ///
    /// * `line` - `*` で始まる文節ヘッダ行
    pub(crate) fn from_header(line: &str) -> (Self, Vec<IssueKind>) {
        let mut issues = vec![];
        let fields: Vec<&str> = line.split(' ').collect();
        let field = |i: usize| fields.get(i).copied();

        let (link, rel) = match field(2) {
            Some(link) => {
                let (link, rel) = split_rel(link);
                (Some(link), rel)
            }
            None => (None, ""),
        };
        let (head, tail) = match field(3).map(|ht| ht.split_once('/')) {
            Some(Some((head, tail))) => (Some(head), Some(tail)),
            Some(None) => (field(3), None),
            None => (None, None),
        };

        let chunk = Self {
            id: parse_or_zero("id", field(1), &mut issues),
            link: parse_or_zero("link", link, &mut issues),
            rel: if rel.is_empty() { DEFAULT_REL } else { rel }.to_string(),
            head: parse_or_zero("head", head, &mut issues),
            tail: parse_or_zero("tail", tail, &mut issues),
            score: parse_score(field(4), &mut issues),
            tokens: vec![],
        };
        (chunk, issues)
    }

    /// 文中での文節IDを取得します。
    #[inline(always)]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// 係り先の文節IDを取得します。文の根の場合は [`NO_LINK`] です。
    #[inline(always)]
    pub fn link(&self) -> i64 {
        self.link
    }

    /// 係り受け関係の種類 (`D` など) を取得します。
    #[inline(always)]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// 係り受けスコアを取得します。
    #[inline(always)]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// 主辞トークンの文節内での位置を取得します。
    #[inline(always)]
    pub fn head(&self) -> i64 {
        self.head
    }

    /// 機能語トークンの文節内での位置を取得します。
    #[inline(always)]
    pub fn tail(&self) -> i64 {
        self.tail
    }

    /// 文節に含まれるトークン列を取得します。
    #[inline(always)]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// 文の根かどうかを返します。
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.link == NO_LINK
    }
}

/// `-1D` のようなリンクフィールドを数値部分と関係の種類に分けます。
fn split_rel(field: &str) -> (&str, &str) {
    let link = field.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    field.split_at(link.len())
}

fn parse_field<T>(value: &str) -> Result<T>
where
    T: FromStr,
    KakariError: From<T::Err>,
{
    Ok(value.parse::<T>()?)
}

fn parse_or_zero<T>(field: &'static str, value: Option<&str>, issues: &mut Vec<IssueKind>) -> T
where
    T: FromStr + Default,
    KakariError: From<T::Err>,
{
    let Some(value) = value else {
        issues.push(IssueKind::InvalidChunkField {
            field,
            value: String::new(),
            reason: "missing field".to_string(),
        });
        return T::default();
    };
    parse_field(value).unwrap_or_else(|e| {
        issues.push(IssueKind::InvalidChunkField {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        });
        T::default()
    })
}

/// スコアを読み取ります。NaNや無限大は0とします。
fn parse_score(value: Option<&str>, issues: &mut Vec<IssueKind>) -> f64 {
    let score: f64 = parse_or_zero("score", value, issues);
    if score.is_finite() {
        return score;
    }
    issues.push(IssueKind::InvalidChunkField {
        field: "score",
        value: value.unwrap_or_default().to_string(),
        reason: "score must be finite".to_string(),
    });
    0.0
}
