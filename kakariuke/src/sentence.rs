//! 文の表現
//!
//! [`Sentence`] はラティス形式の出力1文分から組み立てられる文節列です。
//! 文は文節を、文節はトークンを排他的に所有し、構築後は変更されません。

use serde::Serialize;

use crate::chunk::{Chunk, NO_LINK};
use crate::token::Token;

/// 文節の列からなる文
///
/// 文節は入力に現れた順に並びます。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sentence {
    pub(crate) chunks: Vec<Chunk>,
}

impl Sentence {
    /// 文節の列を取得します。
    #[inline(always)]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// 文節を一つも含まないかどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// 文中のすべてのトークンを順に返すイテレータ
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = &Token> + '_ {
        self.chunks.iter().flat_map(|c| c.tokens.iter())
    }

    /// トークンの総数を返します。
    pub fn num_tokens(&self) -> usize {
        self.chunks.iter().map(|c| c.tokens.len()).sum()
    }

    /// 表層形を連結した元の文字列を返します。
    pub fn surface(&self) -> String {
        self.tokens().map(Token::surface).collect()
    }

    /// 文節IDから文節を検索します。
    pub fn chunk_by_id(&self, id: i64) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.id == id)
    }

    /// 文の根である文節を返すイテレータ
    pub fn roots(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.iter().filter(|c| c.link == NO_LINK)
    }

    /// 係り先が文中に存在しない文節を返すイテレータ
    pub fn dangling_links(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks
            .iter()
            .filter(|c| c.link != NO_LINK && self.chunk_by_id(c.link).is_none())
    }
}

impl IntoIterator for Sentence {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}
