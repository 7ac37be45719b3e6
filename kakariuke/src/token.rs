//! 形態素トークン
//!
//! このモジュールは、ラティス形式のトークン行から復元される形態素を表現する
//! [`Token`] 型と、そのデコード処理を提供します。

use std::ops::Range;

use serde::Serialize;

use crate::decoder::IssueKind;
use crate::feature::{FeatureRecord, Features};
use crate::utils;

/// 形態素解析の結果トークン
///
/// 表層形、25個の名前付き素性、固有表現タグ、そして文中での文字単位の位置を
/// 保持します。位置はバイトではなくコードポイント単位で、半開区間
/// `[begin, end)` です。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(skip)]
    pub(crate) id: usize,
    pub(crate) surface: String,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    #[serde(flatten)]
    pub(crate) features: Features,
    pub(crate) ne: String,
}

impl Token {
    /// トークン行の3つの列からトークンをデコードします。
    ///
    /// 素性CSVが不正な場合でもトークンは作成され、素性リストは空として扱われます。
    /// その場合は発生した問題が一緒に返されます。
    ///
    /// # 引数
    ///
    /// * `id` - 文全体でのトークンの通し番号
    /// * `cursor` - 直前のトークンの終了位置(文頭では0)
    /// * `surface` - 表層形
    /// * `feature` - 素性CSV
    /// * `ne` - 固有表現タグ
    pub(crate) fn decode(
        id: usize,
        cursor: usize,
        surface: &str,
        feature: &str,
        ne: &str,
    ) -> (Self, Option<IssueKind>) {
        let (fields, issue) = match utils::parse_csv_row(feature) {
            Ok(fields) => (fields, None),
            Err(e) => (
                vec![],
                Some(IssueKind::MalformedFeatureCsv {
                    surface: surface.to_string(),
                    reason: e.to_string(),
                }),
            ),
        };
        let features = Features::from_record(FeatureRecord::from_fields(fields), surface);
        let token = Self {
            id,
            surface: surface.to_string(),
            begin: cursor,
            end: cursor + utils::len_char(surface),
            features,
            ne: ne.to_string(),
        };
        (token, issue)
    }

    /// 文全体でのトークンの通し番号を取得します。
    #[inline(always)]
    pub fn id(&self) -> usize {
        self.id
    }

    /// トークンの表層形を取得します。
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// トークンの開始位置(文字単位)を取得します。
    #[inline(always)]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// トークンの終了位置(文字単位)を取得します。
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.end
    }

    /// トークンの文字単位の位置範囲を取得します。
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// トークンの名前付き素性を取得します。
    #[inline(always)]
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// 語彙素を取得します。
    #[inline(always)]
    pub fn lemma(&self) -> &str {
        &self.features.lemma
    }

    /// 固有表現タグを取得します。
    #[inline(always)]
    pub fn ne(&self) -> &str {
        &self.ne
    }
}
