//! UniDic素性スキーマ
//!
//! トークン行の素性フィールドは位置によって意味が決まるCSVレコードです。
//! このモジュールは25個の名前付き素性スロットと、素性レコードの2つの形
//! (未知語などで出力される6項目の省略形と、25項目の完全形)を定義します。

use serde::Serialize;

/// 素性スロットの数
pub const NUM_FEATURES: usize = 25;

/// 省略形レコードの項目数
pub const NUM_ABBREVIATED_FEATURES: usize = 6;

/// 省略形レコードで語種 (`goshu`) に設定される値
pub const UNKNOWN_GOSHU: &str = "不明";

/// 位置から素性名への対応表
///
/// 添字がCSVレコード内の位置に対応します。
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "pos1", "pos2", "pos3", "pos4", "cType", "cForm", "lForm", "lemma", "orth", "pron", "kana",
    "goshu", "orthBase", "pronBase", "kanaBase", "formBase", "iType", "iForm", "iConType",
    "fType", "fForm", "fConType", "aType", "aConType", "aModType",
];

/// 素性名から位置を返します。
///
/// ```
/// # use kakariuke::feature::feature_index;
/// assert_eq!(feature_index("lemma"), Some(7));
/// assert_eq!(feature_index("surface"), None);
/// ```
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|&n| n == name)
}

/// 長さによって区別される素性レコード
///
/// 構文解析器は辞書にない語に対して6項目だけの素性を出力します。
/// どちらの形として扱うかは項目数だけで決まります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureRecord {
    /// 品詞4階層と活用型・活用形のみからなる6項目のレコード
    Abbreviated([String; NUM_ABBREVIATED_FEATURES]),

    /// スキーマ順に並んだ最大25項目のレコード
    ///
    /// 25項目に満たない場合、不足分は空文字列として扱います。
    /// 25項目を超えた分は無視されます。
    Full(Vec<String>),
}

impl FeatureRecord {
    /// 解析済みのCSVフィールドからレコードを作成します。
    pub fn from_fields(fields: Vec<String>) -> Self {
        match <[String; NUM_ABBREVIATED_FEATURES]>::try_from(fields) {
            Ok(abbreviated) => Self::Abbreviated(abbreviated),
            Err(fields) => Self::Full(fields),
        }
    }

    /// 省略形かどうかを返します。
    #[inline(always)]
    pub fn is_abbreviated(&self) -> bool {
        matches!(self, Self::Abbreviated(_))
    }
}

/// トークンの25個の名前付き素性
///
/// 空文字列は「該当なし」を表します。構文解析器自身が未設定を表すのに使う
/// `*` はそのまま保持されます。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// 品詞大分類
    pub pos1: String,
    /// 品詞中分類
    pub pos2: String,
    /// 品詞小分類
    pub pos3: String,
    /// 品詞細分類
    pub pos4: String,
    /// 活用型
    pub c_type: String,
    /// 活用形
    pub c_form: String,
    /// 語彙素読み
    pub l_form: String,
    /// 語彙素
    pub lemma: String,
    /// 書字形出現形
    pub orth: String,
    /// 発音形出現形
    pub pron: String,
    /// 仮名形出現形
    pub kana: String,
    /// 語種
    pub goshu: String,
    /// 書字形基本形
    pub orth_base: String,
    /// 発音形基本形
    pub pron_base: String,
    /// 仮名形基本形
    pub kana_base: String,
    /// 語形基本形
    pub form_base: String,
    /// 語頭変化型
    pub i_type: String,
    /// 語頭変化形
    pub i_form: String,
    /// 語頭変化結合型
    pub i_con_type: String,
    /// 語末変化型
    pub f_type: String,
    /// 語末変化形
    pub f_form: String,
    /// 語末変化結合型
    pub f_con_type: String,
    /// アクセント型
    pub a_type: String,
    /// アクセント結合型
    pub a_con_type: String,
    /// アクセント修飾型
    pub a_mod_type: String,
}

impl Features {
    /// 素性レコードを名前付きスロットに割り当てます。
    ///
    /// 省略形の場合、`orth`・`lemma`・`orthBase` には表層形が、`goshu` には
    /// [`UNKNOWN_GOSHU`] が設定され、それ以外のスロットは空のままです。
    ///
    /// # 引数
    ///
    /// * `record` - 素性レコード
    /// * `surface` - トークンの表層形
    pub fn from_record(record: FeatureRecord, surface: &str) -> Self {
        let mut features = Self::default();
        match record {
            FeatureRecord::Abbreviated(fields) => {
                let [pos1, pos2, pos3, pos4, c_type, c_form] = fields;
                features.pos1 = pos1;
                features.pos2 = pos2;
                features.pos3 = pos3;
                features.pos4 = pos4;
                features.c_type = c_type;
                features.c_form = c_form;
                features.orth = surface.to_string();
                features.lemma = surface.to_string();
                features.orth_base = surface.to_string();
                features.goshu = UNKNOWN_GOSHU.to_string();
            }
            FeatureRecord::Full(fields) => {
                for (i, value) in fields.into_iter().take(NUM_FEATURES).enumerate() {
                    *features.slot_mut(i) = value;
                }
            }
        }
        features
    }

    /// 位置を指定して素性を取得します。
    pub fn get_index(&self, i: usize) -> Option<&str> {
        let v = match i {
            0 => &self.pos1,
            1 => &self.pos2,
            2 => &self.pos3,
            3 => &self.pos4,
            4 => &self.c_type,
            5 => &self.c_form,
            6 => &self.l_form,
            7 => &self.lemma,
            8 => &self.orth,
            9 => &self.pron,
            10 => &self.kana,
            11 => &self.goshu,
            12 => &self.orth_base,
            13 => &self.pron_base,
            14 => &self.kana_base,
            15 => &self.form_base,
            16 => &self.i_type,
            17 => &self.i_form,
            18 => &self.i_con_type,
            19 => &self.f_type,
            20 => &self.f_form,
            21 => &self.f_con_type,
            22 => &self.a_type,
            23 => &self.a_con_type,
            24 => &self.a_mod_type,
            _ => return None,
        };
        Some(v)
    }

    /// スキーマ名を指定して素性を取得します。
    ///
    /// ```
    /// # use kakariuke::feature::{FeatureRecord, Features};
    /// let record = FeatureRecord::from_fields(
    ///     "名詞,普通名詞,一般,*,*,*".split(',').map(String::from).collect(),
    /// );
    /// let features = Features::from_record(record, "hello");
    /// assert_eq!(features.get("pos2"), Some("普通名詞"));
    /// assert_eq!(features.get("orthBase"), Some("hello"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_index(feature_index(name)?)
    }

    /// `(素性名, 値)` の組をスキーマ順に返すイテレータ
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FEATURE_NAMES
            .iter()
            .enumerate()
            .filter_map(|(i, &name)| Some((name, self.get_index(i)?)))
    }

    fn slot_mut(&mut self, i: usize) -> &mut String {
        match i {
            0 => &mut self.pos1,
            1 => &mut self.pos2,
            2 => &mut self.pos3,
            3 => &mut self.pos4,
            4 => &mut self.c_type,
            5 => &mut self.c_form,
            6 => &mut self.l_form,
            7 => &mut self.lemma,
            8 => &mut self.orth,
            9 => &mut self.pron,
            10 => &mut self.kana,
            11 => &mut self.goshu,
            12 => &mut self.orth_base,
            13 => &mut self.pron_base,
            14 => &mut self.kana_base,
            15 => &mut self.form_base,
            16 => &mut self.i_type,
            17 => &mut self.i_form,
            18 => &mut self.i_con_type,
            19 => &mut self.f_type,
            20 => &mut self.f_form,
            21 => &mut self.f_con_type,
            22 => &mut self.a_type,
            23 => &mut self.a_con_type,
            _ => &mut self.a_mod_type,
        }
    }
}
