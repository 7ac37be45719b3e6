//! 係り受け解析器のラッパー
//!
//! [`Analyzer`] は外部の解析器 ([`Engine`]) を所有し、テキストから
//! ラティス形式の文字列や [`Sentence`] を得るための入口を提供します。

use crate::decoder::{self, Decoded};
use crate::engine::{Engine, OutputFormat};
use crate::errors::Result;
use crate::sentence::Sentence;

/// 係り受け解析器
///
/// 解析器のハンドルは作成時に渡され、以後 [`Analyzer`] が所有します。
///
/// # 例
///
/// ```no_run
/// use kakariuke::{Analyzer, CommandEngine};
///
/// let engine = CommandEngine::new("cabocha").args(["-P", "UNIDIC"]);
/// let analyzer = Analyzer::new(engine);
/// let decoded = analyzer.parse_to_sentence("猫が鳴く")?;
/// for chunk in decoded.sentence.chunks() {
///     println!("{} -> {}", chunk.id(), chunk.link());
/// }
/// # Ok::<(), kakariuke::errors::KakariError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer<E> {
    engine: E,
}

impl<E> Analyzer<E>
where
    E: Engine,
{
    /// 解析器のハンドルから新しいインスタンスを作成します。
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// 解析器のハンドルへの参照を取得します。
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// 解析器のハンドルを取り出します。
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// テキストを解析し、ラティス形式の文字列を返します。
    ///
    /// # 引数
    ///
    /// * `text` - 入力テキスト(1文)
    ///
    /// # エラー
    ///
    /// 解析器の呼び出しに失敗した場合、エラーが返されます。
    pub fn parse_to_lattice_string(&self, text: &str) -> Result<String> {
        self.engine.format_parse(text, OutputFormat::Lattice)
    }

    /// テキストを解析し、文を組み立てます。
    ///
    /// # 引数
    ///
    /// * `text` - 入力テキスト(1文)
    ///
    /// # 戻り値
    ///
    /// 組み立てられた文と、デコード中に見つかった問題の一覧
    ///
    /// # エラー
    ///
    /// 解析器の呼び出しに失敗した場合、エラーが返されます。
    /// デコード中の問題はエラーにはなりません。
    pub fn parse_to_sentence(&self, text: &str) -> Result<Decoded> {
        let lattice = self.parse_to_lattice_string(text)?;
        Ok(decoder::decode_sentence(&lattice))
    }

    /// テキストを解析し、JSONにエンコードします。
    pub fn parse_to_json(&self, text: &str) -> Result<Vec<u8>> {
        self.parse_to_sentence(text)?.sentence.to_json()
    }

    /// テキストを解析し、XMLにエンコードします。
    pub fn parse_to_xml(&self, text: &str) -> Result<Vec<u8>> {
        self.parse_to_sentence(text)?.sentence.to_xml()
    }
}

impl Sentence {
    /// 解析器でテキストを解析し、文を組み立てます。
    ///
    /// デコード中の問題はログに出力されます。
    pub fn parse<E>(engine: &E, text: &str) -> Result<Self>
    where
        E: Engine + ?Sized,
    {
        let lattice = engine.format_parse(text, OutputFormat::Lattice)?;
        Ok(Self::from_lattice(&lattice))
    }
}
