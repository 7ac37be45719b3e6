//! エラー型の定義
//!
//! このモジュールは、kakariukeライブラリで使用されるすべてのエラー型を定義します。
//! ラティスのデコード自体は失敗せず、回復可能な問題は
//! [`Issue`](crate::decoder::Issue) として報告されます。ここで定義される
//! エラーは、エンコーダや外部の構文解析器の呼び出しで発生するものです。

use std::error::Error;
use std::fmt::{self, Debug};

/// kakariuke専用のResult型
///
/// エラー型としてデフォルトで[`KakariError`]を使用します。
pub type Result<T, E = KakariError> = std::result::Result<T, E>;

/// kakariukeのエラー型
#[derive(Debug, thiserror::Error)]
pub enum KakariError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 浮動小数点数パースエラー
    #[error(transparent)]
    ParseFloat(std::num::ParseFloatError),

    /// 整数パースエラー
    #[error(transparent)]
    ParseInt(std::num::ParseIntError),

    /// UTF-8エンコーディングエラー
    #[error(transparent)]
    Utf8(std::str::Utf8Error),

    /// 標準I/Oエラー
    ///
    /// 外部構文解析器のプロセス起動や標準入出力で発生します。
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSONシリアライゼーションエラー
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// XMLシリアライゼーションエラー
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// 外部構文解析器が異常終了したエラー
    ///
    /// 終了コードと標準エラー出力の内容を保持します。
    #[error("The parser command exited with {status}: {stderr}")]
    EngineFailed {
        /// 終了ステータスの表示文字列
        status: String,
        /// 標準エラー出力
        stderr: String,
    },
}

impl KakariError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

impl From<std::num::ParseFloatError> for KakariError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::ParseFloat(error)
    }
}

impl From<std::num::ParseIntError> for KakariError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}

impl From<std::str::Utf8Error> for KakariError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Utf8(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_format() {
        let e = KakariError::invalid_format("feature", "bare quote in unquoted field");
        assert_eq!(
            e.to_string(),
            "InvalidFormatError: feature: bare quote in unquoted field"
        );
    }

    #[test]
    fn test_from_parse_int() {
        let e: KakariError = "x".parse::<i32>().unwrap_err().into();
        assert!(matches!(e, KakariError::ParseInt(_)));
    }
}
