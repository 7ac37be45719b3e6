//! CSV処理のユーティリティ関数を提供するモジュール
//!
//! 素性フィールドはCSVの1レコードとして埋め込まれているため、
//! 引用符を含むフィールドやフィールド内のカンマを正しく扱う必要があります。
//!
//! - CSV行の解析と引用符の検証
//! - CSVセルの引用符処理と行の再結合

use std::io::Write;

use csv_core::ReadFieldResult;

use crate::errors::{KakariError, Result};

/// CSVセルのデータを適切に引用符で囲んで書き出す
///
/// 必要に応じてダブルクォートやエスケープ処理を自動的に行います。
///
/// # 引数
///
/// * `wtr` - 書き込み先のWriterオブジェクト
/// * `data` - CSVセルとして書き込むバイト列
pub fn quote_csv_cell<W>(mut wtr: W, mut data: &[u8]) -> std::io::Result<()>
where
    W: Write,
{
    let mut output = [0; 4096];
    let mut writer = csv_core::Writer::new();
    loop {
        let (result, nin, nout) = writer.field(data, &mut output);
        wtr.write_all(&output[..nout])?;
        if result == csv_core::WriteResult::InputEmpty {
            break;
        }
        data = &data[nin..];
    }
    let (result, nout) = writer.finish(&mut output);
    debug_assert_eq!(result, csv_core::WriteResult::InputEmpty);
    wtr.write_all(&output[..nout])?;
    Ok(())
}

/// フィールドの列をCSVの1行に結合する
///
/// [`parse_csv_row`] の逆変換です。
///
/// ```
/// # use kakariuke::utils::join_csv_row;
/// assert_eq!(join_csv_row(["名詞", "1,2-ジクロロエタン"]), "名詞,\"1,2-ジクロロエタン\"");
/// ```
pub fn join_csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = vec![];
    for (i, field) in fields.into_iter().enumerate() {
        if i != 0 {
            buf.push(b',');
        }
        let field = field.as_ref();
        // csv-core writes an empty field as `""`.
        if !field.is_empty() {
            // Writing into a Vec never fails.
            let _ = quote_csv_cell(&mut buf, field.as_bytes());
        }
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
/// 引用符で囲まれていないフィールド内の引用符や、閉じられていない引用符は
/// 不正な形式として扱います。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター。空文字列に対しては空のベクター。
///
/// # エラー
///
/// 引用符の対応が取れていない場合、[`KakariError`] が返されます。
///
/// # 例
///
/// ```
/// # use kakariuke::utils::parse_csv_row;
/// let fields = parse_csv_row("名詞,トスカーナ").unwrap();
/// assert_eq!(fields, vec!["名詞", "トスカーナ"]);
///
/// let fields_with_quote = parse_csv_row("名詞,\"1,2-ジクロロエタン\"").unwrap();
/// assert_eq!(fields_with_quote, vec!["名詞", "1,2-ジクロロエタン"]);
///
/// assert!(parse_csv_row("名詞,1\"2").is_err());
/// ```
pub fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut features = vec![];
    if row.is_empty() {
        return Ok(features);
    }
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    // An unescaped field is never longer than its raw form.
    let mut output = vec![0; row.len()];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty | ReadFieldResult::End => true,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::OutputFull => {
                return Err(KakariError::invalid_state(
                    "CSV output buffer is full",
                    format!("row of {} bytes", row.len()),
                ));
            }
        };
        let raw = &bytes[..nin];
        let raw = raw.strip_suffix(b",").unwrap_or(raw);
        check_quotes(raw)?;
        features.push(std::str::from_utf8(&output[..nout])?.to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    Ok(features)
}

/// 生のフィールドの引用符が正しく対応しているか検証する
fn check_quotes(raw: &[u8]) -> Result<()> {
    if !raw.contains(&b'"') {
        return Ok(());
    }
    if raw.first() != Some(&b'"') {
        return Err(KakariError::invalid_format(
            "feature",
            "bare quote in non-quoted field",
        ));
    }
    if raw.len() < 2 || raw.last() != Some(&b'"') {
        return Err(KakariError::invalid_format(
            "feature",
            "extraneous or missing quote in quoted field",
        ));
    }
    // Quotes inside a quoted field must be doubled.
    let mut inner = raw[1..raw.len() - 1].iter();
    while let Some(&b) = inner.next() {
        if b == b'"' && inner.next() != Some(&b'"') {
            return Err(KakariError::invalid_format(
                "feature",
                "extraneous quote in quoted field",
            ));
        }
    }
    Ok(())
}

/// 文字列のコードポイント数を返す
#[inline(always)]
pub fn len_char(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_row() {
        assert_eq!(
            &["名詞", "トスカーナ"],
            parse_csv_row("名詞,トスカーナ").unwrap().as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_with_quote() {
        assert_eq!(
            &["名詞", "1,2-ジクロロエタン"],
            parse_csv_row("名詞,\"1,2-ジクロロエタン\"").unwrap().as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_empty_fields() {
        assert_eq!(
            &["補助記号", "", "，", ""],
            parse_csv_row("補助記号,,，,").unwrap().as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_empty() {
        assert!(parse_csv_row("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_csv_row_bare_quote() {
        assert!(parse_csv_row("名詞,ab\"c,*").is_err());
    }

    #[test]
    fn test_parse_csv_row_unterminated_quote() {
        assert!(parse_csv_row("名詞,\"abc").is_err());
    }

    #[test]
    fn test_parse_csv_row_extraneous_quote() {
        assert!(parse_csv_row("名詞,\"a\"\"").is_err());
        assert!(parse_csv_row("名詞,\"a\"b\",*").is_err());
        assert_eq!(
            &["名詞", "a\"b", ""],
            parse_csv_row("名詞,\"a\"\"b\",\"\"").unwrap().as_slice()
        );
    }

    #[test]
    fn test_join_csv_row_empty_fields() {
        assert_eq!(",,", join_csv_row(["", "", ""]));
        assert_eq!("記号,,\"\"\"\"", join_csv_row(["記号", "", "\""]));
    }

    #[test]
    fn test_join_csv_row() {
        assert_eq!("名詞,,*", join_csv_row(["名詞", "", "*"]));
        let joined = join_csv_row(["名詞", "1,2-ジクロロエタン", "\""]);
        assert_eq!(
            &["名詞", "1,2-ジクロロエタン", "\""],
            parse_csv_row(&joined).unwrap().as_slice()
        );
    }

    #[test]
    fn test_len_char() {
        assert_eq!(5, len_char("hello"));
        assert_eq!(2, len_char("未知"));
        assert_eq!(0, len_char(""));
    }
}
