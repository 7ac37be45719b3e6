//! 文のJSONおよびXMLへのエンコード
//!
//! JSONは文節の配列をトップレベルとし、2文字のインデントで整形されます。
//! XMLはCaboChaのXML出力と同じ `sentence`/`chunk`/`tok` の構造で出力されます。
//!
//! ```text
//! <sentence>
//!   <chunk id="0" link="-1" rel="D" score="0.000000" head="0" func="0">
//!     <tok id="0" begin="0" end="1" feature="名詞,..." ne="O">語</tok>
//!   </chunk>
//! </sentence>
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::chunk::Chunk;
use crate::errors::Result;
use crate::sentence::Sentence;
use crate::token::Token;
use crate::utils;

const XML_INDENT_SIZE: usize = 2;

impl Sentence {
    /// 文を整形済みのJSONにエンコードします。
    ///
    /// 同じ文に対しては常に同一のバイト列を返します。
    ///
    /// # エラー
    ///
    /// シリアライズに失敗した場合、[`KakariError`](crate::errors::KakariError) が返されます。
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// 文をXMLにエンコードします。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、[`KakariError`](crate::errors::KakariError) が返されます。
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(vec![], b' ', XML_INDENT_SIZE);
        if self.chunks.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("sentence")))?;
            return Ok(writer.into_inner());
        }
        writer.write_event(Event::Start(BytesStart::new("sentence")))?;
        for chunk in &self.chunks {
            write_chunk(&mut writer, chunk)?;
        }
        writer.write_event(Event::End(BytesEnd::new("sentence")))?;
        Ok(writer.into_inner())
    }
}

fn write_chunk(writer: &mut Writer<Vec<u8>>, chunk: &Chunk) -> Result<()> {
    let mut start = BytesStart::new("chunk");
    start.push_attribute(("id", chunk.id.to_string().as_str()));
    start.push_attribute(("link", chunk.link.to_string().as_str()));
    start.push_attribute(("rel", chunk.rel.as_str()));
    start.push_attribute(("score", format!("{:.6}", chunk.score).as_str()));
    start.push_attribute(("head", chunk.head.to_string().as_str()));
    start.push_attribute(("func", chunk.tail.to_string().as_str()));
    writer.write_event(Event::Start(start))?;
    for token in &chunk.tokens {
        write_token(writer, token)?;
    }
    writer.write_event(Event::End(BytesEnd::new("chunk")))?;
    Ok(())
}

fn write_token(writer: &mut Writer<Vec<u8>>, token: &Token) -> Result<()> {
    let feature = utils::join_csv_row(token.features.iter().map(|(_, v)| v));
    let mut start = BytesStart::new("tok");
    start.push_attribute(("id", token.id.to_string().as_str()));
    start.push_attribute(("begin", token.begin.to_string().as_str()));
    start.push_attribute(("end", token.end.to_string().as_str()));
    start.push_attribute(("feature", feature.as_str()));
    start.push_attribute(("ne", token.ne.as_str()));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(&token.surface)))?;
    writer.write_event(Event::End(BytesEnd::new("tok")))?;
    Ok(())
}

/// 文をJSONにエンコードします。
///
/// 失敗した場合はエラーをログに出力し、空のバイト列を返します。
/// 呼び出し側は空の出力を失敗として扱う必要があります。
pub fn encode_json(sentence: &Sentence) -> Vec<u8> {
    sentence.to_json().unwrap_or_else(|e| {
        log::error!("[kakariuke] Failed to encode a sentence into JSON: {e}");
        vec![]
    })
}

/// 文をXMLにエンコードします。
///
/// 失敗した場合はエラーをログに出力し、空のバイト列を返します。
/// 呼び出し側は空の出力を失敗として扱う必要があります。
pub fn encode_xml(sentence: &Sentence) -> Vec<u8> {
    sentence.to_xml().unwrap_or_else(|e| {
        log::error!("[kakariuke] Failed to encode a sentence into XML: {e}");
        vec![]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATTICE: &str = "\
* 0 -1D 0/1 0.000000
A&B\t名詞,固有名詞,一般,*,*,*\tB-ORGANIZATION
\"\t補助記号,括弧開,*,*,*,*,,\"\"\"\",\"\"\"\",,,記号,\"\"\"\",,,,*,*,*,*,*,*,*,*,*\tO
EOS
";

    #[test]
    fn test_json_layout() {
        let sent = Sentence::from_lattice(LATTICE);
        let json: serde_json::Value = serde_json::from_slice(&sent.to_json().unwrap()).unwrap();
        let chunk = &json.as_array().unwrap()[0];
        let keys: Vec<_> = chunk.as_object().unwrap().keys().cloned().collect();
        // serde_json::Map sorts keys unless preserve_order is enabled.
        let mut expected = vec!["head", "id", "link", "prob", "tail", "tokens"];
        expected.sort_unstable();
        assert_eq!(expected, keys);
        assert_eq!(-1, chunk["link"]);
        let token = &chunk["tokens"][0];
        assert_eq!(0, token["begin"]);
        assert_eq!(3, token["end"]);
        assert_eq!("不明", token["goshu"]);
        assert_eq!("A&B", token["orthBase"]);
        assert_eq!("", token["iConType"]);
        assert_eq!("B-ORGANIZATION", token["ne"]);
        assert!(token.get("id").is_none());
        assert_eq!("A&B", token["surface"]);
    }

    #[test]
    fn test_json_keeps_surface_of_malformed_token() {
        let lattice = "* 0 -1D 0/0 0.000000\nxyz\t名詞,a\"b,*\tO\nEOS\n";
        let sent = Sentence::from_lattice(lattice);
        let json: serde_json::Value = serde_json::from_slice(&sent.to_json().unwrap()).unwrap();
        let token = &json[0]["tokens"][0];
        assert_eq!("xyz", token["surface"]);
        assert_eq!(0, token["begin"]);
        assert_eq!(3, token["end"]);
        assert_eq!("", token["pos1"]);
    }

    #[test]
    fn test_json_is_stable() {
        let sent = Sentence::from_lattice(LATTICE);
        assert_eq!(encode_json(&sent), encode_json(&sent));
        let text = String::from_utf8(encode_json(&sent)).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": 0,\n    \"link\": -1,\n    \"prob\": 0.0,"));
    }

    #[test]
    fn test_xml() {
        let sent = Sentence::from_lattice(LATTICE);
        let xml = String::from_utf8(encode_xml(&sent)).unwrap();
        let expected = "\
<sentence>
  <chunk id=\"0\" link=\"-1\" rel=\"D\" score=\"0.000000\" head=\"0\" func=\"1\">
    <tok id=\"0\" begin=\"0\" end=\"3\" feature=\"名詞,固有名詞,一般,*,*,*,,A&amp;B,A&amp;B,,,不明,A&amp;B,,,,,,,,,,,,\" ne=\"B-ORGANIZATION\">A&amp;B</tok>
    <tok id=\"1\" begin=\"3\" end=\"4\" feature=\"補助記号,括弧開,*,*,*,*,,&quot;&quot;&quot;&quot;,&quot;&quot;&quot;&quot;,,,記号,&quot;&quot;&quot;&quot;,,,,*,*,*,*,*,*,*,*,*\" ne=\"O\">&quot;</tok>
  </chunk>
</sentence>";
        assert_eq!(expected, xml);
    }

    #[test]
    fn test_xml_empty_sentence() {
        let xml = encode_xml(&Sentence::default());
        assert_eq!(b"<sentence/>".as_slice(), xml.as_slice());
    }
}
