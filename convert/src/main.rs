//! 係り受け解析結果を変換するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだラティス形式の解析結果を文ごとに
//! デコードし、指定された出力形式(json、xml、lattice)で出力します。
//! `--cabocha` で解析器のコマンドを指定した場合は、標準入力の各行を1文として
//! 解析器に渡し、その結果を変換します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use kakariuke::line::Line;
use kakariuke::{Analyzer, CommandEngine, Sentence, decode_sentence};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Json,
    Xml,
    Lattice,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"json"、"xml"、"lattice"のいずれか）
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `OutputMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "lattice" => Ok(Self::Lattice),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "convert", about = "Converts dependency parses into JSON or XML")]
struct Args {
    /// Output mode. Choices are json, xml, and lattice.
    #[clap(short = 'O', long, default_value = "json")]
    output_mode: OutputMode,

    /// Parser command. If given, each input line is parsed as a sentence.
    #[clap(short = 'c', long)]
    cabocha: Option<PathBuf>,

    /// Extra argument passed to the parser command. Can be repeated.
    #[clap(short = 'a', long = "cabocha-arg", allow_hyphen_values = true)]
    cabocha_args: Vec<String>,

    /// Exits with an error if any sentence has decoding issues.
    #[clap(long)]
    strict: bool,
}

/// 1文分の結果を出力します。
fn write_sentence<W>(
    out: &mut W,
    mode: &OutputMode,
    lattice: &str,
    sentence: &Sentence,
) -> Result<(), Box<dyn Error>>
where
    W: Write,
{
    match mode {
        OutputMode::Json => {
            out.write_all(&sentence.to_json()?)?;
            out.write_all(b"\n")?;
        }
        OutputMode::Xml => {
            out.write_all(&sentence.to_xml()?)?;
            out.write_all(b"\n")?;
        }
        OutputMode::Lattice => {
            out.write_all(lattice.as_bytes())?;
            if !lattice.ends_with('\n') {
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// メイン関数
///
/// 標準入力を文ごとに読み込んでデコードし、指定された形式で結果を
/// 標準出力に出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let analyzer = args.cabocha.as_ref().map(|program| {
        let engine = CommandEngine::new(program).args(args.cabocha_args.iter().cloned());
        Analyzer::new(engine)
    });

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let mut num_issues = 0;
    let mut buf = String::new();

    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        let lattice = if let Some(analyzer) = &analyzer {
            if line.is_empty() {
                continue;
            }
            analyzer.parse_to_lattice_string(&line)?
        } else {
            let eos = Line::classify(&line) == Line::EndOfSentence;
            buf.push_str(&line);
            buf.push('\n');
            if !eos {
                continue;
            }
            let lattice = std::mem::take(&mut buf);
            // Blank lines between sentences.
            if lattice.trim().is_empty() {
                continue;
            }
            lattice
        };

        let decoded = decode_sentence(&lattice);
        num_issues += decoded.issues.len();
        write_sentence(&mut out, &args.output_mode, &lattice, &decoded.sentence)?;
        if is_tty {
            out.flush()?;
        }
    }

    if !buf.trim().is_empty() {
        log::warn!("[convert] Input ended without EOS");
        let decoded = decode_sentence(&buf);
        num_issues += decoded.issues.len();
        write_sentence(&mut out, &args.output_mode, &buf, &decoded.sentence)?;
    }
    out.flush()?;

    if num_issues != 0 {
        log::info!("[convert] {num_issues} issues found");
        if args.strict {
            return Err(format!("{num_issues} decoding issues found").into());
        }
    }

    Ok(())
}
