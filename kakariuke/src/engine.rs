//! 外部の係り受け解析器との境界
//!
//! 係り受け解析そのものは外部の解析器(CaboCha)が行います。このモジュールは
//! 解析器を呼び出すための [`Engine`] トレイトと、解析器のコマンドを子プロセスとして
//! 実行する [`CommandEngine`] を提供します。

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{ChildStdin, Command, Stdio};
use std::str::FromStr;
use std::thread;

use crate::errors::{KakariError, Result};

/// 解析器の出力形式
///
/// 値はCaboChaの `-f` オプションに渡す番号に対応します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 係り受け木
    Tree,
    /// ラティス形式
    #[default]
    Lattice,
    /// 係り受け木とラティス形式
    TreeLattice,
    /// XML
    Xml,
    /// 出力なし
    None,
}

impl OutputFormat {
    /// CaboChaの出力形式番号を返します。
    pub const fn code(self) -> u8 {
        match self {
            Self::Tree => 0,
            Self::Lattice => 1,
            Self::TreeLattice => 2,
            Self::Xml => 3,
            Self::None => 4,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format {
            "tree" => Ok(Self::Tree),
            "lattice" => Ok(Self::Lattice),
            "tree-lattice" => Ok(Self::TreeLattice),
            "xml" => Ok(Self::Xml),
            "none" => Ok(Self::None),
            _ => Err("Could not parse a format"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tree => "tree",
            Self::Lattice => "lattice",
            Self::TreeLattice => "tree-lattice",
            Self::Xml => "xml",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// 係り受け解析器
///
/// 実装は入力テキストを解析し、指定された形式の文字列を返します。
/// 同じ値を複数のスレッドから使う場合、再入可能であるかどうかは実装が決めます。
pub trait Engine {
    /// テキストを解析し、指定された形式で出力します。
    ///
    /// # 引数
    ///
    /// * `text` - 入力テキスト
    /// * `format` - 出力形式
    fn format_parse(&self, text: &str, format: OutputFormat) -> Result<String>;
}

impl<E> Engine for &E
where
    E: Engine + ?Sized,
{
    fn format_parse(&self, text: &str, format: OutputFormat) -> Result<String> {
        (**self).format_parse(text, format)
    }
}

impl<E> Engine for Box<E>
where
    E: Engine + ?Sized,
{
    fn format_parse(&self, text: &str, format: OutputFormat) -> Result<String> {
        (**self).format_parse(text, format)
    }
}

/// 解析器のコマンドを子プロセスとして実行するエンジン
///
/// 呼び出しごとにプロセスを起動し、入力テキストを標準入力へ書き込み、
/// 標準出力を結果として読み取ります。出力形式は `-f<番号>` として
/// 引数の最後に追加されます。
///
/// ```no_run
/// use kakariuke::engine::{CommandEngine, Engine, OutputFormat};
///
/// let engine = CommandEngine::new("cabocha")
///     .args(["-d", "/usr/lib64/mecab/dic/unidic", "-P", "UNIDIC"]);
/// let lattice = engine.format_parse("未知語", OutputFormat::Lattice)?;
/// # Ok::<(), kakariuke::errors::KakariError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEngine {
    /// 実行するプログラムを指定してエンジンを作成します。
    pub fn new<P>(program: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// 引数を1つ追加します。
    pub fn arg<S>(mut self, arg: S) -> Self
    where
        S: Into<String>,
    {
        self.args.push(arg.into());
        self
    }

    /// 引数を追加します。
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 実行するプログラムを取得します。
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl Engine for CommandEngine {
    fn format_parse(&self, text: &str, format: OutputFormat) -> Result<String> {
        if self.program.as_os_str().is_empty() {
            return Err(KakariError::invalid_argument(
                "program",
                "the parser command must not be empty",
            ));
        }
        log::debug!(
            "[kakariuke] Running {} {:?} -f{}",
            self.program.display(),
            self.args,
            format.code()
        );
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(format!("-f{}", format.code()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is fed from another thread so that a full stdout pipe cannot block us.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|s| {
            let writer = s.spawn(move || write_input(stdin, text));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output?;
        if !output.status.success() {
            return Err(KakariError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match written {
            Ok(Ok(())) => (),
            // The command may exit without reading all of its input.
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => (),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(KakariError::invalid_state(
                    "failed to write the input",
                    "the writer thread panicked",
                ));
            }
        }
        Ok(std::str::from_utf8(&output.stdout)?.to_string())
    }
}

/// 入力テキストを改行で終端して子プロセスの標準入力へ書き込みます。
fn write_input(stdin: Option<ChildStdin>, text: &str) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    stdin.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdin.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_code() {
        assert_eq!(0, OutputFormat::Tree.code());
        assert_eq!(1, OutputFormat::Lattice.code());
        assert_eq!(2, OutputFormat::TreeLattice.code());
        assert_eq!(3, OutputFormat::Xml.code());
        assert_eq!(4, OutputFormat::None.code());
    }

    #[test]
    fn test_format_from_str() {
        for format in [
            OutputFormat::Tree,
            OutputFormat::Lattice,
            OutputFormat::TreeLattice,
            OutputFormat::Xml,
            OutputFormat::None,
        ] {
            assert_eq!(Ok(format), format.to_string().parse());
        }
        assert!("json".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_empty_program() {
        let engine = CommandEngine::new("");
        assert!(matches!(
            engine.format_parse("テスト", OutputFormat::Lattice),
            Err(KakariError::InvalidArgument(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_engine_echo() {
        // `sh -c cat -f1` runs `cat` with `-f1` as `$0`.
        let engine = CommandEngine::new("sh").args(["-c", "cat"]);
        let lattice = "* 0 -1D 0/0 0.000000\n語\t名詞,普通名詞,一般,*,*,*\tO\nEOS";
        let out = engine.format_parse(lattice, OutputFormat::Lattice).unwrap();
        assert_eq!(format!("{lattice}\n"), out);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_engine_large_input() {
        // Larger than the pipe buffers on both sides.
        let text = "あ".repeat(200_000);
        let engine = CommandEngine::new("sh").args(["-c", "cat"]);
        let out = engine.format_parse(&text, OutputFormat::Lattice).unwrap();
        assert_eq!(text.len() + 1, out.len());
        assert!(out.starts_with(&text));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_engine_failure() {
        let engine = CommandEngine::new("sh").args(["-c", "echo broken >&2; exit 3"]);
        match engine.format_parse("x", OutputFormat::Lattice) {
            Err(KakariError::EngineFailed { stderr, .. }) => assert_eq!("broken", stderr),
            r => panic!("unexpected result {r:?}"),
        }
    }
}
