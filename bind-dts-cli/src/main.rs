use anyhow::Context;
use anyhow::Result;
use bind_dts::compile_with_options;
use bind_dts::error::CompileError;
use bind_dts::error::CompileFailure;
use bind_dts::parse::parse_source;
use bind_dts::print::PrintOptions;
use bind_dts::CompileOptions;
use bind_dts::SourceFile;
use clap::Parser;
use clap::ValueEnum;
use std::fs;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[command(
  name = "bind-dts",
  version,
  about = "Compile TypeScript declaration files into OCaml bindings"
)]
struct Cli {
  /// Declaration file to compile; omit for stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Spaces per nesting level in the generated bindings.
  #[arg(long, default_value_t = 2)]
  indent: usize,

  /// Omit the generated-file header comment.
  #[arg(long)]
  no_header: bool,

  /// Print the parsed declarations as JSON instead of compiling them.
  #[arg(long)]
  ast: bool,

  /// How a failed compilation is reported on stderr.
  #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
  error_format: ErrorFormat,

  /// Emit JSON tracing events to stderr.
  #[arg(long)]
  trace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ErrorFormat {
  /// `startLine:startCol:endLine:endCol:message`
  Text,
  /// One JSON object with `filename`, `range` and `message`.
  Json,
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .json()
    .with_ansi(false)
    .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
  match path {
    Some(path) => {
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
    None => {
      let mut source = String::new();
      stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
      Ok(source)
    }
  }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
  match path {
    Some(path) => {
      fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }
    None => stdout()
      .write_all(text.as_bytes())
      .context("failed to write stdout"),
  }
}

fn report_failure(format: ErrorFormat, failure: &CompileFailure) -> Result<ExitCode> {
  match format {
    ErrorFormat::Text => eprintln!("{failure}"),
    ErrorFormat::Json => eprintln!("{}", serde_json::to_string(failure)?),
  };
  Ok(ExitCode::FAILURE)
}

fn main() -> ExitCode {
  match try_main() {
    Ok(code) => code,
    Err(err) => {
      eprintln!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

fn try_main() -> Result<ExitCode> {
  let cli = Cli::parse();
  init_tracing(cli.trace);
  let filename = cli
    .input
    .as_ref()
    .map(|p| p.display().to_string())
    .unwrap_or_else(|| "<stdin>".to_string());
  let source = read_input(cli.input.as_deref())?;

  if cli.ast {
    let file = SourceFile::new(filename.as_str(), source.as_str());
    return match parse_source(&file) {
      Ok(program) => {
        let mut json = serde_json::to_string(&program).context("failed to serialize AST")?;
        json.push('\n');
        write_output(cli.output.as_deref(), &json)?;
        Ok(ExitCode::SUCCESS)
      }
      Err(err) => report_failure(
        cli.error_format,
        &CompileFailure::from_error(&filename, &source, CompileError::from(err)),
      ),
    };
  };

  let options = CompileOptions::default().with_print(
    PrintOptions::default()
      .with_indent(cli.indent)
      .with_header(!cli.no_header),
  );
  match compile_with_options(&options, &filename, &source) {
    Ok(out) => {
      write_output(cli.output.as_deref(), &out)?;
      Ok(ExitCode::SUCCESS)
    }
    Err(failure) => report_failure(cli.error_format, &failure),
  }
}
