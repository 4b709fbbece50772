//! esfront - Command Line Entry Point

use anyhow::{Context, bail};
use esfront::{ExportOptions, Settings, Style, SyntaxError, TransformOptions};
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: esfront <parse|transform|ast> [options] [FILE]

Reads FILE, or standard input when FILE is absent.

options:
    --minify          print without layout whitespace (transform)
    --no-transform    print the tree as parsed (transform)
    --target NAME     es2015 (default) or es5, which also lowers arrows (transform)
    --config FILE     read transform options from a JSON file
    --pretty          indent the JSON document (ast)
    --legacy-spans    zero the spans of container nodes (ast)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Parse,
    Transform,
    Ast,
}

#[derive(Debug)]
struct Invocation {
    command: Command,
    transform: TransformOptions,
    export: ExportOptions,
    input: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Invocation> {
    let command = match args.next().as_deref() {
        Some("parse") => Command::Parse,
        Some("transform") => Command::Transform,
        Some("ast") => Command::Ast,
        Some(other) => bail!("unknown command `{}`\n\n{}", other, USAGE),
        None => bail!("{}", USAGE),
    };

    let mut invocation = Invocation {
        command,
        transform: TransformOptions::default(),
        export: ExportOptions::default(),
        input: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--minify" => invocation.transform.style = Style::Minified,
            "--no-transform" => invocation.transform.settings = Settings::no_transform(),
            "--target" => {
                let name = args.next().context("--target needs a name")?;
                invocation.transform.settings = Settings::for_target(&name)
                    .with_context(|| format!("unknown target `{}`", name))?;
            }
            "--pretty" => invocation.export.pretty = true,
            "--legacy-spans" => invocation.export.legacy_container_spans = true,
            "--config" => {
                let path = args.next().context("--config needs a file")?;
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config {}", path))?;
                invocation.transform = serde_json::from_str(&text)
                    .with_context(|| format!("invalid config {}", path))?;
            }
            "-h" | "--help" => bail!("{}", USAGE),
            flag if flag.starts_with("--") => bail!("unknown option `{}`\n\n{}", flag, USAGE),
            _ if invocation.input.is_some() => bail!("more than one input file\n\n{}", USAGE),
            _ => invocation.input = Some(arg),
        }
    }

    Ok(invocation)
}

fn read_source(input: Option<&str>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path)),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok(source)
        }
    }
}

fn run(invocation: &Invocation, source: &str) -> Result<String, SyntaxError> {
    match invocation.command {
        Command::Parse => esfront::parse(source),
        Command::Transform => esfront::transform_with(source, &invocation.transform),
        Command::Ast => esfront::ast_with(source, &invocation.export),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let invocation = parse_args(std::env::args().skip(1))?;
    tracing::debug!(?invocation, "Starting");

    let source = read_source(invocation.input.as_deref())?;
    match run(&invocation, &source) {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind, start = err.start, "Syntax error");
            eprint!("{}", err.render(&source));
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let invocation = parse_args(args(&["transform", "--minify", "in.js"])).unwrap();
        assert_eq!(invocation.command, Command::Transform);
        assert_eq!(invocation.transform.style, Style::Minified);
        assert_eq!(invocation.input.as_deref(), Some("in.js"));

        let invocation = parse_args(args(&["ast", "--pretty", "--legacy-spans"])).unwrap();
        assert!(invocation.export.pretty);
        assert!(invocation.export.legacy_container_spans);
        assert!(invocation.input.is_none());
    }

    #[test]
    fn test_parse_args_rejects() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["eval"])).is_err());
        assert!(parse_args(args(&["parse", "--bogus"])).is_err());
        assert!(parse_args(args(&["parse", "a.js", "b.js"])).is_err());
        assert!(parse_args(args(&["transform", "--config"])).is_err());
        assert!(parse_args(args(&["transform", "--target", "es3"])).is_err());
    }

    #[test]
    fn test_run_commands() {
        let transform = parse_args(args(&["transform", "--minify"])).unwrap();
        assert_eq!(run(&transform, "2 ** 2").unwrap(), "Math.pow(2,2);");

        let keep = parse_args(args(&["transform", "--minify", "--no-transform"])).unwrap();
        assert_eq!(run(&keep, "2 ** 2").unwrap(), "2**2;");

        let es5 = parse_args(args(&["transform", "--minify", "--target", "es5"])).unwrap();
        assert_eq!(run(&es5, "f = x => x ** 2").unwrap(), "f=function(x){return Math.pow(x,2);};");

        let parse = parse_args(args(&["parse"])).unwrap();
        assert!(run(&parse, "foo(").is_err());
    }
}
