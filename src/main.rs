//! CLI tool to validate, print and apply env files.

use std::process::{Command, ExitCode};

use dotenv_shells::{
    Basic, DEFAULT_PATH, DecodeOptions, Dotenv, ErrorPolicy, Loader, ProcessEnv, ShellKind,
    format, format_exports, loader,
};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str = "\
Usage: dotenv <command> [options] [files...] [-- program [args...]]

Commands:
  check     Check that env file(s) decode cleanly
  print     Print decoded variables as KEY=VALUE lines
  run       Run a program with the decoded variables added

Options:
  --shell <basic|bash>     Decoder to use (default: basic)
  --skip-invalid           Skip undecodable lines instead of failing
  --quote-aware-comments   Do not start comments inside quotes (basic only)
  --export                 Prefix printed lines with 'export'
  -v, --verbose            Log more (repeatable)

Files default to .env.

Examples:
  dotenv check .env
  dotenv print --export .env.local
  dotenv run .env -- cargo run";

#[derive(Debug, Default)]
struct Options {
    shell: Option<String>,
    skip_invalid: bool,
    quote_aware_comments: bool,
    export: bool,
    verbosity: u8,
    files: Vec<String>,
    program: Vec<String>,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--" => {
                options.program = iter.by_ref().cloned().collect();
            }
            "--shell" => {
                let name = iter.next().ok_or("--shell needs a value")?;
                options.shell = Some(name.clone());
            }
            "--skip-invalid" => options.skip_invalid = true,
            "--quote-aware-comments" => options.quote_aware_comments = true,
            "--export" => options.export = true,
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            flag if flag.starts_with('-') => return Err(format!("unknown option: {flag}")),
            file => options.files.push(file.to_string()),
        }
    }

    if options.files.is_empty() {
        options.files.push(DEFAULT_PATH.to_string());
    }
    Ok(options)
}

fn build_shell(options: &Options) -> Result<ShellKind, String> {
    let decode = DecodeOptions {
        quote_aware_comments: options.quote_aware_comments,
    };
    match options.shell.as_deref() {
        None | Some("basic") => Ok(ShellKind::Basic(Basic::with_options(ProcessEnv, decode))),
        Some(name) => match name.parse::<ShellKind>().map_err(|e| e.to_string())? {
            ShellKind::Bash(_) if options.quote_aware_comments => {
                Err("--quote-aware-comments only applies to --shell basic".to_string())
            }
            shell => Ok(shell),
        },
    }
}

const fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let options = match parse_options(&args[2..]) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    // A logger can only fail to install if one is already set.
    let _ = TermLogger::init(
        level(options.verbosity),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let shell = match build_shell(&options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    let policy = if options.skip_invalid {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };

    match command {
        "check" | "print" | "run" => {}
        _ => {
            eprintln!("Unknown command: {command}");
            return ExitCode::from(2);
        }
    }
    if command == "run" && options.program.is_empty() {
        eprintln!("Error: no program given after '--'");
        return ExitCode::from(2);
    }

    let mut had_error = false;
    let mut collected = Dotenv::new();

    for path in &options.files {
        let vars = match Loader::new()
            .path(path)
            .on_error(policy)
            .read_with(&shell)
        {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "check" => eprintln!("{path}: valid ({} variable(s))", vars.len()),
            "print" => {
                if options.export {
                    print!("{}", format_exports(&vars));
                } else {
                    print!("{}", format(&vars));
                }
            }
            _ => collected.extend(vars.into_entries()),
        }
    }

    if command == "run" {
        if had_error {
            return ExitCode::FAILURE;
        }
        return run(&options.program, &collected);
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(program: &[String], vars: &Dotenv) -> ExitCode {
    for entry in vars {
        if let Err(e) = loader::validate(&entry.key, &entry.value) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    let status = Command::new(&program[0])
        .args(&program[1..])
        .envs(vars.iter().map(|e| (&e.key, &e.value)))
        .status();

    match status {
        Ok(status) => status
            .code()
            .and_then(|code| u8::try_from(code).ok())
            .map_or(ExitCode::FAILURE, ExitCode::from),
        Err(e) => {
            eprintln!("{}: {e}", program[0]);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn defaults_to_dot_env() {
        let options = parse_options(&[]).expect("parse");
        assert_eq!(options.files, vec![DEFAULT_PATH.to_string()]);
        assert!(options.program.is_empty());
    }

    #[test]
    fn program_follows_double_dash() {
        let options = parse_options(&args(&["a.env", "--", "env", "-i"])).expect("parse");
        assert_eq!(options.files, vec!["a.env".to_string()]);
        assert_eq!(options.program, args(&["env", "-i"]));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse_options(&args(&["--nope"])).is_err());
        assert!(parse_options(&args(&["--shell"])).is_err());
    }

    #[test]
    fn quote_aware_basic() {
        let options = parse_options(&args(&["--quote-aware-comments"])).expect("parse");
        let shell = build_shell(&options).expect("shell");
        assert!(matches!(shell, ShellKind::Basic(ref b) if b.options().quote_aware_comments));
    }

    #[test]
    fn quote_aware_bash_is_rejected() {
        let options =
            parse_options(&args(&["--shell", "bash", "--quote-aware-comments"])).expect("parse");
        let err = build_shell(&options).unwrap_err();
        assert!(err.contains("--shell basic"));

        let options = parse_options(&args(&["--shell", "bash"])).expect("parse");
        assert!(matches!(build_shell(&options), Ok(ShellKind::Bash(_))));
    }

    #[test]
    fn unknown_shell() {
        let options = parse_options(&args(&["--shell", "zsh"])).expect("parse");
        assert!(build_shell(&options).is_err());
    }
}
