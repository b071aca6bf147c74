// csyn: syntax-check C sources and dump their syntax trees.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ArgParser;
use termcolor::{ColorChoice, StandardStream};

use csyn::{Options, Parser};

#[derive(ArgParser)]
#[command(
    name = "csyn",
    about = "A resynchronizing recursive-descent parser for a C11 subset",
    version
)]
struct Cli {
    /// C source file to parse
    file: PathBuf,

    /// Emit pedantic advisories (e.g. empty statements)
    #[arg(long)]
    pedantic: bool,

    /// Print the syntax tree to stdout after a successful parse
    #[arg(long)]
    dump_ast: bool,

    /// Maximum delimiter nesting depth before parsing fails cleanly
    #[arg(long, default_value_t = 256)]
    max_nesting: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{}': {}", cli.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        pedantic: cli.pedantic,
        max_nesting: cli.max_nesting,
    };

    let mut parser = match Parser::new(&source, options) {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let tree = parser.parse_unit();

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    for diagnostic in parser.diagnostics() {
        if diagnostic.render(&mut stderr).is_err() {
            break;
        }
    }

    if let Some(tree) = tree {
        if cli.dump_ast {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(err) = tree.dump(&mut out, 0) {
                eprintln!("error: cannot write tree: {}", err);
                return ExitCode::FAILURE;
            }
            let _ = out.flush();
        }
    }

    if parser.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
