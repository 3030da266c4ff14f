use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use query_builder_rs::core::logging::{Logger, TracingLogger, init_tracing};
use query_builder_rs::core::parser::{ParserOptions, QueryParser, TokenStream};
use query_builder_rs::core::scanner::{Lexer, Token, TokenKind};
use query_builder_rs::core::semantic_analyzer::SymbolTable;

const DEFAULT_SOURCE_PATH: &str = "test.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    path: String,
    dump_tokens: bool,
    syntax_only: bool,
    verbose: bool,
    show_help: bool,
}

/// Logs every token it hands to the parser, up to the first `EOF`.
struct TokenDump<S> {
    inner: S,
    logger: Option<Arc<dyn Logger>>,
    finished: bool,
}

impl<S: TokenStream> TokenDump<S> {
    fn new(inner: S, logger: Option<Arc<dyn Logger>>) -> Self {
        Self {
            inner,
            logger,
            finished: false,
        }
    }

    /// Dump whatever the parser left unread.
    fn drain(&mut self) {
        if self.logger.is_none() {
            return;
        }
        while !self.finished {
            let _ = self.next_token();
        }
    }
}

impl<S: TokenStream> TokenStream for TokenDump<S> {
    fn next_token(&mut self) -> Token {
        let token = self.inner.next_token();
        if !self.finished {
            if let Some(logger) = &self.logger {
                logger.info(&token.to_string());
            }
            self.finished = token.is(TokenKind::EOF);
        }
        token
    }
}

fn main() {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = run(std::env::args_os(), &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run<I, W, E>(args: I, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return 2;
        }
    };

    if options.show_help {
        if write_usage(out).is_err() {
            return 1;
        }
        return 0;
    }

    init_tracing(options.verbose);
    check_file(&options, Arc::new(TracingLogger), out, err)
}

fn check_file<W, E>(
    options: &CliOptions,
    logger: Arc<dyn Logger>,
    out: &mut W,
    err: &mut E,
) -> i32
where
    W: Write,
    E: Write,
{
    let source = match std::fs::read_to_string(&options.path) {
        Ok(source) => source,
        Err(error) => {
            let _ = writeln!(err, "error: cannot read `{}`: {error}", options.path);
            return 1;
        }
    };

    let parser_options =
        ParserOptions::default().with_validate_symbols(!options.syntax_only);
    let mut symbols = SymbolTable::new();
    let lexer = Lexer::default_for_input(&source, Arc::clone(&logger));
    let dump = options.dump_tokens.then(|| Arc::clone(&logger));
    let mut stream = TokenDump::new(lexer, dump);

    let outcome =
        QueryParser::with_options(&mut stream, &mut symbols, logger, parser_options)
            .parse();
    stream.drain();

    match outcome {
        Ok(summary) => {
            let _ = writeln!(
                out,
                "{}: ok ({} tables, {} relationships, {} queries)",
                options.path, summary.tables, summary.relationships, summary.queries
            );
            0
        }
        Err(error) => {
            let _ = writeln!(err, "{}: {error}", options.path);
            1
        }
    }
}

fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut options = CliOptions {
        path: String::from(DEFAULT_SOURCE_PATH),
        dump_tokens: false,
        syntax_only: false,
        verbose: false,
        show_help: false,
    };
    let mut has_path = false;

    for argument in iter {
        let arg = argument.to_string_lossy();
        match arg.as_ref() {
            "-h" | "--help" => options.show_help = true,
            "--tokens" => options.dump_tokens = true,
            "--syntax-only" => options.syntax_only = true,
            "-v" | "--verbose" => options.verbose = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option `{other}`"));
            }
            other => {
                if has_path {
                    return Err(String::from(
                        "too many positional arguments; expected at most one FILE",
                    ));
                }
                options.path = other.to_owned();
                has_path = true;
            }
        }
    }

    Ok(options)
}

fn write_usage<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Usage: qbc [--tokens] [--syntax-only] [-v|--verbose] [FILE]\n\
         \n\
         Checks a table/relationship/query program. FILE defaults to `test.txt`.\n\
         \n\
         --tokens       log every token before parsing\n\
         --syntax-only  skip table and column resolution\n\
         --verbose      trace every token and production (RUST_LOG overrides)\n"
    )
}
