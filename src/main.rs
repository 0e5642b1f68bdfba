// ABOUTME: Driver wiring stdin or a file through tokenize, parse, and eval

mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod list;
mod parser;
mod tokenizer;
mod value;

use clap::Parser;
use env::Frame;
use error::EvalError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use value::Value;

/// Scheme-flavored Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "schemer")]
#[command(version = config::VERSION)]
#[command(about = "A Scheme-flavored Lisp interpreter")]
#[command(
    long_about = "Reads a program from standard input (or a file) and prints one line per non-void top-level result"
)]
struct CliArgs {
    /// Program file to run (reads standard input when omitted)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Print the token stream and exit
    #[arg(long = "tokens")]
    tokens: bool,

    /// Print the parsed top-level forms and exit
    #[arg(long = "forms")]
    forms: bool,

    /// Start an interactive line-by-line session
    #[arg(short, long)]
    interactive: bool,
}

fn main() {
    let args = CliArgs::parse();

    if args.interactive {
        run_interactive();
        return;
    }

    let source = match read_source(&args) {
        Ok(source) => source,
        Err(message) => {
            println!("{}", message);
            process::exit(1);
        }
    };

    if let Err(error) = run_program(&source, args.tokens, args.forms) {
        fail(&error);
    }
}

/// The only exit path for failed programs: one diagnostic line on standard
/// output, then the error's status.
fn fail(error: &EvalError) -> ! {
    println!("{}", error);
    process::exit(error.exit_code());
}

fn read_source(args: &CliArgs) -> Result<String, String> {
    match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e)),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("cannot read standard input: {}", e))?;
            Ok(source)
        }
    }
}

/// Runs a whole program: the root frame is seeded once, each top-level form
/// is evaluated in order, and every non-void result prints on its own line.
fn run_program(source: &str, show_tokens: bool, show_forms: bool) -> Result<(), EvalError> {
    let tokens = tokenizer::tokenize(source)?;
    if show_tokens {
        for token in &tokens {
            println!("{}:{}", token, token.type_name());
        }
        return Ok(());
    }

    let forms = parser::parse(&tokens)?;
    if show_forms {
        for form in &forms {
            println!("{}", form);
        }
        return Ok(());
    }

    let root = Frame::root();
    builtins::register_builtins(&root);
    for form in &forms {
        let result = eval::eval(form, &root)?;
        if !matches!(result, Value::Void) {
            println!("{}", result);
        }
    }
    Ok(())
}

fn run_interactive() {
    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_FOOTER);

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            println!("cannot initialize line editor: {}", e);
            process::exit(1);
        }
    };

    let root = Frame::root();
    builtins::register_builtins(&root);

    loop {
        match editor.readline("schemer> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                match run_line(&line, &root) {
                    Ok(results) => {
                        for result in results {
                            println!("=> {}", result);
                        }
                    }
                    Err(error) => fail(&error),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                println!("input error: {}", e);
                process::exit(1);
            }
        }
    }
}

/// Evaluates one line against the persistent session frame.
fn run_line(line: &str, env: &Rc<Frame>) -> Result<Vec<Value>, EvalError> {
    let tokens = tokenizer::tokenize(line)?;
    let forms = parser::parse(&tokens)?;
    let mut results = Vec::new();
    for form in &forms {
        let result = eval::eval(form, env)?;
        if !matches!(result, Value::Void) {
            results.push(result);
        }
    }
    Ok(results)
}
