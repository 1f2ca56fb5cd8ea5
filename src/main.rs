use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use clap::Parser;

use pyrite::options::{EcmaVersion, OptionsBuilder, SourceType};
use pyrite::parse_error::format_localized_parse_errors;
use pyrite::{parse_source, print_program, tokenize, Source, Token};

#[derive(Parser)]
#[command(about)]
struct Args {
    /// Print the AST to the console
    #[arg(long, default_value_t = false)]
    print_ast: bool,

    /// Print the token stream instead of parsing
    #[arg(long, default_value_t = false)]
    tokens: bool,

    /// Parse as module instead of script
    #[arg(long, default_value_t = false)]
    module: bool,

    /// Collect recoverable errors instead of stopping at the first one
    #[arg(long, default_value_t = false)]
    tolerant: bool,

    /// Edition of the language to parse (3, 5, or 6 through 13)
    #[arg(long)]
    ecma_version: Option<u32>,

    file: String,
}

fn main_impl() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let ecma_version = match args.ecma_version {
        None => EcmaVersion::Latest,
        Some(num) => EcmaVersion::from_num(num)
            .ok_or_else(|| format!("unsupported ecma version {}", num))?,
    };

    let source_type = if args.module { SourceType::Module } else { SourceType::Script };

    let source = Rc::new(Source::new_from_file(&args.file)?);

    let mut builder = OptionsBuilder::new()
        .ecma_version(ecma_version)
        .source_type(source_type)
        .allow_hash_bang(true);

    if args.tokens {
        let options = builder.build();
        for lexed in tokenize(&source, &options) {
            let (token, loc) = lexed?;
            println!("{}..{}: {}", loc.start, loc.end, token);
            if token == Token::Eof {
                break;
            }
        }
        return Ok(());
    }

    let recoverable_errors = Rc::new(RefCell::new(vec![]));
    if args.tolerant {
        let sink = recoverable_errors.clone();
        builder = builder.on_recoverable_error(Box::new(move |error| {
            sink.borrow_mut().push(error);
        }));
    }

    let program = parse_source(&source, builder.build())?;

    for line in format_localized_parse_errors(&recoverable_errors.borrow()).lines() {
        eprintln!("SyntaxError: {}: {}", source.file_path, line);
    }

    if args.print_ast {
        println!("{}", print_program(&program, &source));
    }

    Ok(())
}

/// Wrapper to pretty print errors
fn main() {
    match main_impl() {
        Ok(_) => (),
        Err(err) => {
            eprintln!("SyntaxError: {}", err);
            std::process::exit(1);
        }
    }
}
