use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tacet::{Pipeline, TacetError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse an input file with a grammar described in BNF")]
struct CommandLine {
    #[arg(required = true, help = "The grammar description file")]
    grammar: PathBuf,
    #[arg(required = true, help = "The input file to parse")]
    input: PathBuf,
    #[arg(short, long, help = "The start symbol of the grammar")]
    start: String,
    #[arg(long, help = "Output the parse table")]
    table: bool,
}

fn run(cli: &CommandLine) -> Result<(), TacetError> {
    let grammar_source = std::fs::read_to_string(&cli.grammar)
        .map_err(|error| TacetError::io(cli.grammar.clone(), error))?;
    let pipeline = Pipeline::for_grammar(&grammar_source, &cli.start)?;

    if cli.table {
        println!("{}", pipeline.table());
    }

    let input_source = std::fs::read_to_string(&cli.input)
        .map_err(|error| TacetError::io(cli.input.clone(), error))?;
    let tree = pipeline.run(&input_source)?;
    ptree::print_tree(&tree).expect("writing to stdout");
    Ok(())
}

fn main() -> ExitCode {
    let cli = CommandLine::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
