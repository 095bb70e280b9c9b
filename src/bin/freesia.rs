use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};

use freesia::{FreesiaError, Object, Repl, Value, parse, parse_value, replace_values};

#[derive(Parser)]
#[command(author, version, about = "Freesia template expression engine")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a template file against a context file
    Render {
        template: PathBuf,
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Evaluate a single `#{...}` expression against a context file
    Eval {
        expression: String,
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Start an interactive session
    Repl,
}

fn main() -> Result<(), FreesiaError> {
    let args = Args::parse();
    match args.command.unwrap_or(Command::Repl) {
        Command::Render { template, context } => render(&template, context),
        Command::Eval {
            expression,
            context,
        } => {
            let context = load_context(context)?;
            match parse(&expression)?.get_value(&context) {
                Some(value) => println!("{value}"),
                None => println!("absent"),
            }
            Ok(())
        }
        Command::Repl => {
            let mut repl = Repl::new();
            repl.run()
        }
    }
}

fn render(template: &PathBuf, context: Option<PathBuf>) -> Result<(), FreesiaError> {
    let context = load_context(context)?;
    let text = fs::read_to_string(template)?;
    print!("{}", replace_values(&context, &text));
    Ok(())
}

fn load_context(path: Option<PathBuf>) -> Result<Value, FreesiaError> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(&path)?;
            Ok(parse_value(&source)?)
        }
        None => Ok(Value::object(Object::new())),
    }
}
