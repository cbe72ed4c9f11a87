use std::{env, fs::read_to_string, path::Path, process, rc::Rc, time::Instant};

use kolon::{
    display_error,
    lexer::lexer::tokenize,
    parser::parser::{parse, ParserConfig},
};

const USAGE: &str = "usage: kolon <file> [--testing] [--print]";

struct Args {
    file_path: String,
    config: ParserConfig,
    print: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut file_path = None;
    let mut config = ParserConfig::default();
    let mut print = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--testing" => config.testing = true,
            "--print" => print = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{}`", flag)),
            _ if file_path.is_some() => return Err(String::from("only one file can be given")),
            _ => file_path = Some(arg.clone()),
        }
    }

    let file_path = file_path.ok_or_else(|| String::from("no file given"))?;

    Ok(Args {
        file_path,
        config,
        print,
    })
}

fn main() {
    let args = parse_args().unwrap_or_else(|message| {
        eprintln!("{}\n{}", message, USAGE);
        process::exit(2);
    });

    let file_name = Path::new(&args.file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file_path.clone());

    let file_contents = read_to_string(&args.file_path).unwrap_or_else(|error| {
        eprintln!("Failed to read `{}`: {}", args.file_path, error);
        process::exit(1);
    });

    let start = Instant::now();

    let tokens = match tokenize(file_contents.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &args.file_path, &file_contents);
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (_, program) = parse(tokens, Rc::new(file_name), args.config);

    println!("Parsed in {:?}", parse_start.elapsed());

    let program = match program {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &args.file_path, &file_contents);
            process::exit(1);
        }
    };

    println!("Total time: {:?}", start.elapsed());

    if args.print {
        print!("{}", program);
    }
}
