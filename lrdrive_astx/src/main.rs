use std::env;
use std::fs::File;
use std::io::Read;
use std::process;

use lrdrive_astx::context::Context;

pub fn main() {
    let file = match env::args().nth(1) {
        Some(x) => x,
        None => {
            eprintln!("Usage: astx <file>");
            process::exit(2)
        }
    };
    let mut str = String::new();
    if let Err(e) = File::open(&file).and_then(|mut x| x.read_to_string(&mut str)) {
        eprintln!("Cannot read {}: {}", file, e);
        process::exit(2)
    }

    let context = Context::new(str);
    match lrdrive_astx::parse(&context.source) {
        Ok(res) => {
            for diagnostic in res.diagnostics.iter() {
                context.print_error(diagnostic);
            }
            for stmt in res.stmts.iter() {
                println!("{}", stmt);
            }
        },
        Err(e) => {
            context.print_error(&e);
            process::exit(1)
        },
    }
}
