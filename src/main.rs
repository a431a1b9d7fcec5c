extern crate clap;

use crate::clap::Parser;
use gsmap::cli::*;
use std::io::Write;

pub fn main() {
    let mut args: Vec<String> = std::env::args().collect();
    if args.len() == 1 {
        // no arguments: prompt for a command line, the interactive menu mode
        print!("enter a command (e.g. all-mapping --standard-basis 6): ");
        std::io::stdout().flush().expect("flush stdout");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).expect("read command line");
        args.extend(line.split_whitespace().map(|part| part.to_string()));
    }
    Cli::parse_from(args).run();
}
