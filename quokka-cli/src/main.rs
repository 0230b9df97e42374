//! Quokka CLI
//!
//! Parses an HTML file (or an inline string) with every construct
//! materialized, dumps the DOM tree, and prints the document serialized
//! back to markup.

use anyhow::Result;
use quokka_common::warning::clear_warnings;
use quokka_dom::{print_tree, serialize, SaveOptions};
use quokka_html::{parse_with_options, ParseOptions};
use std::env;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: quokka <file.html>");
        eprintln!("       quokka --html '<html>...</html>'");
        std::process::exit(1);
    }

    let html = if args[1] == "--html" {
        if args.len() < 3 {
            eprintln!("Error: --html requires an HTML string argument");
            std::process::exit(1);
        }
        args[2].clone()
    } else {
        fs::read_to_string(&args[1])?
    };

    clear_warnings();
    let (doc, outcome) = parse_with_options(&html, &ParseOptions::full());
    if !outcome.is_ok() {
        eprintln!("Parse stopped: {outcome}");
    }

    println!("=== DOM Tree ===");
    print_tree(&doc, doc.root(), 0);

    println!("\n=== Serialized ===");
    print!("{}", serialize(&doc, &SaveOptions::default()));

    Ok(())
}
