use pdb_reader::{decode_with_options, DecodeOptions};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-pdb-file> [--encoding <LABEL>]", args[0]);
        std::process::exit(1);
    }

    let pdb_path = &args[1];
    let mut options = DecodeOptions::default();
    // Parse --encoding argument
    if let Some(idx) = args.iter().position(|arg| arg == "--encoding") {
        match args.get(idx + 1) {
            Some(label) => options = options.with_encoding(label),
            None => {
                eprintln!("ERROR: --encoding flag requires an argument.");
                std::process::exit(1);
            }
        }
    }

    let buffer = match fs::read(pdb_path) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}", pdb_path);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    match decode_with_options(&buffer, &options) {
        Ok(db) => {
            println!("{}", db);
            println!("{}", "=".repeat(60));

            let header = &db.header;
            println!("  Version: {}", header.format_version);
            if let Some(created) = header.created {
                println!("  Created: {}", created);
            }
            if let Some(modified) = header.modified {
                println!("  Modified: {}", modified);
            }
            if let Some(backed_up) = header.backed_up {
                println!("  Backed up: {}", backed_up);
            }
            println!("  Attributes: {:?}", header.attributes);
            println!();

            for (i, entry) in db.iter().enumerate() {
                let category = entry.category.as_deref().unwrap_or("?");
                let deleted = if entry.attributes.deleted { " (deleted)" } else { "" };
                match &entry.record {
                    Ok(record) => println!("  {}. [{}]{} {}", i + 1, category, deleted, record),
                    Err(e) => println!("  {}. [{}]{} ERROR: {}", i + 1, category, deleted, e),
                }
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to decode Palm database");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
