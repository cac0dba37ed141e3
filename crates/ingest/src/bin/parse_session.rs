use std::env;
use std::io::{self, Read};
use std::path::Path;

use ingest::{parse_session_file, parse_session_str};
use watch_core::UsageTotals;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: parse_session <path|->");
        std::process::exit(2);
    }

    let path = &args[1];
    let records = if path == "-" {
        let mut data = String::new();
        io::stdin().read_to_string(&mut data).unwrap_or_else(|err| {
            eprintln!("failed to read stdin: {}", err);
            std::process::exit(1);
        });
        parse_session_str(&data).unwrap_or_else(|err| {
            eprintln!("invalid session log: {}", err);
            std::process::exit(3);
        })
    } else {
        parse_session_file(Path::new(path)).unwrap_or_else(|failure| {
            eprintln!("{}", failure);
            std::process::exit(3);
        })
    };

    let mut totals = UsageTotals::default();
    for record in &records {
        println!(
            "{} {} {} in={} out={} cached={} thoughts={} total={}",
            record.timestamp,
            record.message_id,
            record.model,
            record.usage.input_tokens,
            record.usage.output_tokens,
            record.usage.cached_tokens,
            record.usage.thought_tokens,
            record.usage.total_tokens
        );
        totals.accumulate(&record.usage);
    }

    println!("records {}", records.len());
    println!("input_tokens {}", totals.input_tokens);
    println!("output_tokens {}", totals.output_tokens);
    println!("cached_tokens {}", totals.cached_tokens);
    println!("thought_tokens {}", totals.thought_tokens);
    println!("total_tokens {}", totals.total_tokens);
}
