// src/main.rs
// Example command-line application for ESA Reader

use std::env;
use std::process;
use esa_reader::EsaFile;

fn print_usage() {
    eprintln!("Usage: esa_reader <command> <trace_file> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  info <file>              Display trace file information");
    eprintln!("  extract <file> <trace>   Extract one trace column (1-3) to stdout");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  esa_reader info TRACE924.CSV");
    eprintln!("  esa_reader extract TRACE924.CSV 1 > trace1.txt");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];
    let input_file = &args[2];

    // Load the trace file
    let mut esa = EsaFile::new();
    if let Err(e) = esa.load_file(input_file) {
        eprintln!("Error loading trace file '{}': {}", input_file, e);
        process::exit(1);
    }

    match command.as_str() {
        "info" => {
            print_file_info(&esa);
        }

        "extract" => {
            if args.len() < 4 {
                eprintln!("Error: Missing trace number argument");
                print_usage();
                process::exit(1);
            }

            let trace_num: u32 = match args[3].parse() {
                Ok(n) => n,
                Err(_) => {
                    eprintln!("Error: Invalid trace number '{}'", args[3]);
                    process::exit(1);
                }
            };

            match esa.get_trace(trace_num) {
                Some(trace_data) => {
                    println!("# Trace {} from {}", trace_num, input_file);
                    println!(
                        "# Frequency ({}), Amplitude ({})",
                        esa.trace.freq_units, esa.trace.trace1_units
                    );

                    for (freq, value) in esa.trace.frequency.iter().zip(trace_data) {
                        println!("{:.6e}, {:.6e}", freq, value);
                    }
                }
                None => {
                    eprintln!(
                        "Error: Trace {} not found (valid trace numbers are 1-3)",
                        trace_num
                    );
                    process::exit(1);
                }
            }
        }

        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_file_info(esa: &EsaFile) {
    println!("ESA Trace File Information");
    println!("==========================");
    println!();
    println!("File: {}", esa.file_path);
    println!("Original filename: {}", esa.trace.original_filename);
    if let Some(stamp) = &esa.trace.timestamp {
        println!("Captured: {}", stamp);
    }
    if !esa.trace.title.is_empty() {
        println!("Title: {}", esa.trace.title);
    }
    println!();

    println!("Instrument:");
    println!("  Model: {}", esa.trace.model);
    println!("  Serial number: {}", esa.trace.serial_num);
    println!();

    println!("Sweep Parameters:");
    println!(
        "  Center frequency: {} {}",
        esa.trace.center_freq, esa.trace.center_freq_units.0
    );
    println!("  Span: {} {}", esa.trace.span, esa.trace.span_units.0);
    println!("  RBW: {} {}", esa.trace.rbw, esa.trace.rbw_units.0);
    println!("  VBW: {} {}", esa.trace.vbw, esa.trace.vbw_units.0);
    println!(
        "  Reference level: {} {}",
        esa.trace.ref_level, esa.trace.ref_level_units.0
    );
    println!(
        "  Sweep time: {} {}",
        esa.trace.sweep_time, esa.trace.sweep_time_units.0
    );
    println!("  Points: {}", esa.trace.num_points);
    println!();

    // Show statistics for each trace column
    println!("Trace Statistics:");
    for i in 1..=3 {
        if let Some(trace) = esa.get_trace(i) {
            if trace.is_empty() {
                continue;
            }
            let min = trace.iter().fold(f64::INFINITY, |a, &b| a.min(b));
            let max = trace.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let avg = trace.iter().sum::<f64>() / trace.len() as f64;

            println!(
                "  Trace {}: min={:.3}, max={:.3}, avg={:.3} {}",
                i, min, max, avg, esa.trace.trace1_units
            );
        }
    }
}
