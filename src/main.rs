use anyhow::Context;
use clap::Parser;
use std::process;
use wx_decoder::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let result = commands::run(command).context("wxdecode could not complete");

    match result {
        Ok(_stats) => {
            // Output and summary have already been written by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("wxdecode - Aviation Weather Report Decoder");
    println!("==========================================");
    println!();
    println!("Decode METAR, TAF and DATIS text into readable sections or JSON.");
    println!();
    println!("USAGE:");
    println!("    wxdecode <COMMAND> [OPTIONS] [TEXT]...");
    println!();
    println!("COMMANDS:");
    println!("    metar    Decode METAR/SPECI observations");
    println!("    taf      Decode terminal aerodrome forecasts");
    println!("    datis    Decode DATIS broadcasts");
    println!("    auto     Detect each report's kind, then decode it");
    println!("    help     Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Decode one observation:");
    println!("    wxdecode metar KSFO 151756Z 29012G20KT 10SM -RA FEW008 16/11 A2996 RMK AO2");
    println!();
    println!("    # Decode a file of mixed reports separated by blank lines, as JSON:");
    println!("    wxdecode auto --input reports.txt --format json");
    println!();
    println!("    # Decode a broadcast from stdin for a station:");
    println!("    cat atis.txt | wxdecode datis --station KLAX");
    println!();
    println!("For detailed help on any command, use:");
    println!("    wxdecode <COMMAND> --help");
}
