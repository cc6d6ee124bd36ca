use crate::{Options, repair_to_string, repair_to_string_with_log};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Options:\n\
           -o, --output FILE           Write output to FILE (default stdout)\n\
               --in-place              Overwrite INPUT file\n\
               --pretty                Pretty-print output\n\
               --no-ensure-ascii       Re-encode with non-ASCII left literal\n\
               --omit-empty            Drop keys with missing values\n\
               --omit-incomplete-strings\n\
                                       Drop keys whose string value was cut off\n\
               --no-fence              Disable fenced code block extraction\n\
               --log                   Print repair decisions to stderr\n\
           -h, --help                  Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    in_place: bool,
    pretty: bool,
    log: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmend".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut in_place = false;
    let mut pretty = false;
    let mut log = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                output = Some(args[i].clone());
            }
            "--in-place" => {
                in_place = true;
            }
            "--pretty" => {
                pretty = true;
            }
            "--no-ensure-ascii" => {
                opts.ensure_ascii = false;
            }
            "--omit-empty" => {
                opts.omit_empty_values = true;
            }
            "--omit-incomplete-strings" => {
                opts.omit_incomplete_strings = true;
            }
            "--no-fence" => {
                opts.fenced_code_blocks = false;
            }
            "--log" => {
                opts.logging = true;
                log = true;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    let mode = CliMode {
        input,
        output,
        in_place,
        pretty,
        log,
    };
    (opts, mode)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    let content = match &mode.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let repaired = if mode.log {
        let (out, entries) = repair_to_string_with_log(&content, &opts)?;
        for e in &entries {
            eprintln!("{}: {} | {}", e.position, e.message, e.context);
        }
        out
    } else {
        repair_to_string(&content, &opts)?
    };

    let rendered = if mode.pretty && !repaired.is_empty() {
        let v: serde_json::Value = serde_json::from_str(&repaired)
            .map_err(|e| crate::RepairError::from_serde("parse", e))?;
        serde_json::to_string_pretty(&v)?
    } else {
        repaired
    };

    if mode.in_place {
        let inp = mode.input.as_ref().ok_or("--in-place requires INPUT file")?;
        fs::write(inp, rendered)?;
        return Ok(());
    }

    let mut out_writer: Box<dyn Write> = if let Some(ref o) = mode.output {
        Box::new(BufWriter::new(File::create(o)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    out_writer.write_all(rendered.as_bytes())?;
    out_writer.flush()?;
    Ok(())
}
