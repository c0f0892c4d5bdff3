use anyhow::Result;
use ll1_table::grammar::expression::expression_grammar;

fn print_help() {
    println!("Usage: ll1-table [outputs] [options]");
    println!("outputs (default: trace):");
    println!("  prod: Productions");
    println!("  ff: First and follow");
    println!("  ll1: LL(1) parsing table");
    println!("  trace: One line per parsing table entry");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -s: Fail if two productions claim the same table entry");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn main() -> Result<()> {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "ff", "ll1", "trace"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut strict = false;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-s"].contains(&args[i].as_str()) {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::JSON,
            _ => strict = true,
        }
        i += 1;
    }

    if i < args.len() {
        print_help();
        return Ok(());
    }
    if outputs.is_empty() {
        outputs.push("trace");
    }

    let g = expression_grammar()?;
    let ff = g.calculate_first_follow();
    let table = if strict {
        g.build_ll1_parsing_table_strict(&ff.first, &ff.follow)?
    } else {
        g.build_ll1_parsing_table(&ff.first, &ff.follow)
    };

    for output in outputs {
        match output {
            "prod" => {
                let t = g.to_production_output_vec();
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => t.to_json()?,
                    }
                );
            }
            "ff" => {
                let t = g.to_non_terminal_output_vec(&ff);
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => t.to_json()?,
                    }
                );
            }
            "ll1" => {
                let t = table.to_output(&g);
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => t.to_plaintext(),
                        OutputFormat::LaTeX => t.to_latex(),
                        OutputFormat::JSON => t.to_json()?,
                    }
                );
            }
            _ => {
                println!("Predictive Parsing Table:\n");
                println!("{}", table.to_trace(&g));
            }
        }
    }

    Ok(())
}
