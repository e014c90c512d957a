//! # Laudo CLI
//!
//! Usage:
//!   laudo report.json -o laudo.pdf
//!   cat report.json | laudo -o laudo.pdf
//!   laudo --instructions report.json     dump the frozen layout as JSON
//!   laudo --example > report.json

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use laudo::LaudoError;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_report_json());
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("  {}", hint);
        }
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), LaudoError> {
    let input = read_input(args)?;

    if args.iter().any(|a| a == "--instructions") {
        let report: laudo::Report = serde_json::from_str(&input)?;
        let layout = laudo::layout_report(&report)?;
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "laudo.pdf".to_string());

    let bytes = laudo::render_json(&input)?;
    fs::write(&output_path, &bytes)?;
    eprintln!("✓ Written {} bytes to {}", bytes.len(), output_path);
    Ok(())
}

/// The first non-flag argument (that is not the `-o` value) is the input
/// file; without one, the report is read from stdin.
fn input_path(args: &[String]) -> Option<String> {
    args.iter()
        .enumerate()
        .skip(1)
        .find(|&(i, a)| !a.starts_with('-') && args[i - 1] != "-o")
        .map(|(_, a)| a.clone())
}

fn read_input(args: &[String]) -> Result<String, LaudoError> {
    match input_path(args) {
        Some(p) => Ok(fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn example_report_json() -> &'static str {
    r#"{
  "metadata": {
    "title": "Laudo Cautelar - VW Golf TSI",
    "author": "AutoVistoria Ltda."
  },
  "title": "Laudo Cautelar Veicular",
  "date": "12/03/2024",
  "protocol": "LC-2024-0117",
  "vehicle": {
    "brand": "Volkswagen",
    "model": "Golf TSI",
    "year": "2019/2020",
    "plate": "BRA2E19",
    "fuel": "Flex",
    "marketValue": "R$ 89.990"
  },
  "synthesis": {
    "repaintLocations": ["para-choque dianteiro", "porta dianteira esquerda"],
    "alignmentIssues": ["capô"],
    "glassReplacements": ["para-brisa"],
    "lowerStructureOk": true,
    "summary": "Veículo com reparos estéticos pontuais, sem comprometimento estrutural. Apto para comercialização.",
    "classification": "Reparo estético"
  },
  "components": [
    { "name": "Para-choque dianteiro", "status": "Repintura", "note": "Pintura fora do padrão de fábrica." },
    { "name": "Longarinas", "status": "Original" },
    { "name": "Para-brisa", "status": "Substituído", "note": "Vidro com gravação divergente da montadora." }
  ]
}"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_report_parses_and_renders() {
        let bytes = laudo::render_json(example_report_json()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_input_path_scan_skips_flags() {
        let args = argv(&["laudo", "--instructions", "relatorio.json"]);
        assert_eq!(input_path(&args).as_deref(), Some("relatorio.json"));

        let args = argv(&["laudo", "relatorio.json", "-o", "out.pdf"]);
        assert_eq!(input_path(&args).as_deref(), Some("relatorio.json"));

        let args = argv(&["laudo", "-o", "out.pdf"]);
        assert_eq!(
            input_path(&args),
            None,
            "-o value must not be mistaken for the input"
        );

        let args = argv(&["laudo"]);
        assert_eq!(input_path(&args), None);
    }
}
