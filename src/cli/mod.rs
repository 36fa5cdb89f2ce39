//! CLI module for schemalens

mod args;

pub use args::Args;

use crate::analysis::{find_inconsistencies, Analyzer};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{file_structure, folder_overview, GraphvizRenderer, ReportWriter};
use crate::parser::PythonParser;
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    let config = Config::load_or_default(Path::new("schemalens.toml"));

    if !args.path.exists() {
        return Err(Error::PathNotFound(args.path));
    }

    std::fs::create_dir_all(&config.output.directory)?;

    println!("Analyzing models in {}", args.path.display());

    // Extraction and aggregation: a malformed file aborts the whole run here
    let mut analyzer = Analyzer::new(config.clone())?;
    let analysis = analyzer.analyze(&args.path)?;

    let report = find_inconsistencies(&analysis.models);

    println!(
        "Analysis complete: {} files, {} classes ({} base models), {} nested references",
        analysis.files.len(),
        analysis.models.len(),
        analysis.models.base_model_count(),
        analysis.models.nested_references().len()
    );

    if report.is_empty() {
        println!("No attribute inconsistencies found");
    } else {
        println!("Found {} inconsistent attribute name(s):", report.len());
        for (name, summary) in &report.summaries {
            let types: Vec<&str> = summary.types.iter().map(|s| s.as_str()).collect();
            println!("  {}: {{{}}}", name, types.join(", "));
        }
    }

    // Report document; a missing template skips this step only
    let writer = ReportWriter::new(&config.report);
    match writer.write(&report, &config.output.directory)? {
        Some(path) => println!("Report written to {}", path.display()),
        None => println!(
            "Report template '{}' not found, skipping report",
            config.report.template.display()
        ),
    }

    let renderer = GraphvizRenderer::new(config.output.diagram_format);

    // Folder-wide model diagram
    let overview = folder_overview(&analysis.models, &report);
    match renderer.render(&overview, &config.output.directory) {
        Ok(path) => println!("Model diagram saved to {}", path.display()),
        Err(e) => eprintln!("{}", e),
    }

    // Per-file structure diagrams re-read each file; parse and render
    // failures are reported per file and do not stop the remaining files
    let mut parser = PythonParser::new()?;
    for path in &analysis.files {
        match parser.parse_file(path) {
            Ok(module) => {
                let diagram = file_structure(&module);
                match renderer.render(&diagram, &config.output.directory) {
                    Ok(out) => println!("File diagram saved to {}", out.display()),
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(e) => eprintln!("Skipping diagram for {}: {}", path.display(), e),
        }
    }

    Ok(())
}
