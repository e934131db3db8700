use mstk::{CsvLoader, Loader, Project};
use serde_json::json;

use mstk_cli::validation::{ValidationContext, validate_context};

/// Options of the `generate` subcommand.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub project_root: String,
    pub config: String,
    pub csv: String,
    pub encoding: Option<String>,
    pub dry_run: bool,
    pub json: bool,
    pub verbose: bool,
}

/// Run the generate command: render every configured language from the
/// spreadsheet and write the resource files.
pub fn run_generate_command(options: GenerateOptions) {
    let context = ValidationContext::new()
        .with_project_root(&options.project_root)
        .with_config_file(&options.config)
        .with_spreadsheet(&options.csv);
    if let Err(e) = validate_context(&context) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let project = match Project::load(&options.project_root, &options.config) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(config = %project.config(), "configuration loaded");
    let mut loader = CsvLoader::new(&options.csv);
    if let Some(label) = &options.encoding {
        loader = match loader.with_encoding_label(label) {
            Ok(loader) => loader,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
    }

    if options.verbose && !options.json {
        print_summary(&project, &loader);
    }

    if options.dry_run {
        run_dry(&project, &loader, options.json);
        return;
    }

    match project.generate(&loader) {
        Ok(report) => {
            if options.json {
                let files: Vec<_> = report
                    .files
                    .iter()
                    .map(|(language, path)| {
                        json!({ "language": language, "path": path.display().to_string() })
                    })
                    .collect();
                let body = json!({
                    "generator": project.config().generator().to_string(),
                    "strings": report.strings,
                    "string_arrays": report.string_arrays,
                    "plurals": report.plurals,
                    "files": files,
                });
                match serde_json::to_string_pretty(&body) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            for (language, path) in &report.files {
                println!(
                    " * Language {}, file: {}, {} strings, {} arrays, {} plurals",
                    language,
                    path.display(),
                    report.strings,
                    report.string_arrays,
                    report.plurals
                );
            }
            println!("✅ Generated {} file(s)", report.files.len());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_summary(project: &Project, loader: &CsvLoader) {
    let config = project.config();
    println!("Project root:  {}", config.root().display());
    println!("Generator:     {}", config.generator());
    println!("Loader:        {}", loader);
    println!("Languages:     {}", config.languages().join(", "));
    println!("ID key:        {}", config.key_column());
    println!("Sorted by key: {}", config.sorted());
}

fn run_dry(project: &Project, loader: &dyn Loader, json_output: bool) {
    let rendered = project
        .load_resources(loader)
        .and_then(|resources| project.render(&resources));
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if json_output {
        let files: Vec<_> = rendered
            .iter()
            .map(|file| {
                json!({
                    "language": file.language,
                    "path": file.path.display().to_string(),
                    "bytes": file.content.len(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&json!({ "dry_run": true, "files": files })) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for file in &rendered {
        println!(
            " * Language {}, file: {} ({} bytes, not written)",
            file.language,
            file.path.display(),
            file.content.len()
        );
    }
}
