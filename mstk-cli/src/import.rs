use mstk::{Project, export};

use mstk_cli::validation::{ValidationContext, validate_context};

/// Run the import command: read the project's Android `strings.xml` files and
/// write them out as a spreadsheet.
pub fn run_import_command(project_root: String, config: String, output: String) {
    let context = ValidationContext::new()
        .with_project_root(&project_root)
        .with_config_file(&config)
        .with_output_file(&output);
    if let Err(e) = validate_context(&context) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let project = match Project::load(&project_root, &config) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let resources = match project.import_android() {
        Ok(resources) => resources,
        Err(e) => {
            eprintln!("Error reading Android resources: {}", e);
            std::process::exit(1);
        }
    };

    tracing::debug!(resources = resources.len(), "imported Android resources");
    let languages = project.config().languages();
    if let Err(e) = export::write_csv_file(
        &output,
        &resources,
        project.config().key_column(),
        &languages,
    ) {
        eprintln!("Error writing to {}: {}", output, e);
        std::process::exit(1);
    }

    println!(
        "✅ Exported {} resource(s) in {} language(s) to {}",
        resources.len(),
        languages.len(),
        output
    );
}
