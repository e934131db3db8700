use std::path::Path;

/// Command line inputs checked before any work starts.
#[derive(Debug, Default)]
pub struct ValidationContext {
    pub project_root: Option<String>,
    pub config_file: Option<String>,
    pub spreadsheet: Option<String>,
    pub output_file: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_root(mut self, root: &str) -> Self {
        self.project_root = Some(root.to_string());
        self
    }

    pub fn with_config_file(mut self, file: &str) -> Self {
        self.config_file = Some(file.to_string());
        self
    }

    pub fn with_spreadsheet(mut self, file: &str) -> Self {
        self.spreadsheet = Some(file.to_string());
        self
    }

    pub fn with_output_file(mut self, file: &str) -> Self {
        self.output_file = Some(file.to_string());
        self
    }
}

/// Validate file path exists and is a regular file
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

pub fn validate_directory(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Directory does not exist: {}", path));
    }

    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    Ok(())
}

/// Spreadsheet exports must be `.csv` or `.tsv`
pub fn validate_spreadsheet(path: &str) -> Result<(), String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" | "tsv" => validate_file_path(path),
        _ => Err(format!(
            "Unsupported spreadsheet extension: {}. Expected: csv, tsv",
            path
        )),
    }
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref root) = context.project_root {
        validate_directory(root).map_err(|e| format!("Project root validation failed: {}", e))?;

        if let Some(ref config) = context.config_file {
            let config_path = Path::new(root).join(config);
            validate_file_path(&config_path.to_string_lossy())
                .map_err(|e| format!("Configuration validation failed: {}", e))?;
        }
    }

    if let Some(ref sheet) = context.spreadsheet {
        validate_spreadsheet(sheet)
            .map_err(|e| format!("Spreadsheet validation failed: {}", e))?;
    }

    if let Some(ref output) = context.output_file {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_spreadsheet_extension() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("strings.csv");
        let xls = dir.path().join("strings.xlsx");
        fs::write(&csv, "type").unwrap();
        fs::write(&xls, "type").unwrap();

        assert!(validate_spreadsheet(csv.to_str().unwrap()).is_ok());
        let err = validate_spreadsheet(xls.to_str().unwrap()).unwrap_err();
        assert!(err.contains("Unsupported spreadsheet extension"));
        assert!(validate_spreadsheet("/no/such/strings.tsv").is_err());
    }

    #[test]
    fn test_validate_context_reports_missing_config() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let context = ValidationContext::new()
            .with_project_root(root)
            .with_config_file("mst.cfg");
        let err = validate_context(&context).unwrap_err();
        assert!(err.starts_with("Configuration validation failed"));

        fs::write(dir.path().join("mst.cfg"), "{}").unwrap();
        assert!(validate_context(&context).is_ok());
    }

    #[test]
    fn test_validate_output_path_creates_parent() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested/out.csv");
        assert!(validate_output_path(output.to_str().unwrap()).is_ok());
        assert!(dir.path().join("nested").is_dir());
        assert!(validate_output_path(dir.path().to_str().unwrap()).is_err());
    }
}
