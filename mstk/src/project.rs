//! Ties configuration, data source, parser and generator together.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    error::Error,
    importer::AndroidImporter,
    loader::Loader,
    resources::{Resource, ResourceSet},
    spreadsheet::Spreadsheet,
};

/// What a generation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub strings: usize,
    pub string_arrays: usize,
    pub plurals: usize,
    /// `(language, path)` of every written file, ordered by language.
    pub files: Vec<(String, PathBuf)>,
}

impl GenerationReport {
    pub fn resource_count(&self) -> usize {
        self.strings + self.string_arrays + self.plurals
    }
}

/// A generated document and its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub language: String,
    pub path: PathBuf,
    pub content: String,
}

impl RenderedFile {
    /// Writes the document, creating missing parent directories.
    pub fn write(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &self.content)?;
        Ok(())
    }
}

/// A project rooted at a directory holding its configuration file.
#[derive(Debug, Clone)]
pub struct Project {
    config: Config,
}

impl Project {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads `config_file` from `root`.
    pub fn load<P: AsRef<Path>>(root: P, config_file: &str) -> Result<Self, Error> {
        Ok(Self::new(Config::load(root, config_file)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the sorted or unsorted resource pool from `loader`.
    pub fn load_resources(&self, loader: &dyn Loader) -> Result<ResourceSet, Error> {
        tracing::debug!(source = %loader, "loading resources");
        let rows = loader.load()?;
        let languages = self.config.languages();
        let sheet = Spreadsheet::new(self.config.key_column(), rows, languages.as_slice())?;
        let resources: ResourceSet = sheet.extract_all()?.into_iter().collect();
        Ok(resources.with_sorted(self.config.sorted()))
    }

    /// Renders the document of every configured language without writing it.
    pub fn render(&self, resources: &ResourceSet) -> Result<Vec<RenderedFile>, Error> {
        let mut generator = self
            .config
            .generator()
            .create_with(self.config.empty_strings());

        let mut rendered = Vec::new();
        for language in self.config.languages() {
            let path = self.config.resource_file_path(&language)?;
            let content = generator.generate(resources, &language)?;
            rendered.push(RenderedFile {
                language,
                path,
                content,
            });
        }
        Ok(rendered)
    }

    /// Renders every configured language, then writes the files.
    ///
    /// Nothing is written unless every language rendered.
    pub fn generate(&self, loader: &dyn Loader) -> Result<GenerationReport, Error> {
        let resources = self.load_resources(loader)?;
        let rendered = self.render(&resources)?;

        let mut report = GenerationReport {
            strings: resources.strings().len(),
            string_arrays: resources.arrays().len(),
            plurals: resources.plurals().len(),
            files: Vec::with_capacity(rendered.len()),
        };
        for file in rendered {
            file.write()?;
            tracing::info!(
                language = %file.language,
                path = %file.path.display(),
                generator = %self.config.generator(),
                "wrote resource file"
            );
            report.files.push((file.language, file.path));
        }
        Ok(report)
    }

    /// Reads the configured per-language files as Android `strings.xml`.
    pub fn import_android(&self) -> Result<Vec<Resource>, Error> {
        let mut importer = AndroidImporter::new();
        for language in self.config.languages() {
            let path = self.config.resource_file_path(&language)?;
            importer.add_file(language, path);
        }
        importer.import()
    }
}
