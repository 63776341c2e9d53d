use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::DiffConfiguration;
use crate::diff::engine::{CompareError, DiffEngine};
use crate::diff::result::DiffResult;
use crate::reader::{DocumentSource, SourceError, XmlDocument};

/// Compares a control document against a test document.
///
/// Both documents are read through [`XmlReaderSource`](crate::XmlReaderSource)
/// with the same [`DiffConfiguration`]. The comparison runs once; later calls
/// to [`compare`](Self::compare) return the stored result, or
/// [`CompareError::Poisoned`] if the first run failed.
pub struct XmlDiff {
    engine: DiffEngine<DocumentSource>,
    configuration: DiffConfiguration,
}

impl XmlDiff {
    pub fn new(control: impl Into<XmlDocument>, test: impl Into<XmlDocument>) -> Self {
        Self::with_configuration(control, test, DiffConfiguration::default())
    }

    pub fn with_configuration(
        control: impl Into<XmlDocument>,
        test: impl Into<XmlDocument>,
        configuration: DiffConfiguration,
    ) -> Self {
        let control = control.into();
        let test = test.into();
        let engine = DiffEngine::new(
            control.source(&configuration),
            test.source(&configuration),
        );
        Self {
            engine,
            configuration,
        }
    }

    /// Compare a document with itself. Always equal, nothing is read.
    pub fn same(document: impl Into<XmlDocument>, configuration: DiffConfiguration) -> Self {
        let document = document.into();
        Self::with_configuration(document.clone(), document, configuration)
    }

    /// Read both files. Paths that resolve to the same file are compared as
    /// one document.
    pub fn from_files(
        control: &Path,
        test: &Path,
        configuration: DiffConfiguration,
    ) -> Result<Self, SourceError> {
        let control_doc = XmlDocument::from_file(control)?;

        if fs::canonicalize(control)? == fs::canonicalize(test)? {
            debug!(path = %control.display(), "control and test are the same file");
            return Ok(Self::same(control_doc, configuration));
        }

        let test_doc = XmlDocument::from_file(test)?;
        Ok(Self::with_configuration(control_doc, test_doc, configuration))
    }

    pub fn compare(&mut self) -> Result<&DiffResult, CompareError<SourceError>> {
        self.engine.compare()
    }

    pub fn description(&self) -> &str {
        &self.configuration.description
    }
}

/// Compare two XML strings and return an owned result.
pub fn compare_str(
    control: &str,
    test: &str,
    configuration: &DiffConfiguration,
) -> Result<DiffResult, CompareError<SourceError>> {
    let mut diff = XmlDiff::with_configuration(control, test, configuration.clone());
    let result = diff.compare()?.clone();
    Ok(result)
}

/// Compare two XML files and return an owned result.
pub fn compare_files(
    control: &Path,
    test: &Path,
    configuration: &DiffConfiguration,
) -> Result<DiffResult, CompareError<SourceError>> {
    let mut diff = XmlDiff::from_files(control, test, configuration.clone())?;
    let result = diff.compare()?.clone();
    Ok(result)
}
