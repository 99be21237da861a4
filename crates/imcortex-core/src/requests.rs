//! Requests addressed to a brain
//!
//! A front end hands a [`BrainRequest`] to every brain; the brain it is
//! addressed to processes it and attaches the outcome.

use imcortex_io::{DataFile, DataFileType, ReadContext, Structure};

use crate::arena::FileId;
use crate::brain::{Brain, BrainId, ReloadAllMode};
use crate::progress::NoProgress;
use crate::spec_file::SpecFile;

/// What a request asks for
#[derive(Debug)]
pub enum BrainRequestKind {
    ReadDataFile {
        file_type: DataFileType,
        structure: Structure,
        path: String,
        mark_modified: bool,
    },
    ReloadDataFile(FileId),
    ReloadAll(ReloadAllMode),
    AddDataFile(Box<dyn DataFile>),
    DeleteDataFile(FileId),
    /// Load the files selected in a spec file
    ReadSpecFileDataFiles(SpecFile),
}

/// Outcome of a processed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestResult {
    FileLoaded(FileId),
    FileNames(Vec<String>),
    Deleted(bool),
    Completed,
}

/// A request with its destination and, once processed, its outcome
#[derive(Debug)]
pub struct BrainRequest {
    brain_id: BrainId,
    kind: Option<BrainRequestKind>,
    /// Credentials and fetcher for this request only
    context: ReadContext,
    processed: bool,
    result: Option<RequestResult>,
    error_lines: Vec<String>,
}

impl BrainRequest {
    pub fn new(brain_id: BrainId, kind: BrainRequestKind) -> Self {
        Self {
            brain_id,
            kind: Some(kind),
            context: ReadContext::default(),
            processed: false,
            result: None,
            error_lines: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: ReadContext) -> Self {
        self.context = context;
        self
    }

    pub fn brain_id(&self) -> BrainId {
        self.brain_id
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn result(&self) -> Option<&RequestResult> {
        self.result.as_ref()
    }

    pub fn error_lines(&self) -> &[String] {
        &self.error_lines
    }

    pub fn is_success(&self) -> bool {
        self.processed && self.error_lines.is_empty()
    }

    fn finish(&mut self, outcome: Result<RequestResult, Vec<String>>) {
        self.processed = true;
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(lines) => self.error_lines = lines,
        }
    }
}

impl Brain {
    /// Process a request addressed to this brain. Returns false, leaving
    /// the request untouched, when it is for another brain or was already
    /// processed.
    pub fn process_request(&mut self, request: &mut BrainRequest) -> bool {
        if request.brain_id != self.id() {
            return false;
        }
        let Some(kind) = request.kind.take() else {
            return false;
        };
        tracing::debug!("Processing request {:?} for brain {}", kind, self.id());

        let ctx = request.context.clone();
        let outcome = match kind {
            BrainRequestKind::ReadDataFile {
                file_type,
                structure,
                path,
                mark_modified,
            } => self
                .read_data_file(file_type, structure, &path, mark_modified, &ctx)
                .map(RequestResult::FileLoaded)
                .map_err(|e| vec![e.to_string()]),
            BrainRequestKind::ReloadDataFile(id) => self
                .reload_data_file(id, &ctx)
                .map(RequestResult::FileLoaded)
                .map_err(|e| vec![e.to_string()]),
            BrainRequestKind::ReloadAll(mode) => self
                .reload_all_files(mode, &ctx)
                .map(RequestResult::FileNames)
                .map_err(|e| e.lines()),
            BrainRequestKind::AddDataFile(file) => self
                .add_data_file(file)
                .map(RequestResult::FileLoaded)
                .map_err(|e| vec![e.to_string()]),
            BrainRequestKind::DeleteDataFile(id) => {
                Ok(RequestResult::Deleted(self.remove_and_delete_data_file(id)))
            }
            BrainRequestKind::ReadSpecFileDataFiles(spec) => self
                .load_files_selected_in_spec_file(spec, &ctx, &mut NoProgress)
                .map(|_| RequestResult::Completed)
                .map_err(|e| e.lines()),
        };
        request.finish(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::CortexPreferences;
    use imcortex_io::files::surface::SurfaceContent;
    use imcortex_io::files::SurfaceFile;

    fn surface() -> Box<dyn DataFile> {
        Box::new(SurfaceFile::with_content(
            "/d/lh.midthickness.surf.gii",
            SurfaceContent {
                structure: Structure::CortexLeft,
                number_of_nodes: 10,
                ..Default::default()
            },
        ))
    }

    #[test]
    fn test_requests_for_other_brains_are_ignored() {
        let mut brain = Brain::new(CortexPreferences::default());
        let mut request = BrainRequest::new(BrainId::new(), BrainRequestKind::AddDataFile(surface()));
        assert!(!brain.process_request(&mut request));
        assert!(!request.is_processed());
        assert_eq!(brain.number_of_files(), 0);
    }

    #[test]
    fn test_add_then_delete_through_requests() {
        let mut brain = Brain::new(CortexPreferences::default());
        let mut add = BrainRequest::new(brain.id(), BrainRequestKind::AddDataFile(surface()));
        assert!(brain.process_request(&mut add));
        assert!(add.is_success());
        let Some(RequestResult::FileLoaded(id)) = add.result().cloned() else {
            panic!("expected a loaded file, got {:?}", add.result());
        };
        assert!(!brain.process_request(&mut add));

        let mut delete = BrainRequest::new(brain.id(), BrainRequestKind::DeleteDataFile(id));
        assert!(brain.process_request(&mut delete));
        assert_eq!(delete.result(), Some(&RequestResult::Deleted(true)));
        assert_eq!(brain.number_of_files(), 0);
    }

    #[test]
    fn test_failed_read_reports_error_lines() {
        let mut brain = Brain::new(CortexPreferences::default());
        let mut request = BrainRequest::new(
            brain.id(),
            BrainRequestKind::ReadDataFile {
                file_type: DataFileType::Surface,
                structure: Structure::CortexLeft,
                path: "/nonexistent/lh.surf.gii".to_string(),
                mark_modified: false,
            },
        );
        assert!(brain.process_request(&mut request));
        assert!(request.is_processed());
        assert!(!request.is_success());
        assert_eq!(request.error_lines().len(), 1);
        assert!(request.error_lines()[0].contains("/nonexistent/lh.surf.gii"));
    }
}
