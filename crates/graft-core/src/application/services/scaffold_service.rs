//! Scaffold Service - main application orchestrator.
//!
//! Scaffolding an operation is split in two:
//! 1. [`ScaffoldService::plan`] renders the new files and applies every
//!    mutator to the current content of its target file, all in memory
//! 2. [`ScaffoldService::apply`] writes the plan: patched files first, in
//!    mutator order, then new files
//!
//! Every marker, conflict and render error is raised during planning, so a
//! failing scaffold leaves the tree untouched. A write failure during apply
//! leaves earlier writes in place; there is no rollback.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{EventSink, Filesystem, TemplateRenderer},
    },
    domain::{
        DomainValidator as validator, Event, FileToWrite, Mutator, OperationDescriptor,
        RelativePath, RenderContext, TargetLayout, TemplateBundle, events::icons,
        query_mutators,
    },
    error::{GraftError, GraftResult},
};

/// A target file after every step of its mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    pub mutator: &'static str,
    pub path: RelativePath,
    pub content: String,
    /// Bytes the patch adds to the file.
    pub added: usize,
}

/// Everything a scaffold run will write, computed without writing.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub run_id: Uuid,
    pub operation: String,
    pub root: PathBuf,
    pub bundle: String,
    pub fingerprint: String,
    pub modified: Vec<PlannedEdit>,
    pub created: Vec<FileToWrite>,
}

impl ScaffoldPlan {
    pub fn file_count(&self) -> usize {
        self.modified.len() + self.created.len()
    }
}

/// What a completed run wrote, relative to the app root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub run_id: Uuid,
    pub operation: String,
    pub root: PathBuf,
    pub modified: Vec<String>,
    pub created: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    bundle: Arc<TemplateBundle>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    events: Box<dyn EventSink>,
    mutators: Vec<Box<dyn Mutator>>,
    layout: TargetLayout,
}

impl ScaffoldService {
    /// Create a scaffold service for queries with the default layout.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use graft_core::application::{ScaffoldService, ports::*};
    ///
    /// let service = ScaffoldService::new(
    ///     bundle,     // Arc<TemplateBundle>, loaded once
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     events,     // impl EventSink
    /// );
    /// ```
    pub fn new(
        bundle: Arc<TemplateBundle>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        events: Box<dyn EventSink>,
    ) -> Self {
        Self {
            bundle,
            renderer,
            filesystem,
            events,
            mutators: query_mutators(),
            layout: TargetLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: TargetLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_mutators(mut self, mutators: Vec<Box<dyn Mutator>>) -> Self {
        self.mutators = mutators;
        self
    }

    pub fn bundle(&self) -> &TemplateBundle {
        &self.bundle
    }

    /// Plan and apply in one go.
    pub fn scaffold(&self, op: &OperationDescriptor) -> GraftResult<ScaffoldReport> {
        let plan = self.plan(op)?;
        self.apply(&plan)
    }

    /// Compute every write for `op` against the current tree.
    ///
    /// Reads each target file once. Nothing is written.
    #[instrument(skip_all, fields(operation = %op, run_id = field::Empty))]
    pub fn plan(&self, op: &OperationDescriptor) -> GraftResult<ScaffoldPlan> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", field::display(run_id));

        validator::validate_operation(op)?;
        validator::validate_bundle(&self.bundle)?;

        self.events.send(Event::start(format!(
            "Planning {} in {}",
            op.name().upper_camel(),
            op.app_path().display()
        )));

        let root = op.app_path().to_path_buf();

        let mut modified = Vec::with_capacity(self.mutators.len());
        for mutator in &self.mutators {
            let path = mutator.target(&self.layout, op)?;
            let full = root.join(path.as_path());

            if !self.filesystem.exists(&full) {
                return Err(self.fail(ApplicationError::TargetMissing { path: full }.into()));
            }

            let current = self.filesystem.read_to_string(&full)?;
            let patch = mutator.patch(op);
            let content = patch
                .apply(&current)
                .map_err(|e| self.fail(e.at(path.as_str()).into()))?;

            debug!(
                mutator = mutator.name(),
                path = %path,
                steps = patch.steps().len(),
                "Patch planned"
            );

            modified.push(PlannedEdit {
                mutator: mutator.name(),
                added: content.len().saturating_sub(current.len()),
                path,
                content,
            });
        }

        let context = RenderContext::bind(op);
        let structure = self
            .renderer
            .render(&self.bundle, &context, &root)
            .map_err(|e| self.fail(e))?;
        validator::validate_project_structure(&structure).map_err(|e| self.fail(e.into()))?;

        for file in structure.files() {
            let full = root.join(file.path.as_path());
            if self.filesystem.exists(&full) {
                return Err(self.fail(ApplicationError::Conflict { path: full }.into()));
            }
        }
        let created: Vec<FileToWrite> = structure.files().cloned().collect();

        info!(
            modified = modified.len(),
            created = created.len(),
            fingerprint = %self.bundle.fingerprint(),
            "Scaffold planned"
        );

        Ok(ScaffoldPlan {
            run_id,
            operation: op.to_string(),
            root,
            bundle: self.bundle.name().to_string(),
            fingerprint: self.bundle.fingerprint().to_string(),
            modified,
            created,
        })
    }

    /// Write a plan to disk.
    #[instrument(skip_all, fields(run_id = %plan.run_id, operation = %plan.operation))]
    pub fn apply(&self, plan: &ScaffoldPlan) -> GraftResult<ScaffoldReport> {
        for edit in &plan.modified {
            let full = plan.root.join(edit.path.as_path());
            self.write(&full, &edit.content)?;
            self.events.send(
                Event::update(format!("modify {}", edit.path)).with_icon(icons::MODIFIED),
            );
        }

        for file in &plan.created {
            let full = plan.root.join(file.path.as_path());
            if let Some(parent) = full.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.write(&full, &file.content)?;
            self.events
                .send(Event::update(format!("create {}", file.path)).with_icon(icons::CREATED));
        }

        info!(files = plan.file_count(), "Scaffold completed successfully");
        self.events.send(
            Event::finish(format!("{} scaffolded", plan.operation)).with_icon(icons::OK),
        );

        Ok(ScaffoldReport {
            run_id: plan.run_id,
            operation: plan.operation.clone(),
            root: plan.root.clone(),
            modified: plan.modified.iter().map(|e| e.path.to_string()).collect(),
            created: plan.created.iter().map(|f| f.path.to_string()).collect(),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write(&self, path: &std::path::Path, content: &str) -> GraftResult<()> {
        self.filesystem.write_file(path, content).inspect_err(|e| {
            warn!(error = %e, path = %path.display(), "Write failed; earlier writes are kept");
        })
    }

    fn fail(&self, error: GraftError) -> GraftError {
        self.events
            .send(Event::finish(error.to_string()).with_icon(icons::NOT_OK));
        error
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::{MockEventSink, MockFilesystem, NoopEvents};
    use crate::domain::{FieldList, ProjectStructure, TemplateAsset};

    const SCHEMA: &str = "import \"gogoproto/gogo.proto\";\n\
        // this line is used by graft scaffolding # 1\n\
        service Query {\n\
        \x20 // this line is used by graft scaffolding # 2\n\
        }\n\
        // this line is used by graft scaffolding # 3\n";

    const COMMAND: &str = "\tcmd.AddCommand(CmdParams())\n\
        \t// this line is used by graft scaffolding # 1\n\
        \treturn cmd\n";

    /// Renders each asset path verbatim with the source as content.
    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            bundle: &TemplateBundle,
            context: &RenderContext,
            output_root: &Path,
        ) -> GraftResult<ProjectStructure> {
            let mut structure = ProjectStructure::new(output_root);
            for asset in bundle.assets() {
                let path = context.render(asset.path().as_str(), "path")?;
                structure.add_file(RelativePath::try_new(path)?, asset.source().to_string());
            }
            Ok(structure)
        }
    }

    fn bundle() -> Arc<TemplateBundle> {
        Arc::new(
            TemplateBundle::new(
                "test",
                [TemplateAsset::embedded(
                    "x/{{MODULE_NAME}}/keeper/grpc_query_{{OPERATION_NAME_SNAKE}}.go",
                    "package keeper\n",
                )
                .unwrap()],
            )
            .unwrap(),
        )
    }

    fn op() -> OperationDescriptor {
        OperationDescriptor::builder()
            .name("Post")
            .module("blog")
            .app("myapp")
            .app_path("/app")
            .request_fields(FieldList::parse(&["id:int"], "request").unwrap())
            .paginated(true)
            .build()
            .unwrap()
    }

    /// A mock filesystem over a fixed set of files that records writes.
    fn mock_fs(files: HashMap<PathBuf, String>, writes: Arc<Mutex<Vec<PathBuf>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        let known = files.clone();
        fs.expect_exists().returning(move |p| known.contains_key(p));
        fs.expect_read_to_string().returning(move |p| {
            files.get(p).cloned().ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "missing".into(),
                }
                .into()
            })
        });
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(move |p, _| {
            writes.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        fs
    }

    fn app_files() -> HashMap<PathBuf, String> {
        HashMap::from([
            (PathBuf::from("/app/proto/myapp/blog/query.proto"), SCHEMA.to_string()),
            (PathBuf::from("/app/x/blog/client/cli/query.go"), COMMAND.to_string()),
        ])
    }

    fn service(fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(
            bundle(),
            Box::new(EchoRenderer),
            Box::new(fs),
            Box::new(NoopEvents),
        )
    }

    #[test]
    fn plan_patches_both_targets_and_renders_new_files() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let svc = service(mock_fs(app_files(), writes.clone()));

        let plan = svc.plan(&op()).unwrap();

        assert_eq!(plan.modified.len(), 2);
        assert_eq!(plan.modified[0].mutator, "schema");
        assert!(plan.modified[0].content.contains("rpc Post("));
        assert!(plan.modified[1].content.contains("cmd.AddCommand(CmdPost())"));
        assert_eq!(
            plan.created[0].path.as_str(),
            "x/blog/keeper/grpc_query_post.go"
        );
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn apply_writes_patched_files_before_new_ones() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let svc = service(mock_fs(app_files(), writes.clone()));

        let report = svc.scaffold(&op()).unwrap();

        assert_eq!(
            *writes.lock().unwrap(),
            vec![
                PathBuf::from("/app/proto/myapp/blog/query.proto"),
                PathBuf::from("/app/x/blog/client/cli/query.go"),
                PathBuf::from("/app/x/blog/keeper/grpc_query_post.go"),
            ]
        );
        assert_eq!(report.created, vec!["x/blog/keeper/grpc_query_post.go"]);
        assert_eq!(report.modified.len(), 2);
    }

    #[test]
    fn missing_marker_aborts_before_any_write() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let mut files = app_files();
        files.insert(
            PathBuf::from("/app/x/blog/client/cli/query.go"),
            "func GetQueryCmd() {}\n".into(),
        );
        let svc = service(mock_fs(files, writes.clone()));

        let err = svc.scaffold(&op()).unwrap_err();

        assert_eq!(err.category(), crate::error::ErrorCategory::MarkerNotFound);
        assert!(err.to_string().contains("x/blog/client/cli/query.go"));
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn existing_new_file_is_a_conflict() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let mut files = app_files();
        files.insert(
            PathBuf::from("/app/x/blog/keeper/grpc_query_post.go"),
            "package keeper\n".into(),
        );
        let svc = service(mock_fs(files, writes.clone()));

        let err = svc.scaffold(&op()).unwrap_err();

        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::Conflict { .. })
        ));
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_target_file_is_reported() {
        let mut files = app_files();
        files.remove(Path::new("/app/proto/myapp/blog/query.proto"));
        let svc = service(mock_fs(files, Arc::new(Mutex::new(Vec::new()))));

        let err = svc.plan(&op()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::TargetMissing { .. })
        ));
    }

    #[test]
    fn events_bracket_a_successful_run() {
        let mut events = MockEventSink::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        events
            .expect_send()
            .returning(move |e| sink.lock().unwrap().push(e));

        let svc = ScaffoldService::new(
            bundle(),
            Box::new(EchoRenderer),
            Box::new(mock_fs(app_files(), Arc::new(Mutex::new(Vec::new())))),
            Box::new(events),
        );
        svc.scaffold(&op()).unwrap();

        let seen = seen.lock().unwrap();
        assert!(seen.first().unwrap().in_progress());
        assert!(!seen.last().unwrap().in_progress());
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn custom_layout_changes_targets() {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/app/proto/myapp/blog/read.proto"), SCHEMA.to_string());
        files.insert(PathBuf::from("/app/x/blog/client/cli/read.go"), COMMAND.to_string());
        let svc = service(mock_fs(files, Arc::new(Mutex::new(Vec::new())))).with_layout(
            TargetLayout {
                group: "read".into(),
                ..TargetLayout::default()
            },
        );

        assert!(svc.plan(&op()).is_ok());
    }
}
