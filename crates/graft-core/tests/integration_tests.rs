//! Integration tests for graft-core.
//!
//! Drive `ScaffoldService` end to end over an in-memory tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use graft_core::application::{ApplicationError, NoopEvents};
use graft_core::domain::RelativePath;
use graft_core::prelude::*;

const SCHEMA: &str = r#"syntax = "proto3";
package myapp.blog;

import "gogoproto/gogo.proto";
import "google/api/annotations.proto";
// this line is used by graft scaffolding # 1

option go_package = "github.com/alice/myapp/x/blog/types";

service Query {
  // this line is used by graft scaffolding # 2
}

// this line is used by graft scaffolding # 3
"#;

const COMMAND: &str = "package cli

func GetQueryCmd(queryRoute string) *cobra.Command {
\tcmd := &cobra.Command{Use: \"blog\"}

\tcmd.AddCommand(CmdQueryParams())
\t// this line is used by graft scaffolding # 1

\treturn cmd
}
";

#[derive(Clone, Default)]
struct Tree(Arc<Mutex<BTreeMap<PathBuf, String>>>);

impl Tree {
    fn with(self, path: &str, content: &str) -> Self {
        self.0
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    fn get(&self, path: &str) -> String {
        self.0.lock().unwrap().get(Path::new(path)).cloned().unwrap()
    }
}

impl Filesystem for Tree {
    fn create_dir_all(&self, _path: &Path) -> GraftResult<()> {
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> GraftResult<String> {
        self.0.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.lock().unwrap().contains_key(path)
    }
}

struct Strict;

impl TemplateRenderer for Strict {
    fn render(
        &self,
        bundle: &TemplateBundle,
        context: &RenderContext,
        output_root: &Path,
    ) -> GraftResult<ProjectStructure> {
        let mut out = ProjectStructure::new(output_root);
        for asset in bundle.assets() {
            let name = asset.path().as_str();
            let path = context.render(name, name)?;
            out.add_file(RelativePath::try_new(path)?, context.render(asset.source(), name)?);
        }
        Ok(out)
    }
}

fn bundle() -> Arc<TemplateBundle> {
    Arc::new(
        TemplateBundle::new(
            "query",
            [TemplateAsset::embedded(
                "x/{{MODULE_NAME}}/keeper/grpc_query_{{OPERATION_NAME_SNAKE}}.go",
                "package keeper\n\n// {{OPERATION_NAME_PASCAL}} paginated={{PAGINATED}}\n",
            )
            .unwrap()],
        )
        .unwrap(),
    )
}

fn app() -> Tree {
    Tree::default()
        .with("/app/proto/myapp/blog/query.proto", SCHEMA)
        .with("/app/x/blog/client/cli/query.go", COMMAND)
}

fn post() -> OperationDescriptor {
    OperationDescriptor::builder()
        .name("Post")
        .module("blog")
        .app("myapp")
        .module_path("github.com/alice/myapp")
        .app_path("/app")
        .request_fields(FieldList::parse(&["id:int"], "request").unwrap())
        .response_fields(FieldList::parse(&["title:string"], "response").unwrap())
        .paginated(true)
        .build()
        .unwrap()
}

fn service(tree: &Tree) -> ScaffoldService {
    ScaffoldService::new(
        bundle(),
        Box::new(Strict),
        Box::new(tree.clone()),
        Box::new(NoopEvents),
    )
}

#[test]
fn scaffolds_paginated_post_query() {
    let tree = app();
    let report = service(&tree).scaffold(&post()).unwrap();

    let schema = tree.get("/app/proto/myapp/blog/query.proto");
    assert_eq!(schema.matches("rpc Post(QueryPostRequest)").count(), 1);
    assert!(schema.contains("option (google.api.http).get = \"/alice/myapp/blog/post/{id}\";"));
    assert!(schema.contains(
        "message QueryPostRequest {\n  int32 id = 1;\n  cosmos.base.query.v1beta1.PageRequest pagination = 2;\n}"
    ));
    assert!(schema.contains(
        "message QueryPostResponse {\n  string title = 1;\n  cosmos.base.query.v1beta1.PageResponse pagination = 2;\n}"
    ));
    for import in schema.lines().filter(|l| l.starts_with("import ")) {
        assert_eq!(schema.matches(import).count(), 1);
    }
    assert!(schema.contains("import \"cosmos/base/query/v1beta1/pagination.proto\";"));

    let command = tree.get("/app/x/blog/client/cli/query.go");
    assert_eq!(command.matches("cmd.AddCommand(CmdPost())").count(), 1);

    let handler = tree.get("/app/x/blog/keeper/grpc_query_post.go");
    assert!(handler.contains("// Post paginated=true"));

    assert_eq!(report.created, vec!["x/blog/keeper/grpc_query_post.go"]);
}

#[test]
fn second_query_keeps_first_and_shares_imports() {
    let tree = app();
    service(&tree).scaffold(&post()).unwrap();

    let comments = OperationDescriptor::builder()
        .name("ListComments")
        .module("blog")
        .app("myapp")
        .app_path("/app")
        .paginated(true)
        .build()
        .unwrap();
    service(&tree).scaffold(&comments).unwrap();

    let schema = tree.get("/app/proto/myapp/blog/query.proto");
    assert!(schema.find("rpc Post(").unwrap() < schema.find("rpc ListComments(").unwrap());
    assert_eq!(
        schema
            .matches("import \"cosmos/base/query/v1beta1/pagination.proto\";")
            .count(),
        1
    );
    for n in 1..=3 {
        let marker = format!("// this line is used by graft scaffolding # {n}");
        assert_eq!(schema.matches(&marker).count(), 1);
    }

    let command = tree.get("/app/x/blog/client/cli/query.go");
    assert!(
        command.find("CmdPost()").unwrap() < command.find("CmdListComments()").unwrap()
    );
}

#[test]
fn rescaffolding_same_query_conflicts_without_writing() {
    let tree = app();
    service(&tree).scaffold(&post()).unwrap();
    let before = tree.get("/app/proto/myapp/blog/query.proto");

    let err = service(&tree).scaffold(&post()).unwrap_err();
    assert!(err.to_string().contains("grpc_query_post.go"));
    assert_eq!(tree.get("/app/proto/myapp/blog/query.proto"), before);
}

#[test]
fn unknown_field_type_is_rejected_up_front() {
    let err = FieldList::parse(&["id:float"], "request").unwrap_err();
    assert!(err.to_string().contains("float"));
}

#[test]
fn dry_run_plan_matches_applied_content() {
    let tree = app();
    let svc = service(&tree);
    let plan = svc.plan(&post()).unwrap();

    assert_eq!(
        tree.get("/app/proto/myapp/blog/query.proto"),
        SCHEMA,
        "planning must not write"
    );

    svc.apply(&plan).unwrap();
    assert_eq!(
        tree.get("/app/proto/myapp/blog/query.proto"),
        plan.modified[0].content
    );
}
