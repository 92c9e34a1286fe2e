//! Integration tests for the `graft` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const GO_MOD: &str = "module github.com/alice/myapp\n\ngo 1.21\n";

const SCHEMA: &str = "syntax = \"proto3\";
package myapp.blog;

import \"google/api/annotations.proto\";
// this line is used by graft scaffolding # 1

service Query {
  // this line is used by graft scaffolding # 2
}

// this line is used by graft scaffolding # 3
";

const COMMAND: &str = "package cli

func GetQueryCmd() *cobra.Command {
\tcmd := &cobra.Command{}
\t// this line is used by graft scaffolding # 1

\treturn cmd
}
";

const SCHEMA_PATH: &str = "proto/myapp/blog/query.proto";
const COMMAND_PATH: &str = "x/blog/client/cli/query.go";

fn app() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "go.mod", GO_MOD);
    write(dir.path(), SCHEMA_PATH, SCHEMA);
    write(dir.path(), COMMAND_PATH, COMMAND);
    dir
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

fn graft(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("graft");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    graft(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffold"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn version_flag() {
    let dir = tempfile::tempdir().unwrap();
    graft(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn scaffold_query_writes_and_patches() {
    let dir = app();

    graft(&dir)
        .args([
            "scaffold", "query", "show_post", "id:uint", "--module", "blog", "--response",
            "post:Post", "--yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ShowPost"))
        .stdout(predicate::str::contains("x/blog/keeper/grpc_query_show_post.go"));

    let schema = read(dir.path(), SCHEMA_PATH);
    assert!(schema.contains("rpc ShowPost(QueryShowPostRequest) returns (QueryShowPostResponse)"));
    assert!(schema.contains("/alice/myapp/blog/show_post/{id}"));
    assert!(schema.contains("import \"myapp/blog/post.proto\";"));
    assert!(schema.contains("// this line is used by graft scaffolding # 2"));

    let command = read(dir.path(), COMMAND_PATH);
    assert!(command.contains("cmd.AddCommand(CmdShowPost())"));

    let handler = read(dir.path(), "x/blog/keeper/grpc_query_show_post.go");
    assert!(handler.contains("github.com/alice/myapp/x/blog/types"));
    assert!(dir.path().join("x/blog/client/cli/query_show_post.go").exists());
}

#[test]
fn paginated_query_adds_page_fields_and_import() {
    let dir = app();

    graft(&dir)
        .args(["s", "q", "list_post", "-m", "blog", "--paginated", "-y"])
        .assert()
        .success();

    let schema = read(dir.path(), SCHEMA_PATH);
    assert!(schema.contains("cosmos.base.query.v1beta1.PageRequest pagination = 1;"));
    assert!(schema.contains("cosmos.base.query.v1beta1.PageResponse pagination = 1;"));
    assert!(schema.contains("import \"cosmos/base/query/v1beta1/pagination.proto\";"));

    let command = read(dir.path(), "x/blog/client/cli/query_list_post.go");
    assert!(command.contains("pageReq, err := client.ReadPageRequest(cmd.Flags())"));
    assert!(command.contains("Pagination: pageReq,"));
    assert!(command.contains("flags.AddPaginationFlagsToCmd(cmd, \"list-posts\")"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = app();

    graft(&dir)
        .args(["scaffold", "query", "show_post", "id:uint", "--module", "blog", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains(SCHEMA_PATH))
        .stdout(predicate::str::contains("+ x/blog/client/cli/query_show_post.go"));

    assert_eq!(read(dir.path(), SCHEMA_PATH), SCHEMA);
    assert_eq!(read(dir.path(), COMMAND_PATH), COMMAND);
    assert!(!dir.path().join("x/blog/keeper").exists());
}

#[test]
fn dry_run_json_is_parseable() {
    let dir = app();

    let out = graft(&dir)
        .args([
            "--output-format", "json", "scaffold", "query", "show_post", "-m", "blog",
            "--dry-run",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["command"], "scaffold");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["modified"][0], SCHEMA_PATH);
    assert_eq!(value["modified"][1], COMMAND_PATH);
    assert_eq!(value["created"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_marker_exits_3_and_touches_nothing() {
    let dir = app();
    write(dir.path(), COMMAND_PATH, "package cli\n");

    graft(&dir)
        .args(["scaffold", "query", "show_post", "--module", "blog", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("command-registration"));

    assert_eq!(read(dir.path(), SCHEMA_PATH), SCHEMA);
    assert!(!dir.path().join("x/blog/keeper").exists());
}

#[test]
fn unknown_field_type_exits_2() {
    let dir = app();

    graft(&dir)
        .args(["scaffold", "query", "show_post", "id:float", "--module", "blog", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("float"));

    assert_eq!(read(dir.path(), SCHEMA_PATH), SCHEMA);
}

#[test]
fn hyphenated_name_is_rejected_before_any_write() {
    let dir = app();

    graft(&dir)
        .args(["scaffold", "query", "show-post", "--module", "blog", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("show-post"));

    assert_eq!(read(dir.path(), SCHEMA_PATH), SCHEMA);
    assert_eq!(read(dir.path(), COMMAND_PATH), COMMAND);
}

#[test]
fn second_run_of_same_query_conflicts() {
    let dir = app();
    let args = ["scaffold", "query", "show_post", "--module", "blog", "--yes"];

    graft(&dir).args(args).assert().success();
    let schema = read(dir.path(), SCHEMA_PATH);

    graft(&dir).args(args).assert().code(2);
    assert_eq!(read(dir.path(), SCHEMA_PATH), schema);
}

#[test]
fn missing_go_mod_suggests_module_path() {
    let dir = app();
    fs::remove_file(dir.path().join("go.mod")).unwrap();

    graft(&dir)
        .args(["scaffold", "query", "show_post", "--module", "blog", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--module-path"));
}

#[test]
fn module_path_flag_skips_go_mod() {
    let dir = app();
    fs::remove_file(dir.path().join("go.mod")).unwrap();

    graft(&dir)
        .args([
            "scaffold", "query", "show_post", "--module", "blog", "--module-path",
            "github.com/alice/myapp", "--yes",
        ])
        .assert()
        .success();
}

#[test]
fn module_falls_back_to_config_default() {
    let dir = app();
    write(dir.path(), "graft.toml", "[defaults]\nmodule = \"blog\"\n");

    graft(&dir)
        .args(["--config", "graft.toml", "scaffold", "query", "show_post", "--yes"])
        .assert()
        .success();

    assert!(read(dir.path(), COMMAND_PATH).contains("CmdShowPost()"));
}

#[test]
fn missing_config_file_exits_4() {
    let dir = tempfile::tempdir().unwrap();

    graft(&dir)
        .args(["--config", "nope.toml", "templates"])
        .assert()
        .code(4);
}

#[test]
fn templates_lists_embedded_bundle() {
    let dir = tempfile::tempdir().unwrap();

    graft(&dir)
        .args(["templates", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "x/{{MODULE_NAME}}/client/cli/query_{{OPERATION_NAME_SNAKE}}.go",
        ))
        .stdout(predicate::str::contains(
            "x/{{MODULE_NAME}}/keeper/grpc_query_{{OPERATION_NAME_SNAKE}}.go",
        ));
}

#[test]
fn config_get_reads_file_value() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "graft.toml", "[layout]\ngroup = \"queries\"\n");

    graft(&dir)
        .args(["--config", "graft.toml", "config", "get", "layout.group"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layout.group = \"queries\""));
}

#[test]
fn init_local_writes_loadable_config() {
    let dir = tempfile::tempdir().unwrap();

    graft(&dir).args(["init", "--local"]).assert().success();

    let written = read(dir.path(), ".graft.toml");
    assert!(written.contains("[layout]"));

    graft(&dir)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"));
}

#[test]
fn no_color_env_accepts_any_value() {
    let dir = tempfile::tempdir().unwrap();

    for value in ["1", "true", "yes", "0", ""] {
        graft(&dir)
            .env("NO_COLOR", value)
            .args(["config", "get", "output.format"])
            .assert()
            .success();
    }
}

#[test]
fn shell_completions() {
    let dir = tempfile::tempdir().unwrap();

    graft(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graft"));
}

#[test]
fn quiet_scaffold_prints_nothing() {
    let dir = app();

    graft(&dir)
        .args(["-q", "scaffold", "query", "show_post", "--module", "blog", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
