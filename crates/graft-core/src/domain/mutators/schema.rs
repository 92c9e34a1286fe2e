use crate::domain::{
    entities::{
        common::RelativePath,
        field::{FieldList, PAGINATION_FIELD},
        layout::TargetLayout,
        operation::OperationDescriptor,
        patch::FilePatch,
    },
    error::DomainError,
    imports::import_statement,
    mutators::Mutator,
    value_objects::Marker,
};

const INDENT: &str = "  ";
const PAGE_REQUEST: &str = "cosmos.base.query.v1beta1.PageRequest";
const PAGE_RESPONSE: &str = "cosmos.base.query.v1beta1.PageResponse";
const PAGINATION_IMPORT: &str = "cosmos/base/query/v1beta1/pagination.proto";

/// Adds the RPC, its request/response messages and their imports to the
/// module's schema file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaMutator;

impl SchemaMutator {
    /// `/{appModulePath}/{module}/{op_snake}/{field}...`
    pub fn http_route(op: &OperationDescriptor) -> String {
        let mut route = format!(
            "/{}/{}/{}",
            op.app_module_path(),
            op.module_name(),
            op.name().snake()
        );
        for field in op.request_fields() {
            route.push_str(&format!("/{{{}}}", field.schema_name()));
        }
        route
    }

    /// The service entry, written for a marker indented inside the service
    /// block.
    pub fn rpc_fragment(op: &OperationDescriptor) -> String {
        let name = op.name().upper_camel();
        format!(
            "// Queries a list of {name} items.\n\
             {INDENT}rpc {name}(Query{name}Request) returns (Query{name}Response) {{\n\
             {INDENT}{INDENT}option (google.api.http).get = \"{route}\";\n\
             {INDENT}}}\n\
             \n\
             {INDENT}",
            route = Self::http_route(op),
        )
    }

    pub fn messages_fragment(op: &OperationDescriptor) -> String {
        let name = op.name().upper_camel();
        let request = message_body(op.request_fields(), op.paginated().then_some(PAGE_REQUEST));
        let response = message_body(
            op.response_fields(),
            op.paginated().then_some(PAGE_RESPONSE),
        );
        format!(
            "message Query{name}Request {{\n{request}}}\n\n\
             message Query{name}Response {{\n{response}}}\n\n"
        )
    }

    /// Import statements for every field type that lives in another file,
    /// plus pagination when requested. First-seen order, no repeats.
    pub fn import_statements(op: &OperationDescriptor) -> Vec<String> {
        let mut paths = op
            .request_fields()
            .schema_imports(op.app_name(), op.module_name());
        paths.extend(
            op.response_fields()
                .schema_imports(op.app_name(), op.module_name()),
        );
        if op.paginated() {
            paths.push(PAGINATION_IMPORT.to_string());
        }

        let mut statements: Vec<String> = Vec::with_capacity(paths.len());
        for path in paths {
            let statement = import_statement(&path);
            if !statements.contains(&statement) {
                statements.push(statement);
            }
        }
        statements
    }
}

fn message_body(fields: &FieldList, pagination: Option<&str>) -> String {
    let mut body = String::new();
    for field in fields {
        body.push_str(INDENT);
        body.push_str(&field.schema_declaration());
        body.push('\n');
    }
    if let Some(page_type) = pagination {
        body.push_str(&format!(
            "{INDENT}{page_type} {PAGINATION_FIELD} = {};\n",
            fields.pagination_position()
        ));
    }
    body
}

impl Mutator for SchemaMutator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn target(
        &self,
        layout: &TargetLayout,
        op: &OperationDescriptor,
    ) -> Result<RelativePath, DomainError> {
        layout.schema_path(op)
    }

    fn patch(&self, op: &OperationDescriptor) -> FilePatch {
        FilePatch::new()
            .insert(Marker::SCHEMA_RPC, Self::rpc_fragment(op))
            .imports(Marker::SCHEMA_IMPORTS, Self::import_statements(op))
            .insert(Marker::SCHEMA_MESSAGES, Self::messages_fragment(op))
    }
}
