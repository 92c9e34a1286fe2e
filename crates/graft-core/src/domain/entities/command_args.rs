//! Go statements the generated query command uses to read its arguments.
//!
//! The command takes one positional argument per request field, in field
//! order. Scalars go through `cast`, coins through the SDK parser, string
//! lists are split on commas, and other lists and messages are read as JSON.
//! Paginated queries also read the page flags into `Pagination`.

use std::collections::BTreeSet;

use crate::domain::{
    entities::{field::Field, naming::pluralize, operation::OperationDescriptor},
    value_objects::FieldKind,
};

const BODY: &str = "\t\t\t";

const IMPORT_CAST: &str = "\"github.com/spf13/cast\"";
const IMPORT_JSON: &str = "\"encoding/json\"";
const IMPORT_STRINGS: &str = "\"strings\"";
const IMPORT_SDK: &str = "sdk \"github.com/cosmos/cosmos-sdk/types\"";

/// Snippets bound into the command template.
///
/// Every snippet is either empty or a run of complete lines, so templates can
/// place them at the start of a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    /// Extra import specs, one per line, sorted.
    pub imports: String,
    /// Statements turning `args[i]` into `req{Field}` variables.
    pub parse: String,
    /// `Field: value,` lines of the request literal.
    pub params: String,
    /// Reads the page request from the command flags.
    pub page_request: String,
    /// Registers the page flags on the command.
    pub page_flags: String,
}

impl CommandArgs {
    pub fn of(op: &OperationDescriptor) -> Self {
        let mut imports = BTreeSet::new();
        let mut args = Self::default();

        for (index, field) in op.request_fields().iter().enumerate() {
            let var = format!("req{}", field.name().upper_camel());
            let (statement, needs) = parse_statement(field, &var, index);
            args.parse.push_str(&statement);
            imports.extend(needs);

            let value = match field.kind() {
                FieldKind::Coin => format!("&{var}"),
                _ => var,
            };
            args.params.push_str(&format!(
                "{BODY}\t{}: {value},\n",
                field.name().upper_camel()
            ));
        }
        if !args.parse.is_empty() {
            args.parse.push('\n');
        }

        if op.paginated() {
            args.page_request = format!(
                "{BODY}pageReq, err := client.ReadPageRequest(cmd.Flags())\n{}\n",
                err_check()
            );
            args.params.push_str(&format!("{BODY}\tPagination: pageReq,\n"));
            args.page_flags = format!(
                "\tflags.AddPaginationFlagsToCmd(cmd, \"{}\")\n",
                pluralize(op.name().kebab())
            );
        }

        args.imports = imports.into_iter().map(|i| format!("\t{i}\n")).collect();
        args
    }
}

/// Statements declaring `var` from `args[index]`, and the imports they use.
fn parse_statement(field: &Field, var: &str, index: usize) -> (String, Vec<&'static str>) {
    let arg = format!("args[{index}]");
    let cast = |func: &str| format!("{BODY}{var}, err := cast.{func}({arg})\n{}", err_check());
    let json = |decl: String, target: String| {
        format!(
            "{BODY}{decl}\n{BODY}if err := json.Unmarshal([]byte({arg}), {target}); err != nil {{\n{BODY}\treturn err\n{BODY}}}\n"
        )
    };

    match field.kind() {
        FieldKind::String => (format!("{BODY}{var} := {arg}\n"), vec![]),
        FieldKind::Bool => (cast("ToBoolE"), vec![IMPORT_CAST]),
        FieldKind::Int => (cast("ToInt32E"), vec![IMPORT_CAST]),
        FieldKind::Uint => (cast("ToUint64E"), vec![IMPORT_CAST]),
        FieldKind::Coin => (
            format!(
                "{BODY}{var}, err := sdk.ParseCoinNormalized({arg})\n{}",
                err_check()
            ),
            vec![IMPORT_SDK],
        ),
        FieldKind::StringList => (
            format!("{BODY}{var} := strings.Split({arg}, \",\")\n"),
            vec![IMPORT_STRINGS],
        ),
        FieldKind::IntList => (
            json(format!("var {var} []int32"), format!("&{var}")),
            vec![IMPORT_JSON],
        ),
        FieldKind::UintList => (
            json(format!("var {var} []uint64"), format!("&{var}")),
            vec![IMPORT_JSON],
        ),
        FieldKind::CoinList => (
            json(format!("var {var} []*sdk.Coin"), format!("&{var}")),
            vec![IMPORT_JSON, IMPORT_SDK],
        ),
        FieldKind::Custom(type_name) => (
            json(format!("{var} := new(types.{type_name})"), var.to_string()),
            vec![IMPORT_JSON],
        ),
    }
}

fn err_check() -> String {
    format!("{BODY}if err != nil {{\n{BODY}\treturn err\n{BODY}}}\n")
}
