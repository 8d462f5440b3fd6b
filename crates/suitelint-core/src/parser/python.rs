//! Python parser using tree-sitter.

use std::collections::BTreeSet;
use std::path::Path;

use tree_sitter::{Language, Node, Parser as TsParser};

use super::ParseError;
use crate::domain::{Class, Func, SourceFile};

/// Statement kinds the tool distinguishes at (transitive) top level.
///
/// Classification is closed: a construct the tool does not know about is
/// an explicit error, not a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    FunctionDef,
    ClassDef,
    DecoratedDef,
    Import,
    ImportFrom,
    FlowControl,
    Statement,
    Comment,
}

fn classify(kind: &str) -> Option<NodeKind> {
    match kind {
        "function_definition" | "async_function_definition" => {
            Some(NodeKind::FunctionDef)
        }
        "class_definition" => Some(NodeKind::ClassDef),
        "decorated_definition" => Some(NodeKind::DecoratedDef),
        "import_statement" => Some(NodeKind::Import),
        "import_from_statement" => Some(NodeKind::ImportFrom),
        "if_statement" | "for_statement" | "while_statement" | "with_statement"
        | "try_statement" | "match_statement" => Some(NodeKind::FlowControl),
        "expression_statement"
        | "assert_statement"
        | "return_statement"
        | "pass_statement"
        | "raise_statement"
        | "delete_statement"
        | "global_statement"
        | "nonlocal_statement"
        | "break_statement"
        | "continue_statement"
        | "print_statement"
        | "exec_statement"
        | "type_alias_statement"
        | "future_import_statement"
        | "decorator" => Some(NodeKind::Statement),
        "comment" => Some(NodeKind::Comment),
        _ => None,
    }
}

/// What a file-level walk accumulates.
#[derive(Debug, Default)]
struct FileItems {
    funcs: Vec<Func>,
    clses: Vec<Class>,
    imported_objs: BTreeSet<String>,
}

/// Python parser producing [`SourceFile`] values.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Parse a file from disk. The module name qualifies every extracted
    /// definition's `full_name`.
    pub fn parse_file(
        &self,
        path: &Path,
        module_name: &str,
    ) -> Result<SourceFile, ParseError> {
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(path, module_name, &source)
    }

    /// Parse already-read source text.
    pub fn parse_source(
        &self,
        path: &Path,
        module_name: &str,
        source: &str,
    ) -> Result<SourceFile, ParseError> {
        let mut parser = TsParser::new();
        parser
            .set_language(&self.language)
            .map_err(|err| ParseError::Language(err.to_string()))?;

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::Syntax {
            path: path.to_path_buf(),
        })?;
        if tree.root_node().has_error() {
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
            });
        }

        let mut items = FileItems::default();
        let ctx = WalkCtx {
            path,
            module_name,
            source,
        };
        visit_block(tree.root_node(), &ctx, &mut items)?;

        Ok(SourceFile {
            path: path.to_path_buf(),
            funcs: items.funcs,
            clses: items.clses,
            imported_objs: items.imported_objs,
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

struct WalkCtx<'a> {
    path: &'a Path,
    module_name: &'a str,
    source: &'a str,
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

fn node_line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn node_col(node: &Node) -> u32 {
    node.start_position().column as u32
}

/// Walk the statements of a module body or a flow-control block.
///
/// Definitions nested inside flow control still count as top level;
/// definitions inside function or class bodies do not.
fn visit_block(
    block: Node,
    ctx: &WalkCtx<'_>,
    items: &mut FileItems,
) -> Result<(), ParseError> {
    let mut cursor = block.walk();
    for stmt in block.named_children(&mut cursor) {
        // A match body is a block of case clauses, not of statements.
        if stmt.kind() == "case_clause" {
            visit_flow(stmt, ctx, items)?;
        } else {
            visit_stmt(stmt, ctx, items)?;
        }
    }
    Ok(())
}

fn visit_stmt(
    stmt: Node,
    ctx: &WalkCtx<'_>,
    items: &mut FileItems,
) -> Result<(), ParseError> {
    let kind = classify(stmt.kind()).ok_or_else(|| ParseError::UnsupportedConstruct {
        path: ctx.path.to_path_buf(),
        kind: stmt.kind().to_string(),
        line: node_line(&stmt),
    })?;

    match kind {
        NodeKind::FunctionDef => {
            if let Some(func) = extract_func(&stmt, ctx, ctx.module_name, Vec::new()) {
                items.funcs.push(func);
            }
        }
        NodeKind::ClassDef => {
            if let Some(cls) = extract_class(&stmt, ctx) {
                items.clses.push(cls);
            }
        }
        NodeKind::DecoratedDef => visit_decorated(stmt, ctx, items)?,
        NodeKind::Import => extract_import(&stmt, ctx, items),
        NodeKind::ImportFrom => extract_import_from(&stmt, ctx, items),
        NodeKind::FlowControl => visit_flow(stmt, ctx, items)?,
        NodeKind::Statement | NodeKind::Comment => {}
    }
    Ok(())
}

/// Flow-control statements are transparent: every block they carry
/// (bodies, elif/else, except/finally, match cases) is walked as if its
/// statements were at top level.
fn visit_flow(
    node: Node,
    ctx: &WalkCtx<'_>,
    items: &mut FileItems,
) -> Result<(), ParseError> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "block" => visit_block(child, ctx, items)?,
            "elif_clause" | "else_clause" | "except_clause" | "except_group_clause"
            | "finally_clause" | "case_clause" => visit_flow(child, ctx, items)?,
            _ => {}
        }
    }
    Ok(())
}

fn visit_decorated(
    node: Node,
    ctx: &WalkCtx<'_>,
    items: &mut FileItems,
) -> Result<(), ParseError> {
    let dec_line_nums = decorator_lines(&node);
    let Some(definition) = node.child_by_field_name("definition") else {
        return Ok(());
    };
    match classify(definition.kind()) {
        Some(NodeKind::FunctionDef) => {
            if let Some(func) =
                extract_func(&definition, ctx, ctx.module_name, dec_line_nums)
            {
                items.funcs.push(func);
            }
            Ok(())
        }
        Some(NodeKind::ClassDef) => {
            if let Some(cls) = extract_class(&definition, ctx) {
                items.clses.push(cls);
            }
            Ok(())
        }
        _ => Err(ParseError::UnsupportedConstruct {
            path: ctx.path.to_path_buf(),
            kind: definition.kind().to_string(),
            line: node_line(&definition),
        }),
    }
}

fn decorator_lines(node: &Node) -> Vec<u32> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .map(|decorator| node_line(&decorator))
        .collect()
}

fn extract_func(
    node: &Node,
    ctx: &WalkCtx<'_>,
    namespace: &str,
    dec_line_nums: Vec<u32>,
) -> Option<Func> {
    let name_node = node.child_by_field_name("name")?;
    let name = node_text(&name_node, ctx.source).to_string();
    Some(Func {
        full_name: format!("{namespace}.{name}"),
        name,
        line_num: node_line(node),
        char_offset: node_col(node),
        dec_line_nums,
    })
}

fn extract_class(node: &Node, ctx: &WalkCtx<'_>) -> Option<Class> {
    let name_node = node.child_by_field_name("name")?;
    let name = node_text(&name_node, ctx.source).to_string();
    let full_name = format!("{}.{}", ctx.module_name, name);

    // Methods: functions defined directly in the class body, one level
    // deep only.
    let mut funcs = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for stmt in body.named_children(&mut cursor) {
            match classify(stmt.kind()) {
                Some(NodeKind::FunctionDef) => {
                    if let Some(func) = extract_func(&stmt, ctx, &full_name, Vec::new())
                    {
                        funcs.push(func);
                    }
                }
                Some(NodeKind::DecoratedDef) => {
                    let dec_lines = decorator_lines(&stmt);
                    if let Some(definition) = stmt.child_by_field_name("definition") {
                        if classify(definition.kind()) == Some(NodeKind::FunctionDef) {
                            if let Some(func) =
                                extract_func(&definition, ctx, &full_name, dec_lines)
                            {
                                funcs.push(func);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Some(Class {
        name,
        full_name,
        line_num: node_line(node),
        char_offset: node_col(node),
        funcs,
    })
}

/// `import x` and `import x.y as z` contribute the dotted module names.
fn extract_import(node: &Node, ctx: &WalkCtx<'_>, items: &mut FileItems) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                items
                    .imported_objs
                    .insert(node_text(&child, ctx.source).to_string());
            }
            "aliased_import" => {
                if let Some(name) = child.child_by_field_name("name") {
                    items
                        .imported_objs
                        .insert(node_text(&name, ctx.source).to_string());
                }
            }
            _ => {}
        }
    }
}

/// `from x import y` contributes `x.y`; relative modules are resolved
/// against the file's own module name.
fn extract_import_from(node: &Node, ctx: &WalkCtx<'_>, items: &mut FileItems) {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return;
    };
    let module_text = node_text(&module_node, ctx.source);
    let module = if module_node.kind() == "relative_import" {
        resolve_relative(ctx.module_name, module_text)
    } else {
        module_text.to_string()
    };

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.id() == module_node.id() {
            continue;
        }
        match child.kind() {
            "dotted_name" => {
                let name = node_text(&child, ctx.source);
                items.imported_objs.insert(format!("{module}.{name}"));
            }
            "aliased_import" => {
                if let Some(name) = child.child_by_field_name("name") {
                    let name = node_text(&name, ctx.source);
                    items.imported_objs.insert(format!("{module}.{name}"));
                }
            }
            "wildcard_import" => {
                items.imported_objs.insert(module.clone());
            }
            _ => {}
        }
    }
}

/// Resolve `from .sub import x`-style prefixes: one leading dot names
/// the current package, each further dot goes up one level.
fn resolve_relative(module_name: &str, relative: &str) -> String {
    let dots = relative.chars().take_while(|c| *c == '.').count();
    let rest = &relative[dots..];

    let mut parts: Vec<&str> = module_name.split('.').collect();
    parts.truncate(parts.len().saturating_sub(dots));
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts.join(".")
}

/// The dotted module name for a file under a root directory;
/// `pkg/__init__.py` is the `pkg` module itself.
pub fn module_name_for_path(path: &Path, root_dir: &Path) -> String {
    let rel_path = path.strip_prefix(root_dir).unwrap_or(path);
    let mut parts: Vec<String> = Vec::new();
    if let Some(parent) = rel_path.parent() {
        for component in parent.components() {
            parts.push(component.as_os_str().to_string_lossy().into_owned());
        }
    }
    if let Some(stem) = rel_path.file_stem() {
        let stem = stem.to_string_lossy();
        if stem != "__init__" {
            parts.push(stem.into_owned());
        }
    }
    parts.join(".")
}
