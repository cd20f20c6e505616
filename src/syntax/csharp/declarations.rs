//! Declaration kinds and stub outlines for C# nodes

use tree_sitter::Node;

use crate::syntax::{DeclarationKind, StubOutline};

/// Map a tree-sitter node kind to the declaration it represents.
///
/// Local functions, accessors and lambdas are not members; the ancestor
/// search walks past them to the enclosing member.
///
/// Members the grammar could only recover into an `ERROR` node (a field
/// still missing its `;`, for instance) have no kind and are not
/// documentable until they parse.
pub(crate) fn declaration_kind(kind: &str) -> Option<DeclarationKind> {
    let kind = match kind {
        "class_declaration" => DeclarationKind::Class,
        "struct_declaration" => DeclarationKind::Struct,
        "interface_declaration" => DeclarationKind::Interface,
        "record_declaration" | "record_struct_declaration" => DeclarationKind::Record,
        "enum_declaration" => DeclarationKind::Enum,
        "enum_member_declaration" => DeclarationKind::EnumMember,
        "delegate_declaration" => DeclarationKind::Delegate,
        "method_declaration" => DeclarationKind::Method,
        "constructor_declaration" => DeclarationKind::Constructor,
        "destructor_declaration" => DeclarationKind::Destructor,
        "property_declaration" => DeclarationKind::Property,
        "indexer_declaration" => DeclarationKind::Indexer,
        "event_declaration" => DeclarationKind::Event,
        "event_field_declaration" => DeclarationKind::EventField,
        "field_declaration" => DeclarationKind::Field,
        "operator_declaration" => DeclarationKind::Operator,
        "conversion_operator_declaration" => DeclarationKind::ConversionOperator,
        "namespace_declaration" | "file_scoped_namespace_declaration" => {
            DeclarationKind::Namespace
        }
        "global_statement" => DeclarationKind::TopLevelStatement,
        _ => return None,
    };
    Some(kind)
}

/// Nearest ancestor (or self) that is a member declaration
pub(crate) fn enclosing_declaration(node: Node) -> Option<(Node, DeclarationKind)> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if let Some(kind) = declaration_kind(candidate.kind()) {
            return Some((candidate, kind));
        }
        current = candidate.parent();
    }
    None
}

/// First real token under `node`, skipping comments and missing nodes
pub(crate) fn first_token(node: Node) -> Option<Node> {
    if node.child_count() == 0 {
        return (!node.is_missing() && node.kind() != "comment" && node.end_byte() > node.start_byte())
            .then_some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.kind() != "comment")
        .find_map(first_token)
}

pub(crate) fn declaration_name(node: Node, code: &str) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(code[name.byte_range()].to_string());
    }

    // Fields and event fields name their declarators
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "variable_declaration" {
            let mut inner = child.walk();
            for declarator in child.children(&mut inner) {
                if declarator.kind() == "variable_declarator" {
                    let name = declarator
                        .child_by_field_name("name")
                        .or_else(|| first_named_of_kind(declarator, "identifier"))?;
                    return Some(code[name.byte_range()].to_string());
                }
            }
        }
    }
    None
}

/// Signature summary for the stub generator
pub(crate) fn outline(node: Node, kind: DeclarationKind, code: &str) -> StubOutline {
    let type_parameters = match kind {
        DeclarationKind::Class
        | DeclarationKind::Struct
        | DeclarationKind::Interface
        | DeclarationKind::Record
        | DeclarationKind::Delegate
        | DeclarationKind::Method => type_parameter_names(node, code),
        _ => Vec::new(),
    };

    let parameters = match kind {
        DeclarationKind::Method
        | DeclarationKind::Constructor
        | DeclarationKind::Delegate
        | DeclarationKind::Indexer
        | DeclarationKind::Operator
        | DeclarationKind::ConversionOperator
        | DeclarationKind::Record => parameter_names(node, code),
        _ => Vec::new(),
    };

    let has_return = match kind {
        DeclarationKind::Method | DeclarationKind::Delegate => {
            return_type(node, code).is_some_and(|ty| ty != "void")
        }
        DeclarationKind::Indexer | DeclarationKind::Operator => {
            return_type(node, code).is_none_or(|ty| ty != "void")
        }
        _ => false,
    };

    StubOutline {
        type_parameters,
        parameters,
        is_indexer: kind == DeclarationKind::Indexer,
        has_return,
    }
}

fn type_parameter_names(node: Node, code: &str) -> Vec<String> {
    let Some(list) = node
        .child_by_field_name("type_parameters")
        .or_else(|| first_named_of_kind(node, "type_parameter_list"))
    else {
        return Vec::new();
    };

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|child| child.kind() == "type_parameter")
        .filter_map(|param| {
            param
                .child_by_field_name("name")
                .or_else(|| last_named_of_kind(param, "identifier"))
        })
        .map(|name| identifier_text(name, code))
        .collect()
}

fn parameter_names(node: Node, code: &str) -> Vec<String> {
    let Some(list) = node.child_by_field_name("parameters").or_else(|| {
        first_named_of_kind(node, "parameter_list")
            .or_else(|| first_named_of_kind(node, "bracketed_parameter_list"))
    }) else {
        return Vec::new();
    };

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|child| matches!(child.kind(), "parameter" | "parameter_array"))
        .filter_map(|param| {
            param
                .child_by_field_name("name")
                .or_else(|| last_named_of_kind(param, "identifier"))
        })
        .map(|name| identifier_text(name, code))
        .collect()
}

/// Declared return type, trimmed
fn return_type(node: Node, code: &str) -> Option<String> {
    if let Some(ty) = node
        .child_by_field_name("returns")
        .or_else(|| node.child_by_field_name("type"))
    {
        return Some(code[ty.byte_range()].trim().to_string());
    }

    // Positional fallback: the last named child before the name, `this`
    // or `operator`
    let name_id = node.child_by_field_name("name").map(|n| n.id());
    let mut candidate = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if Some(child.id()) == name_id || matches!(child.kind(), "this" | "operator") {
            break;
        }
        if !child.is_named()
            || matches!(
                child.kind(),
                "attribute_list" | "modifier" | "comment" | "explicit_interface_specifier"
            )
        {
            continue;
        }
        candidate = Some(child);
    }
    candidate.map(|ty| code[ty.byte_range()].trim().to_string())
}

/// Identifier text with the verbatim `@` prefix removed
fn identifier_text(node: Node, code: &str) -> String {
    let text = &code[node.byte_range()];
    text.strip_prefix('@').unwrap_or(text).to_string()
}

fn first_named_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() == kind)
}

fn last_named_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() == kind)
        .last()
}
