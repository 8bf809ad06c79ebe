//! Changed-method detection via tree-sitter.
//!
//! Parses both sides of a modified file, extracts named function/method
//! spans, and intersects them with the changed line numbers from the diff
//! to decide which method bodies changed in a commit.

use std::collections::BTreeSet;

use cograph_core::CographError;
use tree_sitter::{Node, Parser};

/// Programming language detected from file extension.
///
/// # Examples
///
/// ```
/// use cograph_mine::methods::Language;
///
/// assert_eq!(Language::from_path("src/main.rs"), Language::Rust);
/// assert_eq!(Language::from_path("x.py"), Language::Python);
/// assert_eq!(Language::from_path("notes.txt"), Language::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    TypeScript,
    JavaScript,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Unknown,
}

impl Language {
    /// Detect language from a file path's extension.
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit('.').next().unwrap_or("");
        match ext {
            "rs" => Language::Rust,
            "py" => Language::Python,
            "ts" | "tsx" => Language::TypeScript,
            "js" | "jsx" => Language::JavaScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Language::Cpp,
            "rb" => Language::Ruby,
            _ => Language::Unknown,
        }
    }

    /// Get the tree-sitter grammar for this language.
    ///
    /// Returns `None` for `Language::Unknown`.
    pub fn tree_sitter_language(&self) -> Option<tree_sitter::Language> {
        match self {
            Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
            Language::Java => Some(tree_sitter_java::LANGUAGE.into()),
            Language::C => Some(tree_sitter_c::LANGUAGE.into()),
            Language::Cpp => Some(tree_sitter_cpp::LANGUAGE.into()),
            Language::Ruby => Some(tree_sitter_ruby::LANGUAGE.into()),
            Language::Unknown => None,
        }
    }
}

/// A named function or method with its line span.
///
/// # Examples
///
/// ```
/// use cograph_mine::methods::MethodSpan;
///
/// let span = MethodSpan {
///     name: "login".into(),
///     start_line: 3,
///     end_line: 10,
/// };
/// assert!(span.contains_any(&[5]));
/// assert!(!span.contains_any(&[11]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpan {
    /// Function or method name.
    pub name: String,
    /// First line of the definition (1-indexed, inclusive).
    pub start_line: u32,
    /// Last line of the definition (1-indexed, inclusive).
    pub end_line: u32,
}

impl MethodSpan {
    /// Whether any of the given line numbers falls inside this span.
    pub fn contains_any(&self, lines: &[u32]) -> bool {
        lines
            .iter()
            .any(|&l| l >= self.start_line && l <= self.end_line)
    }
}

/// Extract all named function/method spans from source content.
///
/// Returns an empty vec for unsupported languages or content tree-sitter
/// cannot produce a tree for. Tree-sitter is error-tolerant, so partial
/// results are returned even for files with syntax errors.
///
/// # Errors
///
/// Returns [`CographError::Parse`] if the language grammar cannot be loaded.
///
/// # Examples
///
/// ```
/// use cograph_mine::methods::{extract_method_spans, Language};
///
/// let spans = extract_method_spans(Language::Python, "def f1():\n    pass\n").unwrap();
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].name, "f1");
/// assert_eq!(spans[0].start_line, 1);
/// ```
pub fn extract_method_spans(
    language: Language,
    content: &str,
) -> Result<Vec<MethodSpan>, CographError> {
    let Some(ts_language) = language.tree_sitter_language() else {
        return Ok(Vec::new());
    };

    let mut parser = Parser::new();
    parser
        .set_language(&ts_language)
        .map_err(|e| CographError::Parse(format!("failed to set language: {e}")))?;

    let Some(tree) = parser.parse(content, None) else {
        return Ok(Vec::new());
    };

    let mut spans = Vec::new();
    collect_spans(tree.root_node(), content.as_bytes(), language, &mut spans);
    Ok(spans)
}

/// Names of methods whose body changed between two versions of a file.
///
/// A method counts as changed when a deleted line falls inside its old-side
/// span or an added line falls inside its new-side span. Names are returned
/// sorted and deduplicated.
///
/// # Errors
///
/// Returns [`CographError::Parse`] if the language grammar cannot be loaded.
///
/// # Examples
///
/// ```
/// use cograph_mine::methods::{changed_methods, Language};
///
/// let old = "def f1():\n    return 1\n\ndef f2():\n    return 2\n";
/// let new = "def f1():\n    return 10\n\ndef f2():\n    return 2\n";
/// // Line 2 changed on both sides.
/// let names = changed_methods(Language::Python, old, new, &[2], &[2]).unwrap();
/// assert_eq!(names, vec!["f1".to_string()]);
/// ```
pub fn changed_methods(
    language: Language,
    old_content: &str,
    new_content: &str,
    old_lines: &[u32],
    new_lines: &[u32],
) -> Result<Vec<String>, CographError> {
    if language == Language::Unknown {
        return Ok(Vec::new());
    }

    let mut names: BTreeSet<String> = BTreeSet::new();

    if !old_lines.is_empty() {
        for span in extract_method_spans(language, old_content)? {
            if span.contains_any(old_lines) {
                names.insert(span.name);
            }
        }
    }
    if !new_lines.is_empty() {
        for span in extract_method_spans(language, new_content)? {
            if span.contains_any(new_lines) {
                names.insert(span.name);
            }
        }
    }

    Ok(names.into_iter().collect())
}

fn collect_spans(node: Node, source: &[u8], language: Language, spans: &mut Vec<MethodSpan>) {
    if let Some(name) = method_name(&node, source, language) {
        spans.push(MethodSpan {
            name,
            start_line: node.start_position().row as u32 + 1,
            end_line: node.end_position().row as u32 + 1,
        });
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_spans(child, source, language, spans);
    }
}

fn method_name(node: &Node, source: &[u8], language: Language) -> Option<String> {
    let kind = node.kind();
    let named = |field: &str| field_text(node, field, source);

    match language {
        Language::Rust => match kind {
            "function_item" => named("name"),
            _ => None,
        },
        Language::Python => match kind {
            "function_definition" => named("name"),
            _ => None,
        },
        Language::TypeScript | Language::JavaScript => match kind {
            "function_declaration" | "generator_function_declaration" | "method_definition" => {
                named("name")
            }
            _ => None,
        },
        Language::Go => match kind {
            "function_declaration" | "method_declaration" => named("name"),
            _ => None,
        },
        Language::Java => match kind {
            "method_declaration" | "constructor_declaration" => named("name"),
            _ => None,
        },
        Language::C | Language::Cpp => match kind {
            "function_definition" => declarator_name(node, source),
            _ => None,
        },
        Language::Ruby => match kind {
            "method" | "singleton_method" => named("name"),
            _ => None,
        },
        Language::Unknown => None,
    }
}

fn field_text(node: &Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source).ok())
        .map(str::to_string)
}

// C/C++ bury the name inside nested declarators (pointers, qualifiers).
// Follow the `declarator` field until a function_declarator is found, then
// take the text of its inner declarator.
fn declarator_name(node: &Node, source: &[u8]) -> Option<String> {
    let mut current = node.child_by_field_name("declarator")?;
    loop {
        if current.kind() == "function_declarator" {
            return current
                .child_by_field_name("declarator")
                .and_then(|n| n.utf8_text(source).ok())
                .map(str::to_string);
        }
        current = current.child_by_field_name("declarator")?;
    }
}
