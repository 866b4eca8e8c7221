//! Rule file parser using tree-sitter-python
//!
//! A rule file is parsed, never imported. Each top-level `def` becomes one
//! [`Rule`]: the docstring supplies the key and description, keyword-only
//! parameters supply the declared defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rulebook_domain::Rule;
use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::docstring::parse_docstring;
use crate::literal::{literal_value, string_value};
use crate::{DiscoveryError, Result};

/// Parser for Python rule files
pub struct RuleFileParser {
    parser: Parser,
}

impl RuleFileParser {
    /// Create a parser with the Python grammar loaded
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| DiscoveryError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse the rule file at `path`
    ///
    /// The descriptor `location` is the absolute form of `path`.
    pub fn parse_file<F>(&mut self, path: &Path, ruleset: &str, is_enabled: F) -> Result<Vec<Rule>>
    where
        F: Fn(&str) -> bool,
    {
        let source = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let location = std::path::absolute(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(&source, &location, ruleset, is_enabled)
    }

    /// Parse rule definitions from source text
    ///
    /// Fails on the first malformed function; no partial result is returned.
    pub fn parse_source<F>(
        &mut self,
        source: &str,
        location: &Path,
        ruleset: &str,
        is_enabled: F,
    ) -> Result<Vec<Rule>>
    where
        F: Fn(&str) -> bool,
    {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| DiscoveryError::Syntax {
                file: location.to_path_buf(),
                line: 0,
                column: 0,
            })?;
        let root = tree.root_node();
        let invalid = if root.has_error() {
            Some(first_error(root))
        } else {
            first_python2_statement(root).map(Some)
        };
        if let Some(node) = invalid {
            let (line, column) = node
                .map(|node| {
                    let at = node.start_position();
                    (at.row + 1, at.column + 1)
                })
                .unwrap_or((0, 0));
            return Err(DiscoveryError::Syntax {
                file: location.to_path_buf(),
                line,
                column,
            });
        }

        let bytes = source.as_bytes();
        let mut rules = Vec::new();
        for function in top_level_functions(root) {
            let rule = FunctionDef {
                node: function,
                source: bytes,
                location,
            }
            .into_rule(ruleset, &is_enabled)?;
            debug!(rule_id = %rule.id, function = %rule.function, "Discovered rule");
            rules.push(rule);
        }
        Ok(rules)
    }
}

/// Top-level plain `def` statements, decorated ones included, `async def` excluded
fn top_level_functions(root: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter_map(|statement| match statement.kind() {
            "function_definition" => Some(statement),
            "decorated_definition" => statement
                .child_by_field_name("definition")
                .filter(|def| def.kind() == "function_definition"),
            _ => None,
        })
        .filter(|def| !is_async(*def))
        .collect()
}

fn is_async(function: Node<'_>) -> bool {
    let mut cursor = function.walk();
    let found = function
        .children(&mut cursor)
        .take_while(|child| child.kind() != "def")
        .any(|child| child.kind() == "async");
    found
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

/// The grammar still accepts `print x` and `exec code`; Python 3 does not
fn first_python2_statement(node: Node<'_>) -> Option<Node<'_>> {
    if PYTHON2_STATEMENTS.contains(&node.kind()) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_python2_statement)
}

const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// One function definition being turned into a rule descriptor
struct FunctionDef<'tree, 'src> {
    node: Node<'tree>,
    source: &'src [u8],
    location: &'src Path,
}

impl FunctionDef<'_, '_> {
    fn into_rule<F>(self, ruleset: &str, is_enabled: &F) -> Result<Rule>
    where
        F: Fn(&str) -> bool,
    {
        let function = self.name();
        let doc = self
            .docstring()
            .as_deref()
            .and_then(parse_docstring)
            .ok_or_else(|| DiscoveryError::MissingKey {
                file: self.file(),
                function: function.clone(),
            })?;
        let parameters = self.keyword_only_parameters(&function)?;

        Ok(Rule {
            excluded: !is_enabled(&doc.key),
            id: doc.key,
            description: doc.description,
            ruleset: ruleset.to_string(),
            location: self.file(),
            function,
            parameters,
        })
    }

    fn file(&self) -> PathBuf {
        self.location.to_path_buf()
    }

    fn text(&self, node: Node<'_>) -> String {
        node.utf8_text(self.source).unwrap_or_default().to_string()
    }

    fn name(&self) -> String {
        self.node
            .child_by_field_name("name")
            .map(|name| self.text(name))
            .unwrap_or_default()
    }

    /// Body's first statement, when it is a plain string expression
    fn docstring(&self) -> Option<String> {
        let body = self.node.child_by_field_name("body")?;
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|statement| statement.kind() != "comment")?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let mut inner = first.walk();
        let expressions: Vec<Node<'_>> = first.named_children(&mut inner).collect();
        match expressions.as_slice() {
            [expression] => string_value(*expression, self.source),
            _ => None,
        }
    }

    /// Keyword-only parameters (after `*` or `*args`, before `**kwargs`)
    fn keyword_only_parameters(
        &self,
        function: &str,
    ) -> Result<BTreeMap<String, serde_json::Value>> {
        let mut parameters = BTreeMap::new();
        let Some(list) = self.node.child_by_field_name("parameters") else {
            return Ok(parameters);
        };

        let mut keyword_only = false;
        let mut cursor = list.walk();
        for parameter in list.children(&mut cursor) {
            match parameter.kind() {
                "keyword_separator" | "list_splat_pattern" | "*" => keyword_only = true,
                "dictionary_splat_pattern" => break,
                "identifier" if keyword_only => {
                    parameters.insert(self.text(parameter), serde_json::Value::Null);
                }
                "typed_parameter" => match typed_target(parameter) {
                    Some(target) if target.kind() == "list_splat_pattern" => keyword_only = true,
                    Some(target) if target.kind() == "dictionary_splat_pattern" => break,
                    Some(target) if keyword_only => {
                        parameters.insert(self.text(target), serde_json::Value::Null);
                    }
                    _ => {}
                },
                "default_parameter" | "typed_default_parameter" if keyword_only => {
                    let (Some(name), Some(value)) = (
                        parameter.child_by_field_name("name"),
                        parameter.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    let name = self.text(name);
                    let default = literal_value(value, self.source).ok_or_else(|| {
                        DiscoveryError::UnsupportedDefault {
                            file: self.file(),
                            function: function.to_string(),
                            parameter: name.clone(),
                            expression: self.text(value),
                        }
                    })?;
                    parameters.insert(name, default);
                }
                _ => {}
            }
        }
        Ok(parameters)
    }
}

/// The name or splat pattern annotated by a `typed_parameter`
fn typed_target(parameter: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = parameter.walk();
    let target = parameter
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    target
}
