//! Logic-less template rendering over a JSON view model.
//!
//! Supports the mustache subset the report needs:
//! - `{{name}}` - HTML-escaped value
//! - `{{{name}}}` - raw value
//! - `{{#name}}...{{/name}}` - repeat for each array item, or render once for a
//!   truthy scalar/object; skipped for missing, `null`, `false` and `[]`
//! - `{{! comment }}`
//!
//! Names resolve in the innermost section item first, then outwards to the root.
//! `{{.}}` is the current item. Unknown names render as empty strings.

use serde_json::Value;

use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { name: String, escape: bool },
    Section { name: String, children: Vec<Node> },
}

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source. Fails on unterminated tags and unbalanced sections.
    pub fn parse(source: &str) -> Result<Self, PipelineError> {
        let mut stack: Vec<(String, Vec<Node>)> = Vec::new();
        let mut current: Vec<Node> = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                current.push(Node::Text(rest[..start].to_string()));
            }
            let after = &rest[start..];

            let (raw, inner, consumed) = if let Some(body) = after.strip_prefix("{{{") {
                let end = body.find("}}}").ok_or_else(|| unterminated(after))?;
                (true, &body[..end], 3 + end + 3)
            } else {
                let body = &after[2..];
                let end = body.find("}}").ok_or_else(|| unterminated(after))?;
                (false, &body[..end], 2 + end + 2)
            };
            rest = &after[consumed..];

            let tag = inner.trim();
            if raw {
                current.push(Node::Var {
                    name: tag.to_string(),
                    escape: false,
                });
            } else if let Some(name) = tag.strip_prefix('#') {
                stack.push((name.trim().to_string(), std::mem::take(&mut current)));
            } else if let Some(name) = tag.strip_prefix('/') {
                let name = name.trim();
                let (open, parent) = stack.pop().ok_or_else(|| {
                    render_error(format!("closing tag {{{{/{name}}}}} without an opening tag"))
                })?;
                if open != name {
                    return Err(render_error(format!(
                        "section {{{{#{open}}}}} closed by {{{{/{name}}}}}"
                    )));
                }
                let children = std::mem::replace(&mut current, parent);
                current.push(Node::Section {
                    name: open,
                    children,
                });
            } else if tag.starts_with('!') {
                // comment
            } else {
                current.push(Node::Var {
                    name: tag.to_string(),
                    escape: true,
                });
            }
        }
        if !rest.is_empty() {
            current.push(Node::Text(rest.to_string()));
        }

        if let Some((open, _)) = stack.pop() {
            return Err(render_error(format!("section {{{{#{open}}}}} is never closed")));
        }
        Ok(Self { nodes: current })
    }

    /// Render against a view model.
    pub fn render(&self, data: &Value) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, &mut vec![data], &mut out);
        out
    }
}

fn render_nodes<'v>(nodes: &[Node], scopes: &mut Vec<&'v Value>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { name, escape } => {
                let text = lookup(scopes, name).map(scalar_text).unwrap_or_default();
                if *escape {
                    escape_html_into(&text, out);
                } else {
                    out.push_str(&text);
                }
            }
            Node::Section { name, children } => match lookup(scopes, name) {
                Some(Value::Array(items)) => {
                    for item in items {
                        scopes.push(item);
                        render_nodes(children, scopes, out);
                        scopes.pop();
                    }
                }
                Some(value) if is_truthy(value) => {
                    scopes.push(value);
                    render_nodes(children, scopes, out);
                    scopes.pop();
                }
                _ => {}
            },
        }
    }
}

fn lookup<'a>(scopes: &[&'a Value], name: &str) -> Option<&'a Value> {
    if name == "." {
        return scopes.last().copied();
    }
    scopes.iter().rev().copied().find_map(|scope| scope.get(name))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn unterminated(at: &str) -> PipelineError {
    let snippet: String = at.chars().take(24).collect();
    render_error(format!("unterminated tag near {snippet:?}"))
}

fn render_error(message: String) -> PipelineError {
    PipelineError::TemplateRender { message }
}
