//! List filters: per-entity predicate factories keyed by query parameter name.
//!
//! A [`Predicate`] is plain data so that the in-memory store can evaluate it
//! directly and the SQL builder can render it as a parameterized WHERE clause.

use crate::entity::{AdminConfig, Entity};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// Case-insensitive equality.
    IExact,
    /// Case-insensitive substring.
    IContains,
}

/// A named filter accepted on an entity's list endpoint.
#[derive(Clone, Copy, Debug)]
pub struct FilterDef {
    pub name: &'static str,
    pub column: &'static str,
    pub lookup: Lookup,
}

impl FilterDef {
    pub fn predicate(&self, value: &str) -> Predicate {
        match self.lookup {
            Lookup::IExact => Predicate::IExact {
                column: self.column,
                value: value.to_string(),
            },
            Lookup::IContains => Predicate::IContains {
                column: self.column,
                value: value.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Every inner predicate holds. Empty accepts everything.
    All(Vec<Predicate>),
    /// At least one inner predicate holds. Empty accepts nothing.
    Any(Vec<Predicate>),
    IExact { column: &'static str, value: String },
    IContains { column: &'static str, value: String },
}

impl Predicate {
    pub fn always() -> Self {
        Predicate::All(Vec::new())
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::All(v) if v.is_empty())
    }

    pub fn matches<E: Entity>(&self, record: &E) -> bool {
        match self {
            Predicate::All(ps) => ps.iter().all(|p| p.matches(record)),
            Predicate::Any(ps) => ps.iter().any(|p| p.matches(record)),
            Predicate::IExact { column, value } => record
                .field(column)
                .map(|v| v.to_lowercase() == value.to_lowercase())
                .unwrap_or(false),
            Predicate::IContains { column, value } => record
                .field(column)
                .map(|v| v.to_lowercase().contains(&value.to_lowercase()))
                .unwrap_or(false),
        }
    }
}

/// Build the list predicate from query parameters. Names match case-insensitively;
/// unknown parameters and empty values are ignored.
pub fn from_query(filters: &[FilterDef], params: &HashMap<String, String>) -> Predicate {
    let mut parts = Vec::new();
    for def in filters {
        match param_value(params, def.name) {
            Some(v) if !v.is_empty() => parts.push(def.predicate(v)),
            _ => {}
        }
    }
    Predicate::All(parts)
}

/// The exact key wins; otherwise the smallest case-insensitive match, so that
/// `designation=a&Designation=b` always resolves the same way.
fn param_value<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    if let Some(v) = params.get(name) {
        return Some(v.as_str());
    }
    params
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(name))
        .min_by(|a, b| a.0.cmp(b.0))
        .map(|(_, v)| v.as_str())
}

/// Admin directory search: every term must appear in at least one search field.
/// Terms are whitespace-separated; a single- or double-quoted phrase is one term.
pub fn search(admin: &AdminConfig, q: &str) -> Predicate {
    let terms = search_terms(q)
        .into_iter()
        .map(|term| {
            Predicate::Any(
                admin
                    .search_fields
                    .iter()
                    .map(|column| Predicate::IContains {
                        column: *column,
                        value: term.clone(),
                    })
                    .collect(),
            )
        })
        .collect();
    Predicate::All(terms)
}

fn search_terms(q: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut chars = q.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut term = String::new();
        if c == '"' || c == '\'' {
            chars.next();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == c {
                    closed = true;
                    break;
                }
                term.push(ch);
            }
            // Unbalanced quote: keep it literally.
            if !closed {
                term.insert(0, c);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                term.push(ch);
                chars.next();
            }
        }
        if !term.trim().is_empty() {
            terms.push(term);
        }
    }
    terms
}
