//! Comment-line annotation lexer.
//!
//! Controllers and their handler methods are described with a small annotation language
//! written in doc comments:
//!
//! ```text
//! /// @BasePath("/users")
//! /// @GET(path="/all")
//! /// @Auth -> admin
//! ```
//!
//! A line is matched against three shapes in a fixed priority order: base path, route,
//! then generic key/value. The first shape that matches decides; lines matching none of
//! them are plain documentation and are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP methods a route annotation may declare.
///
/// Verb literals are matched case-sensitively; `@get(...)` is not a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// HTTP PATCH method
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "PATCH" => Ok(HttpMethod::Patch),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured fact extracted from one comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// `@BasePath("/users")`
    BasePath(String),
    /// `@GET(path="/all")`
    Route { method: HttpMethod, path: String },
    /// `@Auth -> admin`; the key keeps its leading `@`, the value may be empty
    Generic { key: String, value: String },
}

impl Annotation {
    /// Lexes a single comment line.
    ///
    /// Leading whitespace is skipped. Returns `None` for lines that carry no annotation.
    pub fn parse(line: &str) -> Option<Annotation> {
        let rest = line.trim_start().strip_prefix('@')?;

        if let Some(path) = parse_base_path(rest) {
            return Some(Annotation::BasePath(path));
        }
        if let Some((method, path)) = parse_route(rest) {
            return Some(Annotation::Route { method, path });
        }
        parse_generic(rest)
    }
}

// BasePath("/abs") must make up the whole line.
fn parse_base_path(rest: &str) -> Option<String> {
    let inner = rest
        .strip_prefix("BasePath(\"")?
        .trim_end()
        .strip_suffix("\")")?;
    absolute(inner)
}

// VERB(path="/abs") is a prefix match, anything after the closing `")` is ignored.
fn parse_route(rest: &str) -> Option<(HttpMethod, String)> {
    let open = rest.find('(')?;
    let method = rest[..open].parse::<HttpMethod>().ok()?;
    let args = rest[open + 1..].strip_prefix("path=\"")?;
    let end = args.find("\")")?;
    let path = absolute(&args[..end])?;
    Some((method, path))
}

fn parse_generic(rest: &str) -> Option<Annotation> {
    let key_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    if key_len == 0 {
        return None;
    }

    let value = rest[key_len..]
        .trim_start()
        .strip_prefix("->")
        .map(|v| v.trim().to_string())
        .unwrap_or_default();

    Some(Annotation::Generic {
        key: format!("@{}", &rest[..key_len]),
        value,
    })
}

fn absolute(path: &str) -> Option<String> {
    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        None
    }
}

/// Collects the doc-comment lines attached to an item, in source order.
///
/// Block doc comments and multi-line `#[doc = "..."]` values contribute one entry per line.
pub fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    let mut lines = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(meta_nv) = &attr.meta {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit_str),
                ..
            }) = &meta_nv.value
            {
                lines.extend(lit_str.value().lines().map(str::to_string));
            }
        }
    }

    lines
}
