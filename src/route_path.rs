//! Route path composition.
//!
//! A route's final path is built from three pieces: the application context path given on
//! the command line, the controller's `@BasePath`, and the handler's declared path.
//! Every join goes through [`clean`], so composed paths never contain `//`, `.` or `..`
//! segments and never end with `/` unless they are the root.

/// Lexically cleans a slash-separated path.
///
/// Repeated separators collapse, `.` segments are dropped, and `..` removes the preceding
/// segment. A rooted path cannot climb above `/`. An empty result becomes `/` for rooted
/// input and `.` otherwise.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Joins two path fragments and cleans the result. Empty fragments are ignored.
pub fn join(base: &str, suffix: &str) -> String {
    match (base.is_empty(), suffix.is_empty()) {
        (true, true) => String::new(),
        (false, true) => clean(base),
        (true, false) => clean(suffix),
        (false, false) => clean(&format!("{}/{}", base, suffix)),
    }
}

/// Normalizes the application context path: it always starts with `/` and has no
/// trailing `/` unless it is the root.
pub fn normalize_context(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with('/') {
        clean(raw)
    } else {
        clean(&format!("/{}", raw))
    }
}

/// Base path of a controller: the context itself, or the context joined with the
/// controller's declared `@BasePath`.
pub fn controller_base(context: &str, declared: Option<&str>) -> String {
    match declared {
        Some(base) => join(context, base),
        None => context.to_string(),
    }
}

/// Full path of a route declared on a controller method.
pub fn compose(context: &str, declared_base: Option<&str>, method_path: &str) -> String {
    join(&controller_base(context, declared_base), method_path)
}
