//! HTML element classification tables.
//!
//! Tag names are compared after the parser's upper-casing, so every table
//! here speaks upper case.

/// True for void elements: elements that never have children and are
/// implicitly self-closing (`<br>`, `<img>`, ...).
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "AREA"
            | "BASE"
            | "BR"
            | "COL"
            | "EMBED"
            | "HR"
            | "IMG"
            | "INPUT"
            | "KEYGEN"
            | "LINK"
            | "MENUITEM"
            | "META"
            | "PARAM"
            | "SOURCE"
            | "TRACK"
            | "WBR"
    )
}

/// True for elements whose end tag may be omitted because context (a
/// sibling start tag or an ancestor's close) unambiguously ends them.
///
/// This is deliberately the table-and-definition-list subset; widening it
/// to the full HTML5 optional-end-tag list (`LI`, `OPTION`, `P`, ...) is a
/// policy change that belongs here if it is ever taken.
#[must_use]
pub fn has_optional_end_tag(name: &str) -> bool {
    matches!(
        name,
        "TR" | "TD" | "TH" | "THEAD" | "TBODY" | "TFOOT" | "DT" | "DD"
    )
}

/// True when a start tag for `incoming` implicitly closes a dangling open
/// element `open` with an optional end tag (a new `TD` ends the previous
/// `TD`, a new `TR` ends an open cell and the previous row, ...).
///
/// Applied repeatedly: a `TR` arriving over an open `TD` first closes the
/// cell, then the enclosing row.
#[must_use]
pub fn closes_optional_sibling(open: &str, incoming: &str) -> bool {
    match open {
        "TD" | "TH" => matches!(incoming, "TD" | "TH" | "TR" | "THEAD" | "TBODY" | "TFOOT"),
        "TR" => matches!(incoming, "TR" | "THEAD" | "TBODY" | "TFOOT"),
        "THEAD" | "TBODY" | "TFOOT" => matches!(incoming, "THEAD" | "TBODY" | "TFOOT"),
        "DT" | "DD" => matches!(incoming, "DT" | "DD"),
        _ => false,
    }
}
