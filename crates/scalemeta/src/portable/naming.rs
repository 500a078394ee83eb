// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical type-name rendering from already-resolved child names.

/// `a::b::C`, or `None` for an empty path.
pub(crate) fn path(segments: &[String]) -> Option<String> {
    (!segments.is_empty()).then(|| segments.join("::"))
}

/// `Name<A, B>`.
pub(crate) fn generic<S: AsRef<str>>(name: &str, params: &[S]) -> String {
    format!("{}<{}>", name, join(params))
}

/// `Vec<T>`.
pub(crate) fn sequence(element: &str) -> String {
    format!("Vec<{}>", element)
}

/// `[T; N]`.
pub(crate) fn array(element: &str, len: u32) -> String {
    format!("[{}; {}]", element, len)
}

/// `(A, B)`; `()` when empty.
pub(crate) fn tuple<S: AsRef<str>>(members: &[S]) -> String {
    format!("({})", join(members))
}

/// `Compact<T>`.
pub(crate) fn compact(inner: &str) -> String {
    format!("Compact<{}>", inner)
}

pub(crate) const BIT_SEQUENCE: &str = "BitVec";

/// Structural rendering of a path-less field list.
///
/// Named fields give `{ a: A, b: B }`, unnamed give `(A, B)`, none gives `()`.
pub(crate) fn fields<S: AsRef<str>>(fields: &[(Option<&str>, S)]) -> String {
    if fields.is_empty() {
        return "()".to_string();
    }
    if fields.iter().all(|(name, _)| name.is_some()) {
        let body = fields
            .iter()
            .map(|(name, ty)| format!("{}: {}", name.unwrap_or_default(), ty.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {} }}", body)
    } else {
        let names: Vec<&str> = fields.iter().map(|(_, ty)| ty.as_ref()).collect();
        tuple(&names)
    }
}

/// Structural rendering of a path-less variant: `enum { A, B(T), C { x: T } }`.
pub(crate) fn variant<S: AsRef<str>>(arms: &[(&str, Vec<(Option<&str>, S)>)]) -> String {
    let mut out = String::from("enum {");
    for (i, (name, arm_fields)) in arms.iter().enumerate() {
        out.push_str(if i == 0 { " " } else { ", " });
        out.push_str(name);
        if !arm_fields.is_empty() {
            let rendered = fields(arm_fields);
            if rendered.starts_with('{') {
                out.push(' ');
            }
            out.push_str(&rendered);
        }
    }
    out.push_str(if arms.is_empty() { "}" } else { " }" });
    out
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
