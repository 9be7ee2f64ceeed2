// src/core/html.rs
// Tolerant HTML scanning for saved or fetched results pages.
// Case-insensitive on ASCII tag/attribute names. No DOM is built.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Byte index just past the `>` closing the tag that starts at `from`.
/// Quoted attribute values may contain `>`.
fn tag_end(s: &str, from: usize) -> Option<usize> {
    let b = s.as_bytes();
    let (mut in_s, mut in_d) = (false, false);
    let mut i = from + 1;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Tag name of an opening tag starting at `from` (lower-cased), if any.
fn tag_name(lc: &str, from: usize) -> Option<&str> {
    let rest = lc.get(from + 1..)?;
    let len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    (len > 0).then(|| &rest[..len])
}

/// Past the body of a raw-text element (`script`, `style`), if `name` is one.
fn skip_raw_text(html: &str, lc: &str, name: Option<&str>, end: usize) -> usize {
    match name {
        Some(raw @ ("script" | "style")) => {
            let close = format!("</{raw}");
            lc[end..].find(&close).map_or(html.len(), |c| {
                tag_end(html, end + c).unwrap_or(html.len())
            })
        }
        _ => end,
    }
}

/// Does the opening tag text carry `id="<id>"` (any quoting)?
fn has_id(tag_lc: &str, id_lc: &str) -> bool {
    [format!("id=\"{id_lc}\""), format!("id='{id_lc}'"), format!("id={id_lc}")]
        .iter()
        .any(|pat| {
            tag_lc.match_indices(pat.as_str()).any(|(i, _)| {
                let before = tag_lc[..i].chars().next_back();
                let after = tag_lc[i + pat.len()..].chars().next();
                matches!(before, Some(c) if c.is_ascii_whitespace())
                    && (pat.ends_with(['"', '\'']) || matches!(after, None | Some('>' | '/') | Some(' ')))
            })
        })
}

/// Inner HTML of the first element whose `id` attribute equals `id`.
/// Nested elements with the same tag name are balanced; an unclosed
/// element runs to the end of the document.
pub fn element_by_id<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let lc = to_lower(html);
    let id_lc = to_lower(id);

    let mut from = 0;
    let (name, inner_start) = loop {
        let start = lc.get(from..)?.find('<')? + from;
        let end = tag_end(html, start)?;
        let name = tag_name(&lc, start);
        if let Some(name) = name {
            if has_id(&lc[start..end], &id_lc) {
                break (name.to_string(), end);
            }
        }
        from = skip_raw_text(html, &lc, name, end);
    };

    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1usize;
    let mut i = inner_start;
    while let Some(rel) = lc[i..].find('<') {
        let at = i + rel;
        let next = tag_end(html, at).unwrap_or(html.len());
        if lc[at..].starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return Some(&html[inner_start..at]);
            }
        } else if lc[at..].starts_with(&open) && tag_name(&lc, at) == Some(name.as_str()) {
            let self_closing = lc[at..next].trim_end_matches('>').ends_with('/');
            if !self_closing {
                depth += 1;
            }
        }
        i = next;
    }
    Some(&html[inner_start..])
}

/// Visible text of an HTML fragment, one entry per text run between tags.
/// `<script>`/`<style>` bodies are skipped, entities decoded, whitespace
/// collapsed, empty runs dropped.
pub fn visible_lines(fragment: &str) -> Vec<String> {
    let lc = to_lower(fragment);
    let mut out = Vec::new();
    let mut i = 0;

    while i < fragment.len() {
        let Some(rel) = fragment[i..].find('<') else {
            push_run(&mut out, &fragment[i..]);
            break;
        };
        let at = i + rel;
        push_run(&mut out, &fragment[i..at]);

        let end = tag_end(fragment, at).unwrap_or(fragment.len());
        i = skip_raw_text(fragment, &lc, tag_name(&lc, at), end);
    }
    out
}

fn push_run(out: &mut Vec<String>, raw: &str) {
    let text = super::sanitize::normalize_ws(&super::sanitize::normalize_entities(raw));
    if !text.is_empty() {
        out.push(text);
    }
}
