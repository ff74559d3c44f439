use std::collections::HashMap;

/// Rewrite every `[[x]]` cross-link in a front side as a numbered cloze
/// blank `{{cN::x}}`. Numbers follow first appearance left to right; a
/// repeated link reuses its number. Fronts without links yield `None`.
pub fn cloze_front(front: &str) -> Option<String> {
    let mut numbers: HashMap<String, usize> = HashMap::new();
    let mut next = 1;
    let mut out = String::with_capacity(front.len());
    let mut rest = front;
    let mut found = false;

    while let Some(start) = rest.find("[[") {
        let Some(end) = rest[start + 2..].find("]]") else {
            break;
        };
        let target = &rest[start + 2..start + 2 + end];

        let number = *numbers.entry(target.to_string()).or_insert_with(|| {
            let n = next;
            next += 1;
            n
        });

        out.push_str(&rest[..start]);
        out.push_str(&format!("{{{{c{number}::{target}}}}}"));
        rest = &rest[start + 2 + end + 2..];
        found = true;
    }

    if !found {
        return None;
    }
    out.push_str(rest);
    Some(out)
}
