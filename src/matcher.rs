use crate::category::CategorySettings;
use crate::model::ResultItem;
use std::cmp::Ordering;

const EXACT_SCORE: f64 = 1.0;
const PREFIX_SCORE: f64 = 0.95;
const CONTAINS_SCORE: f64 = 0.85;

/// Case-insensitive Levenshtein distance counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row of the DP matrix.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Normalized closeness of `target` to `query` in `[0, 1]`.
pub fn similarity(query: &str, target: &str) -> f64 {
    if query.is_empty() || target.is_empty() {
        return 0.0;
    }

    let q = query.to_lowercase();
    let t = target.to_lowercase();

    if t == q {
        return EXACT_SCORE;
    }
    if t.starts_with(&q) {
        return PREFIX_SCORE;
    }
    if t.contains(&q) {
        return CONTAINS_SCORE;
    }

    let distance = edit_distance(&q, &t) as f64;
    let max_len = q.chars().count().max(t.chars().count()) as f64;
    (1.0 - distance / max_len).max(0.0)
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Stable sort, best match first. Empty queries leave the order untouched.
pub fn rank_by_similarity(items: &mut Vec<ResultItem>, query: &str) {
    if query.is_empty() {
        return;
    }
    let mut scored: Vec<(f64, ResultItem)> = items
        .drain(..)
        .map(|item| (similarity(query, &item.display), item))
        .collect();
    scored.sort_by(|a, b| by_score_desc(a.0, b.0));
    items.extend(scored.into_iter().map(|(_, item)| item));
}

/// Category priority ascending, then similarity descending when a query is
/// present. Remaining ties keep their input order.
pub fn rank_by_priority_then_similarity(
    items: &mut Vec<ResultItem>,
    query: &str,
    settings: &CategorySettings,
) {
    let with_query = !query.is_empty();
    let mut keyed: Vec<(i64, f64, ResultItem)> = items
        .drain(..)
        .map(|item| {
            let priority = settings.resolve_priority(item.category_or_other());
            let score = if with_query { similarity(query, &item.display) } else { 0.0 };
            (priority, score, item)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| by_score_desc(a.1, b.1)));
    items.extend(keyed.into_iter().map(|(_, _, item)| item));
}
