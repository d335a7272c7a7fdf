#![cfg(feature = "egui")]

use eframe::egui::{self, Color32, text::LayoutJob};

/// Layout job for `text` with every case-insensitive occurrence of `query`
/// on a yellow background.
///
/// Matching is done on chars, so a query never splits a multi-byte
/// character even when lowercasing changes byte lengths.
pub fn highlight_query_job(text: &str, query: &str) -> LayoutJob {
    let mut job = LayoutJob::default();
    let plain = egui::TextFormat::default();
    let marked = egui::TextFormat {
        background: Color32::YELLOW,
        ..Default::default()
    };

    let query: Vec<char> = query.trim().chars().flat_map(char::to_lowercase).collect();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if query.is_empty() || chars.len() < query.len() {
        job.append(text, 0.0, plain);
        return job;
    }

    let lower: Vec<char> = chars
        .iter()
        .map(|&(_, c)| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());

    let mut start = 0;
    let mut i = 0;
    while i + query.len() <= lower.len() {
        if lower[i..i + query.len()] == query[..] {
            if i > start {
                job.append(&text[byte_at(start)..byte_at(i)], 0.0, plain.clone());
            }
            let end = i + query.len();
            job.append(&text[byte_at(i)..byte_at(end)], 0.0, marked.clone());
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    if start < chars.len() {
        job.append(&text[byte_at(start)..], 0.0, plain);
    }
    job
}
