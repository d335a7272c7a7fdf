#![cfg(feature = "egui")]

use netlistview::egui_app::highlight_query_job;

#[test]
fn marks_every_case_insensitive_match() {
    let job = highlight_query_job("top ALU alu_ctl", "alu");
    let marked: Vec<&str> = job
        .sections
        .iter()
        .filter(|s| s.format.background != Default::default())
        .map(|s| &job.text[s.byte_range.clone()])
        .collect();
    assert_eq!(marked, vec!["ALU", "alu"]);
    assert_eq!(job.text, "top ALU alu_ctl");
}

#[test]
fn empty_query_keeps_one_plain_section() {
    let job = highlight_query_job("top cpu", "  ");
    assert_eq!(job.sections.len(), 1);
    assert_eq!(job.text, "top cpu");
}

#[test]
fn multibyte_text_is_not_split() {
    let job = highlight_query_job("Überlauf über", "ÜBER");
    assert_eq!(job.text, "Überlauf über");
    assert_eq!(job.sections.len(), 3);
}
