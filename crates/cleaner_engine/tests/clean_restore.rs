use cleaner_engine::{is_hidden, Cleaner, CleanerConfig, Document, NodeId};
use pretty_assertions::assert_eq;

const TICKET: &str = r#"<html><body>
<div class="ticket-thread" id=thread>
  <div class="ticket-details__item ticket-details__requestor" id=m1><p id=a>Current reply</p><hr id=marker1><p id=b>Older reply</p><div style="border:none;border-top:solid #E1E1E1 1.0pt;padding:3.0pt 0cm 0cm 0cm" id=marker2>From: someone</div>Oldest reply text</div>
  <div class="ticket-details__item" id=m2><p>Agent answer without quotes</p></div>
  <div class="ticket-details__item" id=m3>Short answer<hr style="display:inline-block;width:98%">quoted<br>more quoted</div>
</div>
</body></html>"#;

fn init_logging() {
    cleaner_logging::initialize_for_tests();
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id).expect(id)
}

#[test]
fn scenario_partitions_message_and_restores_it() {
    init_logging();
    let mut doc = Document::parse(TICKET);
    let mut cleaner = Cleaner::new(CleanerConfig::default());
    let m1 = by_id(&doc, "m1");
    let original = doc.inner_html(m1).unwrap();
    let original_children = doc.children(m1).len();

    let report = cleaner.clean_all(&mut doc, 1_000);

    assert_eq!(report.cleaned, 2);
    assert!(report.skipped.is_empty());
    assert!(!is_hidden(&doc, by_id(&doc, "a")));
    for hidden in ["marker1", "b", "marker2"] {
        assert!(is_hidden(&doc, by_id(&doc, hidden)), "{hidden} should be hidden");
    }
    let tail = doc.children(m1).last().copied().unwrap();
    assert!(is_hidden(&doc, tail));
    assert_eq!(doc.text_content(tail), "Oldest reply text");
    assert_eq!(cleaner.backups().get(m1).unwrap().html, original);

    let restored = cleaner.restore_all(&mut doc);

    assert_eq!(restored.restored, 2);
    assert!(restored.failed.is_empty());
    assert!(cleaner.backups().is_empty());
    assert_eq!(doc.inner_html(m1).unwrap(), original);
    assert_eq!(doc.children(m1).len(), original_children);
}

#[test]
fn second_pass_without_restore_changes_nothing() {
    init_logging();
    let mut doc = Document::parse(TICKET);
    let mut cleaner = Cleaner::default();
    let body = doc.body().unwrap();

    assert_eq!(cleaner.clean_all(&mut doc, 0).cleaned, 2);
    let after_first = doc.inner_html(body).unwrap();
    let second = cleaner.clean_all(&mut doc, 10);

    assert_eq!(second.cleaned, 0);
    assert_eq!(doc.inner_html(body).unwrap(), after_first);
    assert_eq!(cleaner.backups().len(), 2);
}

#[test]
fn message_without_markers_is_never_touched() {
    init_logging();
    let mut doc = Document::parse(TICKET);
    let mut cleaner = Cleaner::default();
    let m2 = by_id(&doc, "m2");
    let before = doc.outer_html(m2).unwrap();

    cleaner.clean_all(&mut doc, 0);

    assert!(!cleaner.backups().contains(m2));
    assert_eq!(doc.outer_html(m2).unwrap(), before);
}

#[test]
fn content_after_last_marker_is_hidden_to_the_end() {
    init_logging();
    let mut doc = Document::parse(TICKET);
    let mut cleaner = Cleaner::default();
    let m3 = by_id(&doc, "m3");

    cleaner.clean_all(&mut doc, 0);

    assert_eq!(
        doc.inner_html(m3).unwrap(),
        "Short answer<hr style=\"display: none; width: 98%;\">\
         <span style=\"display: none;\">quoted</span>\
         <br style=\"display: none;\">\
         <span style=\"display: none;\">more quoted</span>"
    );
}

#[test]
fn clean_restore_clean_cycle_is_repeatable() {
    init_logging();
    let mut doc = Document::parse(TICKET);
    let mut cleaner = Cleaner::default();
    let body = doc.body().unwrap();

    cleaner.clean_all(&mut doc, 0);
    let cleaned_once = doc.inner_html(body).unwrap();
    cleaner.restore_all(&mut doc);
    let report = cleaner.clean_all(&mut doc, 5_000);

    assert_eq!(report.cleaned, 2);
    assert_eq!(doc.inner_html(body).unwrap(), cleaned_once);
}

#[test]
fn message_inserted_after_a_pass_is_picked_up_by_the_next() {
    init_logging();
    let mut doc = Document::parse(TICKET);
    let mut cleaner = Cleaner::default();
    cleaner.clean_all(&mut doc, 0);

    let fragment = doc
        .parse_fragment(r#"<div class="ticket-details__item" id=late>New<hr>Old</div>"#)
        .unwrap();
    let late = doc.children(fragment)[0];
    let last_message = by_id(&doc, "m3");
    doc.insert_after(last_message, late).unwrap();

    let report = cleaner.clean_all(&mut doc, 3_000);

    assert_eq!(report.cleaned, 1);
    assert!(cleaner.backups().contains(late));
    assert_eq!(cleaner.backups().get(late).unwrap().captured_at_ms, 3_000);
}

#[test]
fn restore_writes_noscript_text_back_unescaped() {
    init_logging();
    let mut doc = Document::parse(
        r#"<div class="ticket-details__item" id=m>A<hr><noscript><b>x</b> &amp; y</noscript>B</div>"#,
    );
    let mut cleaner = Cleaner::default();
    let message = by_id(&doc, "m");
    let original = doc.inner_html(message).unwrap();
    assert_eq!(doc.text_content(message), "A<b>x</b> &amp; yB");

    assert_eq!(cleaner.clean_all(&mut doc, 0).cleaned, 1);
    assert_eq!(cleaner.restore_all(&mut doc).restored, 1);

    assert_eq!(doc.text_content(message), "A<b>x</b> &amp; yB");
    assert_eq!(doc.inner_html(message).unwrap(), original);
}

#[test]
fn restore_keeps_namespaced_attribute_prefixes() {
    init_logging();
    let mut doc = Document::parse(
        r##"<div class="ticket-details__item" id=m>A<hr><svg><use xlink:href="#icon"></use></svg></div>"##,
    );
    let mut cleaner = Cleaner::default();
    let message = by_id(&doc, "m");
    let original = doc.inner_html(message).unwrap();
    assert!(original.contains(r##"<use xlink:href="#icon">"##));

    cleaner.clean_all(&mut doc, 0);
    cleaner.restore_all(&mut doc);

    assert_eq!(doc.inner_html(message).unwrap(), original);
}
