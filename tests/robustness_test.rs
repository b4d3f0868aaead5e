use rs_newsextract::{extract, extract_with_options, Options};
use std::time::{Duration, Instant};

#[test]
fn extract_does_not_panic_on_malformed_html_unclosed_tags() {
    let html = "<p>text<div>more";
    let result = extract(html);
    match result {
        Ok(result) => {
            assert!(result.text.contains("text"));
            assert!(result.text.contains("more"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_malformed_html_invalid_nesting() {
    let html = "<p><div></p></div>";
    assert!(extract(html).is_ok());
}

#[test]
fn extract_does_not_panic_on_malformed_html_missing_closing_tags() {
    let html = "<html><body><article>content";
    let result = extract(html);
    match result {
        Ok(result) => assert!(result.text.contains("content")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_malformed_html_broken_attributes() {
    let html = "<div class=\"test id=broken>";
    assert!(extract(html).is_ok());
}

#[test]
fn extract_decodes_entities_in_text() {
    let html = "<html><body><p>Fish &amp; chips &lt;cheap&gt; at the pier</p></body></html>";
    let result = extract(html);
    match result {
        Ok(result) => {
            assert!(result.text.contains("Fish & chips"));
            assert!(result.text.contains("at the pier"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_handles_empty_string() {
    let result = extract("");
    match result {
        Ok(result) => {
            assert!(result.text.is_empty());
            assert!(result.stats.body_fallback);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_handles_deeply_nested_markup() {
    let depth = 20_000;
    let mut html = String::from("<html><body>");
    for _ in 0..depth {
        html.push_str("<div>");
    }
    html.push_str("<p>It was the last of the boxes and there was nothing else in the room.</p>");
    for _ in 0..depth {
        html.push_str("</div>");
    }
    html.push_str("</body></html>");

    let result = extract(&html);
    match result {
        Ok(result) => assert!(result.text.contains("nothing else in the room")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn link_only_page_completes_quickly() {
    let mut html = String::from("<html><body><ul>");
    for i in 0..2_000 {
        html.push_str(&format!("<li><a href=\"/item/{i}\">Item number {i}</a></li>"));
    }
    html.push_str("</ul></body></html>");

    let start = Instant::now();
    let result = extract(&html);
    let elapsed = start.elapsed();

    match result {
        Ok(result) => {
            assert_eq!(result.stats.candidates_retained, 0);
            assert!(result.stats.body_fallback);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
    assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
}

#[test]
fn german_page_is_scored_with_german_stopwords() {
    let html = r#"<html><body>
        <nav><a href="/">Start</a><a href="/politik">Politik</a><a href="/sport">Sport</a></nav>
        <article>
          <p>Der Stadtrat hat am Montag beschlossen, dass die neue Brücke noch in diesem Jahr für den Verkehr geöffnet wird.</p>
          <p>Es ist die erste neue Brücke, die seit mehr als zehn Jahren in der Stadt gebaut wird, und sie war lange umstritten.</p>
        </article>
    </body></html>"#;
    let options = Options {
        language: Some("de".to_string()),
        ..Options::default()
    };

    let result = extract_with_options(html, &options);
    match result {
        Ok(result) => {
            assert!(result.stats.candidates_retained >= 2);
            assert!(result.text.contains("Stadtrat"));
            assert!(!result.text.contains("Politik"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn unicode_text_survives_extraction() {
    let html = "<html><body><article><p>Le café est fermé depuis l’été, a dit le maire à la presse.</p></article></body></html>";
    let result = extract(html);
    match result {
        Ok(result) => assert!(result.text.contains("café est fermé")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}
