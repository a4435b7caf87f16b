use super::*;

fn composer() -> EmailComposer {
    EmailComposer::new(Envelope {
        from: "Site <site@example.com>".into(),
        to: "me@example.com".into(),
        subject_tag: "New Portfolio Contact".into(),
    })
    .expect("templates")
}

#[test]
fn addressing_comes_from_envelope_and_reply_to_from_submission() {
    let submission = SubmissionRequest::new("Ada", "  ada@example.com ", " Hi ", "Hello");
    let email = composer().compose(&submission).expect("compose");

    assert_eq!(email.from, "Site <site@example.com>");
    assert_eq!(email.to, vec!["me@example.com".to_string()]);
    assert_eq!(email.reply_to, "ada@example.com");
    assert_eq!(email.subject, "New Portfolio Contact: Hi");
}

#[test]
fn both_bodies_carry_name_and_message() {
    let submission = SubmissionRequest::new("Ada", "ada@example.com", "Hi", "Line one\nLine two");
    let email = composer().compose(&submission).expect("compose");

    for body in [&email.html, &email.text] {
        assert!(body.contains("Ada"));
        assert!(body.contains("Line one\nLine two"));
        assert!(body.contains("New Portfolio Contact"));
    }
    assert!(email.text.contains("Name: Ada\nEmail: ada@example.com\nSubject: Hi"));
}

#[test]
fn html_body_escapes_markup_but_text_body_keeps_it() {
    let submission =
        SubmissionRequest::new("<b>Ada</b>", "ada@example.com", "Hi", "<script>x</script> & co");
    let email = composer().compose(&submission).expect("compose");

    assert!(!email.html.contains("<script>"));
    assert!(email.html.contains("&lt;script&gt;"));
    assert!(email.html.contains("&lt;b&gt;Ada"));
    assert!(email.html.contains("&amp; co"));
    assert!(email.text.contains("<script>x</script> & co"));
}

#[test]
fn default_envelope_uses_portfolio_sender() {
    let envelope = Envelope::default();
    assert_eq!(envelope.from, DEFAULT_MAIL_FROM);
    assert_eq!(envelope.subject_tag, "New Portfolio Contact");
}

#[test]
fn byte_order_marks_are_trimmed_from_rendered_values() {
    let submission =
        SubmissionRequest::new("\u{feff}Ada", "ada@example.com\u{feff}", "\u{feff}Hi", "Hello");
    let email = composer().compose(&submission).expect("compose");

    assert_eq!(email.reply_to, "ada@example.com");
    assert_eq!(email.subject, "New Portfolio Contact: Hi");
    assert!(email.text.contains("Name: Ada\n"));
}
