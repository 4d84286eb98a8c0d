//! MIME front end.
//!
//! Lead notifications forwarded programmatically arrive as full RFC 5322
//! messages (quoted-printable bodies, multipart alternatives). This module
//! decodes them into the plain text the parser works on:
//!
//! ```text
//! From: <from header>
//! Subject: <subject header>
//!
//! <body>
//! ```
//!
//! The `From` line is kept because several portals are only recognisable by
//! their outbound mail host. Body selection prefers the first `text/plain`
//! part anywhere in the tree, then the first `text/html` part with markup
//! stripped, then the root body.

use mailparse::{MailHeaderMap, ParsedMail, parse_mail};

use crate::error::Result;
use crate::models::ParsedLeadData;
use crate::parser::parse_email_content;

const HTML_RENDER_WIDTH: usize = 400;

/// Decode a raw message into parser input text.
pub fn extract_message_text(message: &[u8]) -> Result<String> {
    let parsed = parse_mail(message).map_err(|e| {
        log::debug!("failed to parse MIME: {}", e);
        e
    })?;

    let mut text = String::new();
    if let Some(from) = parsed.headers.get_first_value("From") {
        text.push_str(&format!("From: {}\n", from.trim()));
    }
    if let Some(subject) = parsed.headers.get_first_value("Subject") {
        text.push_str(&format!("Subject: {}\n", subject.trim()));
    }
    if !text.is_empty() {
        text.push('\n');
    }

    let body = if let Some(plain) = find_part(&parsed, "text/plain") {
        plain.get_body()?
    } else if let Some(html) = find_part(&parsed, "text/html") {
        html_to_text(&html.get_body()?)
    } else {
        parsed.get_body()?
    };

    text.push_str(body.replace("\r\n", "\n").replace('\0', "").trim());
    Ok(text)
}

/// Decode a raw message and parse the resulting text.
pub fn parse_message_bytes(message: &[u8]) -> Result<ParsedLeadData> {
    let text = extract_message_text(message)?;
    Ok(parse_email_content(&text))
}

/// Depth-first search for the first leaf part of the given MIME type.
fn find_part<'a, 'b>(part: &'a ParsedMail<'b>, mimetype: &str) -> Option<&'a ParsedMail<'b>> {
    if part.subparts.is_empty() {
        return (part.ctype.mimetype.eq_ignore_ascii_case(mimetype)).then_some(part);
    }
    part.subparts
        .iter()
        .find_map(|subpart| find_part(subpart, mimetype))
}

/// Render an HTML body as text. The width is generous so `Label : value`
/// pairs are never wrapped onto two lines.
fn html_to_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), HTML_RENDER_WIDTH) {
        Ok(text) => text.replace('\u{a0}', " "),
        Err(e) => {
            log::warn!("failed to render HTML body, using it as is: {}", e);
            html.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PortalType;

    #[test]
    fn single_part_message_keeps_headers_and_body() {
        let raw = concat!(
            "From: Idealista <noreply@idealista.com>\r\n",
            "Subject: Nuevo contacto\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Nombre: Ana Ruiz\r\n",
        );

        let text = extract_message_text(raw.as_bytes()).unwrap();
        assert!(text.starts_with("From: Idealista <noreply@idealista.com>\nSubject: Nuevo contacto\n\n"));
        assert!(text.contains("Nombre: Ana Ruiz"));
    }

    #[test]
    fn multipart_prefers_plain_text() {
        let raw = concat!(
            "From: leads@example.com\r\n",
            "Subject: Lead\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: multipart/alternative; boundary=\"b1\"\r\n",
            "\r\n",
            "--b1\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "\r\n",
            "<p>Name: Html Person</p>\r\n",
            "--b1\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Name: Plain Person\r\n",
            "--b1--\r\n",
        );

        let text = extract_message_text(raw.as_bytes()).unwrap();
        assert!(text.contains("Name: Plain Person"));
        assert!(!text.contains("Html Person"));
    }

    #[test]
    fn html_only_message_is_stripped() {
        let raw = concat!(
            "From: Belles Demeures <contact@bellesdemeures.com>\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "\r\n",
            "<div>Nom&nbsp;: Henri</div><div>Budget : 900 000 &euro;</div>\r\n",
        );

        let record = parse_message_bytes(raw.as_bytes()).unwrap();
        assert_eq!(record.portal_name, PortalType::BellesDemeures);
        assert_eq!(record.fields.name.as_deref(), Some("Henri"));
        assert_eq!(record.fields.budget.as_deref(), Some("900000"));
    }

    #[test]
    fn html_entities_are_decoded() {
        let raw = concat!(
            "From: Belles Demeures <contact@bellesdemeures.com>\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "\r\n",
            "<p>Nom : Ren&#233; C&ocirc;t&eacute;</p>",
            "<p>Type de bien : Ch&acirc;teau</p>",
            "<p>Demande : L&rsquo;annonce m&rsquo;int&eacute;resse.</p>\r\n",
        );

        let text = extract_message_text(raw.as_bytes()).unwrap();
        assert!(!text.contains('&'), "undecoded entity in {text:?}");

        let record = parse_email_content(&text);
        assert_eq!(record.fields.name.as_deref(), Some("René Côté"));
        assert_eq!(record.fields.property_type.as_deref(), Some("Château"));
        assert_eq!(
            record.fields.message.as_deref(),
            Some("L\u{2019}annonce m\u{2019}intéresse.")
        );
    }

    #[test]
    fn quoted_printable_body_is_decoded() {
        let raw = concat!(
            "From: SeLoger <noreply@seloger.com>\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n",
            "Pr=C3=A9nom : Lucie\r\n",
            "Nom : Girard\r\n",
        );

        let record = parse_message_bytes(raw.as_bytes()).unwrap();
        assert_eq!(record.portal_name, PortalType::SeLoger);
        assert_eq!(record.fields.name.as_deref(), Some("Lucie Girard"));
    }
}
