//! Event-driven parser for Ada index files.
//!
//! An index document contains `<Ada>` elements at any depth; each carries a
//! flat set of child fields:
//!
//! ```xml
//! <Ada>
//!   <doc_ada_id>42</doc_ada_id>
//!   <doc_date>2024-03-05T00:00:00</doc_date>
//!   <gimla_code>1</gimla_code>
//!   <gimal_desc>Pension</gimal_desc>
//!   <doc_type>7</doc_type>
//!   <doc_type_desc>Invoice</doc_type_desc>
//!   <event_date>2024-03-01T00:00:00</event_date>
//! </Ada>
//! ```
//!
//! `gimal_desc` is a typo in the producing system; it is part of the wire
//! format and matched verbatim.

use adarep_core::AdaDocument;
use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::{Reader, events::Event};

use crate::error::{Error, Result};

/// Wire timestamp format; only the date part is kept.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse every `Ada` record in `input`, in document order.
///
/// A malformed required field in any record fails the whole call: the
/// caller treats an index file as a unit.
pub fn parse_documents(input: &str) -> Result<Vec<AdaDocument>> {
  let mut reader = Reader::from_str(input);
  reader.config_mut().trim_text(true);

  let mut documents = Vec::new();
  loop {
    match reader.read_event()? {
      Event::Start(ref e) if local_name(e.name().as_ref()) == b"Ada" => {
        documents.push(parse_record(&mut reader)?);
      }
      // An empty <Ada/> has no fields at all.
      Event::Empty(ref e) if local_name(e.name().as_ref()) == b"Ada" => {
        return Err(Error::MissingField("doc_ada_id"));
      }
      Event::Eof => break,
      _ => {}
    }
  }
  Ok(documents)
}

/// Accumulated child-field text for one record.
#[derive(Default)]
struct RecordFields {
  doc_ada_id:    Option<String>,
  doc_date:      Option<String>,
  gimla_code:    Option<String>,
  gimal_desc:    Option<String>,
  doc_type:      Option<String>,
  doc_type_desc: Option<String>,
  event_date:    Option<String>,
}

impl RecordFields {
  fn slot(&mut self, name: &[u8]) -> Option<&mut Option<String>> {
    match name {
      b"doc_ada_id" => Some(&mut self.doc_ada_id),
      b"doc_date" => Some(&mut self.doc_date),
      b"gimla_code" => Some(&mut self.gimla_code),
      b"gimal_desc" => Some(&mut self.gimal_desc),
      b"doc_type" => Some(&mut self.doc_type),
      b"doc_type_desc" => Some(&mut self.doc_type_desc),
      b"event_date" => Some(&mut self.event_date),
      _ => None,
    }
  }
}

/// Consume events up to the closing `</Ada>` and build a record.
fn parse_record(reader: &mut Reader<&[u8]>) -> Result<AdaDocument> {
  let mut fields = RecordFields::default();
  let mut current: Option<Vec<u8>> = None;

  loop {
    match reader.read_event()? {
      Event::Start(ref e) => {
        current = Some(e.local_name().as_ref().to_vec());
      }
      Event::Text(ref t) => {
        if let Some(name) = &current
          && let Some(slot) = fields.slot(name)
        {
          let text = t.unescape().map_err(quick_xml::Error::from)?;
          slot.get_or_insert_with(|| text.into_owned());
        }
      }
      Event::End(ref e) => {
        if local_name(e.name().as_ref()) == b"Ada" {
          break;
        }
        current = None;
      }
      Event::Eof => return Err(Error::UnclosedRecord),
      _ => {}
    }
  }

  build_document(fields)
}

fn build_document(fields: RecordFields) -> Result<AdaDocument> {
  Ok(AdaDocument {
    ada_id:               parse_int("doc_ada_id", fields.doc_ada_id)?,
    doc_date:             parse_date("doc_date", fields.doc_date)?,
    gimla_code:           parse_int("gimla_code", fields.gimla_code)?,
    gimla_description:    fields.gimal_desc.unwrap_or_default(),
    doc_type:             parse_int("doc_type", fields.doc_type)?,
    doc_type_description: fields.doc_type_desc.unwrap_or_default(),
    // Optional: absent or unparseable yields no value, never an error.
    event_date:           fields.event_date.and_then(|v| {
      NaiveDateTime::parse_from_str(&v, DATE_FORMAT)
        .ok()
        .map(|dt| dt.date())
    }),
  })
}

fn parse_int<T: std::str::FromStr>(
  field: &'static str,
  value: Option<String>,
) -> Result<T> {
  let value = value.ok_or(Error::MissingField(field))?;
  value
    .trim()
    .parse()
    .map_err(|_| Error::InvalidInteger { field, value })
}

fn parse_date(field: &'static str, value: Option<String>) -> Result<NaiveDate> {
  let value = value.ok_or(Error::MissingField(field))?;
  NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT)
    .map(|dt| dt.date())
    .map_err(|_| Error::InvalidDate { field, value })
}

fn local_name(name: &[u8]) -> &[u8] {
  // strip "prefix:" if present
  if let Some(pos) = name.iter().rposition(|&b| b == b':') {
    &name[pos + 1..]
  } else {
    name
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn record(fields: &str) -> String {
    format!("<index><Ada>{fields}</Ada></index>")
  }

  const FULL: &str = "<doc_ada_id>42</doc_ada_id>\
                      <doc_date>2024-03-05T00:00:00</doc_date>\
                      <gimla_code>1</gimla_code>\
                      <gimal_desc>Pension</gimal_desc>\
                      <doc_type>7</doc_type>\
                      <doc_type_desc>Invoice</doc_type_desc>\
                      <event_date>2024-03-01T12:30:00</event_date>";

  #[test]
  fn full_record_parses() {
    let docs = parse_documents(&record(FULL)).unwrap();
    assert_eq!(docs.len(), 1);
    let d = &docs[0];
    assert_eq!(d.ada_id, 42);
    assert_eq!(d.doc_date.to_string(), "2024-03-05");
    assert_eq!(d.gimla_code, 1);
    assert_eq!(d.gimla_description, "Pension");
    assert_eq!(d.doc_type, 7);
    assert_eq!(d.doc_type_description, "Invoice");
    assert_eq!(d.event_date.unwrap().to_string(), "2024-03-01");
  }

  #[test]
  fn ada_elements_found_at_any_depth() {
    let input = format!(
      "<root><batch><inner><Ada>{FULL}</Ada></inner></batch></root>"
    );
    let docs = parse_documents(&input).unwrap();
    assert_eq!(docs.len(), 1);
  }

  #[test]
  fn missing_identifier_is_an_error() {
    let input = record(
      "<doc_date>2024-03-05T00:00:00</doc_date>\
       <gimla_code>1</gimla_code>\
       <doc_type>7</doc_type>",
    );
    let err = parse_documents(&input).unwrap_err();
    assert!(matches!(err, Error::MissingField("doc_ada_id")));
  }

  #[test]
  fn bad_required_date_is_an_error() {
    let input = record(
      "<doc_ada_id>42</doc_ada_id>\
       <doc_date>05/03/2024</doc_date>\
       <gimla_code>1</gimla_code>\
       <doc_type>7</doc_type>",
    );
    let err = parse_documents(&input).unwrap_err();
    assert!(matches!(err, Error::InvalidDate {
      field: "doc_date",
      ..
    }));
  }

  #[test]
  fn bad_integer_is_an_error() {
    let input = record(
      "<doc_ada_id>forty-two</doc_ada_id>\
       <doc_date>2024-03-05T00:00:00</doc_date>\
       <gimla_code>1</gimla_code>\
       <doc_type>7</doc_type>",
    );
    let err = parse_documents(&input).unwrap_err();
    assert!(matches!(err, Error::InvalidInteger {
      field: "doc_ada_id",
      ..
    }));
  }

  #[test]
  fn absent_descriptions_default_to_empty() {
    let input = record(
      "<doc_ada_id>42</doc_ada_id>\
       <doc_date>2024-03-05T00:00:00</doc_date>\
       <gimla_code>1</gimla_code>\
       <doc_type>7</doc_type>",
    );
    let docs = parse_documents(&input).unwrap();
    assert_eq!(docs[0].gimla_description, "");
    assert_eq!(docs[0].doc_type_description, "");
  }

  #[test]
  fn unparseable_event_date_becomes_none() {
    let input = record(
      "<doc_ada_id>42</doc_ada_id>\
       <doc_date>2024-03-05T00:00:00</doc_date>\
       <gimla_code>1</gimla_code>\
       <doc_type>7</doc_type>\
       <event_date>not-a-date</event_date>",
    );
    let docs = parse_documents(&input).unwrap();
    assert_eq!(docs[0].event_date, None);
  }

  #[test]
  fn unknown_children_are_ignored() {
    let input = record(&format!("{FULL}<extra_field>x</extra_field>"));
    let docs = parse_documents(&input).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].ada_id, 42);
  }

  #[test]
  fn multiple_records_in_document_order() {
    let second = FULL.replace("<doc_ada_id>42<", "<doc_ada_id>43<");
    let input = format!("<index><Ada>{FULL}</Ada><Ada>{second}</Ada></index>");
    let docs = parse_documents(&input).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].ada_id, 42);
    assert_eq!(docs[1].ada_id, 43);
  }
}
