//! The aggregation catalog — the in-memory state merged across runs.
//!
//! Three key-unique tables backed by `BTreeMap` so exports come out sorted
//! by code without a separate ordering pass: Gimla types, document types,
//! and the ownership relation (which Gimla type owns which document types).
//! The mapping table is not stored; [`Catalog::export_mappings`] recomputes
//! it from the ownership relation on demand.
//!
//! Label policy: the stored tables keep the first description seen for a
//! code (later duplicates are no-ops), while exported mapping rows read the
//! descriptions current at export time.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  document::AdaDocument,
  types::{DocumentType, GimlaToDocument, GimlaType},
};

/// Aggregation state for one run: loaded from prior report rows, mutated by
/// [`Catalog::merge_document`], exported wholesale at the end.
#[derive(Debug, Default)]
pub struct Catalog {
  gimla_types: BTreeMap<i32, GimlaType>,
  doc_types:   BTreeMap<i32, DocumentType>,
  owned:       BTreeMap<i32, BTreeSet<i32>>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed a Gimla type from prior report state. First description wins.
  pub fn insert_gimla_type(&mut self, row: GimlaType) {
    self.gimla_types.entry(row.code).or_insert(row);
  }

  /// Seed a document type from prior report state. First description wins.
  pub fn insert_doc_type(&mut self, row: DocumentType) {
    self.doc_types.entry(row.code).or_insert(row);
  }

  /// Register an ownership edge from prior report state.
  ///
  /// Returns `false` without registering anything when either endpoint is
  /// absent from the already-loaded tables — an inconsistent prior row is
  /// dropped, not guessed at.
  pub fn link_prior_mapping(&mut self, gimla_code: i32, doc_type: i32) -> bool {
    if !self.gimla_types.contains_key(&gimla_code)
      || !self.doc_types.contains_key(&doc_type)
    {
      return false;
    }
    self.owned.entry(gimla_code).or_default().insert(doc_type);
    true
  }

  /// Fold one parsed record into the catalog.
  ///
  /// Creates the Gimla type and document type if their codes are new,
  /// then registers the ownership edge. Idempotent: merging the same
  /// record twice leaves the catalog unchanged.
  pub fn merge_document(&mut self, doc: &AdaDocument) {
    self.gimla_types.entry(doc.gimla_code).or_insert_with(|| GimlaType {
      code:        doc.gimla_code,
      description: doc.gimla_description.clone(),
    });
    self.doc_types.entry(doc.doc_type).or_insert_with(|| DocumentType {
      code:        doc.doc_type,
      description: doc.doc_type_description.clone(),
    });
    self.owned.entry(doc.gimla_code).or_default().insert(doc.doc_type);
  }

  /// All Gimla types, ascending by code.
  pub fn export_gimla_types(&self) -> Vec<GimlaType> {
    self.gimla_types.values().cloned().collect()
  }

  /// All document types, ascending by code.
  pub fn export_doc_types(&self) -> Vec<DocumentType> {
    self.doc_types.values().cloned().collect()
  }

  /// Recompute the mapping table from the ownership relation, ascending by
  /// (Gimla code, document type code). Descriptions are read from the
  /// stored tables at this point, so a description carried in from prior
  /// state propagates into every mapping row that references it.
  pub fn export_mappings(&self) -> Vec<GimlaToDocument> {
    let mut rows = Vec::new();
    for (code, doc_types) in &self.owned {
      // Edges are only registered with both endpoints present, so these
      // lookups cannot fail; guard anyway rather than panic.
      let Some(gimla) = self.gimla_types.get(code) else {
        continue;
      };
      for doc_code in doc_types {
        let Some(doc) = self.doc_types.get(doc_code) else {
          continue;
        };
        rows.push(GimlaToDocument {
          gimla_code:        gimla.code,
          gimla_description: gimla.description.clone(),
          doc_type:          doc.code,
          doc_description:   doc.description.clone(),
        });
      }
    }
    rows
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
