//! Static transaction type table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{DirectoryError, DirectoryResult};
use super::{is_valid_at, periods_overlap, TextschluesselDirectory};
use crate::types::Textschluessel;

/// One row of the transaction type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextschluesselEntry {
    pub key: u8,
    /// Ignored for variable entries, which accept any extension
    pub extension: u16,
    pub debit: bool,
    pub remittance: bool,
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl TextschluesselEntry {
    fn new(key: u8, extension: u16, debit: bool, remittance: bool) -> Self {
        Self {
            key,
            extension,
            debit,
            remittance,
            variable: false,
            valid_from: None,
            valid_to: None,
        }
    }

    fn variable(mut self) -> Self {
        self.variable = true;
        self.extension = 0;
        self
    }

    fn matches(&self, key: u8, extension: u16) -> bool {
        self.key == key && (self.variable || self.extension == extension)
    }

    fn collides_with(&self, other: &TextschluesselEntry) -> bool {
        let same_code = self.key == other.key
            && (self.variable || other.variable || self.extension == other.extension);
        same_code
            && periods_overlap(
                (self.valid_from, self.valid_to),
                (other.valid_from, other.valid_to),
            )
    }

    fn to_textschluessel(&self, extension: u16) -> Option<Textschluessel> {
        Textschluessel::new(self.key, extension)
            .ok()
            .map(|t| t.with_flags(self.debit, self.remittance).with_variable(self.variable))
    }
}

/// The common transaction types.
fn builtin_entries() -> Vec<TextschluesselEntry> {
    vec![
        // Lastschrift aus Abbuchungsauftrag
        TextschluesselEntry::new(4, 0, true, false),
        // Lastschrift aus Einzugsermaechtigung
        TextschluesselEntry::new(5, 0, true, false),
        // Lastschrift aus electronic cash
        TextschluesselEntry::new(5, 5, true, false),
        TextschluesselEntry::new(5, 6, true, false),
        // Lastschrift aus POZ
        TextschluesselEntry::new(5, 15, true, false),
        // Ueberweisung
        TextschluesselEntry::new(51, 0, false, true),
        // Lohn, Gehalt, Rente
        TextschluesselEntry::new(53, 0, false, true),
        // Vermoegenswirksame Leistung, extension carries the savings share
        TextschluesselEntry::new(54, 0, false, true).variable(),
        // Oeffentliche Kassen
        TextschluesselEntry::new(56, 0, false, true),
    ]
}

/// Table backed by a fixed list of entries.
#[derive(Debug, Clone)]
pub struct StaticTextschluesselDirectory {
    entries: Vec<TextschluesselEntry>,
}

impl StaticTextschluesselDirectory {
    /// Builds a table, rejecting entries that collide in code and validity.
    pub fn from_entries(entries: Vec<TextschluesselEntry>) -> DirectoryResult<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if Textschluessel::new(entry.key, entry.extension).is_err() {
                return Err(DirectoryError::IllegalEntry(format!(
                    "key {} extension {}",
                    entry.key, entry.extension
                )));
            }
            if entries[..i].iter().any(|other| other.collides_with(entry)) {
                return Err(DirectoryError::DuplicateTypeCodeEntry {
                    key: entry.key,
                    extension: entry.extension,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Loads a JSON array of entries.
    pub fn from_json(json: &str) -> DirectoryResult<Self> {
        let entries: Vec<TextschluesselEntry> =
            serde_json::from_str(json).map_err(|e| DirectoryError::IllegalEntry(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[TextschluesselEntry] {
        &self.entries
    }
}

impl Default for StaticTextschluesselDirectory {
    fn default() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }
}

impl TextschluesselDirectory for StaticTextschluesselDirectory {
    fn lookup(&self, key: u8, extension: u16, date: NaiveDate) -> Option<Textschluessel> {
        self.entries
            .iter()
            .find(|e| e.matches(key, extension) && is_valid_at(e.valid_from, e.valid_to, date))
            .and_then(|e| e.to_textschluessel(extension))
    }

    fn search(&self, debit: bool, remittance: bool, date: NaiveDate) -> Vec<Textschluessel> {
        self.entries
            .iter()
            .filter(|e| is_valid_at(e.valid_from, e.valid_to, date))
            .filter(|e| (debit && e.debit) || (remittance && e.remittance))
            .filter_map(|e| e.to_textschluessel(e.extension))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_builtin_table_has_no_duplicates() {
        assert!(StaticTextschluesselDirectory::from_entries(builtin_entries()).is_ok());
    }

    #[test]
    fn test_lookup_fixed_entry() {
        let directory = StaticTextschluesselDirectory::default();
        let t = directory.lookup(51, 0, today()).unwrap();
        assert!(t.remittance);
        assert!(!t.debit);
        assert!(directory.lookup(51, 1, today()).is_none());
        assert!(directory.lookup(99, 0, today()).is_none());
    }

    #[test]
    fn test_lookup_variable_entry() {
        let directory = StaticTextschluesselDirectory::default();
        let t = directory.lookup(54, 13, today()).unwrap();
        assert_eq!(t.extension, 13);
        assert!(t.variable);
        assert!(t.remittance);
    }

    #[test]
    fn test_search_by_flags() {
        let directory = StaticTextschluesselDirectory::default();
        let debit = directory.search(true, false, today());
        assert_eq!(debit.len(), 5);
        assert!(debit.iter().all(|t| t.debit));

        let remittance = directory.search(false, true, today());
        assert_eq!(remittance.len(), 4);
        assert!(directory.search(false, false, today()).is_empty());
    }

    #[test]
    fn test_loader_rejects_duplicates() {
        let err = StaticTextschluesselDirectory::from_json(
            r#"[
                {"key": 51, "extension": 0, "debit": false, "remittance": true},
                {"key": 51, "extension": 0, "debit": false, "remittance": true}
            ]"#,
        )
        .unwrap_err();
        assert_eq!(err, DirectoryError::DuplicateTypeCodeEntry { key: 51, extension: 0 });
        assert_eq!(err.code(), "DTAUS_DUPLICATE_TYPE_CODE_ENTRY");
    }

    #[test]
    fn test_loader_accepts_disjoint_periods() {
        let directory = StaticTextschluesselDirectory::from_json(
            r#"[
                {"key": 51, "extension": 0, "debit": false, "remittance": true,
                 "valid_to": "2001-12-31"},
                {"key": 51, "extension": 0, "debit": true, "remittance": false,
                 "valid_from": "2002-01-01"}
            ]"#,
        )
        .unwrap();
        assert!(directory.lookup(51, 0, today()).unwrap().debit);
    }

    #[test]
    fn test_loader_rejects_variable_overlap() {
        let err = StaticTextschluesselDirectory::from_json(
            r#"[
                {"key": 54, "extension": 0, "debit": false, "remittance": true, "variable": true},
                {"key": 54, "extension": 13, "debit": false, "remittance": true}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DirectoryError::DuplicateTypeCodeEntry { key: 54, .. }));
    }
}
