//! SQLite-backed relational store for the four reference tables.
//!
//! One connection per run, opened once and shared by every pipeline.
//! Writes run as per-record transactions: each insert or purge commits on
//! success and rolls back on failure, so the store stays query-consistent
//! even when a run fails partway. There is no batching across records and
//! no pooling — the importer is strictly single-writer.

pub mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::model::{Airport, Port, ShippingCompany, Vessel};

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database. Failure here is the one fatal error
    /// of a run and propagates to the caller.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database {db_path:?}"))?;
        Self::prepare(conn)
    }

    /// In-memory store, used by the test suites.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    /// Raw connection access for ad-hoc queries (reports, tests).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ---- existence checks (natural keys) ----

    pub fn port_exists(&self, name: &str, abbreviation: &str) -> Result<bool> {
        let found = self
            .conn
            .prepare_cached("SELECT 1 FROM ports WHERE name = ?1 OR abbreviation = ?2 LIMIT 1")?
            .exists(params![name, abbreviation])?;
        Ok(found)
    }

    pub fn airport_exists(&self, name: &str, iata_code: &str) -> Result<bool> {
        let found = self
            .conn
            .prepare_cached("SELECT 1 FROM airports WHERE iata_code = ?1 OR name = ?2 LIMIT 1")?
            .exists(params![iata_code, name])?;
        Ok(found)
    }

    /// Case-insensitive company name match. Code collisions are handled
    /// separately by suffixing, so the name alone decides duplication.
    pub fn company_name_exists(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .prepare_cached(
                "SELECT 1 FROM shipping_companies WHERE LOWER(name) = LOWER(?1) LIMIT 1",
            )?
            .exists(params![name])?;
        Ok(found)
    }

    pub fn company_code_exists(&self, code: &str) -> Result<bool> {
        let found = self
            .conn
            .prepare_cached("SELECT 1 FROM shipping_companies WHERE code = ?1 LIMIT 1")?
            .exists(params![code])?;
        Ok(found)
    }

    /// A vessel is a duplicate when its IMO number or its name (case
    /// insensitively) is already present.
    pub fn vessel_exists(&self, name: &str, imo_number: Option<&str>) -> Result<bool> {
        let found = self
            .conn
            .prepare_cached(
                "SELECT 1 FROM vessels
                 WHERE LOWER(name) = LOWER(?1)
                    OR (?2 IS NOT NULL AND imo_number = ?2)
                 LIMIT 1",
            )?
            .exists(params![name, imo_number])?;
        Ok(found)
    }

    pub fn vessel_code_exists(&self, code: &str) -> Result<bool> {
        let found = self
            .conn
            .prepare_cached("SELECT 1 FROM vessels WHERE code = ?1 LIMIT 1")?
            .exists(params![code])?;
        Ok(found)
    }

    // ---- sequential codes ----

    /// Highest numeric suffix among company codes matching `PREFIX` +
    /// digits, or 0 when none exist. SQLite has no regex operator, so
    /// candidates are narrowed with LIKE and parsed here. Single-writer
    /// only: concurrent runs could hand out the same number.
    pub fn max_company_code_number(&self, prefix: &str) -> Result<u32> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT code FROM shipping_companies WHERE code LIKE ?1 || '%'")?;
        let mut max = 0u32;
        let mut rows = stmt.query(params![prefix])?;
        while let Some(row) = rows.next()? {
            let code: String = row.get(0)?;
            if let Ok(number) = code[prefix.len()..].parse::<u32>() {
                max = max.max(number);
            }
        }
        Ok(max)
    }

    // ---- inserts (one transaction per record) ----

    pub fn insert_port(&mut self, port: &Port) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO ports (name, abbreviation, city, country) VALUES (?1, ?2, ?3, ?4)",
            params![port.name, port.abbreviation, port.city, port.country],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn insert_airport(&mut self, airport: &Airport) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO airports (name, iata_code, city, country) VALUES (?1, ?2, ?3, ?4)",
            params![airport.name, airport.iata_code, airport.city, airport.country],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Returns the new row id so the caller can extend the linker cache.
    pub fn insert_company(&mut self, company: &ShippingCompany) -> Result<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO shipping_companies
                 (code, name, abbreviation, city, country, website, email, phone, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                company.code,
                company.name,
                company.abbreviation,
                company.city,
                company.country,
                company.website,
                company.email,
                company.phone,
                company.notes,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    pub fn insert_vessel(&mut self, vessel: &Vessel) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO vessels
                 (code, name, flag_country, length_m, beam_m, draft_m, gross_tonnage,
                  imo_number, status, company_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                vessel.code,
                vessel.name,
                vessel.flag_country,
                vessel.length_m,
                vessel.beam_m,
                vessel.draft_m,
                vessel.gross_tonnage,
                vessel.imo_number,
                vessel.status,
                vessel.company_id,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ---- purge ----

    pub fn delete_all_ports(&mut self) -> Result<u64> {
        self.delete_all("DELETE FROM ports")
    }

    pub fn delete_all_airports(&mut self) -> Result<u64> {
        self.delete_all("DELETE FROM airports")
    }

    /// Vessels reference companies; purge vessels first.
    pub fn delete_all_companies(&mut self) -> Result<u64> {
        self.delete_all("DELETE FROM shipping_companies")
    }

    pub fn delete_all_vessels(&mut self) -> Result<u64> {
        self.delete_all("DELETE FROM vessels")
    }

    fn delete_all(&mut self, sql: &str) -> Result<u64> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(sql, [])?;
        tx.commit()?;
        Ok(deleted as u64)
    }

    // ---- linker support ----

    /// Company identities in insertion order, for preloading the linker
    /// cache before a vessel-only run.
    pub fn load_companies(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM shipping_companies ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Case-insensitive partial name match; first row wins.
    pub fn find_company_by_name_fragment(&self, fragment: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .prepare_cached(
                "SELECT id FROM shipping_companies
                 WHERE LOWER(name) LIKE '%' || LOWER(?1) || '%' LIMIT 1",
            )?
            .query_row(params![fragment], |row| row.get(0))
            .optional()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VESSEL_STATUS_ACTIVE;

    fn sample_company(code: &str, name: &str) -> ShippingCompany {
        ShippingCompany {
            code: code.to_string(),
            name: name.to_string(),
            abbreviation: "X".to_string(),
            city: None,
            country: "Danemark".to_string(),
            website: None,
            email: None,
            phone: None,
            notes: None,
        }
    }

    fn sample_vessel(code: &str, name: &str, company_id: Option<i64>) -> Vessel {
        Vessel {
            code: code.to_string(),
            name: name.to_string(),
            flag_country: None,
            length_m: Some(399.0),
            beam_m: None,
            draft_m: None,
            gross_tonnage: None,
            imo_number: None,
            status: VESSEL_STATUS_ACTIVE.to_string(),
            company_id,
        }
    }

    #[test]
    fn test_port_insert_and_existence() {
        let mut store = Store::open_in_memory().unwrap();
        let port = Port {
            name: "Port of Rotterdam".to_string(),
            abbreviation: "31240".to_string(),
            city: "Rotterdam".to_string(),
            country: "Pays-Bas".to_string(),
        };
        assert!(!store.port_exists(&port.name, &port.abbreviation).unwrap());
        store.insert_port(&port).unwrap();
        assert!(store.port_exists(&port.name, &port.abbreviation).unwrap());
        // either half of the natural key matches
        assert!(store.port_exists("Port of Rotterdam", "other").unwrap());
        assert!(store.port_exists("other", "31240").unwrap());
    }

    #[test]
    fn test_airport_existence_by_iata_or_name() {
        let mut store = Store::open_in_memory().unwrap();
        let airport = Airport {
            name: "Heathrow Aéroport".to_string(),
            iata_code: "LHR".to_string(),
            city: "London".to_string(),
            country: "Royaume-Uni".to_string(),
        };
        assert!(!store
            .airport_exists(&airport.name, &airport.iata_code)
            .unwrap());
        store.insert_airport(&airport).unwrap();
        // either half of the natural key matches
        assert!(store.airport_exists("Heathrow Aéroport", "XXX").unwrap());
        assert!(store.airport_exists("other", "LHR").unwrap());
        assert!(!store.airport_exists("other", "CDG").unwrap());
    }

    #[test]
    fn test_company_name_match_is_case_insensitive() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_company(&sample_company("MAERSK", "Maersk Line"))
            .unwrap();
        assert!(store.company_name_exists("MAERSK LINE").unwrap());
        assert!(store.company_name_exists("maersk line").unwrap());
        assert!(!store.company_name_exists("Maersk").unwrap());
        assert!(store.company_code_exists("MAERSK").unwrap());
    }

    #[test]
    fn test_vessel_existence_by_name_or_imo() {
        let mut store = Store::open_in_memory().unwrap();
        let mut vessel = sample_vessel("IMO9811000", "MSC Gulsun", None);
        vessel.imo_number = Some("9811000".to_string());
        store.insert_vessel(&vessel).unwrap();

        assert!(store.vessel_exists("msc gulsun", None).unwrap());
        assert!(store.vessel_exists("other", Some("9811000")).unwrap());
        assert!(!store.vessel_exists("other", Some("1234567")).unwrap());
        assert!(!store.vessel_exists("other", None).unwrap());
        assert!(store.vessel_code_exists("IMO9811000").unwrap());
    }

    #[test]
    fn test_max_company_code_number() {
        let mut store = Store::open_in_memory().unwrap();
        assert_eq!(store.max_company_code_number("ARM").unwrap(), 0);
        store
            .insert_company(&sample_company("ARM001", "First"))
            .unwrap();
        store
            .insert_company(&sample_company("ARM017", "Second"))
            .unwrap();
        // non-numeric suffixes are ignored
        store
            .insert_company(&sample_company("ARMADA", "Third"))
            .unwrap();
        assert_eq!(store.max_company_code_number("ARM").unwrap(), 17);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_company(&sample_company("ORIENT", "Orient Lines"))
            .unwrap();
        let err = store.insert_company(&sample_company("ORIENT", "Orient Logistics"));
        assert!(err.is_err());
        // the failed record left nothing behind
        assert!(!store.company_name_exists("Orient Logistics").unwrap());
    }

    #[test]
    fn test_purge_counts_and_fk_order() {
        let mut store = Store::open_in_memory().unwrap();
        let company_id = store
            .insert_company(&sample_company("MAERSK", "Maersk Line"))
            .unwrap();
        store
            .insert_vessel(&sample_vessel("NAV001", "Madrid Maersk", Some(company_id)))
            .unwrap();

        assert_eq!(store.delete_all_vessels().unwrap(), 1);
        assert_eq!(store.delete_all_companies().unwrap(), 1);
        assert_eq!(store.delete_all_vessels().unwrap(), 0);
    }

    #[test]
    fn test_vessel_fk_must_reference_existing_company() {
        let mut store = Store::open_in_memory().unwrap();
        let orphan = sample_vessel("NAV001", "Ghost Ship", Some(999));
        assert!(store.insert_vessel(&orphan).is_err());
        // unresolved operator stays NULL and inserts fine
        store
            .insert_vessel(&sample_vessel("NAV002", "Free Ship", None))
            .unwrap();
    }

    #[test]
    fn test_find_company_by_name_fragment() {
        let mut store = Store::open_in_memory().unwrap();
        let id = store
            .insert_company(&sample_company("HAPAG", "Hapag-Lloyd"))
            .unwrap();
        assert_eq!(
            store.find_company_by_name_fragment("hapag").unwrap(),
            Some(id)
        );
        assert_eq!(store.find_company_by_name_fragment("cosco").unwrap(), None);
    }

    #[test]
    fn test_load_companies_preserves_insertion_order() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_company(&sample_company("MAERSK", "Maersk Line"))
            .unwrap();
        store
            .insert_company(&sample_company("CMACGM", "CMA CGM"))
            .unwrap();
        let names: Vec<String> = store
            .load_companies()
            .unwrap()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["Maersk Line", "CMA CGM"]);
    }
}
