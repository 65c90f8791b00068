//! Load a pagoda register from CSV
//!
//! Two files make up a register:
//! - pagodas: `pagoda_id,name,size,zone,year_built` (zone and year_built may be empty)
//! - buildings: `pagoda_id,building_name,building_type`

use super::PortfolioEntry;
use crate::property::{BuildingRequest, NumericInput, PremiumRequest};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open register file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse register CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("pagoda {0} appears more than once in the register")]
    DuplicatePagoda(u32),
    #[error("building row {row} references unknown pagoda {pagoda_id}")]
    UnknownPagoda { row: usize, pagoda_id: u32 },
}

#[derive(Debug, Deserialize)]
struct PagodaRow {
    pagoda_id: u32,
    name: String,
    size: String,
    #[serde(default)]
    zone: Option<String>,
    #[serde(default)]
    year_built: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct BuildingRow {
    pagoda_id: u32,
    #[serde(default)]
    building_name: Option<String>,
    #[serde(default)]
    building_type: Option<String>,
}

/// Load a register from any two CSV readers
pub fn load_register_from_readers<P: Read, B: Read>(
    pagodas: P,
    buildings: B,
) -> Result<Vec<PortfolioEntry>, LoadError> {
    let mut entries = Vec::new();
    let mut index_by_id = HashMap::new();

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(pagodas);
    for row in reader.deserialize() {
        let row: PagodaRow = row?;
        if index_by_id.insert(row.pagoda_id, entries.len()).is_some() {
            return Err(LoadError::DuplicatePagoda(row.pagoda_id));
        }
        entries.push(PortfolioEntry {
            pagoda_id: row.pagoda_id,
            name: row.name,
            request: PremiumRequest {
                size: Some(row.size),
                zone: row.zone.filter(|zone| !zone.is_empty()),
                year_built: row.year_built.map(NumericInput::from),
                ..Default::default()
            },
        });
    }

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(buildings);
    for (row_index, row) in reader.deserialize().enumerate() {
        let row: BuildingRow = row?;
        let entry_index = *index_by_id.get(&row.pagoda_id).ok_or(LoadError::UnknownPagoda {
            row: row_index + 1,
            pagoda_id: row.pagoda_id,
        })?;
        entries[entry_index].request.buildings.push(BuildingRequest {
            name: row.building_name.filter(|name| !name.is_empty()),
            building_type: row.building_type.filter(|kind| !kind.is_empty()),
            ..Default::default()
        });
    }

    let building_count: usize = entries.iter().map(|e| e.request.buildings.len()).sum();
    log::info!("Loaded {} pagodas with {} buildings", entries.len(), building_count);

    Ok(entries)
}

/// Load a register from two CSV files
pub fn load_register<P: AsRef<Path>, B: AsRef<Path>>(
    pagodas_path: P,
    buildings_path: B,
) -> Result<Vec<PortfolioEntry>, LoadError> {
    let pagodas = File::open(pagodas_path)?;
    let buildings = File::open(buildings_path)?;
    load_register_from_readers(pagodas, buildings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGODAS: &str = "\
pagoda_id,name,size,zone,year_built
1,Wat Phnom,large,city,1926
2,Wat Ounalom,medium,city,
3,Wat Kiri,small,,1990
";

    const BUILDINGS: &str = "\
pagoda_id,building_name,building_type
1,Vihara,main_temple
1,Sala,chanting_hall
3,Kuti,residence
1,Kitchen,kitchen
";

    #[test]
    fn test_load_register() {
        let entries =
            load_register_from_readers(PAGODAS.as_bytes(), BUILDINGS.as_bytes()).expect("Failed to load");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Wat Phnom");
        assert_eq!(entries[0].request.size.as_deref(), Some("large"));
        assert_eq!(entries[0].request.zone.as_deref(), Some("city"));
        assert_eq!(entries[0].request.year_built, Some(NumericInput::from(1926)));
        assert_eq!(entries[0].request.buildings.len(), 3);
        assert_eq!(entries[0].request.buildings[2].building_type.as_deref(), Some("kitchen"));

        assert_eq!(entries[1].request.year_built, None);
        assert!(entries[1].request.buildings.is_empty());

        assert_eq!(entries[2].request.zone, None);
        assert_eq!(entries[2].request.buildings[0].name.as_deref(), Some("Kuti"));
    }

    #[test]
    fn test_unknown_pagoda() {
        let buildings = "pagoda_id,building_name,building_type\n9,Vihara,main_temple\n";
        let err = load_register_from_readers(PAGODAS.as_bytes(), buildings.as_bytes()).unwrap_err();

        assert!(matches!(err, LoadError::UnknownPagoda { row: 1, pagoda_id: 9 }));
    }

    #[test]
    fn test_duplicate_pagoda() {
        let pagodas = "pagoda_id,name,size,zone,year_built\n1,A,small,,\n1,B,large,,\n";
        let err = load_register_from_readers(pagodas.as_bytes(), "pagoda_id,building_name,building_type\n".as_bytes())
            .unwrap_err();

        assert!(matches!(err, LoadError::DuplicatePagoda(1)));
    }

    #[test]
    fn test_bad_year_is_csv_error() {
        let pagodas = "pagoda_id,name,size,zone,year_built\n1,A,small,,old\n";
        let err = load_register_from_readers(pagodas.as_bytes(), "pagoda_id,building_name,building_type\n".as_bytes())
            .unwrap_err();

        assert!(matches!(err, LoadError::Csv(_)));
    }
}
