use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const FIELDS_PER_RECORD: usize = 3;
const FIRST_RECORD_LINE: u64 = 2;

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Ordered, read-only list of items with stable indexing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from items, rejecting duplicate ids and invalid prices.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        validate_items(&items).map_err(|(_, message)| Error::InvalidArgument(message))?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Load a catalog file from disk.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let file = File::open(path)?;
    parse_catalog(file)
}

/// Parse `id,name,price` records after skipping exactly one header line.
///
/// Fields are split on every comma; quotes carry no meaning and are kept as
/// part of the field text. Every line after the header must be a record, so a
/// blank line is an error rather than a separator.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut reader = BufReader::new(reader);
    let mut header = String::new();
    if reader.read_line(&mut header)? == 0 {
        return Err(Error::Catalog {
            line: 1,
            message: "missing header line".to_string(),
        });
    }

    let mut items = Vec::new();
    for (offset, text) in reader.lines().enumerate() {
        let line = FIRST_RECORD_LINE + offset as u64;
        let text = text?;
        if text.trim().is_empty() {
            return Err(Error::Catalog {
                line,
                message: "blank line where an item record was expected".to_string(),
            });
        }
        let record = split_record(&text, line)?;
        items.push(parse_item(&record, line)?);
    }

    // One item per line after the header, so item index maps straight to a line.
    validate_items(&items).map_err(|(index, message)| Error::Catalog {
        line: FIRST_RECORD_LINE + index as u64,
        message,
    })?;
    Ok(Catalog { items })
}

fn split_record(text: &str, line: u64) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::None)
        .from_reader(text.as_bytes());
    let mut record = StringRecord::new();
    reader
        .read_record(&mut record)
        .map_err(|err| csv_error(err, line))?;
    Ok(record)
}

fn parse_item(record: &StringRecord, line: u64) -> Result<Item> {
    if record.len() != FIELDS_PER_RECORD {
        return Err(Error::Catalog {
            line,
            message: format!(
                "expected {FIELDS_PER_RECORD} fields (id,name,price), found {}",
                record.len()
            ),
        });
    }

    let raw_price = record[2].trim();
    let price: f64 = raw_price.parse().map_err(|_| Error::Catalog {
        line,
        message: format!("price '{raw_price}' is not a number"),
    })?;

    Ok(Item {
        id: record[0].to_string(),
        name: record[1].to_string(),
        price,
    })
}

/// Check prices and id uniqueness; on failure returns the offending item's index.
fn validate_items(items: &[Item]) -> std::result::Result<(), (usize, String)> {
    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        validate_price(item.price).map_err(|message| (index, message))?;
        if !seen.insert(item.id.as_str()) {
            return Err((index, format!("duplicate item id '{}'", item.id)));
        }
    }
    Ok(())
}

fn validate_price(price: f64) -> std::result::Result<(), String> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(format!("price {price} must be a non-negative finite number"))
    }
}

fn csv_error(err: csv::Error, line: u64) -> Error {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(err) => Error::Io(err),
        _ => Error::Catalog { line, message },
    }
}
