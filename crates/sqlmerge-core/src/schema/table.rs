use super::{Field, Reference};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::{fmt, fmt::Write as _, str::FromStr};

/// Surrogate key used when a table entry leaves the key segment empty: the
/// storage engine's implicit row identifier.
pub const DEFAULT_SURROGATE_KEY: &str = "rowid";

/// Configuration for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    /// Name of the table in both databases
    pub name: String,

    /// Child table columns invalidated when a record of this table is
    /// replaced by a newer secondary record
    pub dependents: Vec<Reference>,

    /// Column holding the table's surrogate key
    pub surrogate_key: String,

    /// Fields that identify the same record in both databases
    pub global_ids: Vec<Field>,

    /// First (diff fields, update fields) tier
    pub tier1: Tier,

    /// Second (diff fields, update fields) tier
    pub tier2: Tier,
}

/// One group of update fields together with the diff fields that decide
/// whether they are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tier {
    /// Tie-break fields, in priority order
    pub diffs: Vec<Field>,

    /// Update fields in configuration order. A `Some` reference marks a
    /// foreign key whose value is a secondary surrogate key of the
    /// referenced table.
    pub updates: IndexMap<String, Option<Reference>>,
}

/// Body segments of a table entry, in order.
const SEGMENTS: usize = 6;

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependents: vec![],
            surrogate_key: DEFAULT_SURROGATE_KEY.to_string(),
            global_ids: vec![],
            tier1: Tier::default(),
            tier2: Tier::default(),
        }
    }

    /// Parses a single table entry, logging recoverable problems.
    ///
    /// Use [`SchemaSet::parse`](super::SchemaSet::parse) to load a whole
    /// configuration and collect those problems instead.
    pub fn parse(entry: &str) -> Result<Self> {
        let mut warnings = vec![];
        let table = Self::parse_with_warnings(entry, &mut warnings)?;

        for warning in &warnings {
            tracing::warn!(table = %table.name, "{warning}");
        }

        Ok(table)
    }

    /// Parses a table entry. Problems that leave the table usable (a
    /// malformed reference, surplus segments) are pushed to `warnings`;
    /// anything else rejects the entry.
    pub(crate) fn parse_with_warnings(entry: &str, warnings: &mut Vec<Error>) -> Result<Self> {
        let entry = entry.trim();

        let (header, body) = match entry.split_once(':') {
            Some((header, body)) if !body.contains(':') => (header, body),
            _ => {
                return Err(Error::invalid_config(
                    entry_name(entry),
                    "expected exactly one `:` between header and body",
                ))
            }
        };

        let (name, dependents) = match header.split_once('(') {
            Some((name, dependents)) => (name.trim(), Some(dependents.replace(')', ""))),
            None => (header.trim(), None),
        };

        if name.is_empty() {
            return Err(Error::invalid_config(entry, "table name is empty"));
        }

        let mut table = TableSchema::new(name);

        for token in dependents.iter().flat_map(|list| list.split(',')) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            match token.parse() {
                Ok(reference) => table.dependents.push(reference),
                Err(err) => warnings.push(err.context(format!("dependent of `{name}` ignored"))),
            }
        }

        let segments: Vec<&str> = body.split(';').collect();

        if segments.len() < SEGMENTS {
            return Err(Error::invalid_config(
                name,
                format!(
                    "expected {SEGMENTS} `;`-separated segments, found {}",
                    segments.len()
                ),
            ));
        }

        if segments[SEGMENTS..].iter().any(|s| !s.trim().is_empty()) {
            warnings.push(Error::invalid_config(
                name,
                format!(
                    "ignoring {} segment(s) after the {SEGMENTS}th",
                    segments.len() - SEGMENTS
                ),
            ));
        }

        let surrogate_key = segments[0].trim();
        if !surrogate_key.is_empty() {
            table.surrogate_key = surrogate_key.to_string();
        }

        table.global_ids = parse_fields(segments[1]).map_err(|err| err.context(ctx(name)))?;
        table.tier1.diffs = parse_fields(segments[2]).map_err(|err| err.context(ctx(name)))?;
        table.tier1.updates = parse_updates(name, segments[3], warnings)?;
        table.tier2.diffs = parse_fields(segments[4]).map_err(|err| err.context(ctx(name)))?;
        table.tier2.updates = parse_updates(name, segments[5], warnings)?;

        table.verify_joins()?;

        if table.copies_surrogate_key() {
            warnings.push(Error::invalid_config(
                name,
                format!(
                    "surrogate key `{}` is assigned on insert; it will not be copied from the secondary row",
                    table.surrogate_key
                ),
            ));
        }

        Ok(table)
    }

    /// A table with no update fields is skipped by the engine.
    pub fn is_inert(&self) -> bool {
        self.tier1.updates.is_empty() && self.tier2.updates.is_empty()
    }

    /// The reference attached to the update field `local`, looking in the
    /// first tier before the second.
    pub fn reference_for(&self, local: &str) -> Option<&Reference> {
        self.tier1
            .updates
            .get(local)
            .or_else(|| self.tier2.updates.get(local))
            .and_then(Option::as_ref)
    }

    /// Every update field of both tiers, de-duplicated by name with the
    /// first tier taking precedence.
    pub fn update_fields(&self) -> impl Iterator<Item = (&str, Option<&Reference>)> + '_ {
        let tier1 = self.tier1.updates.iter();
        let tier2 = self
            .tier2
            .updates
            .iter()
            .filter(|(name, _)| !self.tier1.updates.contains_key(*name));

        tier1
            .chain(tier2)
            .map(|(name, reference)| (name.as_str(), reference.as_ref()))
    }

    /// Whether the surrogate key is also listed as a plain global identifier
    /// or as an update field. Inserts never copy it.
    pub fn copies_surrogate_key(&self) -> bool {
        let key = self.surrogate_key.as_str();

        self.global_ids
            .iter()
            .any(|field| !field.is_foreign() && field.local == key)
            || self.update_fields().any(|(name, _)| name == key)
    }

    /// Foreign fields whose values must be joined in when projecting rows of
    /// this table: global identifiers first, then first-tier diff fields.
    pub fn joined_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.global_ids
            .iter()
            .chain(&self.tier1.diffs)
            .filter(|field| field.is_foreign())
    }

    /// Human readable multi-line summary of the table configuration.
    pub fn describe(&self) -> String {
        fn list<T: fmt::Display>(out: &mut String, items: impl IntoIterator<Item = T>) {
            for item in items {
                let _ = writeln!(out, " - {item}");
            }
        }

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        let _ = writeln!(out, "{}", "=".repeat(self.name.len()));
        let _ = writeln!(out, "Surrogate key: {}", self.surrogate_key);
        out.push_str("Global identifiers:\n");
        list(&mut out, &self.global_ids);
        out.push_str("Dependents:\n");
        list(&mut out, &self.dependents);

        for (index, tier) in [&self.tier1, &self.tier2].into_iter().enumerate() {
            let diffs = tier
                .diffs
                .iter()
                .map(Field::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "Updates {} (diffed on: {diffs}):", index + 1);
            list(&mut out, tier.updates.iter().map(UpdateEntry::from));
        }

        out
    }

    fn verify_joins(&self) -> Result<()> {
        for field in self.joined_fields() {
            if self.reference_for(&field.local).is_none() {
                return Err(Error::invalid_config(
                    &self.name,
                    format!(
                        "foreign field `{field}` needs an update field `{}(table.field)` to join through",
                        field.local
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl FromStr for TableSchema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TableSchema::parse(s)
    }
}

/// Renders the table in configuration grammar. Parsing the output yields an
/// equal `TableSchema`.
impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if !self.dependents.is_empty() {
            write!(f, "({})", Comma(&self.dependents))?;
        }

        write!(
            f,
            ": {}; {}; {}; {}; {}; {}",
            self.surrogate_key,
            Comma(&self.global_ids),
            Comma(&self.tier1.diffs),
            Comma(self.tier1.updates.iter().map(UpdateEntry::from)),
            Comma(&self.tier2.diffs),
            Comma(self.tier2.updates.iter().map(UpdateEntry::from)),
        )
    }
}

struct Comma<L>(L);

impl<L> fmt::Display for Comma<L>
where
    L: IntoIterator + Clone,
    L::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for item in self.0.clone() {
            write!(f, "{s}{item}")?;
            s = ", ";
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct UpdateEntry<'a>(&'a str, Option<&'a Reference>);

impl<'a> From<(&'a String, &'a Option<Reference>)> for UpdateEntry<'a> {
    fn from((name, reference): (&'a String, &'a Option<Reference>)) -> Self {
        UpdateEntry(name, reference.as_ref())
    }
}

impl fmt::Display for UpdateEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(reference) => write!(f, "{}({reference})", self.0),
            None => f.write_str(self.0),
        }
    }
}

fn ctx(name: &str) -> String {
    format!("parsing table `{name}`")
}

/// Best-effort table name for reporting an entry that failed to parse.
pub(super) fn entry_name(entry: &str) -> &str {
    let end = entry.find([':', '(']).unwrap_or(entry.len());
    match entry[..end].trim() {
        "" => entry.trim(),
        name => name,
    }
}

/// Blank tokens, such as the one after a trailing comma, are skipped.
fn parse_fields(segment: &str) -> Result<Vec<Field>> {
    segment
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(str::parse)
        .collect()
}

fn parse_updates(
    table: &str,
    segment: &str,
    warnings: &mut Vec<Error>,
) -> Result<IndexMap<String, Option<Reference>>> {
    let mut updates = IndexMap::new();

    if segment.trim().is_empty() {
        return Ok(updates);
    }

    for token in segment.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (field, reference) = match token.split_once('(') {
            Some((field, reference)) => {
                let reference = reference.replace(')', "");
                match reference.parse::<Reference>() {
                    Ok(reference) => (field.trim(), Some(reference)),
                    Err(err) => {
                        warnings.push(err.context(format!(
                            "update field `{}` of `{table}` treated as a plain value",
                            field.trim()
                        )));
                        (field.trim(), None)
                    }
                }
            }
            None => (token, None),
        };

        if field.is_empty() {
            return Err(Error::invalid_config(
                table,
                format!("update field `{token}` has an empty name"),
            ));
        }

        updates.insert(field.to_string(), reference);
    }

    Ok(updates)
}
