use remdkit::core::coordinates::Replica;
use remdkit::core::dimensions::kind::{DimensionKind, ExchangeProtocol};
use remdkit::core::io::traits::{ExchangeGroupWriter, ReplicaInputWriter};
use remdkit::engine::groups::DimensionGroups;
use remdkit::engine::resolver::ResolvedParameterRecord;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

pub const REPLICA_TABLE_FILE: &str = "replicas.csv";
pub const EXCHANGE_GROUPS_FILE: &str = "exchange_groups.toml";

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

#[derive(Serialize)]
struct ReplicaRow<'a> {
    replica: usize,
    coordinate: String,
    temperature: f64,
    topology: std::borrow::Cow<'a, str>,
    ph: Option<f64>,
    amd_alpha: Option<f64>,
    amd_threshold: Option<f64>,
    sgld_target_temperature: Option<f64>,
    sgld_averaging_time: Option<f64>,
}

impl<'a> ReplicaRow<'a> {
    fn new(replica: &Replica, record: &'a ResolvedParameterRecord) -> Self {
        Self {
            replica: replica.number,
            coordinate: replica.coordinate.to_string(),
            temperature: record.temperature,
            topology: record.topology.to_string_lossy(),
            ph: record.ph,
            amd_alpha: record.amd.map(|a| a.alpha),
            amd_threshold: record.amd.map(|a| a.threshold),
            sgld_target_temperature: record.sgld.map(|s| s.target_temperature),
            sgld_averaging_time: record.sgld.map(|s| s.averaging_time),
        }
    }
}

/// Writes one CSV row of resolved parameters per replica.
///
/// Parameters that do not apply to a replica are left as empty cells.
pub struct CsvReplicaWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReplicaWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn into_inner(self) -> Result<W, WriterError> {
        self.writer
            .into_inner()
            .map_err(|e| WriterError::Io(e.into_error()))
    }
}

impl<W: Write> ReplicaInputWriter for CsvReplicaWriter<W> {
    type Error = WriterError;

    fn write_replica(
        &mut self,
        replica: &Replica,
        record: &ResolvedParameterRecord,
    ) -> Result<(), Self::Error> {
        self.writer.serialize(ReplicaRow::new(replica, record))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct GroupDocument<'a> {
    dimension: Vec<GroupTable<'a>>,
}

#[derive(Serialize)]
struct GroupTable<'a> {
    index: usize,
    kind: DimensionKind,
    protocol: ExchangeProtocol,
    description: &'a str,
    groups: Vec<GroupEntry<'a>>,
}

#[derive(Serialize)]
struct GroupEntry<'a> {
    number: usize,
    key: &'a [usize],
    members: &'a [usize],
}

/// Writes every dimension's exchange groups as one TOML document.
///
/// Groups are numbered from 1 in the order the engine emits them.
pub struct TomlGroupWriter<W: Write> {
    inner: W,
}

impl<W: Write> TomlGroupWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ExchangeGroupWriter for TomlGroupWriter<W> {
    type Error = WriterError;

    fn write_groups(&mut self, tables: &[DimensionGroups]) -> Result<(), Self::Error> {
        let document = GroupDocument {
            dimension: tables
                .iter()
                .map(|table| GroupTable {
                    index: table.dimension,
                    kind: table.kind,
                    protocol: table.protocol,
                    description: &table.description,
                    groups: table
                        .groups
                        .iter()
                        .enumerate()
                        .map(|(i, group)| GroupEntry {
                            number: i + 1,
                            key: &group.key,
                            members: &group.members,
                        })
                        .collect(),
                })
                .collect(),
        };
        let content = toml::to_string(&document)?;
        self.inner.write_all(content.as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }
}
