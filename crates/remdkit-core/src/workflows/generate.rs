use crate::core::coordinates::{IncrementMode, Replica, ReplicaCoordinateSpace};
use crate::core::dimensions::kind::DimensionKind;
use crate::core::dimensions::registry::build_dimension;
use crate::core::dimensions::set::DimensionSet;
use crate::core::error::ConfigurationError;
use crate::core::io::traits::{DimensionSource, ExchangeGroupWriter, ReplicaInputWriter};
use crate::engine::config::GenerationConfig;
use crate::engine::error::GenerationError;
use crate::engine::groups::{DimensionGroups, ExchangeGroupBuilder};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::resolver::{ParameterResolver, ResolutionWarning, ResolvedParameterRecord};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedReplica {
    pub replica: Replica,
    pub record: ResolvedParameterRecord,
}

/// A fully validated run layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub increment_mode: IncrementMode,
    pub replicas: Vec<PlannedReplica>,
    pub exchange_groups: Vec<DimensionGroups>,
    /// Each distinct warning with the number of replicas it affected.
    pub warnings: Vec<(ResolutionWarning, usize)>,
}

impl GenerationPlan {
    pub fn total_replicas(&self) -> usize {
        self.replicas.len()
    }
}

/// Builds a `DimensionSet` from a dimension source, preserving declaration order.
#[instrument(skip_all, name = "load_dimensions")]
pub fn load_dimensions(source: &impl DimensionSource) -> Result<DimensionSet, GenerationError> {
    let declarations = source.load().map_err(GenerationError::source_failed)?;
    info!("Loaded {} dimension declaration(s).", declarations.len());

    let mut set = DimensionSet::new();
    for declaration in declarations {
        let dimension = build_dimension(declaration)?;
        info!(
            "Dimension {}: {} with {} value(s) - {}",
            set.len(),
            dimension.kind(),
            dimension.size(),
            dimension.description()
        );
        set.add_dimension(dimension)?;
    }
    Ok(set)
}

/// Generates the complete plan for `set`.
///
/// Enumerates every replica with the configured increment mode, resolves each
/// replica's parameters, and builds the exchange groups of every dimension.
/// Nothing is returned unless every replica resolved successfully.
#[instrument(skip_all, name = "generation_workflow")]
pub fn run(
    set: &DimensionSet,
    config: &GenerationConfig,
    reporter: &ProgressReporter,
) -> Result<GenerationPlan, GenerationError> {
    // === Phase 0: Validate the replica space ===
    reporter.report(Progress::StageStart {
        name: "Validating dimensions",
    });
    // A `DimensionSet` never spans more replicas than a `usize` can count.
    let total = set.total_replicas();
    if let Some(limit) = config.max_replicas {
        if total > limit {
            return Err(ConfigurationError::TooManyReplicas { total, limit }.into());
        }
    }
    if set.is_empty() {
        info!("No exchange dimensions defined; generating a single plain MD replica.");
    } else {
        info!(
            "{} dimension(s) span {} replica(s) (sizes {:?}).",
            set.len(),
            total,
            set.sizes()
        );
    }
    if set.has_kind(DimensionKind::Temperature)
        && set
            .dimension(DimensionKind::Topology)
            .is_ok_and(|d| d.carries_temperatures())
    {
        warn!(
            "Both a TEMPERATURE dimension and topology temperatures are present; the TEMPERATURE dimension takes precedence."
        );
    }
    reporter.report(Progress::StageFinish);

    // === Phase 1: Enumerate coordinates ===
    reporter.report(Progress::StageStart {
        name: "Enumerating replicas",
    });
    let space = ReplicaCoordinateSpace::new(set, config.increment_mode);
    let replicas = space.enumerate();
    if config.increment_mode == IncrementMode::Diagonal && set.len() > 1 {
        info!("Diagonal increment mode: coordinates advance together and may repeat.");
    }
    reporter.report(Progress::StageFinish);

    // === Phase 2: Resolve per-replica parameters ===
    let resolver = ParameterResolver::new(set, &config.base_parameters);
    reporter.report(Progress::ReplicasStart {
        total: replicas.len() as u64,
    });
    let mut planned = Vec::with_capacity(replicas.len());
    let mut warning_counts: BTreeMap<String, (ResolutionWarning, usize)> = BTreeMap::new();
    for replica in replicas {
        let resolution = resolver.resolve(&replica)?;
        for warning in resolution.warnings {
            warning_counts
                .entry(warning.to_string())
                .or_insert((warning, 0))
                .1 += 1;
        }
        planned.push(PlannedReplica {
            replica,
            record: resolution.record,
        });
        reporter.report(Progress::ReplicaResolved);
    }
    reporter.report(Progress::ReplicasFinish);

    let warnings: Vec<(ResolutionWarning, usize)> = warning_counts.into_values().collect();
    for (warning, count) in &warnings {
        warn!("{} ({} replica(s) affected).", warning, count);
        reporter.report(Progress::Warning(warning.to_string()));
    }

    // === Phase 3: Exchange groups ===
    reporter.report(Progress::StageStart {
        name: "Building exchange groups",
    });
    let assignment: Vec<Replica> = planned.iter().map(|p| p.replica.clone()).collect();
    let exchange_groups = ExchangeGroupBuilder::new(set).build(&assignment);
    reporter.report(Progress::StageFinish);

    info!(
        "Generated plan with {} replica(s) and {} exchange group table(s).",
        planned.len(),
        exchange_groups.len()
    );

    Ok(GenerationPlan {
        increment_mode: config.increment_mode,
        replicas: planned,
        exchange_groups,
        warnings,
    })
}

/// Hands a finished plan to the writer collaborators.
///
/// Replica inputs are written first, in replica order, followed by the group
/// tables. Group tables are skipped for plain MD runs.
#[instrument(skip_all, name = "write_plan")]
pub fn write_plan<R, G>(
    plan: &GenerationPlan,
    replica_writer: &mut R,
    group_writer: &mut G,
) -> Result<(), GenerationError>
where
    R: ReplicaInputWriter,
    G: ExchangeGroupWriter,
{
    for planned in &plan.replicas {
        replica_writer
            .write_replica(&planned.replica, &planned.record)
            .map_err(|e| GenerationError::writer_failed("replica inputs", e))?;
    }
    replica_writer
        .finish()
        .map_err(|e| GenerationError::writer_failed("replica inputs", e))?;

    if plan.exchange_groups.is_empty() {
        info!("No exchange dimensions; skipping exchange group output.");
        return Ok(());
    }
    group_writer
        .write_groups(&plan.exchange_groups)
        .map_err(|e| GenerationError::writer_failed("exchange groups", e))?;
    Ok(())
}
