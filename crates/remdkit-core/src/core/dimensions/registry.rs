use super::dimension::Dimension;
use super::kind::DimensionKind;
use crate::core::error::ConfigurationError;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

// Keys are lowercase; lookups normalize the tag first.
static KIND_TAGS: Map<&'static str, DimensionKind> = phf_map! {
    "temperature" => DimensionKind::Temperature,
    "temp" => DimensionKind::Temperature,
    "t" => DimensionKind::Temperature,
    "topology" => DimensionKind::Topology,
    "hamiltonian" => DimensionKind::Topology,
    "ph" => DimensionKind::Ph,
    "amd_dihedral" => DimensionKind::AmdDihedral,
    "amd" => DimensionKind::AmdDihedral,
    "sgld" => DimensionKind::Sgld,
};

pub fn lookup_kind(tag: &str) -> Option<DimensionKind> {
    let normalized = tag.trim().to_ascii_lowercase().replace('-', "_");
    KIND_TAGS.get(normalized.as_str()).copied()
}

/// A dimension as declared by an external dimension source, before validation.
///
/// Only the columns relevant to `kind` may be populated:
///
/// | kind           | required columns            | optional        |
/// |----------------|-----------------------------|-----------------|
/// | `temperature`  | `temperatures`              |                 |
/// | `topology`     | `topologies`                | `temperatures`  |
/// | `ph`           | `ph`                        |                 |
/// | `amd_dihedral` | `alphas`, `thresholds`      |                 |
/// | `sgld`         | `target-temperatures`       |                 |
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DimensionDeclaration {
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub temperatures: Vec<f64>,
    #[serde(default)]
    pub topologies: Vec<PathBuf>,
    #[serde(default)]
    pub ph: Vec<f64>,
    #[serde(default)]
    pub alphas: Vec<f64>,
    #[serde(default)]
    pub thresholds: Vec<f64>,
    #[serde(default)]
    pub target_temperatures: Vec<f64>,
}

impl DimensionDeclaration {
    fn populated_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            ("temperatures", self.temperatures.is_empty()),
            ("topologies", self.topologies.is_empty()),
            ("ph", self.ph.is_empty()),
            ("alphas", self.alphas.is_empty()),
            ("thresholds", self.thresholds.is_empty()),
            ("target-temperatures", self.target_temperatures.is_empty()),
        ]
        .into_iter()
        .filter(|(_, empty)| !empty)
        .map(|(name, _)| name)
    }
}

fn allowed_columns(kind: DimensionKind) -> &'static [&'static str] {
    match kind {
        DimensionKind::Temperature => &["temperatures"],
        DimensionKind::Topology => &["topologies", "temperatures"],
        DimensionKind::Ph => &["ph"],
        DimensionKind::AmdDihedral => &["alphas", "thresholds"],
        DimensionKind::Sgld => &["target-temperatures"],
    }
}

/// Validates a declaration and builds the corresponding [`Dimension`].
///
/// # Errors
///
/// - [`ConfigurationError::UnknownDimensionKind`] if the tag is not registered.
/// - [`ConfigurationError::UnexpectedColumn`] if a column of another kind is populated.
/// - Any error raised by the kind-specific constructor (empty ladder, size mismatch,
///   invalid values).
pub fn build_dimension(declaration: DimensionDeclaration) -> Result<Dimension, ConfigurationError> {
    let kind = lookup_kind(&declaration.kind)
        .ok_or_else(|| ConfigurationError::UnknownDimensionKind(declaration.kind.clone()))?;

    let allowed = allowed_columns(kind);
    if let Some(column) = declaration
        .populated_columns()
        .find(|c| !allowed.contains(c))
    {
        return Err(ConfigurationError::UnexpectedColumn { kind, column });
    }

    debug!("Building {} dimension from declaration.", kind);
    let DimensionDeclaration {
        description,
        temperatures,
        topologies,
        ph,
        alphas,
        thresholds,
        target_temperatures,
        ..
    } = declaration;

    let dimension = match kind {
        DimensionKind::Temperature => Dimension::temperature(temperatures)?,
        DimensionKind::Topology => {
            let temps = (!temperatures.is_empty()).then_some(temperatures);
            Dimension::topology(topologies, temps)?
        }
        DimensionKind::Ph => Dimension::ph(ph)?,
        DimensionKind::AmdDihedral => Dimension::amd_dihedral(alphas, thresholds)?,
        DimensionKind::Sgld => Dimension::sgld(target_temperatures)?,
    };

    Ok(match description {
        Some(text) if !text.trim().is_empty() => dimension.with_description(text),
        _ => dimension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dimensions::dimension::DimensionValue;
    use std::path::Path;

    fn declaration(kind: &str) -> DimensionDeclaration {
        DimensionDeclaration {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn lookup_kind_resolves_aliases() {
        assert_eq!(lookup_kind("TEMP"), Some(DimensionKind::Temperature));
        assert_eq!(lookup_kind(" hamiltonian "), Some(DimensionKind::Topology));
        assert_eq!(lookup_kind("AMD-DIHEDRAL"), Some(DimensionKind::AmdDihedral));
        assert_eq!(lookup_kind("amd"), Some(DimensionKind::AmdDihedral));
        assert_eq!(lookup_kind("remd"), None);
    }

    #[test]
    fn build_temperature_dimension_from_declaration() {
        let decl = DimensionDeclaration {
            temperatures: vec![300.0, 310.0],
            description: Some("Temperature dim".to_string()),
            ..declaration("temperature")
        };
        let dim = build_dimension(decl).unwrap();
        assert_eq!(dim.kind(), DimensionKind::Temperature);
        assert_eq!(dim.size(), 2);
        assert_eq!(dim.description(), "Temperature dim");
    }

    #[test]
    fn build_topology_dimension_with_optional_temperatures() {
        let decl = DimensionDeclaration {
            topologies: vec!["a.parm7".into(), "b.parm7".into()],
            temperatures: vec![300.0, 300.0],
            ..declaration("topology")
        };
        let dim = build_dimension(decl).unwrap();
        assert!(dim.carries_temperatures());
        assert_eq!(dim.topology_path(0), Some(Path::new("a.parm7")));
    }

    #[test]
    fn build_sgld_dimension_reads_target_temperatures() {
        let decl = DimensionDeclaration {
            target_temperatures: vec![300.0, 350.0],
            ..declaration("sgld")
        };
        let dim = build_dimension(decl).unwrap();
        assert_eq!(dim.value_at(1), Some(DimensionValue::Sgld(350.0)));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = build_dimension(declaration("pressure")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownDimensionKind("pressure".to_string())
        );
    }

    #[test]
    fn column_of_another_kind_is_rejected() {
        let decl = DimensionDeclaration {
            ph: vec![7.0],
            alphas: vec![1.0],
            ..declaration("ph")
        };
        assert_eq!(
            build_dimension(decl).unwrap_err(),
            ConfigurationError::UnexpectedColumn {
                kind: DimensionKind::Ph,
                column: "alphas"
            }
        );
    }

    #[test]
    fn missing_required_column_yields_empty_dimension() {
        assert_eq!(
            build_dimension(declaration("amd_dihedral")).unwrap_err(),
            ConfigurationError::EmptyDimension {
                kind: DimensionKind::AmdDihedral
            }
        );
    }

    #[test]
    fn declaration_deserializes_from_toml() {
        let decl: DimensionDeclaration = toml::from_str(
            r#"
            kind = "amd_dihedral"
            description = "aMD boost"
            alphas = [100.0, 200.0]
            thresholds = [3000.0, 3500.0]
            "#,
        )
        .unwrap();
        let dim = build_dimension(decl).unwrap();
        assert_eq!(dim.size(), 2);
        assert_eq!(dim.description(), "aMD boost");
    }
}
