use crate::core::coordinates::Replica;
use crate::core::dimensions::registry::DimensionDeclaration;
use crate::engine::groups::DimensionGroups;
use crate::engine::resolver::ResolvedParameterRecord;
use std::error::Error;

/// Produces the ordered list of dimension declarations for a run.
///
/// Declaration order becomes dimension order, so the first declaration is the
/// fastest-varying coordinate index.
pub trait DimensionSource {
    /// The error type for loading failures.
    type Error: Error + Send + Sync + 'static;

    /// Loads every declaration, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying declarations cannot be read or parsed.
    fn load(&self) -> Result<Vec<DimensionDeclaration>, Self::Error>;
}

/// Consumes resolved per-replica parameters, one replica at a time.
///
/// Implementors know the target MD package's input format.
pub trait ReplicaInputWriter {
    type Error: Error + Send + Sync + 'static;

    /// Writes the input for a single replica.
    ///
    /// # Arguments
    ///
    /// * `replica` - The replica number and coordinate.
    /// * `record` - The fully resolved parameters for that replica.
    fn write_replica(
        &mut self,
        replica: &Replica,
        record: &ResolvedParameterRecord,
    ) -> Result<(), Self::Error>;

    /// Called once after the last replica has been written.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Serializes the per-dimension exchange-group tables.
pub trait ExchangeGroupWriter {
    type Error: Error + Send + Sync + 'static;

    /// Writes every dimension's group table, in dimension order.
    fn write_groups(&mut self, tables: &[DimensionGroups]) -> Result<(), Self::Error>;
}
