use crate::factories::DiagnosticError;
use crate::mapper::MapperError;
use crate::registry::RegistryError;
use crate::source_map::SourceMapError;

/// Any failure the diagnostics core can report
#[derive(Debug, thiserror::Error)]
pub enum VeroError {
    #[error("Error code registry is invalid: {0}")]
    Registry(#[from] RegistryError),

    #[error("Source map could not be built: {0}")]
    SourceMap(#[from] SourceMapError),

    #[error("Runtime error could not be mapped: {0}")]
    Mapper(#[from] MapperError),

    #[error("Diagnostic could not be built: {0}")]
    Diagnostic(#[from] DiagnosticError),
}
