/// Why a seeding run failed.
///
/// Every variant keeps the underlying cause, so `{:#}` on an
/// `anyhow::Error` built from it prints the whole chain.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot connect to the database")]
    ConnectionFailed(#[source] anyhow::Error),
    #[error("cannot set up the cells table")]
    SchemaSetupFailed(#[source] anyhow::Error),
    #[error("cannot load cells into the table")]
    LoadFailed(#[source] anyhow::Error),
    #[error("cannot stage cells in a temporary file")]
    FilesystemFailed(#[source] anyhow::Error),
}
