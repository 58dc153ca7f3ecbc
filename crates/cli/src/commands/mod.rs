//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod vapid;

/// Read `ANGADI_DATABASE_URL` after loading `.env` if present.
pub(crate) fn database_url() -> Result<String, MissingEnvVar> {
    dotenvy::dotenv().ok();
    std::env::var("ANGADI_DATABASE_URL").map_err(|_| MissingEnvVar("ANGADI_DATABASE_URL"))
}

/// Required environment variable is missing.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVar(pub &'static str);
