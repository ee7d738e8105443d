use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};

/// Random bytes, base64-encoded, suitable for `JWT_SECRET`
pub fn generate_secret(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    STANDARD.encode(buf)
}

pub fn handle(bytes: usize, output_format: OutputFormat) -> anyhow::Result<()> {
    if bytes < 32 {
        anyhow::bail!("secret must be at least 32 bytes, got {}", bytes);
    }

    let secret = generate_secret(bytes);
    match output_format {
        OutputFormat::Text => println!("{}", secret),
        OutputFormat::Json => output_success(
            output_format,
            "Generated JWT secret",
            Some(json!({ "secret": secret })),
        )?,
    }
    Ok(())
}
