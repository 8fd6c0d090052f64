use anyhow::Result;
use log::info;
use s3presign_aws_v4::{Config, PresignedPutSigner};
use s3presign_core::{Context, OsEnv};

fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::default().from_env(&ctx)?;
    let signer = PresignedPutSigner::new(config)?;
    info!(
        "signing for bucket {} in {}, valid for {:?}",
        signer.bucket(),
        signer.region(),
        signer.expiration()
    );

    let filename = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "file.txt".to_string());
    let presigned = signer.presign_upload(
        &filename,
        Some("text/plain"),
        [("language", "es"), ("instructions", "ocr")],
    );

    println!("object key: {}", presigned.object_key);
    println!("expires at: {}", presigned.expires_at);
    println!("url: {}", presigned.url);
    println!("required headers:");
    for (name, value) in presigned.upload_headers() {
        println!("  {name}: {value}");
    }

    Ok(())
}
