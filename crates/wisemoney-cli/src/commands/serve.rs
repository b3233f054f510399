//! Server command implementation

use std::path::Path;

use anyhow::Result;
use wisemoney_core::config::Config;
use wisemoney_server::{parse_api_keys, ServerConfig};

use super::open_db;

/// Environment variable holding comma-separated API keys
pub const API_KEYS_ENV: &str = "WISEMONEY_API_KEYS";

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    config: &Config,
) -> Result<()> {
    println!("🚀 Starting WiseMoney web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let api_keys = parse_api_keys(&std::env::var(API_KEYS_ENV).unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!("   🔒 Authentication: Cloudflare Access (header)");
        if !api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured ({})",
                api_keys.len(),
                API_KEYS_ENV
            );
        }
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let server_config = ServerConfig {
        require_auth: !no_auth,
        api_keys,
        ..ServerConfig::from_app_config(config)
    };

    wisemoney_server::serve_with_config(db, host, port, server_config).await?;

    Ok(())
}
