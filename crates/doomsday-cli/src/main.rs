//! doomsday - find dead firmware download links in the ipsw.me catalog.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    doomsday_cli::run().await
}
