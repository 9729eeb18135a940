use anyhow::Result;
use tokio_util::sync::CancellationToken;

use reap::central::CentralService;
use reap::config::ReapConfig;

/// Send one utterance through the assistant and print its reply.
pub async fn ask(config: &ReapConfig, user_id: &str, input: &str) -> Result<()> {
    let central = CentralService::from_config(config)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let reply = central.call_fn_user_input(input, user_id, &cancel).await?;
    println!("{reply}");

    Ok(())
}
