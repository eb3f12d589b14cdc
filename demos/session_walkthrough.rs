//! Session walkthrough
//!
//! Logs in against a running backend, reads a few dashboard views and logs
//! out. Tokens are kept in a JSON file so a second run starts logged in.
//!
//! ```text
//! PHYSIO_API_BASE_URL=http://localhost:12000/api \
//! PHYSIO_USERNAME=pat PHYSIO_PASSWORD=secret \
//! cargo run --example session_walkthrough
//! ```

use anyhow::Context;
use physio_client::auth::LoginCredentials;
use physio_client::session::{ChannelNavigator, FileStore};
use physio_client::types::notification::NotificationQuery;
use physio_client::{ApiClientBuilder, ApiErrorKind};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("physio_client=debug")),
        )
        .init();

    let token_file = std::env::temp_dir().join("physio-client-demo").join("tokens.json");
    let (navigator, mut login_requests) = ChannelNavigator::new();
    let client = ApiClientBuilder::new()
        .credential_store(Arc::new(FileStore::new(&token_file)))
        .navigator(Arc::new(navigator))
        .build()
        .context("building client")?;

    tokio::spawn(async move {
        while let Some(reason) = login_requests.recv().await {
            println!("-> UI shell would now show the login view ({:?})", reason);
        }
    });

    if !client.is_authenticated() {
        let username = std::env::var("PHYSIO_USERNAME").unwrap_or_else(|_| "pat".into());
        let password = std::env::var("PHYSIO_PASSWORD").unwrap_or_else(|_| "secret".into());
        let issued = client
            .login(&LoginCredentials::with_username(username, password))
            .await
            .context("login")?;
        println!("logged in via {}", issued.strategy);
    } else {
        println!("restored session from {}", token_file.display());
    }

    let me = client.users().me().await.context("loading profile")?;
    println!("hello {} ({})", me.full_name(), me.user_type.as_str());

    match client.appointments().upcoming().await {
        Ok(list) => {
            println!("{} upcoming appointment(s)", list.total());
            for appt in list.items() {
                println!("  {} {}-{} {:?}", appt.date, appt.start_time, appt.end_time, appt.status);
            }
        }
        Err(e) if e.api_kind() == Some(ApiErrorKind::AccessDenied) => {
            println!("appointments are not visible to this account");
        }
        Err(e) => return Err(e).context("loading appointments"),
    }

    let unread = client
        .notifications()
        .list(&NotificationQuery {
            is_read: Some(false),
            ..Default::default()
        })
        .await
        .context("loading notifications")?;
    println!("{} unread notification(s)", unread.total());

    let stats = client.exercise_progress().stats().await.context("loading stats")?;
    println!(
        "{} of {} sessions completed ({:.0}%)",
        stats.completed_sessions,
        stats.total_sessions,
        stats.completion_rate() * 100.0
    );

    if std::env::var("PHYSIO_KEEP_SESSION").is_err() {
        client.logout().await.context("logout")?;
        println!("logged out");
    }
    Ok(())
}
