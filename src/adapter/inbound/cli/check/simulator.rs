//! Handler for `check simulator`.

use tokio_tungstenite::connect_async;

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::xplane::DatarefResolver;
use crate::domain::Instrument;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Resolve every dataref and open the WebSocket once.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config_path()?)?;
    config.logging.warnings_only().init();
    let session = config.session_config();

    output::section("Simulator Check");
    output::field("REST", &session.api_base);
    output::field("WebSocket", &session.ws_url);

    let resolver = DatarefResolver::new(&session.api_base, session.resolve_timeout);
    let map = match resolver.resolve_all(&Instrument::ALL).await {
        Ok(map) => map,
        Err(e) => {
            output::error("Dataref resolution failed");
            output::hint("is X-Plane 12 running with the web API enabled?");
            return Err(e.into());
        }
    };

    output::section("Datarefs");
    for instrument in Instrument::ALL {
        if let Some(id) = map.get(instrument) {
            output::field(&id.to_string(), instrument.dataref());
        }
    }

    let (mut ws, _) = match connect_async(session.ws_url.as_str()).await {
        Ok(conn) => conn,
        Err(e) => {
            output::error("WebSocket connection failed");
            return Err(e.into());
        }
    };
    let _ = ws.close(None).await;

    output::success("Simulator checks passed");
    Ok(())
}
