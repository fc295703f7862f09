use crate::jura::{JuraConfig, JuraDriver, JuraError};
use crate::prelude::*;

/// Upper bound on one full request/response exchange with the bridge.
const EXCHANGE_TIMEOUT: Duration = Duration::from_millis(2000);

/// [`JuraDriver`] for machines behind an HTTP-to-serial bridge. One
/// exchange is one POST of the bare command text; the response body comes
/// back verbatim, whatever HTTP status the bridge chose to wrap it in.
pub struct JuraHttp {
    client: reqwest::Client,
    host: String,
}

/// Creates the HTTP driver for the bridge named by `config`.
pub fn get_jura_http(config: JuraConfig) -> Result<JuraHttp, JuraError> {
    let client = reqwest::Client::builder()
        .timeout(EXCHANGE_TIMEOUT)
        .build()?;
    Ok(JuraHttp {
        client,
        host: config.host,
    })
}

impl JuraDriver for JuraHttp {
    fn exchange<'a>(&'a self, payload: &'a str) -> AsyncFuture<'a, String> {
        Box::pin(async move {
            trace_exchange!("{{host->device}} {}", payload);
            log::debug!("send '{}' to {}", payload, self.host);
            let response = self
                .client
                .post(self.host.as_str())
                .body(payload.to_owned())
                .send()
                .await?;
            let text = response.text().await?;
            trace_exchange!("{{device->host}} {}", text);
            log::debug!("'{}' answered '{}'", payload, text);
            Ok(text)
        })
    }
}
