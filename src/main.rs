use anyhow::Context;
use clap::Parser;
use flexi_logger::{FileSpec, Logger, WriteMode};
use log::{debug, warn};
use postman_client::{PostmanClient, PostmanError};
use std::io::Write;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger = Logger::try_with_str(&cli.log_level)?.write_mode(WriteMode::BufferAndFlush);
    logger = if cli.log_to_file {
        logger.log_to_file(FileSpec::default())
    } else {
        logger.log_to_stderr()
    };
    let _logger = logger.start()?;

    run(&cli, &mut std::io::stdout().lock()).await
}

/// Sends the request described by `cli` and pretty-prints the JSON body to `out`
async fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(config) = cli.client_config() else {
        warn!("API key not set, exiting");
        anyhow::bail!("no API key given; pass --api-key or set POSTMAN_API_KEY");
    };

    let client = PostmanClient::from_config(&config).context("Failed to create Postman client")?;

    let mut request = client
        .request()
        .method(cli.method.clone())
        .resource(&cli.resource)
        .output::<Option<serde_json::Value>>();
    if let Some(data) = &cli.data {
        let body: serde_json::Value =
            serde_json::from_str(data).context("--data is not valid JSON")?;
        request = request.json(&body);
    }
    debug!("Sending {} {}", request.http_method(), request.url());

    match request.send_and_parse().await {
        Ok(Some(body)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(PostmanError::Api(e)) => Err(anyhow::anyhow!("Postman API rejected the request: {e}")),
        Err(e) => Err(e).context("Request to the Postman API failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    fn cli_for(server: &MockServer, args: &[&str]) -> Cli {
        Cli::try_parse_from(
            ["postmanctl", "--api-key", "PMAK-test", "--base-url", server.uri().as_str()]
                .into_iter()
                .chain(args.iter().copied()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_prints_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("x-api-key", "PMAK-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1}})))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        run(&cli_for(&server, &["me"]), &mut out).await.unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["user"]["id"], 1);
    }

    #[tokio::test]
    async fn test_run_fails_on_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"name": "instanceNotFoundError", "message": "not found"}
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = run(&cli_for(&server, &["collections", "missing"]), &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("status code: 404"));
        assert!(err.to_string().contains("instanceNotFoundError"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_run_fails_without_api_key() {
        let server = MockServer::start().await;
        let mut cli = cli_for(&server, &["me"]);
        cli.api_key = None;

        let mut out = Vec::new();
        let err = run(&cli, &mut out).await.unwrap_err();

        assert!(err.to_string().contains("no API key"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
