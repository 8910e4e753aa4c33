//! CLI parsing and report output with the blocking client over a canned registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use eureka_core::RegistryTransport;
use genie_eureka::{run, BlockingEurekaClient, Cli, Commands, EurekaConfig, EurekaError};

const REGISTRY: &str = r#"{"application":{"instance":[
    {"status":"UP","hostName":"h1","port":{"$":"8080"}},
    {"status":"OUT_OF_SERVICE","hostName":"h2","port":{"$":"8081"}}
]}}"#;

struct Canned {
    calls: Arc<AtomicUsize>,
    body: &'static str,
}

#[async_trait]
impl RegistryTransport for Canned {
    async fn get_json(&self, _url: &str) -> Result<Vec<u8>, EurekaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.as_bytes().to_vec())
    }
}

fn client(config: EurekaConfig) -> (BlockingEurekaClient, Arc<AtomicUsize>) {
    client_with(config, REGISTRY)
}

fn client_with(
    config: EurekaConfig,
    body: &'static str,
) -> (BlockingEurekaClient, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let transport = Canned {
        calls: Arc::clone(&calls),
        body,
    };
    (
        BlockingEurekaClient::with_transport(config, Box::new(transport)).unwrap(),
        calls,
    )
}

fn output(client: &BlockingEurekaClient, cli: &Cli) -> Result<String, String> {
    let mut out = Vec::new();
    run(client, cli.command.as_ref(), &mut out).map_err(|e| e.to_string())?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn parses_subcommands_and_defaults() {
    let cli = Cli::try_parse_from(["genie-eureka"]).unwrap();
    assert_eq!(cli.command, None);

    let cli = Cli::try_parse_from(["genie-eureka", "base-url"]).unwrap();
    assert_eq!(cli.command, Some(Commands::BaseUrl { app: "genie".into() }));

    let cli = Cli::try_parse_from([
        "genie-eureka",
        "instances",
        "dsees",
        "--status",
        "OUT_OF_SERVICE",
        "--eureka-url",
        "http://eureka/v2/apps",
    ])
    .unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Instances {
            app: "dsees".into(),
            status: "OUT_OF_SERVICE".into()
        })
    );
    assert_eq!(cli.eureka_url.as_deref(), Some("http://eureka/v2/apps"));
}

#[test]
fn flags_layer_over_environment_config() {
    let cli = Cli::try_parse_from([
        "genie-eureka",
        "--eureka-url",
        "http://flag",
        "--timeout-secs",
        "3",
    ])
    .unwrap();
    let config = cli.config(
        EurekaConfig::new()
            .eureka_url("http://env")
            .service_base_url("http://localhost:7001"),
    );
    assert_eq!(config.eureka_url.as_deref(), Some("http://flag"));
    assert_eq!(config.service_base_url.as_deref(), Some("http://localhost:7001"));
    assert_eq!(config.timeout, std::time::Duration::from_secs(3));
}

#[test]
fn base_url_prints_the_up_instance() {
    let (client, calls) = client(EurekaConfig::new().eureka_url("http://eureka"));
    let cli = Cli::try_parse_from(["genie-eureka", "base-url"]).unwrap();
    assert_eq!(output(&client, &cli).unwrap(), "http://h1:8080\n");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn out_of_service_prints_json() {
    let (client, _) = client(EurekaConfig::new().eureka_url("http://eureka"));
    let cli = Cli::try_parse_from(["genie-eureka", "out-of-service"]).unwrap();
    let printed: serde_json::Value = serde_json::from_str(&output(&client, &cli).unwrap()).unwrap();
    assert_eq!(
        printed,
        serde_json::json!([{ "hostName": "h2", "status": "OUT_OF_SERVICE", "port": { "$": "8081" } }])
    );
}

#[test]
fn out_of_service_keeps_every_registry_field() {
    let body = r#"{"application":{"instance":{
        "status":"OUT_OF_SERVICE","hostName":"h1","port":{"$":"8080"},
        "vipAddress":"genie","metadata":{"zone":"us-east-1c"},
        "lastUpdatedTimestamp":1381234567890
    }}}"#;
    let (client, _) = client_with(EurekaConfig::new().eureka_url("http://eureka"), body);
    let cli = Cli::try_parse_from(["genie-eureka", "out-of-service"]).unwrap();
    let printed: serde_json::Value = serde_json::from_str(&output(&client, &cli).unwrap()).unwrap();
    assert_eq!(
        printed,
        serde_json::json!([{
            "status": "OUT_OF_SERVICE", "hostName": "h1", "port": { "$": "8080" },
            "vipAddress": "genie", "metadata": { "zone": "us-east-1c" },
            "lastUpdatedTimestamp": 1381234567890u64
        }])
    );
}

#[test]
fn report_with_override_prints_all_three_sections() {
    let (client, calls) = client(
        EurekaConfig::new()
            .eureka_url("http://eureka")
            .service_base_url("http://localhost:7001"),
    );
    let cli = Cli::try_parse_from(["genie-eureka"]).unwrap();
    let text = output(&client, &cli).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Getting base URL for Genie Service from Eureka:");
    assert_eq!(lines[1], "http://localhost:7001");
    assert_eq!(lines[3], "Getting base URL for Event Service from Eureka:");
    assert_eq!(lines[4], "http://localhost:7001");
    assert_eq!(lines[6], "Getting list of all Genie OOS instances");
    assert!(text.contains("\"hostName\": \"h2\""));
    // Only the OOS lookup reaches the registry.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_endpoint_aborts_the_report() {
    let (client, calls) = client(EurekaConfig::new());
    let cli = Cli::try_parse_from(["genie-eureka"]).unwrap();
    let err = output(&client, &cli).unwrap_err();
    assert!(err.contains("EUREKA_URL"), "{}", err);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unmatched_status_reports_not_found() {
    let (client, _) = client(EurekaConfig::new().eureka_url("http://eureka"));
    let cli = Cli::try_parse_from(["genie-eureka", "instances", "--status", "DOWN"]).unwrap();
    let err = output(&client, &cli).unwrap_err();
    assert_eq!(err, "no genie instances found that were DOWN on http://eureka");
}
