use std::env;
use std::process;

use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use readlater_rs::api;
use readlater_rs::{print_bug_report, Browser, HostProbe, Network, OpenMode, PostError};

struct CliConfig {
    url: String,
    data: Option<String>,
    open_field: Option<String>,
    mode: OpenMode,
    autoraise: bool,
}

fn parse_config(args: &[String]) -> CliConfig {
    let mut cfg = CliConfig {
        url: env_or("READLATER_URL", api::endpoint("/get")),
        data: env_opt("READLATER_DATA"),
        open_field: None,
        mode: OpenMode::Default,
        autoraise: true,
    };

    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--url" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.url = value.clone();
                    idx += 1;
                }
            }
            "--data" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.data = Some(value.clone());
                    idx += 1;
                }
            }
            "--open" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.open_field = Some(value.clone());
                    idx += 1;
                }
            }
            "--new-window" => cfg.mode = OpenMode::NewWindow,
            "--new-tab" => cfg.mode = OpenMode::NewTab,
            "--no-raise" => cfg.autoraise = false,
            _ => {}
        }
        idx += 1;
    }

    cfg
}

fn env_or(key: &str, fallback: String) -> String {
    env::var(key).unwrap_or(fallback)
}

fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn parse_payload(data: Option<&str>) -> Result<Map<String, Value>, serde_json::Error> {
    match data {
        Some(raw) => serde_json::from_str::<Map<String, Value>>(raw),
        None => Ok(Map::new()),
    }
}

/// Outermost call site: print the full diagnostic report, then exit 1.
fn report_and_exit(err: PostError) -> ! {
    print_bug_report(&HostProbe, &err.to_string());
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cfg = parse_config(&args);

    let payload = match parse_payload(cfg.data.as_deref()) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("invalid payload: {}", err);
            process::exit(2);
        }
    };

    let network = Network::new();
    let resp = match network.post(&cfg.url, &payload) {
        Ok(resp) => resp,
        Err(err) => report_and_exit(err),
    };

    match serde_json::to_string_pretty(&resp.api_json) {
        Ok(rendered) => println!("{}", rendered),
        Err(_) => println!("{}", resp.body),
    }

    if let Some(field) = cfg.open_field {
        match resp.api_json.get(&field).and_then(|value| value.as_str()) {
            Some(link) => {
                let browser = Browser::system();
                if let Err(err) = browser.open_with(link, cfg.mode, cfg.autoraise) {
                    eprintln!("could not open browser: {}", err);
                }
            }
            None => eprintln!("response has no `{}` link to open", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse_config(&to_args(&[
            "--url",
            "https://example.com/v3/add",
            "--data",
            r#"{"url":"https://example.com"}"#,
            "--open",
            "resolved_url",
            "--new-tab",
            "--no-raise",
        ]));
        assert_eq!(cfg.url, "https://example.com/v3/add");
        assert_eq!(cfg.data.as_deref(), Some(r#"{"url":"https://example.com"}"#));
        assert_eq!(cfg.open_field.as_deref(), Some("resolved_url"));
        assert_eq!(cfg.mode, OpenMode::NewTab);
        assert!(!cfg.autoraise);
    }

    #[test]
    fn payload_parses_in_document_order() {
        let payload = parse_payload(Some(r#"{"b":1,"a":2}"#)).unwrap();
        let keys: Vec<&str> = payload.keys().map(|key| key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn missing_payload_is_empty() {
        assert!(parse_payload(None).unwrap().is_empty());
    }

    #[test]
    fn invalid_payload_is_an_error() {
        assert!(parse_payload(Some("not json")).is_err());
    }
}
