// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::parser::ValueSource;
use clap::{
    crate_description,
    crate_name,
    crate_version,
    Arg,
    ArgMatches,
    Command,
};
use crate::common::{
    ClientConfig,
    CredentialError,
    Credentials,
    Region,
    ACCESS_KEY_ID_ENV,
    ACCESS_KEY_SECRET_ENV,
    DEFAULT_REGION,
};
use tracing::debug;

// Ensures that the region we're passed looks like an OSS region ID.
// Either `cn-hangzhou` or `oss-cn-hangzhou` is accepted.
fn is_valid_region(s: &str) -> Result<String, String> {
    let region = Region::new(s);
    let id     = region.id();

    let valid = !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(id.to_string())
    }
    else {
        Err(format!("'{}' is not a valid OSS region", s))
    }
}

// Ensures that an endpoint override is an HTTP(S) URL.
fn is_valid_endpoint_url(s: &str) -> Result<String, String> {
    let rest = s.strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() => Ok(s.to_string()),
        _ => Err(format!("'{}' is not an http:// or https:// URL", s)),
    }
}

// Create the clap command
fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("ACCESS_KEY_ID")
                .env(ACCESS_KEY_ID_ENV)
                .hide_env_values(true)
                .index(1)
                .value_name("ACCESS_KEY_ID")
                .help("Alibaba Cloud access key ID")
        )
        .arg(
            Arg::new("ACCESS_KEY_SECRET")
                .env(ACCESS_KEY_SECRET_ENV)
                .hide_env_values(true)
                .index(2)
                .value_name("ACCESS_KEY_SECRET")
                .help("Alibaba Cloud access key secret")
        )
        .arg(
            Arg::new("REGION")
                .env("OSS_REGION")
                .hide_env_values(true)
                .long("region")
                .short('r')
                .value_name("REGION")
                .help("Set the region used to list and locate buckets")
                .default_value(DEFAULT_REGION)
                .value_parser(is_valid_region)
        )
        .arg(
            Arg::new("ENDPOINT_URL")
                .env("OSS_ENDPOINT_URL")
                .hide_env_values(true)
                .long("endpoint-url")
                .short('e')
                .value_name("URL")
                .help("Send every request to this endpoint instead of the regional ones")
                .value_parser(is_valid_endpoint_url)
        )
}

/// Parse the command line arguments, also taking values from the
/// environment.
pub fn parse_args() -> Result<ArgMatches, clap::Error> {
    debug!("Parsing command line arguments");

    create_app().try_get_matches()
}

/// Build a `ClientConfig` from parsed arguments.
///
/// Fails if either half of the access key pair is missing, or if only one
/// half was given as an argument.
pub fn client_config(matches: &ArgMatches) -> Result<ClientConfig, CredentialError> {
    let from_args = |id: &str| {
        matches.value_source(id) == Some(ValueSource::CommandLine)
    };

    if from_args("ACCESS_KEY_ID") != from_args("ACCESS_KEY_SECRET") {
        return Err(CredentialError::PartialArguments);
    }

    let access_key_id     = matches.get_one::<String>("ACCESS_KEY_ID").cloned();
    let access_key_secret = matches.get_one::<String>("ACCESS_KEY_SECRET").cloned();

    let credentials = Credentials::new(access_key_id, access_key_secret)?;

    let mut config = ClientConfig::new(credentials);

    if let Some(region) = matches.get_one::<String>("REGION") {
        config.region = Region::new(region);
    }

    config.endpoint_url = matches.get_one::<String>("ENDPOINT_URL").cloned();

    debug!("Client config: {:?}", config);

    Ok(config)
}
