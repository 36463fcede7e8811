#[macro_use] extern crate clap;

use clap::{App, ArgMatches};
use env_logger::{from_env, Env};
use imageapi::{pullspec, Image, ImageError, ImageRepository, PullSpec};
use serde::de::DeserializeOwned;
use std::{
    fs,
    io::{self, Read},
};
use thiserror::Error;

fn main() {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let log_level = matches.value_of("log_level").unwrap_or("warn");
    from_env(Env::default().default_filter_or(log_level)).init();

    let result = match matches.subcommand() {
        ("parse", Some(sub)) => parse(sub),
        ("join", Some(sub)) => join(sub),
        ("metadata", Some(sub)) => metadata(sub),
        ("latest", Some(sub)) => latest(sub),
        _ => unreachable!("subcommand required by cli.yml"),
    };
    if let Err(err) = result {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Image(#[from] ImageError),

    #[error("can't read {0:?}, {1}")]
    Input(String, io::Error),

    #[error("can't decode {0:?}, {1}")]
    Document(String, serde_json::Error),
}

fn parse(matches: &ArgMatches) -> Result<(), CliError> {
    let spec: PullSpec = matches.value_of("spec").unwrap_or("").parse()?;
    let (registry, namespace, name, reference) = spec.as_parts();
    println!("registry: {}", registry.unwrap_or(""));
    println!("namespace: {}", namespace.unwrap_or(""));
    println!("name: {}", name);
    println!("ref: {}", reference.unwrap_or(""));
    Ok(())
}

fn join(matches: &ArgMatches) -> Result<(), CliError> {
    println!(
        "{}",
        pullspec::join(
            matches.value_of("registry").unwrap_or(""),
            matches.value_of("namespace").unwrap_or(""),
            matches.value_of("name").unwrap_or(""),
            matches.value_of("ref").unwrap_or(""),
        )
    );
    Ok(())
}

fn metadata(matches: &ArgMatches) -> Result<(), CliError> {
    let path = matches.value_of("file").unwrap_or("-");
    let image: Image = read_document(path)?;
    let image = imageapi::image_with_metadata(image)?;
    print_json(path, &image)
}

fn latest(matches: &ArgMatches) -> Result<(), CliError> {
    let path = matches.value_of("file").unwrap_or("-");
    let tag = matches.value_of("tag").unwrap_or("");
    let repo: ImageRepository = read_document(path)?;
    let event = repo.latest_tagged_image(tag)?;
    print_json(path, event)
}

fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, CliError> {
    let text = if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    }
    .map_err(|err| CliError::Input(path.to_owned(), err))?;
    log::debug!("read {} bytes from {:?}", text.len(), path);
    serde_json::from_str(&text).map_err(|err| CliError::Document(path.to_owned(), err))
}

fn print_json<T: serde::Serialize>(path: &str, value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::Document(path.to_owned(), err))?;
    println!("{}", text);
    Ok(())
}
