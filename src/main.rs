//! Command-line driver: fill the loan form from `Field=value` arguments,
//! submit it once and print the decision.

use std::path::PathBuf;

use loanform::config;
use loanform::features::{
    CREDIT_HISTORY_CHOICES, Dependents, Education, Field, Gender, PropertyArea, SelectOption,
    YesNo,
};
use loanform::form::{DecisionView, FormController, Outcome};
use loanform::logging;
use loanform::prediction::HttpPredictionClient;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    match logging::init() {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "Writing log file"),
        Ok(None) => {}
        Err(err) => eprintln!("Logging disabled: {err}"),
    }

    let config = match &options.config_path {
        Some(path) => config::load_from_path(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    let client = HttpPredictionClient::new(&config.service).map_err(|err| err.to_string())?;
    tracing::info!(endpoint = %client.endpoint(), "Using prediction service");

    let mut form = FormController::new();
    for (field, value) in &options.edits {
        form.set_field(*field, value);
    }
    match form.submit(&client).map_err(|err| err.to_string())? {
        Outcome::Success(prediction) => {
            let view = DecisionView::from(&prediction);
            println!("Decision: {} ({})", view.label, view.percentage);
            Ok(())
        }
        Outcome::Failure { message } => Err(format!("Error: {message}")),
    }
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    config_path: Option<PathBuf>,
    edits: Vec<(Field, String)>,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                options.config_path = Some(PathBuf::from(path));
            }
            _ => {
                let (name, value) = arg
                    .split_once('=')
                    .ok_or_else(|| format!("Expected Field=value or a flag, got `{arg}`"))?;
                let field = name
                    .parse::<Field>()
                    .map_err(|err| format!("{err}. Valid fields: {}", field_names()))?;
                options.edits.push((field, value.to_string()));
            }
        }
    }
    Ok(Some(options))
}

fn field_names() -> String {
    Field::ALL
        .iter()
        .map(|field| field.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn help_text() -> String {
    let fields = Field::ALL
        .iter()
        .map(|field| format!("  {field}: {}", field_values(*field)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Usage: loanform [--config PATH] [Field=value ...]\n\n\
Submits the loan form to the prediction service and prints the decision.\n\
Unspecified fields keep their defaults. Empty, invalid or negative numbers\n\
become 0; an empty Credit_History means unknown.\n\n\
Fields:\n{fields}"
    )
}

fn field_values(field: Field) -> String {
    match field {
        Field::Gender => choices::<Gender>(),
        Field::Married | Field::SelfEmployed => choices::<YesNo>(),
        Field::Dependents => choices::<Dependents>(),
        Field::Education => choices::<Education>(),
        Field::PropertyArea => choices::<PropertyArea>(),
        Field::CreditHistory => CREDIT_HISTORY_CHOICES
            .iter()
            .map(|(value, label)| {
                let value = if value.is_empty() { "\"\"" } else { value };
                format!("{value} ({label})")
            })
            .collect::<Vec<_>>()
            .join(" | "),
        other if other.is_numeric() => "(number)".to_string(),
        _ => "(text)".to_string(),
    }
}

fn choices<T: SelectOption>() -> String {
    T::ALL
        .iter()
        .map(|option| {
            if option.label() == option.wire_value() {
                option.wire_value().to_string()
            } else {
                format!("{} ({})", option.wire_value(), option.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
