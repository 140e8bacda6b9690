use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forms-demo", version, about = "Validate Ledgerly form values")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// List registered forms
    List,
    /// Print a valid sample value bag as JSON
    Sample { form: String },
    /// Validate a JSON value bag (file, or stdin when omitted)
    Validate {
        form: String,
        values: Option<PathBuf>,
        /// Server-reported field error, applied after validation
        #[arg(long = "server-error", value_name = "FIELD=MESSAGE", value_parser = parse_server_error)]
        server_errors: Vec<(String, String)>,
    },
}

fn parse_server_error(s: &str) -> Result<(String, String), String> {
    let (field, message) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=message, got '{}'", s))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((field.to_string(), message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_with_server_errors() {
        let cli = Cli::try_parse_from([
            "forms-demo",
            "validate",
            "client",
            "data/client.json",
            "--server-error",
            "email=Email already registered",
            "--server-error",
            "pan=",
        ])
        .unwrap();

        let Cmd::Validate { form, values, server_errors } = cli.cmd else {
            panic!("expected validate");
        };
        assert_eq!(form, "client");
        assert_eq!(values, Some(PathBuf::from("data/client.json")));
        assert_eq!(
            server_errors,
            vec![
                ("email".to_string(), "Email already registered".to_string()),
                ("pan".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_values_default_to_stdin() {
        let cli = Cli::try_parse_from(["forms-demo", "validate", "invoice"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Validate { values: None, .. }));
    }

    #[test]
    fn test_bad_server_error_is_rejected() {
        assert!(Cli::try_parse_from(["forms-demo", "validate", "client", "--server-error", "oops"]).is_err());
        assert!(Cli::try_parse_from(["forms-demo", "validate", "client", "--server-error", "=msg"]).is_err());
        assert!(Cli::try_parse_from(["forms-demo", "sample"]).is_err());
    }
}
