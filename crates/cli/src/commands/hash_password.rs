use std::process;

use crate::{report_error, OutputFormat};

/// Hash a password for seeding the users collection.
pub(crate) fn cmd_hash_password(password: &str, output: OutputFormat, quiet: bool) {
    if password.is_empty() {
        report_error("error: password must not be empty", output, quiet);
        process::exit(1);
    }
    let hash = docket_engine::hash_password(password);
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "password_hash": hash }));
        }
        OutputFormat::Text => println!("{}", hash),
    }
}
