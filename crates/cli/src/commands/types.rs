use crate::OutputFormat;

/// Print the registered record types.
pub(crate) fn cmd_types(output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    let registry = docket_core::registry();
    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "types": registry
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "key": t.key,
                            "name": t.name,
                            "prefix": t.prefix,
                            "required_fields": t.fields.iter().map(|f| f.name).collect::<Vec<_>>(),
                            "remarks_required_on_reject": t.remarks_required_on_reject,
                            "remarks_required_on_time_out": t.remarks_required_on_time_out,
                        })
                    })
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => {
            for t in registry {
                let fields: Vec<&str> = t.fields.iter().map(|f| f.name).collect();
                println!("({}) {} [{}]: {}", t.prefix, t.name, t.key, fields.join(", "));
            }
        }
    }
}
