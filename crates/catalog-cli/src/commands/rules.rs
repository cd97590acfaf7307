//! Implementation of the `catalog rules` command.

use catalog_core::{
    application::RuleInfo,
    domain::{Limits, ProductValidator},
};

use crate::{
    cli::{RulesArgs, RulesFormat},
    commands::run_limits,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: RulesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let rules = rule_rows(args.field.as_deref(), run_limits(&config, None)?)?;

    match args.format {
        RulesFormat::Table => {
            output.header("Validation Rules:")?;
            let width = rules.iter().map(|r| r.field.len()).max().unwrap_or(0);
            let mut current = "";
            for rule in &rules {
                let field = if rule.field == current {
                    ""
                } else {
                    current = &rule.field;
                    rule.field.as_str()
                };
                output.print(&format!(
                    "  {field:<width$}  {:<8} {:<22} {}",
                    rule.code, rule.constraint, rule.message
                ))?;
            }
        }

        // Plain lines for scripts; written even in quiet mode.
        RulesFormat::List => {
            for rule in &rules {
                println!("{} {}", rule.field, rule.code);
            }
        }

        RulesFormat::Json => output.json(&rules)?,

        RulesFormat::Csv => {
            println!("field,type,kind,code,constraint,message");
            for rule in &rules {
                println!("{}", csv_row(rule));
            }
        }
    }

    Ok(())
}

fn csv_row(rule: &RuleInfo) -> String {
    [
        rule.field.as_str(),
        rule.value_type.as_str(),
        rule.kind.as_str(),
        rule.code.as_str(),
        rule.constraint.as_str(),
        rule.message.as_str(),
    ]
    .map(csv_field)
    .join(",")
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Rule rows for one field, or the whole table when no field is given.
fn rule_rows(field: Option<&str>, limits: Limits) -> CliResult<Vec<RuleInfo>> {
    let validator = ProductValidator::with_limits(limits);
    Ok(match field {
        Some(field) => RuleInfo::for_field(validator.rules(), field)?,
        None => RuleInfo::table(validator.rules()),
    })
}

#[cfg(test)]
mod tests {
    use catalog_core::domain::{ErrorKind, ValueType};

    use super::*;

    #[test]
    fn table_covers_product_and_color_fields() {
        let rows = rule_rows(None, Limits::default()).unwrap();
        assert!(rows.iter().any(|r| r.field == "name" && r.code == "required"));
        assert!(rows.iter().any(|r| r.field == "colors.price"));
    }

    #[test]
    fn quantity_rows_follow_configured_limit() {
        let rows = rule_rows(Some("quantity"), Limits { max_quantity: 500 }).unwrap();
        assert!(rows.iter().all(|r| r.field == "quantity"));
        assert!(rows.iter().any(|r| r.constraint.contains("500")));
    }

    #[test]
    fn unknown_field_is_not_found() {
        let err = rule_rows(Some("weight"), Limits::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(csv_field("price"), "price");
    }

    #[test]
    fn separators_and_quotes_are_escaped() {
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn row_has_every_column() {
        let rule = RuleInfo {
            field: "colors.price".into(),
            value_type: ValueType::Number,
            kind: ErrorKind::OutOfRange,
            code: "max".into(),
            constraint: "<= 10000".into(),
            message: "Price must be at most 10,000".into(),
        };
        assert_eq!(
            csv_row(&rule),
            "colors.price,number,out_of_range,max,<= 10000,\"Price must be at most 10,000\""
        );
    }
}
